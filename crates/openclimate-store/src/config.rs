//! Store configuration
//!
//! A store is opened from an explicit `StoreConfig` naming its file, the
//! partitions it declares and how new indices are assigned.

use openclimate_core::Partition;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where the store keeps its bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorePath {
    File(PathBuf),
    InMemory,
}

/// How `create` picks the index of a new record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// `count(live records) + 1`
    ///
    /// Compatible with stores written by the legacy service. After any
    /// delete this can hand out an index that is still live, and the create
    /// then overwrites that record.
    LiveCount,
    /// Per-partition counter persisted next to the records, never lower than
    /// `max(existing key) + 1`. Indices are never reused.
    #[default]
    Monotonic,
}

impl IndexPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexPolicy::LiveCount => "live-count",
            IndexPolicy::Monotonic => "monotonic",
        }
    }
}

impl fmt::Display for IndexPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live-count" | "live_count" | "count" => Ok(IndexPolicy::LiveCount),
            "monotonic" => Ok(IndexPolicy::Monotonic),
            _ => Err(format!("unknown index policy '{}'", s)),
        }
    }
}

/// Everything needed to open a `KeyedStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: StorePath,
    pub partitions: Vec<Partition>,
    pub index_policy: IndexPolicy,
}

impl StoreConfig {
    /// File-backed store declaring every known partition
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: StorePath::File(path.as_ref().to_path_buf()),
            partitions: Partition::ALL.to_vec(),
            index_policy: IndexPolicy::default(),
        }
    }

    /// In-memory store declaring every known partition
    pub fn in_memory() -> Self {
        Self {
            path: StorePath::InMemory,
            partitions: Partition::ALL.to_vec(),
            index_policy: IndexPolicy::default(),
        }
    }

    /// Replace the declared partitions (duplicates are dropped)
    pub fn with_partitions(mut self, partitions: impl IntoIterator<Item = Partition>) -> Self {
        let mut declared: Vec<Partition> = Vec::new();
        for partition in partitions {
            if !declared.contains(&partition) {
                declared.push(partition);
            }
        }
        self.partitions = declared;
        self
    }

    pub fn with_index_policy(mut self, index_policy: IndexPolicy) -> Self {
        self.index_policy = index_policy;
        self
    }

    pub fn declares(&self, partition: Partition) -> bool {
        self.partitions.contains(&partition)
    }
}
