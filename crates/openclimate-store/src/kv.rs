//! Keyed entity store
//!
//! One SQLite file holds every partition. A record is addressed by
//! `(partition, key)` and stores the JSON bytes of one entity. The store owns
//! its connection behind a mutex, so every operation is serialized here and
//! callers can share a `KeyedStore` across threads.

use openclimate_core::codec;
use openclimate_core::errors::{ExError, OcError};
use openclimate_core::{Index, Partition};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use crate::config::{IndexPolicy, StoreConfig, StorePath};
use crate::db;
use crate::errors::{from_rusqlite, lock_poisoned, Result};
use crate::schema::apply_schema;

const UPSERT_RECORD: &str = "INSERT INTO records (partition, key, value) VALUES (?1, ?2, ?3)
     ON CONFLICT(partition, key) DO UPDATE SET value = excluded.value";

/// A stored record before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub key: Index,
    pub value: Vec<u8>,
}

/// Persistence primitive over fixed named partitions
pub struct KeyedStore {
    conn: Mutex<Connection>,
    config: StoreConfig,
}

impl KeyedStore {
    /// Open (or create) the store and declare its partitions
    ///
    /// Opening is idempotent: existing partitions and records are kept and
    /// any partition missing from the file is created.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let mut conn = match &config.path {
            StorePath::File(path) => db::open(path)?,
            StorePath::InMemory => db::open_in_memory()?,
        };
        db::configure(&conn)?;
        apply_schema(&mut conn)?;

        for partition in &config.partitions {
            conn.execute(
                "INSERT OR IGNORE INTO partitions (name, next_index) VALUES (?1, 1)",
                [partition.name()],
            )
            .map_err(from_rusqlite)?;
        }

        tracing::debug!(
            partitions = config.partitions.len(),
            index_policy = %config.index_policy,
            "keyed store opened"
        );

        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    /// Shorthand for an in-memory store with every partition declared
    pub fn in_memory() -> Result<Self> {
        Self::open(StoreConfig::in_memory())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.config.partitions
    }

    pub fn index_policy(&self) -> IndexPolicy {
        self.config.index_policy
    }

    /// Serialize `value` and write it at `key`, replacing any previous record
    pub fn save<T: Serialize>(&self, partition: Partition, key: Index, value: &T) -> Result<()> {
        let bytes = codec::encode(value)?;
        self.save_bytes(partition, key, &bytes)
    }

    /// Write already-encoded bytes at `key`, replacing any previous record
    ///
    /// The partition counter is raised past `key` in the same transaction, so
    /// an index written here is never allocated again by `insert_next`.
    pub fn save_bytes(&self, partition: Partition, key: Index, bytes: &[u8]) -> Result<()> {
        self.check_declared(partition)?;
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        tx.execute(UPSERT_RECORD, params![partition.name(), key, bytes])
            .map_err(|e| from_rusqlite(e).with_partition(partition).with_index(key))?;
        advance_counter(&tx, partition, key)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(partition = %partition, key, "record saved");
        Ok(())
    }

    /// Raw bytes stored at `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing is stored at `key`.
    pub fn get(&self, partition: Partition, key: Index) -> Result<Vec<u8>> {
        self.check_declared(partition)?;
        let conn = self.lock()?;
        let value: Option<Vec<u8>> = conn
            .query_row(
                "SELECT value FROM records WHERE partition = ?1 AND key = ?2",
                params![partition.name(), key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_partition(partition).with_index(key))?;

        value.ok_or_else(|| {
            ExError::from(OcError::RecordNotFound {
                partition,
                index: key,
            })
        })
    }

    /// Every record of the partition in ascending key order
    ///
    /// The result is a plain vector, so callers can walk it as often as they
    /// like; each call reads the partition afresh.
    pub fn get_all(&self, partition: Partition) -> Result<Vec<RawRecord>> {
        self.check_declared(partition)?;
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT key, value FROM records WHERE partition = ?1 ORDER BY key ASC")
            .map_err(from_rusqlite)?;
        let records = stmt
            .query_map([partition.name()], |row| {
                Ok(RawRecord {
                    key: row.get(0)?,
                    value: row.get(1)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite(e).with_partition(partition))?;

        Ok(records)
    }

    /// Decode every record of the partition as `T`
    ///
    /// # Errors
    ///
    /// Returns `DataCorruption` for the first record that does not decode;
    /// no partial result is returned.
    pub fn get_all_decoded<T: DeserializeOwned>(&self, partition: Partition) -> Result<Vec<T>> {
        self.get_all(partition)?
            .iter()
            .map(|raw| codec::decode(partition, raw.key, &raw.value))
            .collect::<std::result::Result<Vec<T>, OcError>>()
            .map_err(ExError::from)
    }

    /// Remove the record at `key`; other keys are left untouched
    ///
    /// Removing an absent key is not an error.
    pub fn delete(&self, partition: Partition, key: Index) -> Result<()> {
        self.check_declared(partition)?;
        let conn = self.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM records WHERE partition = ?1 AND key = ?2",
                params![partition.name(), key],
            )
            .map_err(|e| from_rusqlite(e).with_partition(partition).with_index(key))?;

        tracing::debug!(partition = %partition, key, removed, "record deleted");
        Ok(())
    }

    /// Number of live records in the partition
    pub fn count(&self, partition: Partition) -> Result<usize> {
        self.check_declared(partition)?;
        let conn = self.lock()?;
        count_live(&conn, partition)
    }

    pub fn contains(&self, partition: Partition, key: Index) -> Result<bool> {
        self.check_declared(partition)?;
        let conn = self.lock()?;
        conn.query_row(
            "SELECT 1 FROM records WHERE partition = ?1 AND key = ?2",
            params![partition.name(), key],
            |_| Ok(()),
        )
        .optional()
        .map(|found| found.is_some())
        .map_err(from_rusqlite)
    }

    /// Allocate the next index and write the record built for it
    ///
    /// The index is chosen per the configured `IndexPolicy` and the record is
    /// written inside the same immediate transaction, so two concurrent
    /// callers never observe the same allocation. `encode` receives the
    /// allocated index and returns the bytes to store.
    pub fn insert_next<F>(&self, partition: Partition, encode: F) -> Result<Index>
    where
        F: FnOnce(Index) -> Result<Vec<u8>>,
    {
        self.check_declared(partition)?;
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        let index = next_index(&tx, partition, self.config.index_policy)?;
        let bytes = encode(index)?;

        tx.execute(UPSERT_RECORD, params![partition.name(), index, bytes])
            .map_err(|e| from_rusqlite(e).with_partition(partition).with_index(index))?;
        advance_counter(&tx, partition, index)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(partition = %partition, index, "record inserted");
        Ok(index)
    }

    /// Drop every record and reset index counters; partitions stay declared
    pub fn flush(&self) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        tx.execute("DELETE FROM records", []).map_err(from_rusqlite)?;
        tx.execute("UPDATE partitions SET next_index = 1", [])
            .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!("keyed store flushed");
        Ok(())
    }

    fn check_declared(&self, partition: Partition) -> Result<()> {
        if self.config.declares(partition) {
            Ok(())
        } else {
            Err(OcError::UnknownPartition { partition }.into())
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| lock_poisoned())
    }
}

impl std::fmt::Debug for KeyedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn count_live(conn: &Connection, partition: Partition) -> Result<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM records WHERE partition = ?1",
            [partition.name()],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    Ok(usize::try_from(count).unwrap_or_default())
}

/// Keep the partition counter above every key ever written
fn advance_counter(tx: &Transaction<'_>, partition: Partition, key: Index) -> Result<()> {
    tx.execute(
        "UPDATE partitions SET next_index = MAX(next_index, ?1) WHERE name = ?2",
        params![key.saturating_add(1), partition.name()],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

fn next_index(tx: &Transaction<'_>, partition: Partition, policy: IndexPolicy) -> Result<Index> {
    match policy {
        IndexPolicy::LiveCount => {
            let live = count_live(tx, partition)?;
            Ok(live as Index + 1)
        }
        IndexPolicy::Monotonic => {
            let counter: Index = tx
                .query_row(
                    "SELECT next_index FROM partitions WHERE name = ?1",
                    [partition.name()],
                    |row| row.get(0),
                )
                .map_err(from_rusqlite)?;
            let max_key: Index = tx
                .query_row(
                    "SELECT COALESCE(MAX(key), 0) FROM records WHERE partition = ?1",
                    [partition.name()],
                    |row| row.get(0),
                )
                .map_err(from_rusqlite)?;
            Ok(counter.max(max_key + 1))
        }
    }
}
