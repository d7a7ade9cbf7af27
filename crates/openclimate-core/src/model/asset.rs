use serde::{Deserialize, Serialize};

use super::record::impl_record;
use super::{Index, Partition};

/// An operational asset owned by a company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub index: Index,
    pub name: String,
    /// Owning company index
    pub company: Index,
    /// Region name the asset sits in, if any
    pub state: Option<String>,
    pub asset_type: String,
    pub location: String,
    pub capacity_mw: f64,
    pub description: String,
}

impl Asset {
    pub fn new(name: impl Into<String>, company: Index) -> Self {
        Self {
            name: name.into(),
            company,
            ..Self::default()
        }
    }

    pub fn located_in(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn is_in_state(&self, state: &str) -> bool {
        self.state.as_deref() == Some(state)
    }
}

impl_record!(Asset, Partition::Assets);
