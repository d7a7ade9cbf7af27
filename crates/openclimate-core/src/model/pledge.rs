use serde::{Deserialize, Serialize};

use super::record::impl_record;
use super::{ActorRef, Index, Partition};

/// A climate commitment made by an actor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pledge {
    pub index: Index,
    pub name: String,
    /// Actor that made the pledge
    pub actor: ActorRef,
    /// e.g. "absolute emissions", "intensity", "renewable share"
    pub pledge_type: String,
    pub base_year: i32,
    pub target_year: i32,
    /// Target reduction in percent of the base year
    pub goal: f64,
    /// Whether the pledge is backed by regulation
    pub regulatory: bool,
    pub description: String,
}

impl Pledge {
    pub fn new(name: impl Into<String>, actor: ActorRef) -> Self {
        Self {
            name: name.into(),
            actor,
            ..Self::default()
        }
    }

    pub fn with_target(mut self, base_year: i32, target_year: i32, goal: f64) -> Self {
        self.base_year = base_year;
        self.target_year = target_year;
        self.goal = goal;
        self
    }
}

impl_record!(Pledge, Partition::Pledges);
