use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named subdivision of the store holding exactly one record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Partition {
    Users,
    Companies,
    /// Sub-national regions: states, provinces, prefectures
    States,
    Cities,
    Countries,
    Oversight,
    Assets,
    Requests,
    Pledges,
}

impl Partition {
    /// Every partition the platform knows about, in declaration order
    pub const ALL: [Partition; 9] = [
        Partition::Users,
        Partition::Companies,
        Partition::States,
        Partition::Cities,
        Partition::Countries,
        Partition::Oversight,
        Partition::Assets,
        Partition::Requests,
        Partition::Pledges,
    ];

    /// Stable on-disk name
    pub fn name(&self) -> &'static str {
        match self {
            Partition::Users => "Users",
            Partition::Companies => "Companies",
            Partition::States => "States",
            Partition::Cities => "Cities",
            Partition::Countries => "Countries",
            Partition::Oversight => "Oversight",
            Partition::Assets => "Assets",
            Partition::Requests => "Requests",
            Partition::Pledges => "Pledges",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Partition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Partition::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown partition '{}'", s))
    }
}
