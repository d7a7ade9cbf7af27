use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Index, Partition};

/// Kind of entity that can own pledges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    #[default]
    Country,
    Company,
    State,
}

impl ActorKind {
    /// Partition holding records of this kind
    pub fn partition(&self) -> Partition {
        match self {
            ActorKind::Country => Partition::Countries,
            ActorKind::Company => Partition::Companies,
            ActorKind::State => Partition::States,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Country => "country",
            ActorKind::Company => "company",
            ActorKind::State => "state",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "country" | "nation-state" => Ok(ActorKind::Country),
            "company" | "multinational" => Ok(ActorKind::Company),
            "state" | "region" | "subnational" => Ok(ActorKind::State),
            _ => Err(format!("unknown actor kind '{}'", s)),
        }
    }
}

/// Soft reference to an actor record (no integrity checking)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActorRef {
    pub kind: ActorKind,
    pub index: Index,
}

impl ActorRef {
    pub fn new(kind: ActorKind, index: Index) -> Self {
        Self { kind, index }
    }

    pub fn country(index: Index) -> Self {
        Self::new(ActorKind::Country, index)
    }

    pub fn company(index: Index) -> Self {
        Self::new(ActorKind::Company, index)
    }

    pub fn state(index: Index) -> Self {
        Self::new(ActorKind::State, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_aliases_parse() {
        assert_eq!("nation-state".parse::<ActorKind>().unwrap(), ActorKind::Country);
        assert_eq!("multinational".parse::<ActorKind>().unwrap(), ActorKind::Company);
        assert_eq!("Region".parse::<ActorKind>().unwrap(), ActorKind::State);
        assert!("planet".parse::<ActorKind>().is_err());
    }

    #[test]
    fn test_kind_partition() {
        assert_eq!(ActorKind::State.partition(), Partition::States);
        assert_eq!(ActorRef::company(4).kind.partition(), Partition::Companies);
    }
}
