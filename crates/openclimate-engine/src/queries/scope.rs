//! Which of a company's states appear under each of its countries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// State selection policy for the nation-state drill-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateScope {
    /// Every state the company lists, repeated under every country.
    ///
    /// This is the shape existing dashboards consume.
    #[default]
    AllCompanyStates,
    /// Only states whose `country` equals the country being expanded,
    /// looked up by name and country together
    MatchingCountry,
}

impl StateScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateScope::AllCompanyStates => "all",
            StateScope::MatchingCountry => "matching-country",
        }
    }
}

impl fmt::Display for StateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "all-company-states" => Ok(StateScope::AllCompanyStates),
            "matching" | "matching-country" => Ok(StateScope::MatchingCountry),
            _ => Err(format!("unknown state scope '{}'", s)),
        }
    }
}
