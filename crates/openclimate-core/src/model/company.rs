use serde::{Deserialize, Serialize};

use super::record::{impl_pledge_owner, impl_record};
use super::{Index, Partition};

/// A site where a company operates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// How a company's climate claims are verified
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accountability {
    pub framework: String,
    pub auditor: String,
    pub disclosures: Vec<String>,
}

/// A multinational actor
///
/// `countries` and `states` hold names, resolved by name lookup when the
/// company's nested views are assembled. `assets` and `pledges` hold indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub index: Index,
    pub name: String,
    pub description: String,
    pub locations: Vec<Location>,
    pub accountability: Accountability,
    pub certificates: Vec<String>,
    pub climate_reports: Vec<String>,
    pub countries: Vec<String>,
    pub states: Vec<String>,
    pub assets: Vec<Index>,
    pub pledges: Vec<Index>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Record that the company operates in a country (by name)
    pub fn operate_in(mut self, country: impl Into<String>) -> Self {
        let country = country.into();
        if !self.countries.contains(&country) {
            self.countries.push(country);
        }
        self
    }

    /// Record a state known to the company (by name)
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        let state = state.into();
        if !self.states.contains(&state) {
            self.states.push(state);
        }
        self
    }

    pub fn add_asset(&mut self, asset: Index) {
        if !self.assets.contains(&asset) {
            self.assets.push(asset);
        }
    }
}

impl_pledge_owner!(Company);
impl_record!(Company, Partition::Companies);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let company = Company::new("Acme")
            .operate_in("B")
            .operate_in("A")
            .operate_in("B")
            .with_state("Y")
            .with_state("X");
        assert_eq!(company.countries, vec!["B", "A"]);
        assert_eq!(company.states, vec!["Y", "X"]);
    }
}
