use serde::{Deserialize, Serialize};

use super::record::{impl_pledge_owner, impl_record};
use super::{Index, Partition};

/// Geographic and economic context shared by countries and regions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoProfile {
    /// Area in square kilometres
    pub area: f64,
    pub iso: String,
    pub population: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub revenue: f64,
    pub company_size: u32,
    /// Headquarters / seat of government
    pub hq: String,
}

/// A nation-state actor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub index: Index,
    pub name: String,
    #[serde(flatten)]
    pub profile: GeoProfile,
    /// Pledge indices made by this country
    pub pledges: Vec<Index>,
}

impl Country {
    /// A country with only its name set; the index is assigned on create
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_profile(mut self, profile: GeoProfile) -> Self {
        self.profile = profile;
        self
    }
}

impl_pledge_owner!(Country);
impl_record!(Country, Partition::Countries);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PledgeOwner, Record};

    #[test]
    fn test_new_country_is_unindexed() {
        let country = Country::new("Testland");
        assert_eq!(country.index(), 0);
        assert_eq!(Record::name(&country), "Testland");
        assert_eq!(Country::PARTITION, Partition::Countries);
    }

    #[test]
    fn test_profile_fields_are_flat_in_json() {
        let country = Country::new("Testland").with_profile(GeoProfile {
            iso: "TL".to_string(),
            population: 1_000,
            ..GeoProfile::default()
        });
        let json = serde_json::to_value(&country).unwrap();
        assert_eq!(json["iso"], "TL");
        assert_eq!(json["population"], 1000);
    }

    #[test]
    fn test_add_pledge_dedupes() {
        let mut country = Country::new("Testland");
        country.add_pledge(3);
        country.add_pledge(3);
        country.add_pledge(5);
        assert_eq!(country.pledges, vec![3, 5]);
    }
}
