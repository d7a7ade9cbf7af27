use serde::{Deserialize, Serialize};

use super::record::{impl_pledge_owner, impl_record};
use super::{GeoProfile, Index, Partition};

/// Emissions rolled up from a region's reporting children
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionsSummary {
    pub year: i32,
    pub total_mt_co2e: f64,
    pub per_capita_t_co2e: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MitigationSummary {
    pub pledge_count: u32,
    pub reduction_target_percent: f64,
    pub target_year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationSummary {
    pub project_count: u32,
    pub investment_usd: f64,
}

/// A sub-national actor: state, province, prefecture
///
/// `country` is matched against `Country::name` by string only. The
/// summaries are written by whoever computes them and are not refreshed when
/// children change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub index: Index,
    pub name: String,
    pub country: String,
    #[serde(flatten)]
    pub profile: GeoProfile,
    /// Indices of companies operating in this region
    pub companies: Vec<Index>,
    /// External-storage hashes of uploaded reports
    pub reports: Vec<String>,
    pub emissions: EmissionsSummary,
    pub mitigation: MitigationSummary,
    pub adaptation: AdaptationSummary,
    pub pledges: Vec<Index>,
}

impl Region {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            ..Self::default()
        }
    }

    /// Whether this region claims to belong to the named country
    pub fn belongs_to(&self, country: &str) -> bool {
        self.country == country
    }
}

impl_pledge_owner!(Region);
impl_record!(Region, Partition::States);
