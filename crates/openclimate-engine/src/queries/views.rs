//! Response shapes assembled by the aggregator
//!
//! Views own copies of the records they were built from; nothing here is
//! written back to the store.

use openclimate_core::model::{Accountability, GeoProfile, Location};
use openclimate_core::{ActorKind, Asset, Company, Country, Index, Pledge, Region};
use serde::Serialize;

/// A country with its pledges resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDashboard {
    pub index: Index,
    pub name: String,
    #[serde(flatten)]
    pub profile: GeoProfile,
    pub pledges: Vec<Pledge>,
}

impl CountryDashboard {
    pub(crate) fn new(country: Country, pledges: Vec<Pledge>) -> Self {
        Self {
            index: country.index,
            name: country.name,
            profile: country.profile,
            pledges,
        }
    }
}

/// A company with its pledges resolved and its disclosure material
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDashboard {
    pub index: Index,
    pub name: String,
    pub description: String,
    pub pledges: Vec<Pledge>,
    pub locations: Vec<Location>,
    pub accountability: Accountability,
    pub certificates: Vec<String>,
    pub climate_reports: Vec<String>,
}

impl CompanyDashboard {
    pub(crate) fn new(company: Company, pledges: Vec<Pledge>) -> Self {
        Self {
            index: company.index,
            name: company.name,
            description: company.description,
            pledges,
            locations: company.locations,
            accountability: company.accountability,
            certificates: company.certificates,
            climate_reports: company.climate_reports,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActorDashboard {
    Country(CountryDashboard),
    Company(CompanyDashboard),
}

impl ActorDashboard {
    pub fn kind(&self) -> ActorKind {
        match self {
            ActorDashboard::Country(_) => ActorKind::Country,
            ActorDashboard::Company(_) => ActorKind::Company,
        }
    }

    pub fn pledges(&self) -> &[Pledge] {
        match self {
            ActorDashboard::Country(d) => &d.pledges,
            ActorDashboard::Company(d) => &d.pledges,
        }
    }
}

/// What auditors look at: certificates and published climate reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyReview {
    pub index: Index,
    pub name: String,
    pub certificates: Vec<String>,
    pub climate_reports: Vec<String>,
}

impl From<Company> for CompanyReview {
    fn from(company: Company) -> Self {
        Self {
            index: company.index,
            name: company.name,
            certificates: company.certificates,
            climate_reports: company.climate_reports,
        }
    }
}

/// One row of an actor list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSummary {
    pub kind: ActorKind,
    pub index: Index,
    pub name: String,
}

/// A country the company operates in, with the states shown beneath it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationState {
    pub name: String,
    pub pledges: Vec<Pledge>,
    pub subnationals: Vec<Subnational>,
}

/// A state with its pledges and the company's assets located there
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subnational {
    pub name: String,
    pub pledges: Vec<Pledge>,
    pub assets: Vec<Asset>,
}

impl Subnational {
    pub(crate) fn new(region: &Region, pledges: Vec<Pledge>, assets: Vec<Asset>) -> Self {
        Self {
            name: region.name.clone(),
            pledges,
            assets,
        }
    }
}
