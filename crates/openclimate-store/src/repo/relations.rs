//! Per-kind repositories and the ownership edges between records
//!
//! Edges are soft: a company names its countries and states, actors list
//! pledge indices, a company lists asset indices. Nothing here validates them
//! on write; a dangling edge surfaces as `NotFound` when it is followed.

use openclimate_core::errors::ExErrorKind;
use openclimate_core::{
    ActorKind, Asset, Company, Country, Index, Pledge, PledgeOwner, Region, User,
};

use crate::errors::Result;
use crate::kv::KeyedStore;
use crate::repo::Repository;

/// One repository per record kind, sharing a store
#[derive(Clone, Copy)]
pub struct Repositories<'s> {
    pub countries: Repository<'s, Country>,
    pub regions: Repository<'s, Region>,
    pub companies: Repository<'s, Company>,
    pub pledges: Repository<'s, Pledge>,
    pub assets: Repository<'s, Asset>,
    pub users: Repository<'s, User>,
}

impl<'s> Repositories<'s> {
    pub fn new(store: &'s KeyedStore) -> Self {
        Self {
            countries: Repository::new(store),
            regions: Repository::new(store),
            companies: Repository::new(store),
            pledges: Repository::new(store),
            assets: Repository::new(store),
            users: Repository::new(store),
        }
    }

    /// Fetch each pledge in order; the first missing one fails the call
    pub fn pledges_of(&self, indices: &[Index]) -> Result<Vec<Pledge>> {
        indices
            .iter()
            .map(|&index| self.pledges.retrieve_by_index(index))
            .collect()
    }

    /// Resolve the company's country names, in the company's order
    pub fn company_countries(&self, company: &Company) -> Result<Vec<Country>> {
        company
            .countries
            .iter()
            .map(|name| self.countries.retrieve_by_name(name))
            .collect()
    }

    /// Resolve the company's state names, in the company's order
    pub fn company_states(&self, company: &Company) -> Result<Vec<Region>> {
        company
            .states
            .iter()
            .map(|name| self.regions.retrieve_by_name(name))
            .collect()
    }

    /// The company's states that lie in `country`, in the company's order
    ///
    /// Each name is looked up together with the country, so same-named
    /// regions in different countries resolve to their own records. A name
    /// with no region in this country is skipped.
    pub fn company_states_in(&self, company: &Company, country: &str) -> Result<Vec<Region>> {
        let mut regions = Vec::new();
        for name in &company.states {
            match self.regions.retrieve_by_name_and_country(name, country) {
                Ok(region) => regions.push(region),
                Err(e) if e.kind() == ExErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(regions)
    }

    /// The company's assets located in the named state
    ///
    /// Every asset index the company lists is fetched, so a dangling one
    /// fails the call even if it would have been filtered out.
    pub fn company_assets_in_state(&self, company: &Company, state: &str) -> Result<Vec<Asset>> {
        let mut assets = Vec::new();
        for &index in &company.assets {
            let asset = self.assets.retrieve_by_index(index)?;
            if asset.is_in_state(state) {
                assets.push(asset);
            }
        }
        Ok(assets)
    }

    /// Create a pledge and append it to its actor's pledge list
    ///
    /// Two separate writes: if the actor update fails the pledge exists
    /// without being listed by its actor.
    pub fn attach_pledge(&self, pledge: Pledge) -> Result<Pledge> {
        match pledge.actor.kind {
            ActorKind::Country => attach_to(self.countries, self.pledges, pledge),
            ActorKind::Company => attach_to(self.companies, self.pledges, pledge),
            ActorKind::State => attach_to(self.regions, self.pledges, pledge),
        }
    }

    /// Create an asset and append it to its owning company's asset list
    pub fn attach_asset(&self, asset: Asset) -> Result<Asset> {
        let mut company = self.companies.retrieve_by_index(asset.company)?;
        let asset = self.assets.create(asset)?;
        company.add_asset(asset.index);
        self.companies.save(&company)?;

        tracing::debug!(asset = asset.index, company = company.index, "asset attached");
        Ok(asset)
    }
}

impl std::fmt::Debug for Repositories<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Look the owner up first, so a missing actor leaves no orphan pledge
fn attach_to<T: PledgeOwner>(
    owners: Repository<'_, T>,
    pledges: Repository<'_, Pledge>,
    pledge: Pledge,
) -> Result<Pledge> {
    let mut owner = owners.retrieve_by_index(pledge.actor.index)?;
    let pledge = pledges.create(pledge)?;
    owner.add_pledge(pledge.index);
    owners.save(&owner)?;

    tracing::debug!(
        pledge = pledge.index,
        actor_kind = %pledge.actor.kind,
        actor_index = pledge.actor.index,
        "pledge attached"
    );
    Ok(pledge)
}
