//! Relationship aggregator
//!
//! Every public query runs to completion synchronously, fails fast on the
//! first lookup error and never returns a partial view. Failures are wrapped
//! under the query's op with the original error kept as the source.

use openclimate_core::errors::{ExError, ExErrorKind};
use openclimate_core::{log_op_end, log_op_error, log_op_start};
use openclimate_core::{ActorKind, ActorRef, Index, Record, Region};
use openclimate_core_types::RequestContext;
use openclimate_store::errors::Result;
use openclimate_store::{KeyedStore, Repositories};

use super::scope::StateScope;
use super::views::{
    ActorDashboard, ActorSummary, CompanyDashboard, CompanyReview, CountryDashboard, NationState,
    Subnational,
};

/// Read-only query surface over one store
#[derive(Debug, Clone)]
pub struct Aggregator<'s> {
    repos: Repositories<'s>,
    ctx: RequestContext,
}

impl<'s> Aggregator<'s> {
    /// Aggregator with a freshly minted request context
    pub fn new(store: &'s KeyedStore) -> Self {
        Self::with_context(store, RequestContext::new())
    }

    pub fn with_context(store: &'s KeyedStore, ctx: RequestContext) -> Self {
        Self {
            repos: Repositories::new(store),
            ctx,
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    pub fn repositories(&self) -> &Repositories<'s> {
        &self.repos
    }

    /// Actor record plus its resolved pledges
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: the actor is a state (states are only reachable
    ///   through the nation-state drill-down)
    /// - `NotFound`: the actor or one of its pledges is missing
    /// - `DataCorruption`: a fetched record does not decode
    pub fn dashboard(&self, actor: ActorRef) -> Result<ActorDashboard> {
        let op = "dashboard";
        log_op_start!(
            op,
            request_id = self.ctx.request_id.as_str(),
            actor_kind = actor.kind.as_str(),
            index = actor.index
        );
        let start = std::time::Instant::now();

        let dashboard = self.dashboard_impl(actor).map_err(|e| {
            let e = self.fail(op, e);
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = self.ctx.request_id.as_str()
            );
            e
        })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = self.ctx.request_id.as_str(),
            pledge_count = dashboard.pledges().len()
        );
        Ok(dashboard)
    }

    fn dashboard_impl(&self, actor: ActorRef) -> Result<ActorDashboard> {
        match actor.kind {
            ActorKind::Country => {
                let country = self.repos.countries.retrieve_by_index(actor.index)?;
                let pledges = self.repos.pledges_of(&country.pledges)?;
                Ok(ActorDashboard::Country(CountryDashboard::new(
                    country, pledges,
                )))
            }
            ActorKind::Company => {
                let company = self.repos.companies.retrieve_by_index(actor.index)?;
                let pledges = self.repos.pledges_of(&company.pledges)?;
                Ok(ActorDashboard::Company(CompanyDashboard::new(
                    company, pledges,
                )))
            }
            ActorKind::State => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_partition(actor.kind.partition())
                .with_index(actor.index)
                .with_message("dashboards are served for countries and companies only")),
        }
    }

    /// Certificates and climate reports of one company
    pub fn company_review(&self, company: Index) -> Result<CompanyReview> {
        let op = "company_review";
        log_op_start!(
            op,
            request_id = self.ctx.request_id.as_str(),
            index = company
        );
        let start = std::time::Instant::now();

        let review = self
            .repos
            .companies
            .retrieve_by_index(company)
            .map(CompanyReview::from)
            .map_err(|e| {
                let e = self.fail(op, e);
                log_op_error!(
                    op,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = self.ctx.request_id.as_str()
                );
                e
            })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = self.ctx.request_id.as_str()
        );
        Ok(review)
    }

    /// Every actor of one kind, in store order
    pub fn list_actors(&self, kind: ActorKind) -> Result<Vec<ActorSummary>> {
        let op = "list_actors";
        log_op_start!(
            op,
            request_id = self.ctx.request_id.as_str(),
            actor_kind = kind.as_str()
        );
        let start = std::time::Instant::now();

        let actors = self.list_actors_impl(kind).map_err(|e| {
            let e = self.fail(op, e);
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = self.ctx.request_id.as_str()
            );
            e
        })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = self.ctx.request_id.as_str(),
            actor_count = actors.len()
        );
        Ok(actors)
    }

    /// Shorthand for `list_actors(ActorKind::Country)`
    pub fn list_nation_states(&self) -> Result<Vec<ActorSummary>> {
        self.list_actors(ActorKind::Country)
    }

    /// Shorthand for `list_actors(ActorKind::Company)`
    pub fn list_multinationals(&self) -> Result<Vec<ActorSummary>> {
        self.list_actors(ActorKind::Company)
    }

    fn list_actors_impl(&self, kind: ActorKind) -> Result<Vec<ActorSummary>> {
        fn summarize<T: Record>(kind: ActorKind, records: Vec<T>) -> Vec<ActorSummary> {
            records
                .into_iter()
                .map(|record| ActorSummary {
                    kind,
                    index: record.index(),
                    name: record.name().to_string(),
                })
                .collect()
        }

        Ok(match kind {
            ActorKind::Country => summarize(kind, self.repos.countries.retrieve_all()?),
            ActorKind::Company => summarize(kind, self.repos.companies.retrieve_all()?),
            ActorKind::State => summarize(kind, self.repos.regions.retrieve_all()?),
        })
    }

    /// Nested drill-down: the company's countries, each with the states
    /// selected by `scope`, each state with its pledges and the company's
    /// assets located there
    ///
    /// Output follows the company's country list order, and within each
    /// country its state list order. State names are resolved once, when
    /// the first country is expanded, so an unknown name fails the call under
    /// either scope; a company with no countries never touches its state
    /// list. Under `MatchingCountry` each country then looks its states up by
    /// name and country, so same-named regions stay apart.
    ///
    /// ## Errors
    ///
    /// The first failing lookup (company, country, state, pledge or asset)
    /// aborts the call; its kind is preserved on the returned error.
    pub fn nation_states(&self, company: Index, scope: StateScope) -> Result<Vec<NationState>> {
        let op = "nation_states";
        log_op_start!(
            op,
            request_id = self.ctx.request_id.as_str(),
            index = company,
            scope = scope.as_str()
        );
        let start = std::time::Instant::now();

        let nation_states = self.nation_states_impl(company, scope).map_err(|e| {
            let e = self.fail(op, e);
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = self.ctx.request_id.as_str()
            );
            e
        })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = self.ctx.request_id.as_str(),
            nation_state_count = nation_states.len(),
            subnational_count = nation_states
                .iter()
                .map(|n| n.subnationals.len())
                .sum::<usize>()
        );
        Ok(nation_states)
    }

    fn nation_states_impl(&self, company: Index, scope: StateScope) -> Result<Vec<NationState>> {
        let company = self.repos.companies.retrieve_by_index(company)?;
        let countries = self.repos.company_countries(&company)?;

        let mut states: Option<Vec<Region>> = None;
        let mut nation_states = Vec::with_capacity(countries.len());

        for country in countries {
            let pledges = self.repos.pledges_of(&country.pledges)?;

            if states.is_none() {
                states = Some(self.repos.company_states(&company)?);
            }
            let in_scope = match scope {
                StateScope::AllCompanyStates => states.clone().unwrap_or_default(),
                StateScope::MatchingCountry => {
                    self.repos.company_states_in(&company, &country.name)?
                }
            };

            let mut subnationals = Vec::with_capacity(in_scope.len());
            for region in &in_scope {
                let state_pledges = self.repos.pledges_of(&region.pledges)?;
                let assets = self.repos.company_assets_in_state(&company, &region.name)?;
                subnationals.push(Subnational::new(region, state_pledges, assets));
            }

            tracing::debug!(
                country = %country.name,
                subnationals = subnationals.len(),
                "nation state assembled"
            );
            nation_states.push(NationState {
                name: country.name,
                pledges,
                subnationals,
            });
        }

        Ok(nation_states)
    }

    /// Wrap a lower-layer failure under `op` and stamp correlation ids
    fn fail(&self, op: &str, cause: ExError) -> ExError {
        let err = ExError::wrap(op, cause).with_request_id(self.ctx.request_id.clone());
        match &self.ctx.trace_id {
            Some(trace_id) => err.with_trace_id(trace_id.clone()),
            None => err,
        }
    }
}
