//! OpenClimate Engine - read-side orchestration
//!
//! Assembles the fixed-shape views a gateway serves (actor dashboards,
//! company reviews, actor lists and the nation-state drill-down) from the
//! typed repositories of `openclimate-store`.

pub mod queries;

pub use queries::aggregator::Aggregator;
pub use queries::scope::StateScope;
pub use queries::views::{
    ActorDashboard, ActorSummary, CompanyDashboard, CompanyReview, CountryDashboard, NationState,
    Subnational,
};
