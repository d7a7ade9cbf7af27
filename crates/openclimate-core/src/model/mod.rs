pub mod actor;
pub mod asset;
pub mod company;
pub mod country;
pub mod partition;
pub mod pledge;
pub mod record;
pub mod region;
pub mod user;

pub use actor::{ActorKind, ActorRef};
pub use asset::Asset;
pub use company::{Accountability, Company, Location};
pub use country::{Country, GeoProfile};
pub use partition::Partition;
pub use pledge::Pledge;
pub use record::{Index, PledgeOwner, Record};
pub use region::{AdaptationSummary, EmissionsSummary, MitigationSummary, Region};
pub use user::User;
