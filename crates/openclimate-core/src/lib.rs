//! OpenClimate Core - entity records and shared facilities
//!
//! This crate provides the pieces every other layer builds on:
//! - Entity records (Country, Region, Company, Pledge, Asset, User) and the
//!   `Record` trait binding each kind to its storage partition
//! - JSON codec helpers that classify decode failures as data corruption
//! - The structured error facility (`ExError`, `ExErrorKind`, `OcError`)
//! - The logging facility (`init`, `log_op_*` macros, test capture)

pub mod codec;
pub mod errors;
pub mod logging_facility;
pub mod model;

pub use openclimate_core_types as core_types;

pub use errors::{ExError, ExErrorKind, OcError, Result};
pub use model::{
    ActorKind, ActorRef, Asset, Company, Country, Index, Partition, Pledge, PledgeOwner, Record,
    Region, User,
};
