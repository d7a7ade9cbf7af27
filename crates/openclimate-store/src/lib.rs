//! OpenClimate Store - keyed entity persistence over SQLite
//!
//! Provides:
//! - `KeyedStore`: fixed named partitions mapping integer keys to JSON records
//! - `StoreConfig`: the partitions, file location and index policy of a store
//! - `Repository<T>`: typed CRUD and lookup-by-name for any `Record`
//! - `Repositories`: the per-kind repositories plus relation helpers

pub mod config;
pub mod db;
pub mod errors;
pub mod kv;
pub mod repo;
pub mod schema;

pub use config::{IndexPolicy, StoreConfig, StorePath};
pub use errors::Result;
pub use kv::{KeyedStore, RawRecord};
pub use repo::{Repositories, Repository};
