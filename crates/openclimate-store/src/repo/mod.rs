//! Typed repositories over the keyed store
//!
//! `Repository<T>` is the single CRUD implementation shared by every record
//! kind; `Repositories` groups one per kind and adds the relation lookups the
//! aggregator walks.

pub mod relations;
pub mod repository;

pub use relations::Repositories;
pub use repository::Repository;
