//! Store table layout
//!
//! Creates the `partitions` and `records` tables on first open. Each step is
//! recorded with a checksum so a changed embedded script is detected instead
//! of silently skipped. Record payloads themselves are never rewritten.

mod checksums;
mod embedded;
mod runner;

pub use runner::apply_schema;
