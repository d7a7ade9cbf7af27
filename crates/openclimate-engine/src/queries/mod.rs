//! Multi-entity read queries.
//!
//! ## Logging Ownership
//!
//! The engine owns lifecycle logging for every query:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The store and repositories below use only `tracing::debug!()`.

pub mod aggregator;
pub mod scope;
pub mod views;
