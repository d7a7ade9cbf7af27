//! CLI command handlers and the plumbing they share

use clap::{Args, Subcommand};
use openclimate_core::errors::{parse_index, ExError, OcError};
use openclimate_core::{Index, Record};
use openclimate_store::errors::{io_error, Result};
use openclimate_store::{IndexPolicy, KeyedStore, Repository, StoreConfig};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

pub mod actor;
pub mod init;
pub mod records;

/// Options every command accepts
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite database file (parent directories are created)
    #[arg(long, global = true, default_value = ".openclimate/openclimate.db")]
    pub db: PathBuf,

    /// How new record indices are assigned: monotonic or live-count
    #[arg(long, global = true, default_value = "monotonic")]
    pub index_policy: IndexPolicy,
}

/// Lookups shared by every record kind
#[derive(Debug, Subcommand)]
pub enum ReadCommand {
    /// Fetch one record by index
    Get { id: String },
    /// First record whose name matches exactly
    Find { name: String },
    /// Every record, in index order
    List,
    /// Remove one record by index
    Delete { id: String },
}

pub fn open_store(global: &GlobalArgs) -> Result<KeyedStore> {
    if let Some(parent) = global.db.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
        }
    }
    KeyedStore::open(StoreConfig::file(&global.db).with_index_policy(global.index_policy))
}

/// Textual id from the command line to a record index
pub fn parse_id(input: &str) -> Result<Index> {
    Ok(parse_index(input)?)
}

pub fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ExError::from(OcError::from(e)))
}

pub fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ExError::from(OcError::from(e)))?;
    println!("{}", text);
    Ok(())
}

pub fn run_read<T: Record>(repo: Repository<'_, T>, command: ReadCommand) -> Result<Value> {
    match command {
        ReadCommand::Get { id } => to_json(&repo.retrieve_by_index(parse_id(&id)?)?),
        ReadCommand::Find { name } => to_json(&repo.retrieve_by_name(&name)?),
        ReadCommand::List => to_json(&repo.retrieve_all()?),
        ReadCommand::Delete { id } => {
            let index = parse_id(&id)?;
            repo.delete(index)?;
            Ok(json!({ "partition": T::PARTITION.name(), "deleted": index }))
        }
    }
}
