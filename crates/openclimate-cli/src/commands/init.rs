//! Database initialization

use openclimate_store::errors::Result;
use serde_json::{json, Value};

use super::{open_store, GlobalArgs};

pub fn execute(global: &GlobalArgs) -> Result<Value> {
    let store = open_store(global)?;
    let partitions: Vec<&str> = store.partitions().iter().map(|p| p.name()).collect();

    Ok(json!({
        "db": global.db.display().to_string(),
        "index_policy": store.index_policy().as_str(),
        "partitions": partitions,
    }))
}
