//! Schema scripts embedded at compile time

pub struct SchemaStep {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All schema steps in application order
pub fn get_steps() -> Vec<SchemaStep> {
    vec![SchemaStep {
        id: "001_keyed_store",
        sql: include_str!("../../schema/001_keyed_store.sql"),
    }]
}
