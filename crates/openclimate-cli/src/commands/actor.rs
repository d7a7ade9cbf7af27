//! Actor views served by the aggregator
//!
//! Usage:
//!   openclimate actor dashboard --kind country <ID>
//!   openclimate actor review <COMPANY_ID>
//!   openclimate actor list --kind company
//!   openclimate actor nation-states <COMPANY_ID> [--scope all|matching-country]

use clap::{Args, Subcommand};
use openclimate_core::{ActorKind, ActorRef};
use openclimate_core_types::RequestContext;
use openclimate_engine::{Aggregator, StateScope};
use openclimate_store::errors::Result;
use serde_json::Value;

use super::{open_store, parse_id, to_json, GlobalArgs};

#[derive(Debug, Args)]
pub struct ActorArgs {
    #[command(subcommand)]
    pub command: ActorCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActorCommand {
    /// Actor record with its pledges resolved
    Dashboard {
        /// country or company
        #[arg(long, default_value = "country")]
        kind: ActorKind,
        id: String,
    },
    /// Certificates and climate reports of a company
    Review { id: String },
    /// Every actor of one kind
    List {
        #[arg(long, default_value = "country")]
        kind: ActorKind,
    },
    /// Countries a company operates in, with states, pledges and assets
    NationStates {
        company: String,
        #[arg(long, default_value = "all")]
        scope: StateScope,
    },
}

pub fn execute(global: &GlobalArgs, args: ActorArgs) -> Result<Value> {
    let store = open_store(global)?;
    let aggregator = Aggregator::with_context(&store, RequestContext::new());

    match args.command {
        ActorCommand::Dashboard { kind, id } => {
            to_json(&aggregator.dashboard(ActorRef::new(kind, parse_id(&id)?))?)
        }
        ActorCommand::Review { id } => to_json(&aggregator.company_review(parse_id(&id)?)?),
        ActorCommand::List { kind } => to_json(&aggregator.list_actors(kind)?),
        ActorCommand::NationStates { company, scope } => {
            to_json(&aggregator.nation_states(parse_id(&company)?, scope)?)
        }
    }
}
