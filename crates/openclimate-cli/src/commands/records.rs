//! Per-kind record commands
//!
//! Usage: openclimate <KIND> create ... | get <ID> | find <NAME> | list | delete <ID>

use clap::{Args, Subcommand};
use openclimate_core::model::GeoProfile;
use openclimate_core::{ActorKind, ActorRef, Asset, Company, Country, Pledge, Region, User};
use openclimate_store::errors::Result;
use openclimate_store::Repositories;
use serde_json::Value;

use super::{open_store, parse_id, run_read, to_json, GlobalArgs, ReadCommand};

// ---------- Country ----------

#[derive(Debug, Args)]
pub struct CountryArgs {
    #[command(subcommand)]
    pub command: CountryCommand,
}

#[derive(Debug, Subcommand)]
pub enum CountryCommand {
    Create(CreateCountry),
    #[command(flatten)]
    Read(ReadCommand),
}

#[derive(Debug, Args)]
pub struct CreateCountry {
    #[arg(long)]
    pub name: String,

    /// ISO 3166 code
    #[arg(long, default_value = "")]
    pub iso: String,

    #[arg(long, default_value_t = 0)]
    pub population: u64,

    /// Area in square kilometres
    #[arg(long, default_value_t = 0.0)]
    pub area: f64,
}

pub fn execute_country(global: &GlobalArgs, args: CountryArgs) -> Result<Value> {
    let store = open_store(global)?;
    let repos = Repositories::new(&store);

    match args.command {
        CountryCommand::Create(create) => {
            let profile = GeoProfile {
                iso: create.iso,
                population: create.population,
                area: create.area,
                ..GeoProfile::default()
            };
            to_json(&repos.countries.create(Country::new(create.name).with_profile(profile))?)
        }
        CountryCommand::Read(read) => run_read(repos.countries, read),
    }
}

// ---------- State ----------

#[derive(Debug, Args)]
pub struct StateArgs {
    #[command(subcommand)]
    pub command: StateCommand,
}

#[derive(Debug, Subcommand)]
pub enum StateCommand {
    Create(CreateState),
    /// First state with this name inside the given country
    FindIn {
        name: String,
        #[arg(long)]
        country: String,
    },
    #[command(flatten)]
    Read(ReadCommand),
}

#[derive(Debug, Args)]
pub struct CreateState {
    #[arg(long)]
    pub name: String,

    /// Name of the country the state belongs to
    #[arg(long, default_value = "")]
    pub country: String,
}

pub fn execute_state(global: &GlobalArgs, args: StateArgs) -> Result<Value> {
    let store = open_store(global)?;
    let repos = Repositories::new(&store);

    match args.command {
        StateCommand::Create(create) => {
            to_json(&repos.regions.create(Region::new(create.name, create.country))?)
        }
        StateCommand::FindIn { name, country } => {
            to_json(&repos.regions.retrieve_by_name_and_country(&name, &country)?)
        }
        StateCommand::Read(read) => run_read(repos.regions, read),
    }
}

// ---------- Company ----------

#[derive(Debug, Args)]
pub struct CompanyArgs {
    #[command(subcommand)]
    pub command: CompanyCommand,
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    Create(CreateCompany),
    #[command(flatten)]
    Read(ReadCommand),
}

#[derive(Debug, Args)]
pub struct CreateCompany {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Country the company operates in (repeatable, order is kept)
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// State the company operates in (repeatable, order is kept)
    #[arg(long = "state")]
    pub states: Vec<String>,
}

pub fn execute_company(global: &GlobalArgs, args: CompanyArgs) -> Result<Value> {
    let store = open_store(global)?;
    let repos = Repositories::new(&store);

    match args.command {
        CompanyCommand::Create(create) => {
            let mut company = Company::new(create.name).with_description(create.description);
            for country in create.countries {
                company = company.operate_in(country);
            }
            for state in create.states {
                company = company.with_state(state);
            }
            to_json(&repos.companies.create(company)?)
        }
        CompanyCommand::Read(read) => run_read(repos.companies, read),
    }
}

// ---------- Pledge ----------

#[derive(Debug, Args)]
pub struct PledgeArgs {
    #[command(subcommand)]
    pub command: PledgeCommand,
}

#[derive(Debug, Subcommand)]
pub enum PledgeCommand {
    /// Create a pledge and list it on its actor
    Create(CreatePledge),
    #[command(flatten)]
    Read(ReadCommand),
}

#[derive(Debug, Args)]
pub struct CreatePledge {
    #[arg(long)]
    pub name: String,

    /// country, company or state
    #[arg(long)]
    pub actor_kind: ActorKind,

    /// Index of the actor making the pledge
    #[arg(long)]
    pub actor: String,

    #[arg(long, default_value = "")]
    pub pledge_type: String,

    #[arg(long, default_value_t = 0)]
    pub base_year: i32,

    #[arg(long, default_value_t = 0)]
    pub target_year: i32,

    /// Reduction target in percent of the base year
    #[arg(long, default_value_t = 0.0)]
    pub goal: f64,

    #[arg(long)]
    pub regulatory: bool,
}

pub fn execute_pledge(global: &GlobalArgs, args: PledgeArgs) -> Result<Value> {
    let store = open_store(global)?;
    let repos = Repositories::new(&store);

    match args.command {
        PledgeCommand::Create(create) => {
            let actor = ActorRef::new(create.actor_kind, parse_id(&create.actor)?);
            let mut pledge = Pledge::new(create.name, actor).with_target(
                create.base_year,
                create.target_year,
                create.goal,
            );
            pledge.pledge_type = create.pledge_type;
            pledge.regulatory = create.regulatory;
            to_json(&repos.attach_pledge(pledge)?)
        }
        PledgeCommand::Read(read) => run_read(repos.pledges, read),
    }
}

// ---------- Asset ----------

#[derive(Debug, Args)]
pub struct AssetArgs {
    #[command(subcommand)]
    pub command: AssetCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssetCommand {
    /// Create an asset and list it on its company
    Create(CreateAsset),
    #[command(flatten)]
    Read(ReadCommand),
}

#[derive(Debug, Args)]
pub struct CreateAsset {
    #[arg(long)]
    pub name: String,

    /// Index of the owning company
    #[arg(long)]
    pub company: String,

    /// Name of the state the asset sits in
    #[arg(long)]
    pub state: Option<String>,

    #[arg(long, default_value = "")]
    pub asset_type: String,

    #[arg(long, default_value_t = 0.0)]
    pub capacity_mw: f64,
}

pub fn execute_asset(global: &GlobalArgs, args: AssetArgs) -> Result<Value> {
    let store = open_store(global)?;
    let repos = Repositories::new(&store);

    match args.command {
        AssetCommand::Create(create) => {
            let mut asset = Asset::new(create.name, parse_id(&create.company)?);
            if let Some(state) = create.state {
                asset = asset.located_in(state);
            }
            asset.asset_type = create.asset_type;
            asset.capacity_mw = create.capacity_mw;
            to_json(&repos.attach_asset(asset)?)
        }
        AssetCommand::Read(read) => run_read(repos.assets, read),
    }
}

// ---------- User ----------

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    Create(CreateUser),
    #[command(flatten)]
    Read(ReadCommand),
}

#[derive(Debug, Args)]
pub struct CreateUser {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Pre-computed password hash, stored as given
    #[arg(long)]
    pub password_hash: String,
}

const REDACTED: &str = "***REDACTED***";

pub fn execute_user(global: &GlobalArgs, args: UserArgs) -> Result<Value> {
    let store = open_store(global)?;
    let repos = Repositories::new(&store);

    let mut value = match args.command {
        UserCommand::Create(create) => to_json(&repos.users.create(User::new(
            create.name,
            create.email,
            create.password_hash,
        ))?)?,
        UserCommand::Read(read) => run_read(repos.users, read)?,
    };
    redact_pwhash(&mut value);
    Ok(value)
}

/// Password hashes are stored but never printed
fn redact_pwhash(value: &mut Value) {
    match value {
        Value::Array(users) => users.iter_mut().for_each(redact_pwhash),
        Value::Object(user) => {
            if let Some(hash) = user.get_mut("pwhash") {
                *hash = Value::String(REDACTED.to_string());
            }
        }
        _ => {}
    }
}
