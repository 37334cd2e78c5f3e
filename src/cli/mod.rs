//! CLI module for the user roster
//!
//! Subcommands:
//! - `serve`: web front-end (roster page, creation form, delete confirmation)
//! - `list`: print the roster
//! - `add`: register a user
//! - `delete`: remove a user after confirmation

pub mod output;
pub mod serve;
pub mod users;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::UserDirectory;
use crate::infrastructure::logging;
use crate::infrastructure::{HttpUserDirectory, Outcome, RosterClient};
use output::OutputFormat;

/// User Roster - register, list and delete users in a directory service
#[derive(Parser, Debug)]
#[command(name = "user-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory service base URL (overrides config)
    #[arg(long, global = true, env = "ROSTER_API_URL")]
    pub api_url: Option<String>,

    /// Output format for rosters
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the roster web front-end
    Serve(serve::ServeArgs),

    /// List registered users
    List,

    /// Register a new user
    Add(users::AddArgs),

    /// Delete a user
    Delete(users::DeleteArgs),
}

/// Load configuration, install logging, run the chosen command
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.directory.base_url = url;
    }

    logging::init_logging(&config.logging);

    let outcome = match cli.command {
        Command::Serve(args) => {
            serve::run(&config, args).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::List => users::list(&build_roster(&config)?, cli.output).await?,
        Command::Add(args) => users::add(&build_roster(&config)?, args, cli.output).await?,
        Command::Delete(args) => {
            users::delete(&build_roster(&config)?, args, cli.output).await?
        }
    };

    Ok(exit_code(outcome))
}

/// Roster client talking to the configured directory service
pub fn build_roster(config: &AppConfig) -> anyhow::Result<RosterClient> {
    let directory: Arc<dyn UserDirectory> = Arc::new(HttpUserDirectory::new(
        &config.directory.base_url,
        config.directory.timeout(),
    )?);

    Ok(RosterClient::new(directory))
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Succeeded | Outcome::Declined => ExitCode::SUCCESS,
        Outcome::Failed | Outcome::Skipped => ExitCode::FAILURE,
    }
}
