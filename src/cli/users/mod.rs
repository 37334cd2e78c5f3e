//! Roster commands for the terminal: list, add, delete

use clap::Args;

use super::output::{self, OutputFormat};
use crate::domain::{FormField, UserId};
use crate::infrastructure::{Answered, Confirm, Outcome, RosterClient, TerminalConfirm};

/// Arguments for the add command
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Username
    #[arg(long, value_parser = parse_username)]
    pub username: String,

    /// Email address
    #[arg(long, value_parser = parse_email)]
    pub email: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_of_birth)]
    pub date_of_birth: String,
}

/// Arguments for the delete command
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// User identifier
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_field(field: FormField, value: &str) -> Result<String, String> {
    field
        .check(value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

fn parse_username(value: &str) -> Result<String, String> {
    parse_field(FormField::Username, value)
}

fn parse_email(value: &str) -> Result<String, String> {
    parse_field(FormField::Email, value)
}

fn parse_date_of_birth(value: &str) -> Result<String, String> {
    parse_field(FormField::DateOfBirth, value)
}

/// Load and print the roster
pub async fn list(roster: &RosterClient, format: OutputFormat) -> anyhow::Result<Outcome> {
    let outcome = roster.mount().await;
    let state = roster.roster().await;

    output::status(state.message());
    if outcome.is_success() {
        output::print_roster(state.users(), format)?;
    }

    Ok(outcome)
}

/// Fill in the creation form and submit it
pub async fn add(
    roster: &RosterClient,
    args: AddArgs,
    format: OutputFormat,
) -> anyhow::Result<Outcome> {
    roster.edit_field(FormField::Username, args.username).await;
    roster.edit_field(FormField::Email, args.email).await;
    roster
        .edit_field(FormField::DateOfBirth, args.date_of_birth)
        .await;

    let outcome = roster.submit().await;
    let state = roster.roster().await;

    output::status(state.message());
    if outcome.is_success() {
        output::print_roster(state.users(), format)?;
    }

    Ok(outcome)
}

/// Delete a user, asking first unless `--yes`
pub async fn delete(
    roster: &RosterClient,
    args: DeleteArgs,
    format: OutputFormat,
) -> anyhow::Result<Outcome> {
    let id = UserId::new(args.id)?;

    roster.mount().await;
    match roster.roster().await.find(&id) {
        Some(user) => output::info(&format!(
            "{} <{}> (id {})",
            user.username(),
            user.email(),
            user.id()
        )),
        None => output::info(&format!("User {} is not in the current roster", id)),
    }

    let confirm: Box<dyn Confirm> = if args.yes {
        Box::new(Answered(true))
    } else {
        Box::new(TerminalConfirm)
    };

    let outcome = roster.delete_user(&id, confirm.as_ref()).await;
    let state = roster.roster().await;

    match outcome {
        Outcome::Declined => output::info("Delete cancelled."),
        Outcome::Succeeded => {
            output::status(state.message());
            output::print_roster(state.users(), format)?;
        }
        Outcome::Failed | Outcome::Skipped => output::status(state.message()),
    }

    Ok(outcome)
}
