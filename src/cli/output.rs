//! Terminal output formatting

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::domain::roster::{format_date, StatusMessage};
use crate::domain::User;

/// How rosters are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// One table row
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Username")]
    pub username: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Birthday")]
    pub birthday: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            birthday: format_date(user.date_of_birth()),
        }
    }
}

pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Print the status message of the last operation, if any
pub fn status(message: Option<&StatusMessage>) {
    match message {
        Some(m) if m.is_error() => error(&m.text),
        Some(m) => success(&m.text),
        None => {}
    }
}

/// Render the roster as a table or JSON
pub fn render_roster(users: &[User], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let heading = format!("Registered Users ({})", users.len());
            if users.is_empty() {
                return Ok(format!("{}\nNo users registered yet.", heading));
            }
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", heading, table))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(users)?),
    }
}

pub fn print_roster(users: &[User], format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_roster(users, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn ana() -> User {
        User::new(UserId::new("u-1").unwrap(), "ana", "ana@x.com", "1990-01-05")
    }

    #[test]
    fn test_render_empty_table() {
        let out = render_roster(&[], OutputFormat::Table).unwrap();
        assert!(out.contains("Registered Users (0)"));
        assert!(out.contains("No users registered yet."));
    }

    #[test]
    fn test_render_table() {
        let out = render_roster(&[ana()], OutputFormat::Table).unwrap();
        assert!(out.contains("Registered Users (1)"));
        assert!(out.contains("ana@x.com"));
        assert!(out.contains("January 5, 1990"));
    }

    #[test]
    fn test_render_json_keeps_stored_date() {
        let out = render_roster(&[ana()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["dateOfBirth"], "1990-01-05");
        assert_eq!(value[0]["id"], "u-1");
    }
}
