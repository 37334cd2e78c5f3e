//! Operator confirmation for destructive actions

use std::io::Write;

use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait Confirm: Send + Sync {
    /// Ask the operator; `true` means go ahead
    async fn confirm(&self, prompt: &str) -> bool;
}

/// An answer the operator already gave, e.g. a submitted confirmation form
/// or `--yes` on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered(pub bool);

#[async_trait]
impl Confirm for Answered {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Interactive `[y/N]` prompt on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();

        let answer = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
            eprint!("{} [y/N]: ", prompt);
            std::io::stderr().flush()?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            Ok(input)
        })
        .await;

        match answer {
            Ok(Ok(input)) => is_yes(&input),
            Ok(Err(e)) => {
                warn!(error = %e, "Could not read confirmation, treating as declined");
                false
            }
            Err(e) => {
                warn!(error = %e, "Confirmation prompt failed, treating as declined");
                false
            }
        }
    }
}

fn is_yes(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes")
}
