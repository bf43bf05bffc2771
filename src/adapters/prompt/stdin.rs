//! Terminal confirmation on stdin/stdout.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;

use crate::ports::{ConfirmationPrompt, ConfirmationRequest};

/// Asks `<prompt> [y/N]` and reads one line. Anything but y/yes declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmation;

impl StdinConfirmation {
    pub fn new() -> Self {
        Self
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn ask(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{} [y/N] ", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(is_affirmative(&line))
}

#[async_trait]
impl ConfirmationPrompt for StdinConfirmation {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool {
        let prompt = request.prompt();
        match tokio::task::spawn_blocking(move || ask(&prompt)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Could not read confirmation, declining");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation prompt task failed, declining");
                false
            }
        }
    }
}
