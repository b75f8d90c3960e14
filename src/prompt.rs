use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Yes/no confirmation before destructive or long-running work
pub trait Confirm {
    /// Ask `prompt`; only an answer starting with `y`/`Y` counts as yes
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Interactive confirmation on stdin/stdout
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        print!("{prompt} (y/n): ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;

        Ok(is_affirmative(&line))
    }
}

/// Answers yes to everything (`--yes`)
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        tracing::debug!("Assuming yes: {}", prompt);
        Ok(true)
    }
}

/// Empty input and anything not starting with `y` is a no
#[must_use]
pub fn is_affirmative(response: &str) -> bool {
    response
        .trim_end_matches(&['\r', '\n'][..])
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}
