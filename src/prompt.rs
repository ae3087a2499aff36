// ABOUTME: Interactive confirmation before destructive cluster actions.
// ABOUTME: Only an explicit yes approves; anything else, including EOF, declines.

use parking_lot::Mutex;
use std::io::{self, BufRead, BufReader, Stdin};

use crate::output::Output;

/// Asks the operator whether a destructive action may proceed.
pub trait ConfirmationGate: Send + Sync {
    /// Returns true only when the action was explicitly approved.
    fn confirm(&self, output: &Output, action: &str) -> bool;
}

/// Reads the answer from a line-oriented reader, normally stdin.
pub struct TerminalPrompt<R> {
    input: Mutex<R>,
}

impl<R: BufRead> TerminalPrompt<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

impl TerminalPrompt<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead + Send> ConfirmationGate for TerminalPrompt<R> {
    fn confirm(&self, output: &Output, action: &str) -> bool {
        output.prompt(&format!("Are you sure that you want to {action}? [y/n]: "));

        let mut answer = String::new();
        match self.input.lock().read_line(&mut answer) {
            Ok(0) => {
                tracing::debug!("confirmation input closed");
                false
            }
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read confirmation");
                false
            }
        }
    }
}

/// `y` or `yes`, case-insensitive, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
