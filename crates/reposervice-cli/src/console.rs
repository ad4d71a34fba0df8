//! Terminal implementation of the generator's console port.

use reposervice_core::{
    application::{ApplicationError, ports::Console},
    error::RepoServiceResult,
};
use tracing::debug;

use crate::output::OutputManager;

/// How questions get answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answers {
    /// Ask on the terminal.
    Prompt,
    /// Answer every question with the given value, echoing it.
    Always(bool),
}

/// Console backed by the terminal and the [`OutputManager`].
#[derive(Debug, Clone)]
pub struct TerminalConsole {
    output: OutputManager,
    answers: Answers,
}

impl TerminalConsole {
    pub fn new(output: OutputManager, answers: Answers) -> Self {
        Self { output, answers }
    }

    #[cfg(feature = "interactive")]
    fn prompt(&self, question: &str) -> RepoServiceResult<bool> {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| {
                ApplicationError::Console {
                    reason: e.to_string(),
                }
                .into()
            })
    }

    #[cfg(not(feature = "interactive"))]
    fn prompt(&self, question: &str) -> RepoServiceResult<bool> {
        use std::io::{self, Write};

        let console_error = |e: io::Error| ApplicationError::Console {
            reason: e.to_string(),
        };

        print!("{question} [y/N] ");
        io::stdout().flush().map_err(console_error)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(console_error)?;

        let input = input.trim().to_ascii_lowercase();
        Ok(input == "y" || input == "yes")
    }
}

impl Console for TerminalConsole {
    fn confirm(&self, question: &str) -> RepoServiceResult<bool> {
        match self.answers {
            Answers::Prompt => self.prompt(question),
            Answers::Always(answer) => {
                debug!(question, answer, "Answered from flags");
                let echo = if answer { "yes" } else { "no" };
                let _ = self.output.print(&format!("{question} {echo}"));
                Ok(answer)
            }
        }
    }

    fn line(&self, message: &str) {
        let _ = self.output.print(message);
    }

    fn error(&self, message: &str) {
        let _ = self.output.error(message);
    }
}
