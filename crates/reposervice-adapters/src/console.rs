//! Scripted console adapter.
//!
//! [`ScriptedConsole`] answers from a queue and records everything it is
//! told, which makes generator runs reproducible in tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use tracing::debug;

use reposervice_core::{
    application::{ApplicationError, ports::Console},
    error::RepoServiceResult,
};

/// Console driven by a script of answers. Clones share the transcript.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    inner: Arc<Mutex<Transcript>>,
}

#[derive(Debug, Default)]
struct Transcript {
    answers: VecDeque<bool>,
    fallback: Option<bool>,
    questions: Vec<String>,
    lines: Vec<String>,
    errors: Vec<String>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers, consumed in order.
    pub fn answering(self, answers: impl IntoIterator<Item = bool>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.answers.extend(answers);
        }
        self
    }

    /// Answer used once the queue is empty. Without one, running out of
    /// answers is an error.
    pub fn otherwise(self, answer: bool) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fallback = Some(answer);
        }
        self
    }

    pub fn questions(&self) -> Vec<String> {
        self.read(|t| t.questions.clone())
    }

    pub fn lines(&self) -> Vec<String> {
        self.read(|t| t.lines.clone())
    }

    pub fn errors(&self) -> Vec<String> {
        self.read(|t| t.errors.clone())
    }

    fn read<T: Default>(&self, f: impl FnOnce(&Transcript) -> T) -> T {
        self.inner.lock().map(|t| f(&t)).unwrap_or_default()
    }
}

impl Console for ScriptedConsole {
    fn confirm(&self, question: &str) -> RepoServiceResult<bool> {
        let mut inner = self.inner.lock().map_err(|_| ApplicationError::Console {
            reason: "transcript lock poisoned".into(),
        })?;
        inner.questions.push(question.to_string());

        match inner.answers.pop_front().or(inner.fallback) {
            Some(answer) => {
                debug!(question, answer, "Scripted answer");
                Ok(answer)
            }
            None => Err(ApplicationError::Console {
                reason: format!("no scripted answer for: {question}"),
            }
            .into()),
        }
    }

    fn line(&self, message: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.lines.push(message.to_string());
        }
    }

    fn error(&self, message: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.errors.push(message.to_string());
        }
    }
}
