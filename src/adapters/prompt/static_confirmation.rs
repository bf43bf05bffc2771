//! Confirmation that always gives the same answer.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::ports::{ConfirmationPrompt, ConfirmationRequest};

/// Answers every confirmation with a fixed value and counts the questions.
#[derive(Debug, Default)]
pub struct StaticConfirmation {
    answer: bool,
    asked: AtomicUsize,
}

impl StaticConfirmation {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn approve() -> Self {
        Self::new(true)
    }

    pub fn deny() -> Self {
        Self::new(false)
    }

    /// How many times the user was asked.
    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationPrompt for StaticConfirmation {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(prompt = %request.prompt(), answer = self.answer, "Auto-answered confirmation");
        self.answer
    }
}
