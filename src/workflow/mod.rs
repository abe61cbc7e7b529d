//! Retrieve → answer pipeline.
//!
//! A deliberately small two-stage state machine: every question runs the
//! same linear stage sequence to completion, synchronously, with no
//! branching, looping, or mid-flight cancellation. Store failures are not
//! caught here — they propagate unmodified to the transport layer.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::store::{DocumentStore, StoreError};

/// Longest prefix of the first context item quoted in the answer.
const ANSWER_SNIPPET_CHARS: usize = 100;

/// Per-request pipeline record. Created on entry, mutated by each stage,
/// discarded once the outcome is produced.
#[derive(Debug)]
pub struct PipelineState {
    pub question: String,
    /// Set by the retrieve stage; possibly empty.
    pub context: Vec<String>,
    /// Set by the answer stage; absent before it.
    pub answer: Option<String>,
}

impl PipelineState {
    fn new(question: &str) -> Self {
        Self {
            question: question.to_string(),
            context: Vec::new(),
            answer: None,
        }
    }
}

/// Stages of the pipeline, executed in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Retrieve,
    Answer,
}

/// Final record returned for an `/ask` request.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutcome {
    pub question: String,
    pub answer: String,
    pub context_used: Vec<String>,
    /// Wall-clock pipeline time, rounded to 3 decimal places.
    pub latency_sec: f64,
}

/// The retrieval-augmented answer pipeline.
pub struct RagWorkflow {
    store: Arc<dyn DocumentStore>,
}

impl RagWorkflow {
    /// Fixed stage graph: retrieve, then answer, then done.
    const STAGES: [Stage; 2] = [Stage::Retrieve, Stage::Answer];

    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Whether the stage graph is in place. Construction cannot fail in
    /// practice; this feeds the `graph_ready` field of `/status`.
    pub fn is_ready(&self) -> bool {
        !Self::STAGES.is_empty()
    }

    /// Run the full pipeline for one question.
    pub async fn run_query(&self, question: &str) -> Result<AskOutcome, StoreError> {
        let start = Instant::now();
        let mut state = PipelineState::new(question);

        for stage in Self::STAGES {
            self.step(stage, &mut state).await?;
        }

        // Answer is the terminal stage and always sets the field.
        let answer = state.answer.take().unwrap_or_default();
        let latency_sec = (start.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;

        tracing::debug!(
            question = %state.question,
            context_items = state.context.len(),
            latency_sec,
            "pipeline complete"
        );

        Ok(AskOutcome {
            question: state.question,
            answer,
            context_used: state.context,
            latency_sec,
        })
    }

    async fn step(&self, stage: Stage, state: &mut PipelineState) -> Result<(), StoreError> {
        match stage {
            Stage::Retrieve => self.retrieve(state).await,
            Stage::Answer => {
                Self::answer(state);
                Ok(())
            }
        }
    }

    /// Retrieve stage: question → context. Precondition: question present.
    /// Postcondition: context set (possibly empty).
    async fn retrieve(&self, state: &mut PipelineState) -> Result<(), StoreError> {
        state.context = self.store.search(&state.question).await?;
        Ok(())
    }

    /// Answer stage: context → answer. Quotes up to the first 100 characters
    /// of the first context item; shorter items are used as-is, not padded.
    fn answer(state: &mut PipelineState) {
        let answer = match state.context.first() {
            Some(first) => {
                let snippet: String = first.chars().take(ANSWER_SNIPPET_CHARS).collect();
                format!("I found this: '{snippet}...'")
            }
            None => "Sorry, I don't know.".to_string(),
        };
        state.answer = Some(answer);
    }
}
