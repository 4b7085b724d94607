//! Recruiter prompt chain.
//!
//! Every user message goes through up to three structured LLM calls:
//!
//! 1. **Extraction**: decide whether the text is a recruiter request and how
//!    confident the model is.
//! 2. **Gate check**: stop unless the request qualifies and the confidence
//!    meets the threshold.
//! 3. **Recruiter response**: derive the role name and needed experience.
//! 4. **Confirmation**: write the markdown message for the recruiter.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use helix::recruiter::{ChainOutcome, RecruiterChain};
//!
//! let chain = RecruiterChain::new(Arc::new(driver), 0.7);
//! match chain.run("We need a senior Rust engineer").await? {
//!     ChainOutcome::Confirmed { confirmation, .. } => println!("{}", confirmation.confirmation_message),
//!     ChainOutcome::Rejected { .. } => println!("not a recruiter request"),
//! }
//! ```

mod steps;

pub use steps::{EventConfirmation, EventExtraction, RecruiterResponse, StructuredOutput};

use std::sync::Arc;

use anyhow::Context;
use uuid::Uuid;

use crate::llm::{LlmDriver, LlmRequest, Message};

/// Default minimum confidence for the gate check.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Result of running the chain on one user message.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainOutcome {
    /// The gate check failed; no further calls were made.
    Rejected {
        /// Output of the extraction step.
        extraction: EventExtraction,
    },
    /// All three steps completed.
    Confirmed {
        /// Role details from the second step.
        details: RecruiterResponse,
        /// Message from the third step.
        confirmation: EventConfirmation,
    },
}

/// Three-step recruiter prompt chain with a gate check.
#[derive(Clone)]
pub struct RecruiterChain {
    driver: Arc<dyn LlmDriver>,
    confidence_threshold: f64,
}

impl std::fmt::Debug for RecruiterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecruiterChain")
            .field("driver", &"LlmDriver")
            .field("confidence_threshold", &self.confidence_threshold)
            .finish()
    }
}

impl RecruiterChain {
    /// Create a chain over the given driver.
    #[must_use]
    pub fn new(driver: Arc<dyn LlmDriver>, confidence_threshold: f64) -> Self {
        Self {
            driver,
            confidence_threshold,
        }
    }

    /// Minimum confidence needed to pass the gate.
    #[must_use]
    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Run the full chain for one user message.
    ///
    /// # Errors
    ///
    /// Returns an error if any LLM call fails or produces output that does
    /// not match the step's schema.
    pub async fn run(&self, user_input: &str) -> anyhow::Result<ChainOutcome> {
        let request_id = Uuid::new_v4().to_string();
        tracing::info!(request_id = %request_id, "Processing recruiter request");
        tracing::debug!(request_id = %request_id, input = %user_input, "Raw input");

        let extraction: EventExtraction = self
            .call(&request_id, steps::EXTRACTION_PROMPT, user_input.to_string())
            .await?;
        tracing::info!(
            request_id = %request_id,
            is_recruiter_request = extraction.is_recruiter_request,
            confidence = extraction.confidence_score,
            "Extraction complete"
        );

        if !self.passes_gate(&extraction) {
            tracing::warn!(
                request_id = %request_id,
                is_recruiter_request = extraction.is_recruiter_request,
                confidence = extraction.confidence_score,
                threshold = self.confidence_threshold,
                "Gate check failed"
            );
            return Ok(ChainOutcome::Rejected { extraction });
        }

        tracing::info!(request_id = %request_id, "Gate check passed");

        let details: RecruiterResponse = self
            .call(&request_id, steps::RESPONSE_PROMPT, extraction.description.clone())
            .await?;
        tracing::info!(request_id = %request_id, role = %details.name, "Parsed recruiter response");

        let details_json =
            serde_json::to_string(&details).context("Failed to encode recruiter response")?;
        let confirmation: EventConfirmation = self
            .call(&request_id, steps::CONFIRMATION_PROMPT, details_json)
            .await?;
        tracing::info!(request_id = %request_id, "Confirmation generated");

        Ok(ChainOutcome::Confirmed {
            details,
            confirmation,
        })
    }

    /// Whether an extraction qualifies for the remaining steps.
    #[must_use]
    pub fn passes_gate(&self, extraction: &EventExtraction) -> bool {
        extraction.is_recruiter_request && extraction.confidence_score >= self.confidence_threshold
    }

    /// One structured call: system prompt plus user text, parsed as `T`.
    async fn call<T: StructuredOutput>(
        &self,
        request_id: &str,
        system_prompt: &str,
        user: String,
    ) -> anyhow::Result<T> {
        tracing::debug!(request_id = %request_id, step = T::NAME, "Calling model");

        let req = LlmRequest::new(vec![Message::system(system_prompt), Message::user(user)])
            .with_response_format(T::response_format());

        let raw = self
            .driver
            .complete(req)
            .await
            .with_context(|| format!("{} step failed", T::NAME))?;

        serde_json::from_str(&raw).with_context(|| {
            format!("{} step returned output that does not match its schema", T::NAME)
        })
    }
}
