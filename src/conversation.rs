//! The submit flow shared by the JSON API and the HTML fragments.

use crate::error::AppError;
use crate::messages::{MessageRecord, MessageStore};
use crate::recruiter::{ChainOutcome, RecruiterChain};

/// Reply shown when the gate check rejects a message.
pub const NOT_A_RECRUITER_REQUEST: &str = "This doesn't appear to be a request for a recruiter.";

/// A conversation backed by a message store and the recruiter chain.
#[derive(Debug, Clone)]
pub struct Conversation {
    store: MessageStore,
    chain: RecruiterChain,
}

impl Conversation {
    /// Create a conversation over an existing store.
    #[must_use]
    pub fn new(store: MessageStore, chain: RecruiterChain) -> Self {
        Self { store, chain }
    }

    /// All records in order.
    #[must_use]
    pub fn messages(&self) -> Vec<MessageRecord> {
        self.store.list()
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Submit user text and return the records appended for this turn.
    ///
    /// The user record and the reply are appended together, and only when
    /// the chain succeeds.
    pub async fn submit(&self, text: &str) -> Result<Vec<MessageRecord>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        let user = MessageRecord::user(text);
        let outcome = self.chain.run(text).await?;
        let reply = reply_for(outcome);

        let turn = vec![user, reply];
        self.store.append(turn.iter().cloned());

        tracing::info!(
            total_messages = self.store.len(),
            has_markdown = turn[1].has_markdown(),
            "Conversation turn stored"
        );

        Ok(turn)
    }
}

/// Build the system record for a chain outcome.
fn reply_for(outcome: ChainOutcome) -> MessageRecord {
    match outcome {
        ChainOutcome::Confirmed {
            details,
            confirmation,
        } => MessageRecord::system(
            format!("Drafted outreach for the {} role.", details.name),
            Some(confirmation.confirmation_message),
        ),
        ChainOutcome::Rejected { .. } => MessageRecord::system(NOT_A_RECRUITER_REQUEST, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Role;
    use crate::recruiter::{EventConfirmation, EventExtraction, RecruiterResponse};

    #[test]
    fn test_confirmed_reply_carries_markdown() {
        let record = reply_for(ChainOutcome::Confirmed {
            details: RecruiterResponse {
                name: "Data Engineer".to_string(),
                description: "Spark".to_string(),
            },
            confirmation: EventConfirmation {
                confirmation_message: "**Hello** candidates".to_string(),
            },
        });

        assert_eq!(record.role, Role::System);
        assert_eq!(record.content_text(), "Drafted outreach for the Data Engineer role.");
        assert_eq!(record.data.as_deref(), Some("**Hello** candidates"));
    }

    #[test]
    fn test_rejected_reply_has_no_markdown() {
        let record = reply_for(ChainOutcome::Rejected {
            extraction: EventExtraction {
                description: "weather".to_string(),
                is_recruiter_request: false,
                confidence_score: 0.1,
            },
        });

        assert_eq!(record.content_text(), NOT_A_RECRUITER_REQUEST);
        assert!(!record.has_markdown());
    }
}
