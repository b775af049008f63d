//! Proposal text generation.
//!
//! A generator turns a free-text context into a title/description pair. The
//! reply must parse into the full `ProposalInput` shape; anything else is a
//! `GenerationError` and callers keep their draft unchanged.

mod claude;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::models::proposal::ProposalInput;

pub use claude::ClaudeGenerator;

#[derive(Debug)]
pub enum GenerationError {
    /// No API key configured.
    NotConfigured,
    /// Transport-level failure (connect, TLS, read).
    Request(String),
    /// The endpoint answered with a non-success status.
    Status { status: u16, body: String },
    /// The reply did not contain a `{ title, description }` JSON object.
    Parse(String),
    Timeout(Duration),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::NotConfigured => write!(f, "Generation is not configured"),
            GenerationError::Request(e) => write!(f, "Generation request failed: {e}"),
            GenerationError::Status { status, body } => {
                write!(f, "Generation endpoint returned {status}: {body}")
            }
            GenerationError::Parse(e) => write!(f, "Failed to parse generated proposal: {e}"),
            GenerationError::Timeout(d) => {
                write!(f, "Generation timed out after {}s", d.as_secs_f32())
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Something that can draft a proposal from a context string.
#[async_trait]
pub trait ProposalGenerator: Send + Sync {
    async fn generate(&self, context: &str) -> Result<ProposalInput, GenerationError>;
}

/// Used when no API key is set: every call fails with `NotConfigured`.
pub struct DisabledGenerator;

#[async_trait]
impl ProposalGenerator for DisabledGenerator {
    async fn generate(&self, _context: &str) -> Result<ProposalInput, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

/// Instruction sent to the model, with the user's context embedded.
pub fn build_prompt(context: &str) -> String {
    format!(
        "Given the following context, generate a well-structured governance proposal. \n  \
         The proposal should include a clear title and detailed description.\n  \
         Context: {context}\n  \n  \
         Format the response as a JSON object with 'title' and 'description' fields."
    )
}

/// Parse model output into a `ProposalInput`.
///
/// Accepts a bare JSON object, optionally wrapped in a single Markdown code
/// fence. Both fields must be present and be strings.
pub fn parse_proposal_input(text: &str) -> Result<ProposalInput, GenerationError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(GenerationError::Parse("empty response".to_string()));
    }
    serde_json::from_str::<ProposalInput>(body).map_err(|e| GenerationError::Parse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}
