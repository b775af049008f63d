use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal. New proposals always start as `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Submitted => "submitted",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }

    /// Capitalized form used on status badges ("Draft", "Approved", ...).
    pub fn label(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "Draft",
            ProposalStatus::Submitted => "Submitted",
            ProposalStatus::Approved => "Approved",
            ProposalStatus::Rejected => "Rejected",
        }
    }

    /// Parse a lowercase status code, e.g. from a `?status=` query param.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "draft" => Some(ProposalStatus::Draft),
            "submitted" => Some(ProposalStatus::Submitted),
            "approved" => Some(ProposalStatus::Approved),
            "rejected" => Some(ProposalStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// For/against vote counts. Serialized as `{ "for": n, "against": n }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    #[serde(rename = "for")]
    pub in_favor: u64,
    pub against: u64,
}

/// Direction of a vote cast against a proposal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    For,
    Against,
}

/// A materialized governance proposal. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub proposer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteTally>,
}

/// Draft state of the proposal form for one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalFormData {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub context: Option<String>,
}

impl ProposalFormData {
    /// The context to generate from, if any non-blank context was given.
    pub fn generation_context(&self) -> Option<&str> {
        self.context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Overwrite title and description with a generated result; context is kept.
    pub fn merge(&mut self, generated: ProposalInput) {
        self.title = generated.title;
        self.description = generated.description;
    }
}

/// Expected shape of a generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalInput {
    pub title: String,
    pub description: String,
}
