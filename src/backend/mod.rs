mod chain;
mod local;

use std::fmt;

use async_trait::async_trait;

use crate::models::proposal::{Proposal, VoteChoice};

pub use chain::ChainBackend;
pub use local::LocalBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    DuplicateId(String),
    /// The backend does not implement this operation.
    Unsupported(&'static str),
    /// The contract call could not be made (no wallet/transaction layer).
    ChainUnavailable { method: &'static str, contract: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::DuplicateId(id) => write!(f, "Proposal id {id} already exists"),
            BackendError::Unsupported(op) => write!(f, "Operation not supported: {op}"),
            BackendError::ChainUnavailable { method, contract } => {
                write!(f, "Cannot call {method} on contract {contract}: no chain connection")
            }
        }
    }
}

impl std::error::Error for BackendError {}

/// Where proposals live. Insertion order is display order.
#[async_trait]
pub trait ProposalBackend: Send + Sync {
    /// Short name for logs and the page footer.
    fn kind(&self) -> &'static str;

    async fn submit(&mut self, proposal: Proposal) -> Result<(), BackendError>;

    async fn list(&self) -> Result<Vec<Proposal>, BackendError>;

    async fn find(&self, id: &str) -> Result<Option<Proposal>, BackendError>;

    async fn vote(&mut self, id: &str, choice: VoteChoice) -> Result<(), BackendError>;
}
