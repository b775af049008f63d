use async_trait::async_trait;

use super::{BackendError, ProposalBackend};
use crate::models::proposal::{Proposal, VoteChoice};

/// In-memory, append-only proposal list. Lost when the process exits.
#[derive(Debug, Default)]
pub struct LocalBackend {
    proposals: Vec<Proposal>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProposalBackend for LocalBackend {
    fn kind(&self) -> &'static str {
        "local"
    }

    async fn submit(&mut self, proposal: Proposal) -> Result<(), BackendError> {
        if self.proposals.iter().any(|p| p.id == proposal.id) {
            return Err(BackendError::DuplicateId(proposal.id));
        }
        self.proposals.push(proposal);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Proposal>, BackendError> {
        Ok(self.proposals.clone())
    }

    async fn find(&self, id: &str) -> Result<Option<Proposal>, BackendError> {
        Ok(self.proposals.iter().find(|p| p.id == id).cloned())
    }

    // Proposals are immutable once created, tallies included.
    async fn vote(&mut self, _id: &str, _choice: VoteChoice) -> Result<(), BackendError> {
        Err(BackendError::Unsupported("vote"))
    }
}
