use async_trait::async_trait;

use super::{BackendError, ProposalBackend};
use crate::config::ChainConfig;
use crate::models::proposal::{Proposal, VoteChoice};

const UNSET_CONTRACT: &str = "<unset>";

/// Governance-contract backend. Contract writes are not wired to a wallet
/// yet, so `submitProposal` and `vote` fail with `ChainUnavailable`.
#[derive(Debug)]
pub struct ChainBackend {
    config: ChainConfig,
}

impl ChainBackend {
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    pub fn contract_address(&self) -> &str {
        self.config.contract_address.as_deref().unwrap_or(UNSET_CONTRACT)
    }

    fn unavailable(&self, method: &'static str) -> BackendError {
        log::warn!(
            "Contract call {method} on {} ({}) skipped: no chain connection",
            self.contract_address(),
            self.config.network_label(),
        );
        BackendError::ChainUnavailable {
            method,
            contract: self.contract_address().to_string(),
        }
    }
}

#[async_trait]
impl ProposalBackend for ChainBackend {
    fn kind(&self) -> &'static str {
        "chain"
    }

    async fn submit(&mut self, proposal: Proposal) -> Result<(), BackendError> {
        log::debug!("submitProposal requested for proposal {}", proposal.id);
        Err(self.unavailable("submitProposal"))
    }

    async fn list(&self) -> Result<Vec<Proposal>, BackendError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: &str) -> Result<Option<Proposal>, BackendError> {
        Ok(None)
    }

    async fn vote(&mut self, id: &str, choice: VoteChoice) -> Result<(), BackendError> {
        log::debug!("vote {choice:?} requested for proposal {id}");
        Err(self.unavailable("vote"))
    }
}
