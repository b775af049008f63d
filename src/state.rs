use std::sync::Arc;

use tokio::sync::Mutex;

use crate::backend::{ChainBackend, LocalBackend, ProposalBackend};
use crate::config::{AppConfig, BackendKind, ChainConfig};
use crate::generation::{ClaudeGenerator, DisabledGenerator, ProposalGenerator};
use crate::workspace::Workspace;

/// Application state shared by all handlers via `web::Data<AppState>`.
///
/// The workspace lock is never held across a generation call.
pub struct AppState {
    pub workspace: Mutex<Workspace>,
    pub generator: Arc<dyn ProposalGenerator>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        backend: Box<dyn ProposalBackend>,
        generator: Arc<dyn ProposalGenerator>,
    ) -> Self {
        Self {
            workspace: Mutex::new(Workspace::new(backend)),
            generator,
            config,
        }
    }

    /// Wire backend and generator from configuration.
    pub fn from_config(config: AppConfig) -> Self {
        let backend: Box<dyn ProposalBackend> = match config.backend {
            BackendKind::Local => Box::new(LocalBackend::new()),
            BackendKind::Chain => Box::new(ChainBackend::new(config.chain.clone())),
        };

        let generator: Arc<dyn ProposalGenerator> = match &config.generation.api_key {
            Some(key) => match ClaudeGenerator::new(key, &config.generation) {
                Ok(client) => {
                    log::info!("Proposal generation enabled (model {})", client.model());
                    Arc::new(client)
                }
                Err(e) => {
                    log::error!("{e}; proposal generation disabled");
                    Arc::new(DisabledGenerator)
                }
            },
            None => {
                log::warn!("No CLAUDE_API_KEY set, proposal generation disabled");
                Arc::new(DisabledGenerator)
            }
        };

        Self::new(config, backend, generator)
    }

    pub fn chain(&self) -> &ChainConfig {
        &self.config.chain
    }
}
