//! Shared test infrastructure.
//!
//! - scripted generators standing in for the text-generation endpoint
//! - `test_state()` - application state wired to an in-memory backend
//! - small builders for form data and proposals

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use quest::backend::LocalBackend;
use quest::config::AppConfig;
use quest::form::LoadingFlag;
use quest::generation::{GenerationError, ProposalGenerator, parse_proposal_input};
use quest::models::proposal::{Proposal, ProposalFormData, ProposalInput, ProposalStatus, VoteTally};
use quest::state::AppState;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TREASURY_CONTEXT: &str = "Increase treasury allocation by 10%";
pub const TREASURY_REPLY: &str =
    r#"{"title":"Treasury Increase Proposal","description":"Raise allocation by 10%."}"#;
pub const REFUSAL_REPLY: &str = "Sorry, I can't help.";

// ============================================================================
// GENERATORS
// ============================================================================

/// Answers every call with a fixed model reply, run through the real parser.
pub struct ScriptedGenerator {
    reply: String,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(reply: &str) -> Self {
        Self { reply: reply.to_string(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProposalGenerator for ScriptedGenerator {
    async fn generate(&self, _context: &str) -> Result<ProposalInput, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        parse_proposal_input(&self.reply)
    }
}

/// Records whether the loading flag was up while the call was in flight.
pub struct FlagObservingGenerator {
    flag: LoadingFlag,
    reply: String,
    seen_loading: AtomicBool,
}

impl FlagObservingGenerator {
    pub fn new(flag: LoadingFlag, reply: &str) -> Self {
        Self { flag, reply: reply.to_string(), seen_loading: AtomicBool::new(false) }
    }

    pub fn saw_loading(&self) -> bool {
        self.seen_loading.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProposalGenerator for FlagObservingGenerator {
    async fn generate(&self, _context: &str) -> Result<ProposalInput, GenerationError> {
        self.seen_loading.store(self.flag.is_loading(), Ordering::SeqCst);
        tokio::task::yield_now().await;
        parse_proposal_input(&self.reply)
    }
}

/// Sleeps before answering, for timeout and cancellation tests.
pub struct SlowGenerator {
    delay: Duration,
}

impl SlowGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ProposalGenerator for SlowGenerator {
    async fn generate(&self, _context: &str) -> Result<ProposalInput, GenerationError> {
        tokio::time::sleep(self.delay).await;
        parse_proposal_input(TREASURY_REPLY)
    }
}

/// Holds every call open until the test releases the gate.
pub struct GatedGenerator {
    gate: Arc<Notify>,
    reply: String,
}

impl GatedGenerator {
    pub fn new(gate: Arc<Notify>, reply: &str) -> Self {
        Self { gate, reply: reply.to_string() }
    }
}

#[async_trait]
impl ProposalGenerator for GatedGenerator {
    async fn generate(&self, _context: &str) -> Result<ProposalInput, GenerationError> {
        self.gate.notified().await;
        parse_proposal_input(&self.reply)
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

pub fn draft(title: &str, description: &str, context: Option<&str>) -> ProposalFormData {
    ProposalFormData {
        title: title.to_string(),
        description: description.to_string(),
        context: context.map(String::from),
    }
}

/// A proposal as the workspace would create it, at a fixed time.
pub fn sample_proposal(id: &str, title: &str) -> Proposal {
    let at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    Proposal {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("Description of {title}"),
        status: ProposalStatus::Draft,
        created_at: at,
        updated_at: at,
        proposer: "Anonymous".to_string(),
        votes: Some(VoteTally::default()),
    }
}

/// Configuration with every variable unset.
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|_| None)
}

/// Application state on an in-memory backend with the given generator.
pub fn test_state(generator: Arc<dyn ProposalGenerator>) -> web::Data<AppState> {
    web::Data::new(AppState::new(test_config(), Box::new(LocalBackend::new()), generator))
}
