//! The proposal workspace: owns the proposal list (through a backend) and
//! the single active form session.

use std::fmt;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::backend::{BackendError, ProposalBackend};
use crate::form::{CancelSignal, LoadingFlag};
use crate::models::proposal::{
    DEFAULT_PROPOSER, Proposal, ProposalFormData, ProposalIdGenerator, ProposalStatus, VoteTally,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    /// The form session that produced the data is no longer the active one.
    StaleSession,
    Backend(BackendError),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::StaleSession => write!(f, "The proposal form was closed"),
            WorkspaceError::Backend(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl From<BackendError> for WorkspaceError {
    fn from(e: BackendError) -> Self {
        WorkspaceError::Backend(e)
    }
}

/// An open proposal form. Dropping it cancels any in-flight generation.
struct FormSession {
    id: u64,
    loading: LoadingFlag,
    cancel: watch::Sender<bool>,
}

impl Drop for FormSession {
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
    }
}

/// What a request handler needs to drive one submission without holding the
/// workspace lock.
pub struct FormTicket {
    pub session_id: u64,
    pub loading: LoadingFlag,
    pub cancel: CancelSignal,
}

pub struct Workspace {
    backend: Box<dyn ProposalBackend>,
    ids: ProposalIdGenerator,
    form: Option<FormSession>,
    next_session_id: u64,
}

impl Workspace {
    pub fn new(backend: Box<dyn ProposalBackend>) -> Self {
        Self {
            backend,
            ids: ProposalIdGenerator::new(),
            form: None,
            next_session_id: 1,
        }
    }

    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    pub fn is_form_visible(&self) -> bool {
        self.form.is_some()
    }

    /// True while the open form has a generation call in flight.
    pub fn is_generating(&self) -> bool {
        self.form.as_ref().is_some_and(|f| f.loading.is_loading())
    }

    /// Open the form. Keeps the current session if one is already open.
    pub fn show_form(&mut self) -> u64 {
        if let Some(form) = &self.form {
            return form.id;
        }
        let id = self.next_session_id;
        self.next_session_id += 1;
        let (cancel, _) = watch::channel(false);
        self.form = Some(FormSession { id, loading: LoadingFlag::new(), cancel });
        id
    }

    /// Close the form, cancelling any generation still running for it.
    pub fn hide_form(&mut self) {
        if let Some(form) = self.form.take() {
            log::debug!("Closing proposal form session {}", form.id);
        }
    }

    pub fn form_ticket(&self) -> Option<FormTicket> {
        self.form.as_ref().map(|form| FormTicket {
            session_id: form.id,
            loading: form.loading.clone(),
            cancel: CancelSignal::new(form.cancel.subscribe()),
        })
    }

    /// Build a new draft proposal from completed form data.
    pub fn materialize(&mut self, data: &ProposalFormData, now: DateTime<Utc>) -> Proposal {
        Proposal {
            id: self.ids.next_id(now),
            title: data.title.clone(),
            description: data.description.clone(),
            status: ProposalStatus::Draft,
            created_at: now,
            updated_at: now,
            proposer: DEFAULT_PROPOSER.to_string(),
            votes: Some(VoteTally::default()),
        }
    }

    /// Append a proposal for the given form session and close the form.
    pub async fn complete_submission(
        &mut self,
        session_id: u64,
        data: ProposalFormData,
    ) -> Result<Proposal, WorkspaceError> {
        if self.form.as_ref().map(|f| f.id) != Some(session_id) {
            return Err(WorkspaceError::StaleSession);
        }

        let proposal = self.materialize(&data, Utc::now());
        self.backend.submit(proposal.clone()).await?;
        self.form = None;

        log::info!(
            "Proposal {} created via {} backend: '{}'",
            proposal.id,
            self.backend.kind(),
            proposal.title
        );
        Ok(proposal)
    }

    pub async fn proposals(&self) -> Result<Vec<Proposal>, BackendError> {
        self.backend.list().await
    }

    pub async fn find(&self, id: &str) -> Result<Option<Proposal>, BackendError> {
        self.backend.find(id).await
    }
}
