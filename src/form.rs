//! Proposal form controller: optional generate-then-merge, then hand-off.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::generation::{GenerationError, ProposalGenerator};
use crate::models::proposal::ProposalFormData;

/// Shared "generation in progress" flag for one form session.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag unless it is already up. The returned guard lowers it on drop.
    pub fn try_raise(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard(self.0.clone()))
    }
}

#[derive(Debug)]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Resolves once the owning form session is closed.
pub struct CancelSignal(Option<watch::Receiver<bool>>);

impl CancelSignal {
    pub fn new(rx: watch::Receiver<bool>) -> Self {
        Self(Some(rx))
    }

    /// A signal that never fires.
    pub fn never() -> Self {
        Self(None)
    }

    pub async fn cancelled(&mut self) {
        match self.0.as_mut() {
            // A dropped sender means the session is gone, which counts as cancelled.
            Some(rx) => {
                let _ = rx.wait_for(|cancelled| *cancelled).await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// What happened to the optional generation step.
#[derive(Debug)]
pub enum GenerationStatus {
    /// No context given; the generator was not called.
    Skipped,
    /// Generated title and description replaced the typed ones.
    Applied,
    /// Generation failed; the draft went through as typed.
    Failed(GenerationError),
}

/// Final form data handed to the caller, plus the generation outcome.
#[derive(Debug)]
pub struct Submission {
    pub data: ProposalFormData,
    pub generation: GenerationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// A submission for this form is already in flight.
    Busy,
    /// The form was closed while generation was running.
    Cancelled,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Busy => write!(f, "A proposal is already being generated"),
            FormError::Cancelled => write!(f, "The form was closed before generation finished"),
        }
    }
}

impl std::error::Error for FormError {}

pub struct FormController {
    draft: ProposalFormData,
    loading: LoadingFlag,
    timeout: Duration,
}

impl FormController {
    pub fn new(draft: ProposalFormData, loading: LoadingFlag, timeout: Duration) -> Self {
        Self { draft, loading, timeout }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Run the submission. Consumes the controller so the draft is handed off once.
    pub async fn submit(
        mut self,
        generator: &dyn ProposalGenerator,
        mut cancel: CancelSignal,
    ) -> Result<Submission, FormError> {
        let _guard = self.loading.try_raise().ok_or(FormError::Busy)?;

        let Some(context) = self.draft.generation_context().map(str::to_owned) else {
            return Ok(Submission { data: self.draft, generation: GenerationStatus::Skipped });
        };

        let outcome = tokio::select! {
            res = tokio::time::timeout(self.timeout, generator.generate(&context)) => {
                res.unwrap_or(Err(GenerationError::Timeout(self.timeout)))
            }
            _ = cancel.cancelled() => {
                log::info!("Proposal generation cancelled: form closed");
                return Err(FormError::Cancelled);
            }
        };

        let generation = match outcome {
            Ok(generated) => {
                self.draft.merge(generated);
                GenerationStatus::Applied
            }
            Err(e) => {
                log::error!("Error generating proposal: {e}");
                GenerationStatus::Failed(e)
            }
        };

        Ok(Submission { data: self.draft, generation })
    }
}
