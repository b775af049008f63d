mod ids;
mod types;

pub use ids::ProposalIdGenerator;
pub use types::*;

/// Author recorded on proposals created from the web form.
pub const DEFAULT_PROPOSER: &str = "Anonymous";
