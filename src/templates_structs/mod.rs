// Template context structures for Askama templates, organized by domain.

use actix_session::Session;

use crate::config::BackendKind;
use crate::csrf;
use crate::flash::take_flash;
use crate::state::AppState;

pub const APP_NAME: &str = "Governance Proposals";

/// Common context shared by all pages.
/// Templates access these as `ctx.flash`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub app_name: String,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub network_label: String,
    pub wallet_ready: bool,
    pub backend_kind: String,
}

impl PageContext {
    pub fn build(session: &Session, state: &AppState) -> Self {
        let chain = state.chain();
        let backend_kind = match state.config.backend {
            BackendKind::Local => "local",
            BackendKind::Chain => "chain",
        };
        Self {
            app_name: APP_NAME.to_string(),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            network_label: chain.network_label(),
            wallet_ready: chain.wallet_ready(),
            backend_kind: backend_kind.to_string(),
        }
    }
}

mod api;
mod proposal;

pub use self::api::{ApiErrorResponse, PaginatedResponse};
pub use self::proposal::{
    DraftView, IndexTemplate, ProposalCard, ProposalDetailTemplate, ProposalListTemplate,
    SidebarItem, EMPTY_LIST_MESSAGE, proposal_cards, sidebar_items,
};
