use askama::Template;

use crate::models::proposal::{Proposal, ProposalFormData};
use super::PageContext;

pub const EMPTY_LIST_MESSAGE: &str = "No proposals submitted yet";

/// Display-ready view of one proposal in the list.
#[derive(Debug, Clone)]
pub struct ProposalCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub proposer: String,
    pub created_date: String,
    pub status_code: String,
    pub status_label: String,
    pub has_votes: bool,
    pub votes_for: u64,
    pub votes_against: u64,
}

impl From<&Proposal> for ProposalCard {
    fn from(p: &Proposal) -> Self {
        let votes = p.votes.unwrap_or_default();
        ProposalCard {
            id: p.id.clone(),
            title: p.title.clone(),
            description: p.description.clone(),
            proposer: p.proposer.clone(),
            created_date: p.created_at.format("%-m/%-d/%Y").to_string(),
            status_code: p.status.as_str().to_string(),
            status_label: p.status.label().to_string(),
            has_votes: p.votes.is_some(),
            votes_for: votes.in_favor,
            votes_against: votes.against,
        }
    }
}

/// Map proposals to cards, preserving order.
pub fn proposal_cards(proposals: &[Proposal]) -> Vec<ProposalCard> {
    proposals.iter().map(ProposalCard::from).collect()
}

/// Entry in the "Recent Proposals" sidebar.
#[derive(Debug, Clone)]
pub struct SidebarItem {
    pub id: String,
    pub title: String,
}

pub fn sidebar_items(proposals: &[Proposal]) -> Vec<SidebarItem> {
    proposals
        .iter()
        .map(|p| SidebarItem { id: p.id.clone(), title: p.title.clone() })
        .collect()
}

/// Values to pre-fill the form with (empty on a fresh form).
#[derive(Debug, Clone, Default)]
pub struct DraftView {
    pub title: String,
    pub description: String,
    pub context: String,
}

impl From<&ProposalFormData> for DraftView {
    fn from(d: &ProposalFormData) -> Self {
        DraftView {
            title: d.title.clone(),
            description: d.description.clone(),
            context: d.context.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub ctx: PageContext,
    pub sidebar: Vec<SidebarItem>,
    pub cards: Vec<ProposalCard>,
    pub empty_message: String,
    pub show_form: bool,
    pub is_generating: bool,
    pub generation_enabled: bool,
    pub draft: DraftView,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "proposals/list.html")]
pub struct ProposalListTemplate {
    pub ctx: PageContext,
    pub cards: Vec<ProposalCard>,
    pub empty_message: String,
}

impl ProposalListTemplate {
    pub fn new(ctx: PageContext, proposals: &[Proposal]) -> Self {
        Self {
            ctx,
            cards: proposal_cards(proposals),
            empty_message: EMPTY_LIST_MESSAGE.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "proposals/detail.html")]
pub struct ProposalDetailTemplate {
    pub ctx: PageContext,
    pub card: ProposalCard,
    pub updated_at: String,
}
