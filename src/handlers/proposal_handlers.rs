use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::csrf;
use crate::errors::{AppError, render};
use crate::flash::set_flash;
use crate::form::{FormController, GenerationStatus};
use crate::models::proposal::ProposalFormData;
use crate::state::AppState;
use crate::templates_structs::{
    DraftView, EMPTY_LIST_MESSAGE, IndexTemplate, PageContext, ProposalCard,
    ProposalDetailTemplate, ProposalListTemplate, proposal_cards, sidebar_items,
};
use crate::validate::{
    MAX_CONTEXT_LEN, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, validate_optional, validate_required,
};
use crate::workspace::WorkspaceError;

/// Body of the form open/close buttons.
#[derive(Debug, Deserialize)]
pub struct CsrfForm {
    pub csrf_token: String,
}

/// Form input for submitting a proposal.
#[derive(Debug, Deserialize)]
pub struct ProposalSubmitForm {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub context: String,
    pub csrf_token: String,
}

impl ProposalSubmitForm {
    fn into_form_data(self) -> ProposalFormData {
        let context = self.context.trim();
        ProposalFormData {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            context: (!context.is_empty()).then(|| context.to_string()),
        }
    }

    fn validate(&self) -> Vec<String> {
        [
            validate_required(&self.title, "Title", MAX_TITLE_LEN),
            validate_required(&self.description, "Description", MAX_DESCRIPTION_LEN),
            validate_optional(&self.context, "Context", MAX_CONTEXT_LEN),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/"))
        .finish()
}

async fn render_index(
    state: &AppState,
    session: &Session,
    draft: DraftView,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let (proposals, show_form, is_generating) = {
        let ws = state.workspace.lock().await;
        (ws.proposals().await?, ws.is_form_visible(), ws.is_generating())
    };

    let tmpl = IndexTemplate {
        ctx: PageContext::build(session, state),
        sidebar: sidebar_items(&proposals),
        cards: proposal_cards(&proposals),
        empty_message: EMPTY_LIST_MESSAGE.to_string(),
        show_form,
        is_generating,
        generation_enabled: state.config.generation.api_key.is_some(),
        draft,
        errors,
    };
    render(tmpl)
}

/// GET /
/// Renders the workspace: sidebar, proposal list and the form (when open).
pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    render_index(&state, &session, DraftView::default(), vec![]).await
}

/// GET /proposals
/// Renders the standalone proposal list.
pub async fn list(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let proposals = state.workspace.lock().await.proposals().await?;
    let ctx = PageContext::build(&session, &state);
    render(ProposalListTemplate::new(ctx, &proposals))
}

/// GET /proposals/{id}
pub async fn detail(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let found = state.workspace.lock().await.find(&id).await?;
    match found {
        Some(p) => {
            let tmpl = ProposalDetailTemplate {
                ctx: PageContext::build(&session, &state),
                card: ProposalCard::from(&p),
                updated_at: p.updated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            };
            render(tmpl)
        }
        None => Err(AppError::NotFound),
    }
}

/// POST /proposals/form/open
pub async fn open_form(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    state.workspace.lock().await.show_form();
    Ok(redirect_home())
}

/// POST /proposals/form/close
/// Hides the form; a generation still running for it is cancelled.
pub async fn close_form(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    state.workspace.lock().await.hide_form();
    Ok(redirect_home())
}

/// POST /proposals
/// Runs the optional generation step, then appends the proposal and closes the form.
pub async fn submit(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<ProposalSubmitForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Take what we need and release the lock before the generation call.
    let ticket = state.workspace.lock().await.form_ticket();
    let Some(ticket) = ticket else {
        set_flash(&session, "The proposal form is closed. Open it to submit a proposal.");
        return Ok(redirect_home());
    };

    let form = form.into_inner();
    let errors = form.validate();
    let draft = form.into_form_data();

    if !errors.is_empty() {
        return render_index(&state, &session, DraftView::from(&draft), errors).await;
    }

    let controller = FormController::new(draft, ticket.loading, state.config.generation.timeout);
    let submission = match controller.submit(state.generator.as_ref(), ticket.cancel).await {
        Ok(s) => s,
        Err(e) => {
            set_flash(&session, e.to_string());
            return Ok(redirect_home());
        }
    };

    let result = state
        .workspace
        .lock()
        .await
        .complete_submission(ticket.session_id, submission.data)
        .await;

    match result {
        Ok(proposal) => {
            let message = match submission.generation {
                GenerationStatus::Applied => {
                    format!("Proposal '{}' created from the generated draft", proposal.title)
                }
                GenerationStatus::Skipped => format!("Proposal '{}' created", proposal.title),
                GenerationStatus::Failed(_) => format!(
                    "Proposal '{}' created as typed (auto-generation was unavailable)",
                    proposal.title
                ),
            };
            set_flash(&session, message);
        }
        Err(WorkspaceError::StaleSession) => {
            set_flash(&session, "The proposal form was closed; the submission was discarded");
        }
        Err(WorkspaceError::Backend(e)) => {
            log::error!("Failed to submit proposal: {e}");
            set_flash(&session, format!("Could not submit proposal: {e}"));
        }
    }
    Ok(redirect_home())
}
