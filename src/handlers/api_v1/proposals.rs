use actix_web::{HttpResponse, web};

use crate::errors::AppError;
use crate::models::proposal::ProposalStatus;
use crate::state::AppState;
use crate::templates_structs::{ApiErrorResponse, PaginatedResponse};

/// GET /api/v1/proposals - List proposals in insertion order.
/// Query params: status (filter), page (default 1), per_page (default 25, max 100).
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let status_filter = match query.get("status") {
        None => None,
        Some(code) => match ProposalStatus::parse(code) {
            Some(status) => Some(status),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiErrorResponse {
                    error: format!("Unknown status '{code}'"),
                    details: Some("Expected one of: draft, submitted, approved, rejected".to_string()),
                }));
            }
        },
    };
    let page = query
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    let per_page = query
        .get("per_page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(25)
        .clamp(1, 100);

    let all_items = state.workspace.lock().await.proposals().await?;

    let filtered: Vec<_> = all_items
        .into_iter()
        .filter(|p| status_filter.is_none_or(|s| p.status == s))
        .collect();

    let total = filtered.len() as i64;
    // Pages past the end yield an empty `items`.
    let offset = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
    let items: Vec<_> = filtered
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        items,
        page,
        per_page,
        total,
    }))
}

/// GET /api/v1/proposals/{id}
pub async fn read(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match state.workspace.lock().await.find(&id).await? {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(ApiErrorResponse {
            error: format!("Proposal {id} not found"),
            details: None,
        })),
    }
}
