pub mod api_v1;
pub mod proposal_handlers;

use actix_web::web;

/// Register every application route. Static files and the 404 fallback are
/// added by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(proposal_handlers::index))
        .route("/proposals", web::get().to(proposal_handlers::list))
        .route("/proposals", web::post().to(proposal_handlers::submit))
        .route("/proposals/form/open", web::post().to(proposal_handlers::open_form))
        .route("/proposals/form/close", web::post().to(proposal_handlers::close_form))
        .route("/proposals/{id}", web::get().to(proposal_handlers::detail))
        .service(web::scope("/api/v1").configure(api_v1::configure));
}
