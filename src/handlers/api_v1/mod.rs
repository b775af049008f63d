pub mod proposals;

use actix_web::web;

/// Configure API v1 routes (read-only).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/proposals")
            .route("", web::get().to(proposals::list))
            .route("/{id}", web::get().to(proposals::read))
    );
}
