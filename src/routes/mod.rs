pub mod api;

use actix_web::web;

use crate::handlers::not_found;

/// Mounts every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig, max_form_payload_size: usize) {
    cfg.service(api::config())
        .service(api::instant_search(max_form_payload_size))
        .default_service(web::route().to(not_found));
}
