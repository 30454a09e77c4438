use crate::handlers;
use actix_web::{web, Resource, Scope};

pub fn config() -> Scope {
    web::scope("/api").route("/health", web::get().to(handlers::health_check))
}

pub fn instant_search(max_form_payload_size: usize) -> Resource {
    web::resource("/instant-search")
        .app_data(handlers::form_config(max_form_payload_size))
        .route(web::get().to(handlers::search_page))
        .route(web::post().to(handlers::search))
}
