pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod ui;
pub mod utils;

use std::sync::Arc;
use std::time::Instant;

use config::Config;
use services::{SearchBackend, SearchService};

#[derive(Clone)]
pub struct AppState {
    pub search_service: SearchService,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn SearchBackend>) -> Self {
        let search_service =
            SearchService::new(backend, config.upstream.image_cdn_origin.clone());
        Self {
            search_service,
            config,
            start_time: Instant::now(),
        }
    }
}
