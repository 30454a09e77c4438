use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_form_payload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Pages endpoint of the upstream search API.
    pub search_url: String,
    pub vertical: String,
    pub crossvertical: String,
    /// Origin prepended to root-relative image paths.
    pub image_cdn_origin: String,
    /// `None` leaves upstream requests without a timeout.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                workers: num_cpus::get(),
                max_form_payload_size: 16_384, // 16KB
            },
            upstream: UpstreamConfig {
                search_url: "https://api.prod.airc.it/api/pages".to_string(),
                vertical: "main".to_string(),
                crossvertical: "1".to_string(),
                image_cdn_origin: "https://aircs3.imgix.net".to_string(),
                timeout_seconds: None,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        // Server configuration
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(workers) = env::var("WORKERS") {
            config.server.workers = workers.parse()?;
        }
        if let Ok(max_form_payload_size) = env::var("MAX_FORM_PAYLOAD_SIZE") {
            config.server.max_form_payload_size = max_form_payload_size.parse()?;
        }

        // Upstream configuration
        if let Ok(search_url) = env::var("UPSTREAM_SEARCH_URL") {
            config.upstream.search_url = search_url;
        }
        if let Ok(vertical) = env::var("UPSTREAM_VERTICAL") {
            config.upstream.vertical = vertical;
        }
        if let Ok(crossvertical) = env::var("UPSTREAM_CROSSVERTICAL") {
            config.upstream.crossvertical = crossvertical;
        }
        if let Ok(origin) = env::var("IMAGE_CDN_ORIGIN") {
            config.upstream.image_cdn_origin = origin.trim_end_matches('/').to_string();
        }
        if let Ok(timeout) = env::var("UPSTREAM_TIMEOUT_SECONDS") {
            config.upstream.timeout_seconds = Some(timeout.parse()?);
        }

        // Security configuration
        if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
            config.security.allowed_origins = allowed_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }
}
