use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::errors::SearchError;
use crate::models::{SearchResult, UpstreamPage, UpstreamResponse};
use crate::utils::resolve_image;

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn fetch_pages(&self, term: &str) -> Result<UpstreamResponse, SearchError>;
}

/// Pages API client. One GET per call, no retry.
#[derive(Clone)]
pub struct UpstreamSearch {
    client: reqwest::Client,
    settings: UpstreamConfig,
}

impl UpstreamSearch {
    pub fn new(settings: UpstreamConfig) -> Result<Self, SearchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    /// Builds the upstream request. The term travels percent-encoded as the
    /// single `search` parameter.
    pub fn request(&self, term: &str) -> Result<reqwest::Request, SearchError> {
        let request = self
            .client
            .get(&self.settings.search_url)
            .query(&[
                ("vertical", self.settings.vertical.as_str()),
                ("crossvertical", self.settings.crossvertical.as_str()),
                ("search", term),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl SearchBackend for UpstreamSearch {
    async fn fetch_pages(&self, term: &str) -> Result<UpstreamResponse, SearchError> {
        let request = self.request(term)?;
        tracing::debug!(url = %request.url(), "querying upstream search");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[derive(Clone)]
pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
    image_cdn_origin: String,
}

impl SearchService {
    pub fn new(backend: Arc<dyn SearchBackend>, image_cdn_origin: impl Into<String>) -> Self {
        Self {
            backend,
            image_cdn_origin: image_cdn_origin.into(),
        }
    }

    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self.backend.fetch_pages(term).await?;
        Ok(to_results(response.data, &self.image_cdn_origin))
    }
}

pub fn to_results(pages: Vec<UpstreamPage>, image_cdn_origin: &str) -> Vec<SearchResult> {
    pages
        .into_iter()
        .map(|page| {
            let image = resolve_image(page.featuredimage.as_ref(), image_cdn_origin);
            SearchResult {
                title: page.title,
                url: page.url,
                image,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn upstream() -> UpstreamSearch {
        UpstreamSearch::new(Config::default().upstream).unwrap()
    }

    #[test]
    fn request_targets_pages_endpoint_with_fixed_params() {
        let request = upstream().request("shoes").unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://api.prod.airc.it/api/pages?vertical=main&crossvertical=1&search=shoes"
        );
    }

    #[test]
    fn request_encodes_term_as_single_parameter() {
        let request = upstream().request("red shoes&vertical=x").unwrap();
        let searches: Vec<String> = request
            .url()
            .query_pairs()
            .filter(|(key, _)| key == "search")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(searches, vec!["red shoes&vertical=x".to_string()]);

        let verticals = request
            .url()
            .query_pairs()
            .filter(|(key, _)| key == "vertical")
            .count();
        assert_eq!(verticals, 1);
    }

    #[test]
    fn maps_upstream_pages_to_results() {
        let response: UpstreamResponse = serde_json::from_value(json!({
            "data": [
                { "title": "Shoe A", "url": "/a", "featuredimage": { "url": "/img/a.jpg" } },
                { "title": "Shoe B", "url": "/b", "featuredimage": null },
                { "title": "Shoe C", "url": "/c", "featuredimage": { "url": "https://cdn.example.com/c.jpg" } }
            ]
        }))
        .unwrap();

        let results = to_results(response.data, "https://aircs3.imgix.net");
        assert_eq!(
            results,
            vec![
                SearchResult {
                    title: "Shoe A".into(),
                    url: "/a".into(),
                    image: Some("https://aircs3.imgix.net/img/a.jpg".into()),
                },
                SearchResult {
                    title: "Shoe B".into(),
                    url: "/b".into(),
                    image: None,
                },
                SearchResult {
                    title: "Shoe C".into(),
                    url: "/c".into(),
                    image: Some("https://cdn.example.com/c.jpg".into()),
                },
            ]
        );
    }

    #[test]
    fn body_without_data_is_not_a_valid_response() {
        assert!(serde_json::from_value::<UpstreamResponse>(json!({ "items": [] })).is_err());
    }
}
