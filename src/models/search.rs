use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub const SEARCH_REQUIRED: &str = "Search is required";

/// Form body posted to the instant search action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Search is required"))]
    pub search: String,
}

impl SearchForm {
    /// Builds the form from decoded body pairs. A repeated `search` field
    /// keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let search = pairs
            .into_iter()
            .find(|(name, _)| name == "search")
            .map(|(_, value)| value)
            .unwrap_or_default();
        Self { search }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub search: String,
}

impl FieldErrors {
    pub fn search_required() -> Self {
        Self {
            search: SEARCH_REQUIRED.to_string(),
        }
    }

    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let search = errors
            .field_errors()
            .get("search")
            .and_then(|errs| errs.first())
            .and_then(|err| err.message.as_ref())
            .map(|message| message.to_string())
            .unwrap_or_else(|| SEARCH_REQUIRED.to_string());
        Self { search }
    }
}

/// What the action answers with, on the wire and to the form controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchEnvelope {
    Invalid { errors: FieldErrors },
    Results { results: Vec<SearchResult>, status: u16 },
}

impl SearchEnvelope {
    pub fn invalid(errors: FieldErrors) -> Self {
        SearchEnvelope::Invalid { errors }
    }

    pub fn results(results: Vec<SearchResult>) -> Self {
        SearchEnvelope::Results {
            results,
            status: 200,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            SearchEnvelope::Invalid { .. } => 400,
            SearchEnvelope::Results { status, .. } => *status,
        }
    }

    pub fn error_text(&self) -> Option<&str> {
        match self {
            SearchEnvelope::Invalid { errors } => Some(errors.search.as_str()),
            SearchEnvelope::Results { .. } => None,
        }
    }

    pub fn result_list(&self) -> &[SearchResult] {
        match self {
            SearchEnvelope::Invalid { .. } => &[],
            SearchEnvelope::Results { results, .. } => results,
        }
    }
}
