use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Result};
use validator::Validate;

use crate::models::{ErrorResponse, FieldErrors, SearchEnvelope, SearchForm};
use crate::ui::{render_page, FormView};
use crate::AppState;

const UPSTREAM_UNAVAILABLE: &str = "Search is unavailable right now";
const FORM_TOO_LARGE: &str = "Search form is too large";

/// Instant search action: validates the term, queries upstream and answers
/// with a `SearchEnvelope`.
pub async fn search(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse> {
    let form = SearchForm::from_pairs(form.into_inner());

    if let Err(e) = form.validate() {
        tracing::debug!("Rejected search: {}", e);
        let envelope = SearchEnvelope::invalid(FieldErrors::from_validation(&e));
        return Ok(respond_envelope(&http_req, &form.search, &envelope));
    }

    match state.search_service.search(&form.search).await {
        Ok(results) => {
            tracing::info!(results = results.len(), "Search completed");
            let envelope = SearchEnvelope::results(results);
            Ok(respond_envelope(&http_req, &form.search, &envelope))
        }
        Err(e) => {
            tracing::error!("Upstream search error: {:?}", e);
            if wants_html(&http_req) {
                let view = FormView {
                    error: Some(UPSTREAM_UNAVAILABLE.to_string()),
                    ..FormView::default()
                };
                return Ok(HttpResponse::BadGateway()
                    .content_type("text/html; charset=utf-8")
                    .body(render_page(&form.search, &view)));
            }
            Ok(HttpResponse::BadGateway().json(ErrorResponse::with_details(
                UPSTREAM_UNAVAILABLE,
                e.to_string(),
            )))
        }
    }
}

/// Form extractor settings for the action. Oversized bodies are refused with
/// 413; any other unreadable body gets the same 400 envelope as an empty term.
pub fn form_config(limit: usize) -> web::FormConfig {
    web::FormConfig::default()
        .limit(limit)
        .error_handler(|err: UrlencodedError, req: &HttpRequest| {
            let response = match &err {
                UrlencodedError::Overflow { size, limit } => {
                    tracing::warn!(size, limit, "Rejected oversized search form");
                    HttpResponse::PayloadTooLarge().json(ErrorResponse::with_details(
                        FORM_TOO_LARGE,
                        format!("body of {} bytes exceeds the {} byte limit", size, limit),
                    ))
                }
                _ => {
                    tracing::debug!("Unreadable search form: {}", err);
                    let envelope = SearchEnvelope::invalid(FieldErrors::search_required());
                    respond_envelope(req, "", &envelope)
                }
            };
            InternalError::from_response(err, response).into()
        })
}

fn respond_envelope(http_req: &HttpRequest, query: &str, envelope: &SearchEnvelope) -> HttpResponse {
    let status = StatusCode::from_u16(envelope.status_code()).unwrap_or(StatusCode::OK);

    if wants_html(http_req) {
        return HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(render_page(query, &FormView::from_envelope(envelope)));
    }

    HttpResponse::build(status).json(envelope)
}

fn wants_html(http_req: &HttpRequest) -> bool {
    http_req
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|value| value.contains("text/html"))
        .unwrap_or(false)
}
