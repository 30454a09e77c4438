use actix_web::{HttpResponse, Result};

use crate::ui::{render_page, FormView};

pub async fn search_page() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page("", &FormView::default())))
}
