use crate::models::SearchResult;
use crate::utils::escape_html;

use super::controller::{FormView, SUBMIT_THRESHOLD};

pub const SEARCHING_TEXT: &str = "Searching...";

const INSTANT_SEARCH_JS: &str = include_str!("instant_search.js");

/// Renders the instant search page around the given form view.
pub fn render_page(query: &str, view: &FormView) -> String {
    let error = view
        .error
        .as_deref()
        .map(|message| format!(r#"<div id="search-error">{}</div>"#, escape_html(message)))
        .unwrap_or_default();
    let invalid = if view.error.is_some() {
        r#" aria-invalid="true" aria-errormessage="search-error""#
    } else {
        ""
    };
    let status = if view.searching { SEARCHING_TEXT } else { "" };
    let results: String = view.results.iter().map(render_result).collect();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Instant Search</title>
</head>
<body>
<header><h1><a href="/instant-search">Instant Search</a></h1></header>
<main>
<form id="search-form" method="post" action="/instant-search" data-threshold="{threshold}">
<label><span>Search: </span><input name="search" autocomplete="off" value="{query}"{invalid}></label>
{error}
<p id="search-status">{status}</p>
</form>
<ul id="search-results">{results}</ul>
</main>
<script>{script}</script>
</body>
</html>
"#,
        threshold = SUBMIT_THRESHOLD,
        query = escape_html(query),
        invalid = invalid,
        error = error,
        status = status,
        results = results,
        script = INSTANT_SEARCH_JS,
    )
}

fn render_result(result: &SearchResult) -> String {
    let title = escape_html(&result.title);
    let image = result
        .image
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{}" height="200">"#, escape_html(src), title))
        .unwrap_or_default();
    format!(
        r#"<li><div>{}<a href="{}">{}</a></div></li>"#,
        image,
        escape_html(&result.url),
        title
    )
}
