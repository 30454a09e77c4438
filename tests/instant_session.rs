use anyhow::{anyhow, bail};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use actix_web::{web, App};
use instant_search::config::Config;
use instant_search::errors::SearchError;
use instant_search::models::{FieldErrors, SearchEnvelope, SearchResult, UpstreamResponse};
use instant_search::routes;
use instant_search::services::SearchBackend;
use instant_search::ui::{FormState, HttpSubmitter, InstantSearch, Submitter};
use instant_search::AppState;

type Reply = Result<SearchEnvelope, String>;

/// Submitter whose responses are released by the test, in any order.
struct Scripted {
    pending: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Submitter for Scripted {
    async fn submit(&self, query: &str) -> anyhow::Result<SearchEnvelope> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rx = self.pending.lock().unwrap().remove(query);
        match rx {
            Some(rx) => rx.await?.map_err(|message| anyhow!(message)),
            None => bail!("unexpected query {}", query),
        }
    }
}

fn scripted(
    queries: &[&str],
) -> (Scripted, HashMap<String, oneshot::Sender<Reply>>, Arc<AtomicUsize>) {
    let mut pending = HashMap::new();
    let mut senders = HashMap::new();
    for query in queries {
        let (tx, rx) = oneshot::channel();
        pending.insert(query.to_string(), rx);
        senders.insert(query.to_string(), tx);
    }
    let calls = Arc::new(AtomicUsize::new(0));
    let submitter = Scripted {
        pending: Mutex::new(pending),
        calls: calls.clone(),
    };
    (submitter, senders, calls)
}

fn result(title: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        url: format!("/{}", title),
        image: None,
    }
}

#[tokio::test]
async fn short_inputs_never_submit() {
    let (submitter, mut senders, calls) = scripted(&["abc"]);
    let session = InstantSearch::new(submitter);

    assert!(session.input("a").await.is_none());
    assert!(session.input("ab").await.is_none());
    assert_eq!(session.state().await, FormState::Idle);

    let handle = session.input("abc").await.unwrap();
    assert_eq!(session.state().await, FormState::Submitting);
    assert!(session.view().await.searching);

    senders
        .remove("abc")
        .unwrap()
        .send(Ok(SearchEnvelope::results(vec![result("abc")])))
        .unwrap();
    assert!(handle.await.unwrap());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let view = session.view().await;
    assert!(!view.searching);
    assert_eq!(view.results, vec![result("abc")]);
}

#[tokio::test]
async fn late_response_from_older_keystroke_is_ignored() {
    let (submitter, mut senders, calls) = scripted(&["sho", "shoe"]);
    let session = InstantSearch::new(submitter);

    let older = session.input("sho").await.unwrap();
    let newer = session.input("shoe").await.unwrap();

    senders
        .remove("shoe")
        .unwrap()
        .send(Ok(SearchEnvelope::results(vec![result("shoe")])))
        .unwrap();
    assert!(newer.await.unwrap());

    senders
        .remove("sho")
        .unwrap()
        .send(Ok(SearchEnvelope::results(vec![result("sho")])))
        .unwrap();
    assert!(!older.await.unwrap());

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(session.view().await.results, vec![result("shoe")]);
    assert_eq!(session.state().await, FormState::Idle);
}

#[tokio::test]
async fn validation_error_and_failure_are_shown_inline() {
    let (submitter, mut senders, _) = scripted(&["abc", "abcd"]);
    let session = InstantSearch::new(submitter);

    let handle = session.input("abc").await.unwrap();
    senders
        .remove("abc")
        .unwrap()
        .send(Ok(SearchEnvelope::invalid(FieldErrors::search_required())))
        .unwrap();
    assert!(handle.await.unwrap());
    assert_eq!(session.view().await.error.as_deref(), Some("Search is required"));

    let handle = session.input("abcd").await.unwrap();
    senders
        .remove("abcd")
        .unwrap()
        .send(Err("connection reset".to_string()))
        .unwrap();
    assert!(handle.await.unwrap());

    let view = session.view().await;
    assert!(!view.searching);
    assert_eq!(view.error.as_deref(), Some("Search is unavailable right now"));
}

struct StaticBackend;

#[async_trait]
impl SearchBackend for StaticBackend {
    async fn fetch_pages(&self, term: &str) -> Result<UpstreamResponse, SearchError> {
        Ok(serde_json::from_value(json!({
            "data": [
                { "title": term, "url": "/found", "featuredimage": { "url": "/img/found.jpg" } }
            ]
        }))?)
    }
}

#[actix_web::test]
async fn http_submitter_round_trips_through_the_action() {
    let srv = actix_test::start(|| {
        App::new()
            .app_data(web::Data::new(AppState::new(
                Config::default(),
                Arc::new(StaticBackend),
            )))
            .configure(|cfg| routes::configure(cfg, 16_384))
    });

    let submitter = HttpSubmitter::new(reqwest::Client::new(), srv.url("/instant-search"));

    let envelope = submitter.submit("running shoes").await.unwrap();
    assert_eq!(
        envelope,
        SearchEnvelope::results(vec![SearchResult {
            title: "running shoes".to_string(),
            url: "/found".to_string(),
            image: Some("https://aircs3.imgix.net/img/found.jpg".to_string()),
        }])
    );

    let envelope = submitter.submit("").await.unwrap();
    assert_eq!(envelope, SearchEnvelope::invalid(FieldErrors::search_required()));
}
