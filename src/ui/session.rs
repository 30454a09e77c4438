use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::models::SearchEnvelope;

use super::controller::{FormController, FormState, FormView};

/// Sends one search submission to the action.
#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    async fn submit(&self, query: &str) -> Result<SearchEnvelope>;
}

/// Posts the form to a running instant search action over HTTP.
#[derive(Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    action_url: String,
}

impl HttpSubmitter {
    pub fn new(client: reqwest::Client, action_url: impl Into<String>) -> Self {
        Self {
            client,
            action_url: action_url.into(),
        }
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, query: &str) -> Result<SearchEnvelope> {
        let response = self
            .client
            .post(&self.action_url)
            .header(ACCEPT, "application/json")
            .form(&[("search", query)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::BAD_REQUEST => Ok(response.json().await?),
            status => bail!("search action responded with status {}", status),
        }
    }
}

/// Drives a [`FormController`] against a submitter.
///
/// Submissions are fire-and-forget tasks and are never cancelled; the
/// controller's sequence numbers decide which response is shown.
pub struct InstantSearch<S> {
    controller: Arc<Mutex<FormController>>,
    submitter: Arc<S>,
}

impl<S> Clone for InstantSearch<S> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            submitter: self.submitter.clone(),
        }
    }
}

impl<S: Submitter> InstantSearch<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            controller: Arc::new(Mutex::new(FormController::new())),
            submitter: Arc::new(submitter),
        }
    }

    /// Feeds an input change. When it qualifies, the submission is spawned and
    /// its handle returned; the task resolves to whether its response was
    /// applied.
    pub async fn input(&self, value: &str) -> Option<JoinHandle<bool>> {
        let submission = self.controller.lock().await.on_input(value)?;
        tracing::debug!(seq = submission.seq, "dispatching instant search");

        let controller = self.controller.clone();
        let submitter = self.submitter.clone();
        Some(tokio::spawn(async move {
            let outcome = submitter.submit(&submission.query).await;
            let mut controller = controller.lock().await;
            let applied = match outcome {
                Ok(envelope) => controller.on_response(submission.seq, envelope),
                Err(e) => {
                    tracing::warn!(seq = submission.seq, "instant search failed: {}", e);
                    controller.on_failure(submission.seq, "Search is unavailable right now")
                }
            };
            if !applied {
                tracing::debug!(seq = submission.seq, "discarded superseded response");
            }
            applied
        }))
    }

    pub async fn state(&self) -> FormState {
        self.controller.lock().await.state()
    }

    pub async fn view(&self) -> FormView {
        self.controller.lock().await.view()
    }
}
