use crate::models::{SearchEnvelope, SearchResult};

/// Inputs this long or shorter never submit.
pub const SUBMIT_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub query: String,
}

/// What the form shows at a given moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub searching: bool,
    pub error: Option<String>,
    pub results: Vec<SearchResult>,
}

impl FormView {
    pub fn from_envelope(envelope: &SearchEnvelope) -> Self {
        Self {
            searching: false,
            error: envelope.error_text().map(str::to_string),
            results: envelope.result_list().to_vec(),
        }
    }
}

/// Instant search form state machine.
///
/// Every qualifying keystroke issues a new submission tagged with the next
/// sequence number. Only the answer to the most recent submission is applied,
/// so a slow early response can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
    issued: u64,
    last_response: Option<SearchEnvelope>,
    failure: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Handles an input change. Returns the submission to dispatch when the
    /// value is longer than the threshold.
    pub fn on_input(&mut self, value: &str) -> Option<Submission> {
        // Code points, not UTF-16 units: two astral characters stay below the threshold.
        if value.chars().count() <= SUBMIT_THRESHOLD {
            return None;
        }

        self.issued += 1;
        self.state = FormState::Submitting;
        Some(Submission {
            seq: self.issued,
            query: value.to_string(),
        })
    }

    /// Applies a response if it answers the latest submission. Returns whether
    /// it was applied.
    pub fn on_response(&mut self, seq: u64, envelope: SearchEnvelope) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.last_response = Some(envelope);
        self.failure = None;
        self.state = FormState::Idle;
        true
    }

    /// Records a failed latest submission. Previously shown results stay.
    pub fn on_failure(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.failure = Some(message.into());
        self.state = FormState::Idle;
        true
    }

    pub fn view(&self) -> FormView {
        let mut view = self
            .last_response
            .as_ref()
            .map(FormView::from_envelope)
            .unwrap_or_default();
        if let Some(failure) = &self.failure {
            view.error = Some(failure.clone());
        }
        view.searching = self.state == FormState::Submitting;
        view
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.state == FormState::Submitting && seq == self.issued
    }
}
