//! Schema upload orchestrator
//!
//! Parses a picked file locally, submits it to the compiler service and
//! reduces the reply to a single status and message.

use super::outcome::{classify, RequestOutcome};
use super::schema::{CompileResponse, TableSchema};
use crate::services::gateway::CompilerApi;
use crate::services::request_runner::RequestRunner;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::sync::Arc;

pub const PARSE_ERROR_MESSAGE: &str = "Invalid JSON file format";
pub const ACCEPTED_MESSAGE: &str = "JSON compiled successfully";
pub const REJECTED_MESSAGE: &str = "Failed to connect to compile the JSON file. Please try again.";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to connect to the compiler service. Please try again.";

/// Where the current upload attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Submitting,
    Accepted,
    Rejected,
    ParseError,
    TransportFailure,
}

impl UploadStatus {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            UploadStatus::Rejected | UploadStatus::ParseError | UploadStatus::TransportFailure
        )
    }
}

pub struct SchemaUpload {
    gateway: Arc<dyn CompilerApi>,
    runner: RequestRunner<RequestOutcome<CompileResponse>>,
    status: UploadStatus,
    message: String,
    /// `status` field of the last compile reply body, kept verbatim
    body_status: Option<String>,
    /// Short description of the submitted document, if it looks like a table schema
    schema_summary: Option<String>,
    /// Bumped on every submit and reset; completions for older attempts are dropped
    attempt: u64,
    completed_at: Option<DateTime<Local>>,
}

impl SchemaUpload {
    pub fn new(gateway: Arc<dyn CompilerApi>) -> Self {
        Self {
            gateway,
            runner: RequestRunner::new(),
            status: UploadStatus::Idle,
            message: String::new(),
            body_status: None,
            schema_summary: None,
            attempt: 0,
            completed_at: None,
        }
    }

    /// Parse `raw` and, if it is JSON, send it to the compiler.
    ///
    /// Returns false when an earlier submission is still in flight; nothing
    /// changes in that case.
    pub fn submit(&mut self, raw: &str) -> bool {
        if self.status == UploadStatus::Submitting {
            tracing::debug!(attempt = self.attempt, "upload already in flight, ignoring submit");
            return false;
        }

        self.reset();

        let document: Value = match serde_json::from_str(raw) {
            Ok(document) => document,
            Err(err) => {
                tracing::info!(%err, "uploaded file is not valid JSON");
                self.status = UploadStatus::ParseError;
                self.message = PARSE_ERROR_MESSAGE.to_string();
                self.completed_at = Some(Local::now());
                return true;
            }
        };

        self.schema_summary = TableSchema::summarize(&document);
        self.status = UploadStatus::Submitting;
        self.message.clear();

        let attempt = self.attempt;
        let gateway = Arc::clone(&self.gateway);
        tracing::info!(attempt, schema = ?self.schema_summary, "submitting schema to compiler");
        self.runner
            .spawn(attempt, move || classify(gateway.compile(&document)));
        true
    }

    /// Forget the current attempt, including one still in flight
    pub fn reset(&mut self) {
        self.attempt += 1;
        self.status = UploadStatus::Idle;
        self.message.clear();
        self.body_status = None;
        self.schema_summary = None;
        self.completed_at = None;
    }

    /// Apply any compile reply that has arrived. Returns true if state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        for completion in self.runner.poll() {
            let outcome = completion.result.unwrap_or_else(RequestOutcome::TransportFailure);
            changed |= self.apply_outcome(completion.ticket, outcome);
        }
        changed
    }

    fn apply_outcome(&mut self, attempt: u64, outcome: RequestOutcome<CompileResponse>) -> bool {
        if attempt != self.attempt || self.status != UploadStatus::Submitting {
            tracing::debug!(attempt, current = self.attempt, "dropping stale compile reply");
            return false;
        }

        match outcome {
            RequestOutcome::Pending => return false,
            RequestOutcome::Success(reply) => {
                if reply.status.as_deref() != Some("success") {
                    // HTTP status decides the branch; the body tag is only recorded
                    tracing::warn!(
                        body_status = ?reply.status,
                        "compiler answered 200 with a non-success body status"
                    );
                }
                tracing::info!(attempt, "schema accepted");
                self.status = UploadStatus::Accepted;
                self.message = reply
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| ACCEPTED_MESSAGE.to_string());
                self.body_status = reply.status;
            }
            RequestOutcome::Rejected { status, message } => {
                tracing::info!(attempt, status, "schema rejected");
                self.status = UploadStatus::Rejected;
                self.message = message.unwrap_or_else(|| REJECTED_MESSAGE.to_string());
            }
            RequestOutcome::TransportFailure(cause) => {
                tracing::warn!(attempt, %cause, "compile request failed");
                self.status = UploadStatus::TransportFailure;
                self.message = TRANSPORT_FAILURE_MESSAGE.to_string();
            }
        }

        self.completed_at = Some(Local::now());
        true
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn body_status(&self) -> Option<&str> {
        self.body_status.as_deref()
    }

    pub fn schema_summary(&self) -> Option<&str> {
        self.schema_summary.as_deref()
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    /// The submit control is disabled while this is true
    pub fn is_submitting(&self) -> bool {
        self.status == UploadStatus::Submitting
    }

    pub fn is_busy(&self) -> bool {
        self.runner.in_flight() > 0
    }
}
