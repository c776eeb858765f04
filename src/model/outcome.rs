//! Request outcome classification
//!
//! Every gateway result is reduced to a `RequestOutcome` before either
//! orchestrator looks at it. Orchestrators decide how much of the
//! distinction between `Rejected` and `TransportFailure` reaches the user.

use crate::services::gateway::{GatewayError, HttpReply};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// The only status treated as success. Other 2xx codes are rejections.
pub const HTTP_OK: u16 = 200;

/// Classified result of one network operation
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    /// Issued, no completion yet
    Pending,
    /// HTTP 200 with a decodable payload
    Success(T),
    /// The service answered with any other status
    Rejected {
        status: u16,
        /// The body's `message` field, when it has a non-empty one
        message: Option<String>,
    },
    /// No usable reply: connection error, unreadable body, or undecodable 200 payload
    TransportFailure(String),
}

impl<T> RequestOutcome<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestOutcome::Pending)
    }

    /// Same classification with the payload dropped
    pub fn without_payload(&self) -> RequestOutcome<()> {
        match self {
            RequestOutcome::Pending => RequestOutcome::Pending,
            RequestOutcome::Success(_) => RequestOutcome::Success(()),
            RequestOutcome::Rejected { status, message } => RequestOutcome::Rejected {
                status: *status,
                message: message.clone(),
            },
            RequestOutcome::TransportFailure(cause) => {
                RequestOutcome::TransportFailure(cause.clone())
            }
        }
    }
}

impl<T> fmt::Display for RequestOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOutcome::Pending => write!(f, "pending"),
            RequestOutcome::Success(_) => write!(f, "ok"),
            RequestOutcome::Rejected { status, .. } => write!(f, "rejected ({})", status),
            RequestOutcome::TransportFailure(_) => write!(f, "transport failure"),
        }
    }
}

/// Reduce a raw gateway result to a `RequestOutcome`
pub fn classify<T: DeserializeOwned>(result: Result<HttpReply, GatewayError>) -> RequestOutcome<T> {
    let reply = match result {
        Ok(reply) => reply,
        Err(err) => return RequestOutcome::TransportFailure(err.to_string()),
    };

    if reply.status != HTTP_OK {
        return RequestOutcome::Rejected {
            status: reply.status,
            message: server_message(&reply.body),
        };
    }

    match serde_json::from_str::<T>(&reply.body) {
        Ok(payload) => RequestOutcome::Success(payload),
        Err(err) => RequestOutcome::TransportFailure(format!("unreadable response body: {}", err)),
    }
}

/// Extract a non-empty string `message` field from a JSON object body
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
