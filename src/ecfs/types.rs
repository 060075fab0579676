//! ECFS error definitions and shared wire types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ClassifiedError;

/// Longest response body excerpt kept in an error.
const MAX_BODY_EXCERPT: usize = 512;

/// Errors that can occur talking to the ECFS API.
#[derive(Debug, Error)]
pub enum EcfsError {
    /// HTTP client could not be constructed.
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Endpoint URL could not be formed.
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Connection or transfer failed.
    #[error("request to {resource} failed: {source}")]
    Transport {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status.
    #[error("response code {status} on {resource}: {body}")]
    Status {
        resource: &'static str,
        status: u16,
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("cannot decode {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be serialized.
    #[error("cannot encode filing: {0}")]
    Encode(#[source] serde_json::Error),

    /// Lookup did not return exactly one proceeding.
    #[error("got the wrong number ({count}) of proceedings back for name '{name}'")]
    ResultCount { name: String, count: usize },

    /// Filing built without any proceeding to attach it to.
    #[error("a filing needs at least one proceeding")]
    NoProceedings,
}

impl EcfsError {
    pub(crate) fn status(resource: &'static str, status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_EXCERPT) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Self::Status {
            resource,
            status,
            body,
        }
    }

    /// Retry class of this failure.
    ///
    /// Network trouble, bad statuses and garbled responses may clear up on
    /// their own. Everything else is a bug or a data problem.
    pub fn classify(self) -> ApiError {
        match self {
            EcfsError::Transport { .. } | EcfsError::Status { .. } | EcfsError::Decode { .. } => {
                ClassifiedError::Transient(self)
            }
            EcfsError::Client(_)
            | EcfsError::Url(_)
            | EcfsError::Encode(_)
            | EcfsError::ResultCount { .. }
            | EcfsError::NoProceedings => ClassifiedError::Fatal(self),
        }
    }
}

impl From<EcfsError> for ClassifiedError<EcfsError> {
    fn from(err: EcfsError) -> Self {
        err.classify()
    }
}

/// Classified ECFS failure.
pub type ApiError = ClassifiedError<EcfsError>;

/// Result type for ECFS operations.
pub type EcfsResult<T> = Result<T, ApiError>;

/// Receipt returned by the server for an accepted filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingConfirmation {
    /// Confirmation id.
    pub confirm: String,
    /// When the server accepted the filing. Unparseable or missing
    /// timestamps decode to `None` so an accepted filing is never retried.
    #[serde(default, deserialize_with = "lenient_timestamp::deserialize")]
    pub received: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
}

impl FilingConfirmation {
    /// Receipt time for display, `unknown` when the server sent none we could read.
    pub fn received_at(&self) -> String {
        self.received
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl fmt::Display for FilingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "confirmation {} received {} ({})",
            self.confirm,
            self.received_at(),
            self.status
        )
    }
}

/// Accepts RFC 3339, offset-less timestamps (taken as UTC), or anything else as `None`.
mod lenient_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(serde_json::Value::as_str).and_then(parse))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }
}
