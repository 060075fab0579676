//! ECFS HTTP client.
//!
//! # Responsibilities
//! - Look up proceedings by docket name
//! - Submit filings and decode the confirmation
//! - Classify every failure as transient or fatal
//!
//! Retrying is left to the caller (see `resilience::backoff`); each method
//! here makes exactly one request.

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Credentials, EcfsConfig};
use crate::ecfs::filing::{EcfsFiling, FilingInfo};
use crate::ecfs::proceeding::{Proceeding, ProceedingList};
use crate::ecfs::types::{EcfsError, EcfsResult, FilingConfirmation};
use crate::observability::metrics;

const PROCEEDINGS: &str = "proceedings";
const FILINGS: &str = "filings";

/// Client for the ECFS public API.
#[derive(Clone)]
pub struct EcfsClient {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl EcfsClient {
    /// Create a client with transport defaults.
    ///
    /// `base_url` is the API root; it should end in `/` so resource names
    /// resolve beneath it.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, EcfsError> {
        Self::with_timeout(base_url, credentials, None)
    }

    pub fn from_config(config: &EcfsConfig, credentials: Credentials) -> Result<Self, EcfsError> {
        Self::with_timeout(
            &config.base_url,
            credentials,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn with_timeout(
        base_url: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, EcfsError> {
        let base_url = Url::parse(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(EcfsError::Client)?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resource URL with the API key and any extra query parameters.
    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url, EcfsError> {
        let mut url = self.base_url.join(resource)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.credentials.api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetch the single proceeding with the given docket name.
    ///
    /// Zero or several matches is fatal: asking again will not change the
    /// answer.
    pub async fn proceeding(&self, name: &str) -> EcfsResult<Proceeding> {
        let url = self.endpoint(PROCEEDINGS, &[("name", name)])?;
        tracing::debug!(name = %name, "Looking up proceeding");

        let start = Instant::now();
        let result = self.fetch_proceeding(url, name).await;
        metrics::record_api_request(PROCEEDINGS, outcome(&result), start);
        result
    }

    async fn fetch_proceeding(&self, url: Url, name: &str) -> EcfsResult<Proceeding> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| EcfsError::Transport {
                resource: PROCEEDINGS,
                source,
            })?;

        let list: ProceedingList = read_json(PROCEEDINGS, response).await?;
        let count = list.proceedings.len();
        let mut proceedings = list.proceedings.into_iter();

        match (proceedings.next(), proceedings.next()) {
            (Some(proceeding), None) => {
                tracing::debug!(name = %proceeding.name, id = proceeding.id, "Proceeding found");
                Ok(proceeding)
            }
            _ => Err(EcfsError::ResultCount {
                name: name.to_string(),
                count,
            }
            .into()),
        }
    }

    /// Post a filing and return the server's receipt.
    pub async fn submit(&self, filing: &EcfsFiling) -> EcfsResult<FilingConfirmation> {
        let url = self.endpoint(FILINGS, &[])?;
        let body = serde_json::to_vec(&filing.to_submission()).map_err(EcfsError::Encode)?;

        tracing::debug!(
            proceedings = filing.proceedings.len(),
            bytes = body.len(),
            "Submitting filing"
        );

        let start = Instant::now();
        let result = self.post_filing(url, body).await;
        metrics::record_api_request(FILINGS, outcome(&result), start);
        result
    }

    async fn post_filing(&self, url: Url, body: Vec<u8>) -> EcfsResult<FilingConfirmation> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| EcfsError::Transport {
                resource: FILINGS,
                source,
            })?;

        let confirmation: FilingConfirmation = read_json(FILINGS, response).await?;
        tracing::info!(confirm = %confirmation.confirm, status = %confirmation.status, "Filing accepted");
        Ok(confirmation)
    }

    /// Build a filing from submitter info and submit it.
    pub async fn file(
        &self,
        info: FilingInfo,
        proceedings: Vec<Proceeding>,
    ) -> EcfsResult<FilingConfirmation> {
        let filing = EcfsFiling::build(info, proceedings)?;
        self.submit(&filing).await
    }
}

impl std::fmt::Debug for EcfsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcfsClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Check the status, then decode the body.
async fn read_json<T: DeserializeOwned>(
    resource: &'static str,
    response: reqwest::Response,
) -> EcfsResult<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| EcfsError::Transport { resource, source })?;

    if !status.is_success() {
        return Err(EcfsError::status(resource, status.as_u16(), &text).into());
    }

    serde_json::from_str(&text).map_err(|source| EcfsError::Decode { resource, source }.into())
}

fn outcome<T>(result: &EcfsResult<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(e) => e.class().as_str(),
    }
}
