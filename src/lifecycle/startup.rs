//! Startup sequence.
//!
//! Credentials → API client → proceeding lookup (under backoff). Any failure
//! here is returned to `main`, which is the only place allowed to exit.

use std::path::Path;

use thiserror::Error;

use crate::config::{AppConfig, BackoffConfig, Credentials, CredentialsError};
use crate::ecfs::{ApiError, EcfsClient, EcfsError, EcfsResult, Proceeding};
use crate::http::AppState;
use crate::resilience::Backoff;

/// Errors that prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error("cannot create ECFS client: {0}")]
    Client(#[from] EcfsError),

    #[error("cannot retrieve proceeding '{name}': {source}")]
    Proceeding {
        name: String,
        #[source]
        source: ApiError,
    },
}

/// Look up a proceeding, retrying transient failures.
pub async fn fetch_proceeding(
    client: &EcfsClient,
    name: &str,
    backoff: &BackoffConfig,
) -> EcfsResult<Proceeding> {
    let mut backoff = Backoff::from_config(backoff);
    tracing::info!(
        name = %name,
        max_attempts = ?backoff.max_attempts(),
        max_delay = ?backoff.max(),
        "Retrieving proceeding"
    );
    backoff.run(move || client.proceeding(name)).await
}

/// Build the shared handler state from configuration.
pub async fn initialize(config: &AppConfig) -> Result<AppState, StartupError> {
    let credentials = Credentials::load(Path::new(&config.ecfs.credentials_path))?;
    let client = EcfsClient::from_config(&config.ecfs, credentials)?;

    let proceeding = fetch_proceeding(&client, &config.ecfs.proceeding, &config.backoff)
        .await
        .map_err(|source| StartupError::Proceeding {
            name: config.ecfs.proceeding.clone(),
            source,
        })?;

    tracing::info!(
        name = %proceeding.name,
        id = proceeding.id,
        description = %proceeding.description,
        "Proceeding loaded"
    );

    Ok(AppState::new(client, proceeding, config.backoff.clone()))
}
