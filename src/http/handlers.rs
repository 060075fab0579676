//! Request handlers.

use axum::extract::{Form, State};
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use crate::http::form::{error_messages, SubmissionForm};
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::Backoff;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub proceeding: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        proceeding: state.proceeding.name.clone(),
    })
}

/// `POST /submit`: validate, then file against the startup proceeding.
pub async fn submit(State(state): State<AppState>, Form(form): Form<SubmissionForm>) -> Response {
    let form = form.normalized();
    if let Err(errors) = form.validate() {
        let messages = error_messages(&errors);
        tracing::debug!(problems = messages.len(), "Rejected invalid submission");
        metrics::record_submission("invalid");
        return response::invalid(&messages);
    }

    let info = form.into_filing_info();
    let name = info.name.clone();

    // Fresh driver per request; nothing here is shared across submissions.
    let mut backoff = Backoff::from_config(&state.backoff);
    tracing::debug!(
        proceeding = %state.proceeding.name,
        max_attempts = ?backoff.max_attempts(),
        "Filing submission"
    );
    let result = backoff
        .run(|| {
            let client = state.client.clone();
            let info = info.clone();
            let proceeding = state.proceeding.as_ref().clone();
            async move { client.file(info, vec![proceeding]).await }
        })
        .await;

    match result {
        Ok(confirmation) => {
            metrics::record_submission("ok");
            response::accepted(&name, &state.proceeding.name, &confirmation)
        }
        Err(e) => {
            tracing::error!(error = %e, class = %e.class(), "Filing failed");
            metrics::record_submission(e.class().as_str());
            response::failed(&e)
        }
    }
}
