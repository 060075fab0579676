//! HTML responses for the comment form.
//!
//! # Status Mapping
//! - Invalid form → 422 Unprocessable Entity
//! - Filing accepted → 200 OK
//! - Transient failure after backoff → 502 Bad Gateway
//! - Fatal failure → 500 Internal Server Error

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::ecfs::{ApiError, FilingConfirmation};

#[derive(Template)]
#[template(path = "success.html")]
struct SuccessPage<'a> {
    name: &'a str,
    proceeding: &'a str,
    confirmation: &'a FilingConfirmation,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    title: &'a str,
    messages: &'a [String],
}

fn render<T: Template>(status: StatusCode, page: &T) -> Response {
    match page.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Confirmation page for an accepted filing.
pub fn accepted(name: &str, proceeding: &str, confirmation: &FilingConfirmation) -> Response {
    render(
        StatusCode::OK,
        &SuccessPage {
            name,
            proceeding,
            confirmation,
        },
    )
}

/// Form problems listed back to the user.
pub fn invalid(messages: &[String]) -> Response {
    render(
        StatusCode::UNPROCESSABLE_ENTITY,
        &ErrorPage {
            title: "Please correct your submission",
            messages,
        },
    )
}

/// Status code for a filing that could not be submitted.
pub fn failure_status(error: &ApiError) -> StatusCode {
    match error {
        ApiError::Transient(_) => StatusCode::BAD_GATEWAY,
        ApiError::Fatal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Failure page. Internal details stay in the logs.
pub fn failed(error: &ApiError) -> Response {
    let messages = match error {
        ApiError::Transient(_) => vec![
            "The FCC filing system is not responding right now. Please try again later."
                .to_string(),
        ],
        ApiError::Fatal(_) => {
            vec!["Your comment could not be filed because of a problem on our side.".to_string()]
        }
    };
    render(
        failure_status(error),
        &ErrorPage {
            title: "Your comment was not filed",
            messages: &messages,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecfs::EcfsError;
    use chrono::{TimeZone, Utc};

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_accepted_page() {
        let confirmation = FilingConfirmation {
            confirm: "20170518123456789".into(),
            received: Some(Utc.with_ymd_and_hms(2017, 5, 18, 16, 48, 0).unwrap()),
            status: "RECEIVED".into(),
        };
        let response = accepted("Jane <Doe>", "17-108", &confirmation);
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("20170518123456789"));
        assert!(body.contains("17-108"));
        assert!(body.contains("Jane &lt;Doe&gt;"));
    }

    #[tokio::test]
    async fn test_invalid_page_lists_messages() {
        let response = invalid(&["Name is required".to_string(), "City is required".to_string()]);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_text(response).await;
        assert!(body.contains("<li>Name is required</li>"));
        assert!(body.contains("<li>City is required</li>"));
    }

    #[tokio::test]
    async fn test_failure_status_follows_class() {
        let transient = EcfsError::status("filings", 503, "busy").classify();
        assert_eq!(failure_status(&transient), StatusCode::BAD_GATEWAY);

        let fatal = EcfsError::NoProceedings.classify();
        let response = failed(&fatal);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_text(response).await.contains("proceeding"));
    }
}
