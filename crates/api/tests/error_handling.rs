//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use fms_api::error::AppError;
use fms_core::error::{CoreError, FieldErrors};
use fms_core::status::EventStatus;
use http_body_util::BodyExt;
use validator::Validate;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Fight",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Fight with id 42 not found");
    assert!(json.get("fields").is_none());
}

#[tokio::test]
async fn validation_error_lists_every_field() {
    let mut fields = FieldErrors::default();
    fields.add("participant_a_id", "Participant A does not exist in this event");
    fields.add("participants", "A participant cannot fight themselves");

    let (status, json) = error_to_response(AppError::Core(CoreError::Validation(fields))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["fields"]["participant_a_id"][0],
        "Participant A does not exist in this event"
    );
    assert!(json["fields"]["participants"].is_array());
}

#[tokio::test]
async fn invalid_transition_is_keyed_by_status() {
    let err = AppError::Core(CoreError::InvalidTransition {
        from: EventStatus::Completed,
        to: EventStatus::Draft,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_TRANSITION");
    assert_eq!(json["error"], "Cannot transition from Completed to Draft");
    assert_eq!(
        json["fields"]["status"][0],
        "Cannot transition from Completed to Draft"
    );
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Fight 7 already has a result".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Fight 7 already has a result");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::Core(CoreError::Internal("connection string leaked".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[derive(Validate)]
struct Named {
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
}

#[tokio::test]
async fn validator_errors_become_field_errors() {
    let err: AppError = Named {
        name: String::new(),
    }
    .validate()
    .unwrap_err()
    .into();

    assert_matches!(&err, AppError::Core(CoreError::Validation(f)) if f.contains("name"));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["name"][0], "Name is required");
}
