// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fitlog_tracker::error::{AppError, StoreError};

#[test]
fn test_is_invalid_record_matches() {
    let err = StoreError::InvalidRecord("adherence_score must be within 1-5".to_string());
    assert!(err.is_invalid_record());
}

#[test]
fn test_is_invalid_record_no_match() {
    assert!(!StoreError::Unavailable("timeout".to_string()).is_invalid_record());
    assert!(!StoreError::Auth("HTTP 403".to_string()).is_invalid_record());
    assert!(!StoreError::Remote("HTTP 500".to_string()).is_invalid_record());

    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    assert!(!StoreError::from(io).is_invalid_record());
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (
            AppError::from(StoreError::InvalidRecord("x".to_string())),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::from(StoreError::Unavailable("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[test]
fn test_store_error_display_keeps_detail() {
    let err = StoreError::Auth("HTTP 401: invalid_grant".to_string());
    assert!(err.to_string().contains("invalid_grant"));

    let app = AppError::from(err);
    assert!(app.to_string().contains("invalid_grant"));
}

#[tokio::test]
async fn test_error_body_carries_details() {
    let response = AppError::NotFound("No workout data recorded".to_string()).into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "not_found");
    assert_eq!(body["details"], "No workout data recorded");
}
