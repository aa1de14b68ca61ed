//! HTTP request handlers for the Refund Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::evaluate_policy;
use crate::error::EngineError;

use super::request::{CancellationRequest, EvaluateRequest, ListRefundsQuery, TransitionRequest};
use super::response::{ApiError, ApiErrorResponse, EvaluationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/policies", get(list_policies_handler))
        .route("/policies/:id", get(get_policy_handler))
        .route("/policies/:id/evaluate", post(evaluate_policy_handler))
        .route("/quotes", post(quote_handler))
        .route("/refunds", get(list_refunds_handler).post(create_refund_handler))
        .route("/refunds/:id", get(get_refund_handler))
        .route("/refunds/:id/transitions", post(transition_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

/// Maps a body rejection to an API error, logging the serde detail.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn parse_refund_id(raw: &str) -> Result<Uuid, ApiErrorResponse> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiErrorResponse::bad_request(ApiError::new(
            "INVALID_REFUND_ID",
            format!("'{}' is not a valid refund id", raw),
        ))
    })
}

/// Handler for GET /policies.
async fn list_policies_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.manager().policies().all_policies() {
        Ok(policies) => json_response(StatusCode::OK, policies),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /policies/:id.
async fn get_policy_handler(
    State(state): State<AppState>,
    Path(policy_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.manager().policies().get_policy(&policy_id) {
        Ok(policy) => json_response(StatusCode::OK, policy),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /policies/:id/evaluate.
///
/// Looks up the penalty that applies at the given hours before departure.
async fn evaluate_policy_handler(
    State(state): State<AppState>,
    Path(policy_id): Path<String>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let result = state
        .manager()
        .policies()
        .get_policy(&policy_id)
        .and_then(|policy| evaluate_policy(&policy, request.hours_before_departure));

    match result {
        Ok(evaluation) => {
            info!(
                correlation_id = %correlation_id,
                policy_id = %policy_id,
                hours_before_departure = %request.hours_before_departure,
                penalty_percentage = %evaluation.penalty_percentage,
                "Policy evaluated"
            );
            json_response(
                StatusCode::OK,
                EvaluationResponse {
                    policy_id,
                    hours_before_departure: request.hours_before_departure,
                    selected_threshold: evaluation.selected_threshold,
                    penalty_percentage: evaluation.penalty_percentage,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /quotes.
///
/// Prices a cancellation without creating a refund request.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<CancellationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let at = request.requested_at.unwrap_or_else(Utc::now);
    match state.manager().quote(&request.booking, &request.policy_id, at) {
        Ok(quote) => {
            info!(
                correlation_id = %correlation_id,
                booking_id = %quote.booking_id,
                refund_amount = %quote.refund_amount,
                duration_us = quote.audit_trace.duration_us,
                "Quote completed successfully"
            );
            json_response(StatusCode::OK, quote)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /refunds.
///
/// Prices the cancellation and stores a new request awaiting expert review.
async fn create_refund_handler(
    State(state): State<AppState>,
    payload: Result<Json<CancellationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing refund request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let at = request.requested_at.unwrap_or_else(Utc::now);
    match state
        .manager()
        .create_refund(&request.booking, &request.policy_id, at)
    {
        Ok(refund) => json_response(StatusCode::CREATED, refund),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /refunds.
async fn list_refunds_handler(
    State(state): State<AppState>,
    query: Result<Query<ListRefundsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response();
        }
    };

    match state.manager().list(query.status) {
        Ok(refunds) => json_response(StatusCode::OK, refunds),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /refunds/:id.
async fn get_refund_handler(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match parse_refund_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match state.manager().get(id) {
        Ok(refund) => json_response(StatusCode::OK, refund),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /refunds/:id/transitions.
///
/// Applies a reviewer action. Returns the updated request.
async fn transition_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match parse_refund_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    info!(
        correlation_id = %correlation_id,
        refund_id = %id,
        action = %request.action,
        "Processing transition request"
    );

    match state.manager().transition(id, &request.into(), Utc::now()) {
        Ok(refund) => json_response(StatusCode::OK, refund),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{RefundRequest, RefundStatus};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config").expect("Failed to load config");
        AppState::in_memory(config)
    }

    fn refund_body(booking_id: &str) -> String {
        format!(
            r#"{{
                "booking": {{
                    "id": "{}",
                    "amount": "10000000",
                    "currency": "IRR",
                    "departure_time": "2026-03-01T08:00:00Z",
                    "source": {{ "type": "direct", "pnr": "ABC123" }}
                }},
                "policy_id": "standard",
                "requested_at": "2026-02-27T06:00:00Z"
            }}"#,
            booking_id
        )
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<String>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.oneshot(request).await.unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_refund_returns_201() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/refunds", Some(refund_body("bk_001"))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let refund: RefundRequest = read_json(response).await;
        assert_eq!(refund.status, RefundStatus::PendingExpertReview);
        assert_eq!(refund.refund_amount, rust_decimal::Decimal::from(5_000_000));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/quotes", Some("{invalid json".to_string())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_policy_id_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{
            "booking": {
                "id": "bk_001",
                "amount": "100",
                "currency": "IRR",
                "departure_time": "2026-03-01T08:00:00Z",
                "source": { "type": "direct", "pnr": "ABC123" }
            }
        }"#;
        let response = send(router, "POST", "/quotes", Some(body.to_string())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("policy_id"));
    }

    #[tokio::test]
    async fn test_invalid_refund_id_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/refunds/not-a-uuid", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_REFUND_ID");
    }

    #[tokio::test]
    async fn test_unknown_status_filter_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/refunds?status=ARCHIVED", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_evaluate_unknown_policy_returns_404() {
        let router = create_router(create_test_state());
        let response = send(
            router,
            "POST",
            "/policies/gold/evaluate",
            Some(r#"{ "hours_before_departure": "50" }"#.to_string()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "POLICY_NOT_FOUND");
    }
}
