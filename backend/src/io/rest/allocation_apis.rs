//! # REST API for Allocations
//!
//! Creation is called by the checkout flow after payment confirmation. The
//! status endpoint evaluates accrual before answering, so every read the
//! dashboard makes brings the stored record up to date.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use log::info;
use shared::{AllocationListRequest, AllocationListResponse, CreateAllocationRequest};

use super::error_response;
use super::mappers::AllocationMapper;
use crate::AppState;

pub async fn create_allocation(
    State(state): State<AppState>,
    Json(request): Json<CreateAllocationRequest>,
) -> impl IntoResponse {
    let command = AllocationMapper::to_create_command(request);
    info!(
        "POST /api/allocations - user: {}, product: {}, method: {}",
        command.user_id,
        command.product_id,
        command.payment_method.method_name()
    );

    match state.allocation_service.create_allocation(command, Utc::now()).await {
        Ok(result) => {
            let response = AllocationMapper::to_create_response(result);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to create allocation", e),
    }
}

/// Evaluate an allocation and return it with its withdrawal countdown
pub async fn get_allocation_status(
    State(state): State<AppState>,
    Path(allocation_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/allocations/{}", allocation_id);

    match state.allocation_service.evaluate_accrual(&allocation_id, Utc::now()).await {
        Ok(evaluation) => {
            let response = AllocationMapper::to_status_response(evaluation);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to evaluate allocation", e),
    }
}

pub async fn withdraw_allocation(
    State(state): State<AppState>,
    Path(allocation_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/allocations/{}/withdraw", allocation_id);

    match state.allocation_service.withdraw(&allocation_id, Utc::now()).await {
        Ok(result) => {
            let response = AllocationMapper::to_withdraw_response(result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to withdraw allocation", e),
    }
}

/// A user's allocations, newest first; `?refresh=true` evaluates them first
pub async fn list_user_allocations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<AllocationListRequest>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/allocations - refresh: {}", user_id, query.refresh);

    let result = if query.refresh {
        state.allocation_service.refresh_user_allocations(&user_id, Utc::now()).await
    } else {
        state.allocation_service.list_user_allocations(&user_id).await
    };

    match result {
        Ok(allocations) => {
            let response = AllocationListResponse {
                allocations: AllocationMapper::to_dto_list(allocations),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to list allocations", e),
    }
}

pub async fn get_portfolio_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/portfolio", user_id);

    match state.allocation_service.portfolio_summary(&user_id).await {
        Ok(summary) => (StatusCode::OK, Json(AllocationMapper::summary_to_dto(summary))).into_response(),
        Err(e) => error_response("Failed to compute portfolio summary", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::create_test_app_state;
    use shared::{MobileMoneyProvider, PaymentMethod};

    fn checkout_request(product_id: &str) -> CreateAllocationRequest {
        CreateAllocationRequest {
            user_id: "user-1".to_string(),
            product_id: product_id.to_string(),
            payment_method: PaymentMethod::MobileMoney {
                provider: MobileMoneyProvider::OrangeMoney,
                phone_number: "+237 690 00 00 00".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_create_allocation_returns_created() {
        let (app_state, _env) = create_test_app_state().await;

        let response = create_allocation(State(app_state.clone()), Json(checkout_request("iphone-15-pro")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let stored = app_state.allocation_service.list_user_allocations("user-1").await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_create_allocation_for_unknown_product() {
        let (app_state, _env) = create_test_app_state().await;

        let response = create_allocation(State(app_state), Json(checkout_request("pixel-8")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_withdraw_fresh_allocation_is_conflict() {
        let (app_state, _env) = create_test_app_state().await;
        let created = app_state
            .allocation_service
            .create_allocation(AllocationMapper::to_create_command(checkout_request("iphone-15-pro")), Utc::now())
            .await
            .unwrap();

        let response = withdraw_allocation(State(app_state), Path(created.allocation.id))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_status_and_list_endpoints() {
        let (app_state, _env) = create_test_app_state().await;
        let created = app_state
            .allocation_service
            .create_allocation(AllocationMapper::to_create_command(checkout_request("airpods-pro-2")), Utc::now())
            .await
            .unwrap();

        let response = get_allocation_status(State(app_state.clone()), Path(created.allocation.id))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = list_user_allocations(
            State(app_state.clone()),
            Path("user-1".to_string()),
            Query(AllocationListRequest { refresh: true }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = get_portfolio_summary(State(app_state), Path("user-1".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
