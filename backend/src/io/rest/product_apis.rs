//! # REST API for the Product Catalog

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;
use shared::{ProductListRequest, ProductListResponse};

use super::error_response;
use super::mappers::ProductMapper;
use crate::AppState;

/// List the catalog, optionally filtered by category
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListRequest>,
) -> impl IntoResponse {
    info!("GET /api/products - query: {:?}", query);

    let products = match query.category.as_deref() {
        Some(category) => ProductMapper::to_dto_list(state.catalog.products_by_category(category)),
        None => ProductMapper::to_dto_list(state.catalog.all_products()),
    };

    (StatusCode::OK, Json(ProductListResponse { products })).into_response()
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/products/{}", product_id);

    match state.catalog.require_product(&product_id) {
        Ok(product) => (StatusCode::OK, Json(ProductMapper::to_dto(product))).into_response(),
        Err(e) => error_response("Failed to get product", e),
    }
}
