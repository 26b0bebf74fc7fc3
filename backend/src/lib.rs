//! # Storefront Backend
//!
//! Allocation lifecycle engine behind the storefront: a confirmed purchase
//! becomes an allocation that accrues simulated daily revenue and can be
//! withdrawn once its product's cooldown has elapsed.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (accrual rules, services)
//!     ↓
//! Storage Layer (document store)
//! ```
//!
//! The domain only depends on the storage traits, so the record store can be
//! swapped without touching the accrual rules.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::domain::{AllocationService, ProductCatalog, UserService};
use crate::storage::DocumentConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: AllocationService<DocumentConnection>,
    pub user_service: UserService<DocumentConnection>,
    pub catalog: Arc<ProductCatalog>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up document store in {}", config.data_directory.display());
    let connection = Arc::new(DocumentConnection::new(&config.data_directory)?);

    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading product catalog from {}", path.display());
            ProductCatalog::from_yaml_file(path)?
        }
        None => ProductCatalog::seeded(),
    };
    info!("Product catalog has {} products", catalog.len());
    let catalog = Arc::new(catalog);

    info!("Setting up domain services");
    let user_service = UserService::new(connection.clone());
    let allocation_service = AllocationService::new(connection, catalog.clone(), user_service.clone());

    Ok(AppState {
        allocation_service,
        user_service,
        catalog,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin: {}", allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/products", get(io::product_apis::list_products))
        .route("/products/:id", get(io::product_apis::get_product))
        .route("/users", post(io::user_apis::register_user))
        .route("/users/:id", get(io::user_apis::get_user))
        .route("/users/:id/allocations", get(io::allocation_apis::list_user_allocations))
        .route("/users/:id/portfolio", get(io::allocation_apis::get_portfolio_summary))
        .route("/allocations", post(io::allocation_apis::create_allocation))
        .route("/allocations/:id", get(io::allocation_apis::get_allocation_status))
        .route("/allocations/:id/withdraw", post(io::allocation_apis::withdraw_allocation));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
