use std::sync::Arc;

use crate::domain::commands::user::RegisterUserCommand;
use crate::domain::{AllocationService, ProductCatalog, UserService};
use crate::storage::document::test_utils::TestEnvironment;
use crate::AppState;

/// App state over a throwaway store with the seeded catalog and `user-1`
pub async fn create_test_app_state() -> (AppState, TestEnvironment) {
    let env = TestEnvironment::new().await.expect("Failed to create test environment");
    let connection = Arc::new(env.connection.clone());
    let catalog = Arc::new(ProductCatalog::seeded());

    let user_service = UserService::new(connection.clone());
    user_service
        .register_user(RegisterUserCommand {
            id: "user-1".to_string(),
            email: "user-1@example.com".to_string(),
            name: Some("Test User".to_string()),
        })
        .await
        .expect("Failed to register test user");

    let allocation_service = AllocationService::new(connection, catalog.clone(), user_service.clone());

    let app_state = AppState {
        allocation_service,
        user_service,
        catalog,
    };
    (app_state, env)
}
