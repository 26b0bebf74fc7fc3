//! User records backing allocation ownership.
//!
//! Authentication happens elsewhere; this service only keeps the `users`
//! collection in shape so allocations always point at a known user.

use log::info;
use std::sync::Arc;

use crate::domain::commands::user::RegisterUserCommand;
use crate::domain::errors::{AllocationError, AllocationResult};
use crate::domain::models::payment::is_valid_email;
use crate::domain::models::user::User;
use crate::storage::{Connection, UserStorage};

#[derive(Clone)]
pub struct UserService<C: Connection> {
    user_repository: C::UserRepository,
}

impl<C: Connection> UserService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
        }
    }

    /// Create or replace the user document
    pub async fn register_user(&self, command: RegisterUserCommand) -> AllocationResult<User> {
        info!("Registering user '{}'", command.id);

        let user = Self::validate(command)?;
        self.user_repository.store_user(&user).await?;
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> AllocationResult<User> {
        let user_id = User::normalize_id(user_id);
        self.user_repository
            .get_user(user_id)
            .await?
            .ok_or_else(|| AllocationError::user_not_found(user_id))
    }

    /// Return the stored user, creating the document on first sight
    pub async fn ensure_user(&self, command: RegisterUserCommand) -> AllocationResult<User> {
        if let Some(existing) = self.user_repository.get_user(User::normalize_id(&command.id)).await? {
            return Ok(existing);
        }
        info!("No user document for '{}', creating one", command.id);
        self.register_user(command).await
    }

    fn validate(command: RegisterUserCommand) -> AllocationResult<User> {
        let id = User::normalize_id(&command.id).to_string();
        if id.is_empty() {
            return Err(AllocationError::Validation("User id is required".to_string()));
        }
        if !is_valid_email(&command.email) {
            return Err(AllocationError::Validation(format!("Invalid email: {}", command.email)));
        }

        let name = command
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(User {
            id,
            email: command.email.trim().to_string(),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::document::test_utils::TestEnvironment;
    use crate::storage::DocumentConnection;

    async fn setup_test() -> (UserService<DocumentConnection>, TestEnvironment) {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let service = UserService::new(Arc::new(env.connection.clone()));
        (service, env)
    }

    fn command(id: &str, email: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            id: id.to_string(),
            email: email.to_string(),
            name: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_and_get_user() {
        let (service, _env) = setup_test().await;

        let user = service.register_user(command("uid-1", "ada@example.com")).await.unwrap();
        assert_eq!(user.name, None);

        assert_eq!(service.get_user("uid-1").await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let (service, _env) = setup_test().await;
        let err = service.get_user("ghost").await.unwrap_err();
        assert!(matches!(err, AllocationError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let (service, _env) = setup_test().await;

        let err = service.register_user(command("", "ada@example.com")).await.unwrap_err();
        assert_eq!(err.kind(), "validation_error");

        let err = service.register_user(command("uid-1", "not-an-email")).await.unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }

    #[tokio::test]
    async fn test_user_ids_are_normalized_on_write_and_lookup() {
        let (service, _env) = setup_test().await;

        let user = service.register_user(command(" buyer ", "buyer@example.com")).await.unwrap();
        assert_eq!(user.id, "buyer");

        assert_eq!(service.get_user(" buyer").await.unwrap(), user);
        assert_eq!(service.get_user("buyer").await.unwrap(), user);
        assert_eq!(service.ensure_user(command("buyer  ", "other@example.com")).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_ensure_user_keeps_existing_document() {
        let (service, _env) = setup_test().await;

        let original = service
            .register_user(RegisterUserCommand {
                id: "uid-1".to_string(),
                email: "ada@example.com".to_string(),
                name: Some("Ada".to_string()),
            })
            .await
            .unwrap();

        let ensured = service.ensure_user(command("uid-1", "other@example.com")).await.unwrap();
        assert_eq!(ensured, original);

        let created = service.ensure_user(command("uid-2", "bob@example.com")).await.unwrap();
        assert_eq!(created.id, "uid-2");
    }
}
