use anyhow::Result;
use async_trait::async_trait;
use log::info;

use super::connection::{DocumentConnection, USERS_COLLECTION};
use crate::domain::models::user::User;
use crate::storage::traits::UserStorage;

/// User documents in the `users` collection, keyed by user ID
#[derive(Clone)]
pub struct UserRepository {
    connection: DocumentConnection,
}

impl UserRepository {
    pub fn new(connection: DocumentConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        self.connection
            .write_document(USERS_COLLECTION, &user.id, user)
            .await?;
        info!("Stored user '{}'", user.id);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.connection.read_document(USERS_COLLECTION, user_id).await
    }
}
