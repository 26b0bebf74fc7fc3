//! Test utilities for document store backed tests
//!
//! The temp directory behind a `TestEnvironment` is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::DocumentConnection;
use super::{AllocationRepository, UserRepository};
use crate::domain::models::allocation::Allocation;
use crate::domain::models::payment::PaymentDetails;
use crate::domain::models::user::User;
use crate::storage::{AllocationStorage, UserStorage};

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: DocumentConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("storefront_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = DocumentConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

/// Repositories wired to a throwaway document store
pub struct RepositoryTestHelper {
    pub env: TestEnvironment,
    pub allocation_repo: AllocationRepository,
    pub user_repo: UserRepository,
}

impl RepositoryTestHelper {
    pub async fn new() -> Result<Self> {
        let env = TestEnvironment::new().await?;
        let allocation_repo = AllocationRepository::new(env.connection.clone());
        let user_repo = UserRepository::new(env.connection.clone());

        Ok(RepositoryTestHelper {
            env,
            allocation_repo,
            user_repo,
        })
    }

    pub async fn create_test_user(&self, id: &str) -> Result<User> {
        let user = User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            name: Some("Test User".to_string()),
        };
        self.user_repo.store_user(&user).await?;
        Ok(user)
    }

    /// Store an iPhone allocation (15.50/day) for `user_id` made at `allocation_date`
    pub async fn create_test_allocation(&self, user_id: &str, allocation_date: DateTime<Utc>) -> Result<Allocation> {
        let allocation = sample_allocation(user_id, allocation_date);
        self.allocation_repo.store_allocation(&allocation).await?;
        Ok(allocation)
    }
}

pub fn sample_allocation(user_id: &str, allocation_date: DateTime<Utc>) -> Allocation {
    Allocation {
        id: Allocation::generate_id(),
        user_id: user_id.to_string(),
        product_id: "iphone-15-pro".to_string(),
        allocation_date,
        total_paid: 999.0,
        payment_method: PaymentDetails::PayPal {
            email: format!("{}@example.com", user_id),
        },
        daily_revenue: 15.5,
        total_revenue: 0.0,
        can_withdraw: false,
        withdrawn_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_repository_helper() -> Result<()> {
        let helper = RepositoryTestHelper::new().await?;
        let user = helper.create_test_user("user-1").await?;
        let allocation = helper.create_test_allocation(&user.id, Utc::now()).await?;

        let stored = helper.allocation_repo.get_allocation(&allocation.id).await?;
        assert_eq!(stored, Some(allocation));
        Ok(())
    }
}
