//! User repository with explicit credential loading.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity, UserRow};
use crate::domain::{Password, User, UserCredentials, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Default lookups use a projection without the credential column; the
/// stored hash is only fetched through the `find_credentials_*` variants.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID (credential excluded)
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address (credential excluded)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID with the stored credential loaded
    async fn find_credentials_by_id(&self, id: Uuid) -> AppResult<Option<UserCredentials>>;

    /// Find user by email with the stored credential loaded
    async fn find_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>>;

    /// Create a new user with an already-derived credential
    async fn create(
        &self,
        full_name: String,
        email: String,
        role: UserRole,
        credential: Password,
    ) -> AppResult<User>;

    /// Rewrite the stored credential; no other write path touches it
    async fn update_credential(&self, id: Uuid, credential: Password) -> AppResult<()>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .into_partial_model::<UserRow>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .into_partial_model::<UserRow>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_credentials_by_id(&self, id: Uuid) -> AppResult<Option<UserCredentials>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserCredentials::from))
    }

    async fn find_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserCredentials::from))
    }

    async fn create(
        &self,
        full_name: String,
        email: String,
        role: UserRole,
        credential: Password,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            full_name: Set(full_name),
            password_hash: Set(credential.into_string()),
            role: Set(role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update_credential(&self, id: Uuid, credential: Password) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(credential.into_string());
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}
