//! Course repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::Course;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Create a new course
    async fn create(
        &self,
        course_name: String,
        course_description: String,
        course_price: f64,
        creator_id: Uuid,
    ) -> AppResult<Course>;

    /// Find course by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>>;

    /// List all courses, newest first
    async fn list(&self) -> AppResult<Vec<Course>>;

    /// List courses created by a user, in creation order
    async fn list_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Course>>;
}

/// Concrete implementation of CourseRepository backed by SeaORM
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn create(
        &self,
        course_name: String,
        course_description: String,
        course_price: f64,
        creator_id: Uuid,
    ) -> AppResult<Course> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_name: Set(course_name),
            creator_id: Set(creator_id),
            course_description: Set(course_description),
            course_price: Set(course_price),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Course::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Course::from))
    }

    async fn list(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_desc(course::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .filter(course::Column::CreatorId.eq(creator_id))
            .order_by_asc(course::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Course::from).collect())
    }
}
