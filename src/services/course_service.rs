//! Course service - Handles course publishing and reads.
//!
//! Creation is the only write: courses are never mutated or deleted, and
//! the creator reference is stamped from the authenticated caller here,
//! never taken from the payload.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Course;
use crate::errors::{AppResult, OptionExt};
use crate::infra::CourseRepository;

/// Course service trait for dependency injection.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Create a new course owned by `creator_id`
    async fn create_course(
        &self,
        creator_id: Uuid,
        course_name: String,
        course_description: String,
        course_price: f64,
    ) -> AppResult<Course>;

    /// Get course by ID
    async fn get_course(&self, id: Uuid) -> AppResult<Course>;

    /// List all courses, newest first
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    /// List a user's created courses, in creation order
    async fn list_owned(&self, creator_id: Uuid) -> AppResult<Vec<Course>>;
}

/// Concrete implementation of CourseService using the repository.
pub struct CourseManager {
    courses: Arc<dyn CourseRepository>,
}

impl CourseManager {
    /// Create new course service instance with repository
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseService for CourseManager {
    async fn create_course(
        &self,
        creator_id: Uuid,
        course_name: String,
        course_description: String,
        course_price: f64,
    ) -> AppResult<Course> {
        self.courses
            .create(course_name, course_description, course_price, creator_id)
            .await
    }

    async fn get_course(&self, id: Uuid) -> AppResult<Course> {
        self.courses.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.courses.list().await
    }

    async fn list_owned(&self, creator_id: Uuid) -> AppResult<Vec<Course>> {
        self.courses.list_by_creator(creator_id).await
    }
}
