//! Course service tests.
//!
//! Exercises course creation and the owned-courses back-reference against an
//! in-memory repository.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use coursehub::domain::Course;
use coursehub::errors::{AppError, AppResult};
use coursehub::infra::CourseRepository;
use coursehub::services::{CourseManager, CourseService};

// =============================================================================
// In-memory repository
// =============================================================================

#[derive(Default)]
struct InMemoryCourseRepo {
    courses: Mutex<Vec<Course>>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepo {
    async fn create(
        &self,
        course_name: String,
        course_description: String,
        course_price: f64,
        creator_id: Uuid,
    ) -> AppResult<Course> {
        let course = Course {
            id: Uuid::new_v4(),
            course_name,
            creator_id,
            course_description,
            course_price,
            created_at: Utc::now(),
        };
        self.courses.lock().unwrap().push(course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        let courses = self.courses.lock().unwrap();
        Ok(courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Course>> {
        // Newest first, as the SQL implementation orders by created_at desc
        let courses = self.courses.lock().unwrap();
        Ok(courses.iter().rev().cloned().collect())
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> AppResult<Vec<Course>> {
        let courses = self.courses.lock().unwrap();
        Ok(courses
            .iter()
            .filter(|c| c.creator_id == creator_id)
            .cloned()
            .collect())
    }
}

fn service() -> (CourseManager, Arc<InMemoryCourseRepo>) {
    let repo = Arc::new(InMemoryCourseRepo::default());
    (CourseManager::new(repo.clone()), repo)
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_course_sets_creator_from_caller() {
    let (service, _repo) = service();
    let creator_id = Uuid::new_v4();

    let course = service
        .create_course(
            creator_id,
            "Intro to Rust".to_string(),
            "Ownership without tears".to_string(),
            49.99,
        )
        .await
        .unwrap();

    assert_eq!(course.creator_id, creator_id);
    assert_eq!(course.course_name, "Intro to Rust");
    assert_eq!(course.course_description, "Ownership without tears");
    assert_eq!(course.course_price, 49.99);
}

#[tokio::test]
async fn test_created_course_is_retrievable() {
    let (service, _repo) = service();

    let created = service
        .create_course(
            Uuid::new_v4(),
            "Intro to Rust".to_string(),
            "Ownership without tears".to_string(),
            49.99,
        )
        .await
        .unwrap();

    let fetched = service.get_course(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.course_name, created.course_name);
}

#[tokio::test]
async fn test_get_course_not_found() {
    let (service, _repo) = service();

    let result = service.get_course(Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

// =============================================================================
// Listings and the owned-courses back-reference
// =============================================================================

#[tokio::test]
async fn test_owned_courses_in_creation_order() {
    let (service, _repo) = service();
    let creator_id = Uuid::new_v4();
    let other_creator = Uuid::new_v4();

    let mut expected = Vec::new();
    for name in ["First", "Second", "Third"] {
        let course = service
            .create_course(creator_id, name.to_string(), "desc".to_string(), 10.0)
            .await
            .unwrap();
        expected.push(course.id);
    }

    // Another creator's course must not leak into the list
    service
        .create_course(other_creator, "Other".to_string(), "desc".to_string(), 5.0)
        .await
        .unwrap();

    let owned: Vec<Uuid> = service
        .list_owned(creator_id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();

    assert_eq!(owned, expected);
}

#[tokio::test]
async fn test_list_courses_newest_first() {
    let (service, _repo) = service();
    let creator_id = Uuid::new_v4();

    let mut created = Vec::new();
    for name in ["First", "Second", "Third"] {
        let course = service
            .create_course(creator_id, name.to_string(), "desc".to_string(), 10.0)
            .await
            .unwrap();
        created.push(course.id);
    }
    created.reverse();

    let listed: Vec<Uuid> = service
        .list_courses()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();

    assert_eq!(listed, created);
}
