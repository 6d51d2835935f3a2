//! Course domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Course domain entity.
///
/// Courses are created once and never mutated; `creator_id` references the
/// publishing user and is set at creation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub course_name: String,
    pub creator_id: Uuid,
    pub course_description: String,
    pub course_price: f64,
    pub created_at: DateTime<Utc>,
}

/// Course response (client wire shape)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    /// Unique course identifier
    pub id: Uuid,
    /// Course title
    pub course_name: String,
    /// Id of the user who created the course
    pub creator_id: Uuid,
    /// Course description
    pub course_description: String,
    /// Course price (strictly positive)
    pub course_price: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            course_name: course.course_name,
            creator_id: course.creator_id,
            course_description: course.course_description,
            course_price: course.course_price,
            created_at: course.created_at,
        }
    }
}
