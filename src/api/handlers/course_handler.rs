//! Course handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::CourseResponse;
use crate::errors::AppResult;

/// Course creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// Course title
    #[validate(length(min = 1, message = "Course name is required"))]
    #[schema(example = "Rust for Backend Engineers")]
    pub course_name: String,
    /// Course description
    #[validate(length(min = 1, message = "Course description is required"))]
    #[schema(example = "From ownership to production services.")]
    pub course_description: String,
    /// Course price; must be strictly positive
    #[validate(custom(function = "validate_course_price"))]
    #[schema(example = 49.99)]
    pub course_price: f64,
}

fn validate_course_price(price: &f64) -> Result<(), ValidationError> {
    if *price > 0.0 {
        return Ok(());
    }
    let mut err = ValidationError::new("course_price");
    err.message = Some("Course price must be a positive number".into());
    Err(err)
}

/// Response for a successfully created course
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseCreatedResponse {
    /// Human-readable confirmation
    pub message: String,
    /// The created course
    pub course: CourseResponse,
}

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:id", get(get_course))
}

/// Create a new course owned by the authenticated caller
#[utoipa::path(
    post,
    path = "/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created successfully", body = CourseCreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_course(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<CourseCreatedResponse>)> {
    let course = state
        .course_service
        .create_course(
            current_user.id,
            payload.course_name,
            payload.course_description,
            payload.course_price,
        )
        .await?;

    let response = CourseCreatedResponse {
        message: "Course created successfully".to_string(),
        course: CourseResponse::from(course),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all courses, newest first
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of courses", body = Vec<CourseResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CourseResponse>>> {
    let courses = state.course_service.list_courses().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = CourseResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CourseResponse>> {
    let course = state.course_service.get_course(id).await?;
    Ok(Json(CourseResponse::from(course)))
}
