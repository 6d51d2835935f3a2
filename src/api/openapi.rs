//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, course_handler, user_handler};
use crate::domain::{CourseResponse, UserProfileResponse, UserResponse, UserRole};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Coursehub API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coursehub API",
        version = "0.1.0",
        description = "Course marketplace API with Axum, SeaORM and clean architecture",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_current_user,
        user_handler::change_password,
        // Course endpoints
        course_handler::create_course,
        course_handler::list_courses,
        course_handler::get_course,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            UserProfileResponse,
            CourseResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // User handler types
            user_handler::ChangePasswordRequest,
            // Course handler types
            course_handler::CreateCourseRequest,
            course_handler::CourseCreatedResponse,
            // Shared types
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "Profile and credential operations"),
        (name = "Courses", description = "Course publishing and browsing")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
