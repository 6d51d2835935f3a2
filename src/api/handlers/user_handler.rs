//! User handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserProfileResponse;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The password currently on the account
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// The new password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(min_length = 8)]
    pub new_password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user))
        .route("/me/password", put(change_password))
}

/// Get current authenticated user with owned courses
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfileResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserProfileResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;

    // The owned-courses back-reference, in creation order
    let owned = state.course_service.list_owned(current_user.id).await?;
    let owned_ids = owned.into_iter().map(|course| course.id).collect();

    Ok(Json(UserProfileResponse::new(user, owned_ids)))
}

/// Change the current user's password
#[utoipa::path(
    put,
    path = "/users/me/password",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated successfully", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized or wrong current password")
    )
)]
pub async fn change_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .change_password(
            current_user.id,
            payload.current_password,
            payload.new_password,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
