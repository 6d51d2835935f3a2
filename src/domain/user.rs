//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_CREATOR, ROLE_STUDENT};
use crate::domain::Password;
use crate::errors::AppError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Creator,
    Student,
}

impl std::str::FromStr for UserRole {
    type Err = AppError;

    // The role set is closed: unknown values are rejected, not defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_CREATOR => Ok(UserRole::Creator),
            ROLE_STUDENT => Ok(UserRole::Student),
            other => Err(AppError::bad_request(format!("Invalid role: {}", other))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Creator => write!(f, "{}", ROLE_CREATOR),
            UserRole::Student => write!(f, "{}", ROLE_STUDENT),
        }
    }
}

/// User domain entity.
///
/// Carries no credential: the stored hash is only reachable through
/// [`UserCredentials`], which must be loaded explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with its explicitly loaded credential.
///
/// Produced only by the credential-specific repository lookups; default
/// queries never fetch the hash column.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub credential: Password,
}

impl UserCredentials {
    /// Compare a plaintext candidate against the stored derivation.
    pub fn verify(&self, candidate: &str) -> bool {
        self.credential.verify(candidate)
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User display name
    pub full_name: String,
    /// User email address
    pub email: String,
    /// User role
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// User profile response including the owned-course back-references.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User display name
    pub full_name: String,
    /// User email address
    pub email: String,
    /// User role
    pub role: UserRole,
    /// Ids of courses this user created, in creation order
    pub owned_courses: Vec<Uuid>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserProfileResponse {
    pub fn new(user: User, owned_courses: Vec<Uuid>) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            owned_courses,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Creator, UserRole::Student] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("teacher".parse::<UserRole>().is_err());
        assert!("Creator".parse::<UserRole>().is_err());
        assert!("".parse::<UserRole>().is_err());
    }
}
