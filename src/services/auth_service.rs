//! Authentication service - Handles the credential lifecycle.
//!
//! Owns registration (credential derivation before the insert), login
//! (verification plus token issuance), token verification, and credential
//! rewrites. Hashing itself lives in the domain `Password` value object.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(
        &self,
        full_name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<User>;

    /// Login and return a JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a JWT token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Rewrite the stored credential after verifying the current one
    async fn change_password(
        &self,
        id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()>;
}

/// Concrete implementation of AuthService.
///
/// Holds the signing secret and validity window explicitly; there is no
/// ambient configuration lookup at issuance time.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt_secret: String,
        jwt_expiration_hours: i64,
    ) -> Self {
        Self {
            users,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Generate a signed token carrying the user's id and email
    fn generate_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        full_name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<User> {
        // Friendly pre-check; the UNIQUE constraint remains the backstop
        // for concurrent registrations with the same email.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        // Derivation happens here, before anything reaches the store
        let credential = Password::new(&password)?;
        self.users.create(full_name, email, role, credential).await
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let credentials = self.users.find_credentials_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let stored = match &credentials {
            Some(c) => c.credential.clone(),
            None => Password::from_hash(dummy_hash.to_string()),
        };

        let password_valid = stored.verify(&password);

        // Only succeed if both user exists AND password is valid
        let credentials = match credentials {
            Some(c) if password_valid => c,
            _ => return Err(AppError::InvalidCredentials),
        };

        self.generate_token(&credentials.user)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn change_password(
        &self,
        id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        // The credential must be loaded explicitly to verify against it
        let credentials = self
            .users
            .find_credentials_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !credentials.verify(&current_password) {
            return Err(AppError::InvalidCredentials);
        }

        let credential = Password::new(&new_password)?;
        self.users.update_credential(id, credential).await
    }
}
