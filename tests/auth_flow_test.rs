//! Authentication flow tests.
//!
//! These tests run the auth service against an in-memory repository so no
//! database is required. The in-memory store enforces email uniqueness the
//! same way the schema's UNIQUE constraint does.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use coursehub::domain::{Password, User, UserCredentials, UserRole};
use coursehub::errors::{AppError, AppResult};
use coursehub::infra::UserRepository;
use coursehub::services::{AuthService, Authenticator, Claims};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// In-memory repository
// =============================================================================

#[derive(Default)]
struct InMemoryUserRepo {
    users: Mutex<HashMap<Uuid, (User, String)>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials_by_id(&self, id: Uuid) -> AppResult<Option<UserCredentials>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id).map(|(user, hash)| UserCredentials {
            user: user.clone(),
            credential: Password::from_hash(hash.clone()),
        }))
    }

    async fn find_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, hash)| UserCredentials {
                user: user.clone(),
                credential: Password::from_hash(hash.clone()),
            }))
    }

    async fn create(
        &self,
        full_name: String,
        email: String,
        role: UserRole,
        credential: Password,
    ) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();

        // Stand-in for the UNIQUE constraint on users.email
        if users.values().any(|(user, _)| user.email == email) {
            return Err(AppError::conflict("Email"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            full_name,
            email,
            role,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, (user.clone(), credential.into_string()));
        Ok(user)
    }

    async fn update_credential(&self, id: Uuid, credential: Password) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let entry = users.get_mut(&id).ok_or(AppError::NotFound)?;
        entry.1 = credential.into_string();
        entry.0.updated_at = Utc::now();
        Ok(())
    }
}

fn authenticator(repo: Arc<InMemoryUserRepo>) -> Authenticator {
    Authenticator::new(repo, TEST_SECRET.to_string(), 1)
}

async fn register_user(auth: &Authenticator, email: &str, password: &str) -> User {
    auth.register(
        "Test User".to_string(),
        email.to_string(),
        password.to_string(),
        UserRole::Creator,
    )
    .await
    .unwrap()
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_stores_derived_credential() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo.clone());

    register_user(&auth, "a@b.com", "plaintext-secret").await;

    let creds = repo
        .find_credentials_by_email("a@b.com")
        .await
        .unwrap()
        .unwrap();

    // Stored value is an Argon2 derivation, never the plaintext
    assert_ne!(creds.credential.as_str(), "plaintext-secret");
    assert!(creds.credential.as_str().starts_with("$argon2"));

    // Round-trip: the plaintext verifies, anything else does not
    assert!(creds.verify("plaintext-secret"));
    assert!(!creds.verify("plaintext-secret2"));
    assert!(!creds.verify(""));
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo);

    register_user(&auth, "a@b.com", "password123").await;

    let result = auth
        .register(
            "Other User".to_string(),
            "a@b.com".to_string(),
            "password456".to_string(),
            UserRole::Student,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_concurrent_registration_only_one_succeeds() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo);

    let first = auth.register(
        "User One".to_string(),
        "race@b.com".to_string(),
        "password123".to_string(),
        UserRole::Student,
    );
    let second = auth.register(
        "User Two".to_string(),
        "race@b.com".to_string(),
        "password456".to_string(),
        UserRole::Student,
    );

    let (a, b) = tokio::join!(first, second);
    assert!(a.is_ok() != b.is_ok(), "exactly one registration must win");
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser.unwrap_err(), AppError::Conflict(_)));
}

// =============================================================================
// Login and token issuance
// =============================================================================

#[tokio::test]
async fn test_login_issues_token_with_id_and_email_claims() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo);

    let user = register_user(&auth, "a@b.com", "password123").await;

    let token = auth
        .login("a@b.com".to_string(), "password123".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 3600);

    let decoded = decode::<Claims>(
        &token.access_token,
        &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
        &Validation::default(),
    )
    .unwrap();

    assert_eq!(decoded.claims.sub, user.id);
    assert_eq!(decoded.claims.email, "a@b.com");
    assert_eq!(
        decoded.claims.exp - decoded.claims.iat,
        3600,
        "validity window is one hour"
    );
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo);

    register_user(&auth, "a@b.com", "password123").await;

    let result = auth
        .login("a@b.com".to_string(), "wrong-password".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_unknown_email_rejected() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo);

    let result = auth
        .login("nobody@b.com".to_string(), "password123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_verify_token_round_trip() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo);

    let user = register_user(&auth, "a@b.com", "password123").await;
    let token = auth
        .login("a@b.com".to_string(), "password123".to_string())
        .await
        .unwrap();

    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "a@b.com");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let repo = Arc::new(InMemoryUserRepo::default());
    // Negative validity window: issued tokens are already past expiry
    let auth = Authenticator::new(repo, TEST_SECRET.to_string(), -2);

    register_user(&auth, "a@b.com", "password123").await;
    let token = auth
        .login("a@b.com".to_string(), "password123".to_string())
        .await
        .unwrap();

    let result = auth.verify_token(&token.access_token);
    assert!(matches!(result.unwrap_err(), AppError::Jwt(_)));
}

#[tokio::test]
async fn test_token_with_wrong_secret_rejected() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo.clone());
    let other = Authenticator::new(repo, "another-secret-key-of-enough-length!".to_string(), 1);

    register_user(&auth, "a@b.com", "password123").await;
    let token = auth
        .login("a@b.com".to_string(), "password123".to_string())
        .await
        .unwrap();

    assert!(other.verify_token(&token.access_token).is_err());
}

// =============================================================================
// Credential rewrites
// =============================================================================

#[tokio::test]
async fn test_change_password_rotates_credential() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo.clone());

    let user = register_user(&auth, "a@b.com", "old-password1").await;
    let before = repo
        .find_credentials_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .credential
        .into_string();

    auth.change_password(
        user.id,
        "old-password1".to_string(),
        "new-password1".to_string(),
    )
    .await
    .unwrap();

    let after = repo.find_credentials_by_id(user.id).await.unwrap().unwrap();
    assert_ne!(after.credential.as_str(), before);
    assert!(after.verify("new-password1"));
    assert!(!after.verify("old-password1"));
}

#[tokio::test]
async fn test_change_password_requires_current_password() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo);

    let user = register_user(&auth, "a@b.com", "old-password1").await;

    let result = auth
        .change_password(
            user.id,
            "not-the-password".to_string(),
            "new-password1".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_unchanged_credential_is_never_rederived() {
    let repo = Arc::new(InMemoryUserRepo::default());
    let auth = authenticator(repo.clone());

    let user = register_user(&auth, "a@b.com", "password123").await;

    let first = repo
        .find_credentials_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .credential
        .into_string();

    // Re-save the loaded credential untouched, twice; the stored hash must
    // come out byte-identical each time (no double hashing)
    for _ in 0..2 {
        let loaded = repo.find_credentials_by_id(user.id).await.unwrap().unwrap();
        repo.update_credential(user.id, loaded.credential)
            .await
            .unwrap();
    }

    let last = repo
        .find_credentials_by_id(user.id)
        .await
        .unwrap()
        .unwrap()
        .credential
        .into_string();

    assert_eq!(first, last);

    let creds = repo.find_credentials_by_id(user.id).await.unwrap().unwrap();
    assert!(creds.verify("password123"));
}
