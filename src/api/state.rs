//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{CourseStore, Database, UserStore};
use crate::services::{
    AuthService, Authenticator, CourseManager, CourseService, UserManager, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Course service
    pub course_service: Arc<dyn CourseService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// Wires repositories into concrete services; the auth service receives
    /// the signing secret and validity window explicitly.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let user_repo = Arc::new(UserStore::new(database.get_connection()));
        let course_repo = Arc::new(CourseStore::new(database.get_connection()));

        let auth_service = Arc::new(Authenticator::new(
            user_repo.clone(),
            config.jwt_secret().to_string(),
            config.jwt_expiration_hours,
        ));
        let user_service = Arc::new(UserManager::new(user_repo));
        let course_service = Arc::new(CourseManager::new(course_repo));

        Self {
            auth_service,
            user_service,
            course_service,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        course_service: Arc<dyn CourseService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            course_service,
            database,
        }
    }
}
