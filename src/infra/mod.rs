//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories for users and courses

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{CourseRepository, CourseStore, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCourseRepository, MockUserRepository};
