//! SeaORM database entities.

pub mod course;
pub mod user;
