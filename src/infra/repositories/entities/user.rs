//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{DerivePartialModel, FromQueryResult};

use crate::domain::{Password, User, UserCredentials, UserRole};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Default read projection: the credential column is deliberately absent,
/// so ordinary queries never fetch the password hash.
#[derive(Debug, DerivePartialModel, FromQueryResult)]
#[sea_orm(entity = "Entity")]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

fn parse_role(role: &str) -> UserRole {
    role.parse().unwrap_or_else(|_| {
        tracing::warn!(role, "Unknown role value in database, defaulting to student");
        UserRole::Student
    })
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            role: parse_role(&row.role),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            role: parse_role(&model.role),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a fully loaded row into the explicit credential pairing
impl From<Model> for UserCredentials {
    fn from(model: Model) -> Self {
        let credential = Password::from_hash(model.password_hash.clone());
        UserCredentials {
            user: User::from(model),
            credential,
        }
    }
}
