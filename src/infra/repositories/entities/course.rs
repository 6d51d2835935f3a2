//! Course database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Course;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_name: String,
    pub creator_id: Uuid,
    pub course_description: String,
    #[sea_orm(column_type = "Double")]
    pub course_price: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatorId",
        to = "super::user::Column::Id"
    )]
    Creator,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course {
            id: model.id,
            course_name: model.course_name,
            creator_id: model.creator_id,
            course_description: model.course_description,
            course_price: model.course_price,
            created_at: model.created_at,
        }
    }
}
