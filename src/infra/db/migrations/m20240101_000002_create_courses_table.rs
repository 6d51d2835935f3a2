//! Migration: Create the courses table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::CourseName).string().not_null())
                    .col(ColumnDef::new(Courses::CreatorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Courses::CourseDescription)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Courses::CoursePrice).double().not_null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_courses_creator_id")
                            .from(Courses::Table, Courses::CreatorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the owned-courses back-reference lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_creator_id")
                    .table(Courses::Table)
                    .col(Courses::CreatorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_creator_id")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    CourseName,
    CreatorId,
    CourseDescription,
    CoursePrice,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
