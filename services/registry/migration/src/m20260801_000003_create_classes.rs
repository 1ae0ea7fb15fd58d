use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Classes::TeacherId).uuid().not_null())
                    .col(
                        ColumnDef::new(Classes::SectionNumber)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Classes::Semester)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Classes::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Classes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Classes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Restrict: a course with live sections cannot be deleted.
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_classes_course_section_semester_year")
                    .table(Classes::Table)
                    .col(Classes::CourseId)
                    .col(Classes::SectionNumber)
                    .col(Classes::Semester)
                    .col(Classes::Year)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
    CourseId,
    TeacherId,
    SectionNumber,
    Semester,
    Year,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
