use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseEnrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::StudentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::CourseId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(CourseEnrollments::EnrollmentDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Restrict: enrolled entities cannot be deleted out from
                    // under the enrollment.
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseEnrollments::Table, CourseEnrollments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseEnrollments::Table, CourseEnrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_course_enrollments_student_course")
                    .table(CourseEnrollments::Table)
                    .col(CourseEnrollments::StudentId)
                    .col(CourseEnrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseEnrollments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseEnrollments {
    Table,
    Id,
    StudentId,
    CourseId,
    Status,
    EnrollmentDate,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
