use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClassEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassEnrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::StudentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassEnrollments::ClassId).uuid().not_null())
                    .col(
                        ColumnDef::new(ClassEnrollments::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::EnrollmentDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_class_enrollments_student_class")
                    .table(ClassEnrollments::Table)
                    .col(ClassEnrollments::StudentId)
                    .col(ClassEnrollments::ClassId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassEnrollments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ClassEnrollments {
    Table,
    Id,
    StudentId,
    ClassId,
    Status,
    EnrollmentDate,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}
