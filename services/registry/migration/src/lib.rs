use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_courses;
mod m20260801_000003_create_classes;
mod m20260801_000004_create_course_enrollments;
mod m20260801_000005_create_class_enrollments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_courses::Migration),
            Box::new(m20260801_000003_create_classes::Migration),
            Box::new(m20260801_000004_create_course_enrollments::Migration),
            Box::new(m20260801_000005_create_class_enrollments::Migration),
        ]
    }
}
