//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20260101_000001_create_faculty_table;
mod m20260101_000002_create_course_table;
mod m20260101_000003_create_class_table;
mod m20260101_000004_create_user_table;
mod m20260101_000005_create_assignment_table;
mod m20260101_000006_create_report_table;
mod m20260101_000007_create_rating_table;
mod m20260101_000008_create_complaint_table;
mod m20260101_000009_add_profile_image;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_faculty_table::Migration),
            Box::new(m20260101_000002_create_course_table::Migration),
            Box::new(m20260101_000003_create_class_table::Migration),
            Box::new(m20260101_000004_create_user_table::Migration),
            Box::new(m20260101_000005_create_assignment_table::Migration),
            Box::new(m20260101_000006_create_report_table::Migration),
            Box::new(m20260101_000007_create_rating_table::Migration),
            Box::new(m20260101_000008_create_complaint_table::Migration),
            Box::new(m20260101_000009_add_profile_image::Migration),
        ]
    }
}
