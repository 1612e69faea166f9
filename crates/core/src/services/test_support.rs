//! Shared fixtures for service unit tests.

use chrono::Utc;
use reporter_common::{
    config::{AuthConfig, DatabaseConfig, ServerConfig, StorageConfig},
    Config,
};
use reporter_db::entities::{class, course, faculty, report, user, ReportStatus, Role};

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/reporter_test".to_string(),
            max_connections: 5,
            min_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret-not-for-production".to_string(),
            token_ttl_hours: 24,
        },
        storage: StorageConfig {
            base_path: "./target/test-storage".to_string(),
            base_url: "/images/profiles".to_string(),
        },
    }
}

pub fn test_user(id: i32, role: Role) -> user::Model {
    user::Model {
        id,
        email: format!("{}{id}@campus.edu", role.as_str()),
        password_hash: "$argon2id$stub".to_string(),
        name: format!("User {id}"),
        role,
        faculty_id: 1,
        is_class_rep: false,
        class_id: matches!(role, Role::Student).then_some(7),
        profile_image: None,
        created_at: Utc::now().into(),
    }
}

pub fn test_faculty(id: i32) -> faculty::Model {
    faculty::Model {
        id,
        name: format!("Faculty {id}"),
    }
}

pub fn test_course(id: i32, faculty_id: i32) -> course::Model {
    course::Model {
        id,
        name: format!("Course {id}"),
        code: format!("C{id:03}"),
        faculty_id,
    }
}

pub fn test_class(id: i32, course_id: i32, total_students: i32) -> class::Model {
    class::Model {
        id,
        name: format!("Class {id}"),
        course_id,
        total_students,
    }
}

pub fn test_report(id: i32, lecturer_id: i32, status: ReportStatus) -> report::Model {
    report::Model {
        id,
        faculty_id: 1,
        class_id: 7,
        course_id: 2,
        lecturer_id,
        week_number: 6,
        date_of_lecture: chrono::NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap_or_default(),
        students_present: 40,
        venue: "Room 12".to_string(),
        scheduled_time: "08:00 - 10:00".to_string(),
        topic_taught: "REST APIs".to_string(),
        learning_outcomes: "Design resource-oriented endpoints".to_string(),
        recommendations: None,
        status,
        student_signature: None,
        signed_at: None,
        created_at: Utc::now().into(),
    }
}
