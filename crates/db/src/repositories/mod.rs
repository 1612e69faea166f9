//! Repository layer wrapping entity queries.

pub mod assignment;
pub mod class;
pub mod complaint;
pub mod course;
pub mod faculty;
pub mod rating;
pub mod report;
pub mod user;

pub use assignment::AssignmentRepository;
pub use class::ClassRepository;
pub use complaint::{visibility_condition, ComplaintRepository};
pub use course::CourseRepository;
pub use faculty::FacultyRepository;
pub use rating::RatingRepository;
pub use report::{ReportRepository, ReportScope};
pub use user::{StaffRoleCount, UserRepository};
