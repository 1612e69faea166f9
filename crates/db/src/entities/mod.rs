//! Database entities.

pub mod assignment;
pub mod class;
pub mod complaint;
pub mod course;
pub mod faculty;
pub mod rating;
pub mod report;
pub mod user;

pub use assignment::Entity as Assignment;
pub use class::Entity as Class;
pub use complaint::Entity as Complaint;
pub use course::Entity as Course;
pub use faculty::Entity as Faculty;
pub use rating::Entity as Rating;
pub use report::Entity as Report;
pub use user::Entity as User;

pub use complaint::ComplaintStatus;
pub use report::ReportStatus;
pub use user::Role;
