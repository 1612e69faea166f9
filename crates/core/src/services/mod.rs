//! Business logic services.

pub mod assignment;
pub mod auth;
pub mod complaint;
pub mod directory;
pub mod export;
pub mod monitoring;
pub mod rating;
pub mod report;
pub mod stats;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use assignment::{AssignmentService, AssignmentView, CreateAssignmentInput};
pub use auth::{AuthResponse, AuthService, Claims, LoginInput, RegisterInput, UserView};
pub use complaint::{
    recipient_for, ComplaintService, ComplaintView, CreateComplaintInput, RespondInput,
};
pub use directory::{ClassView, CreateClassInput, DirectoryService};
pub use export::{ExportDataType, ExportDocument, ExportQuery, ExportService};
pub use monitoring::{MonitoringRow, MonitoringService};
pub use rating::{CreateRatingInput, RatingService, RatingTarget, RatingView};
pub use report::{CreateReportInput, ReportService, ReportView, SignReportInput};
pub use stats::{
    FacultyHierarchy, FacultyOverview, PublicReport, PublicStats, StaffCount, StaffMember,
    StatsService,
};
pub use user::{ProfileView, UpdateProfileInput, UserService};
