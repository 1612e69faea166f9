//! Data export service.
//!
//! Renders the caller's own reports, complaints, and ratings into a CSV
//! document, one section per data type, with an optional inclusive date
//! range. The activities section merges reports and complaints into a
//! single timeline, newest first.

use std::collections::HashMap;

use chrono::NaiveDate;
use reporter_common::{AppError, AppResult};
use reporter_db::{
    entities::{complaint, rating, report, user},
    repositories::{
        ClassRepository, ComplaintRepository, CourseRepository, RatingRepository,
        ReportRepository, ReportScope, UserRepository,
    },
};
use serde::Deserialize;

/// Which data types to include in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDataType {
    Reports,
    Complaints,
    Ratings,
    Activities,
    #[default]
    All,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub data_type: ExportDataType,
}

/// A rendered export ready to serve as a download.
#[derive(Debug)]
pub struct ExportDocument {
    pub filename: String,
    pub content: String,
}

/// Export service.
#[derive(Clone)]
pub struct ExportService {
    report_repo: ReportRepository,
    complaint_repo: ComplaintRepository,
    rating_repo: RatingRepository,
    class_repo: ClassRepository,
    course_repo: CourseRepository,
    user_repo: UserRepository,
}

impl ExportService {
    /// Create a new export service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        complaint_repo: ComplaintRepository,
        rating_repo: RatingRepository,
        class_repo: ClassRepository,
        course_repo: CourseRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            report_repo,
            complaint_repo,
            rating_repo,
            class_repo,
            course_repo,
            user_repo,
        }
    }

    /// Render the caller's own data as a CSV document.
    pub async fn user_data(
        &self,
        actor: &user::Model,
        query: ExportQuery,
    ) -> AppResult<ExportDocument> {
        let date_range = match (query.start_date, query.end_date) {
            (Some(start), Some(end)) if start > end => {
                return Err(AppError::BadRequest(
                    "start_date must not be after end_date".to_string(),
                ));
            }
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };

        let data_type = query.data_type;
        let all = data_type == ExportDataType::All;

        // Reports and complaints also feed the merged activities timeline
        let reports = if all
            || matches!(
                data_type,
                ExportDataType::Reports | ExportDataType::Activities
            ) {
            self.report_repo
                .list(ReportScope::Lecturer(actor.id), date_range)
                .await?
        } else {
            Vec::new()
        };

        let complaints = if all
            || matches!(
                data_type,
                ExportDataType::Complaints | ExportDataType::Activities
            ) {
            self.complaint_repo
                .find_by_complainant(actor.id, date_range)
                .await?
        } else {
            Vec::new()
        };

        let mut sections = Vec::new();

        if all || data_type == ExportDataType::Reports {
            sections.push(render_reports(&reports));
        }

        if all || data_type == ExportDataType::Complaints {
            sections.push(render_complaints(&complaints));
        }

        if all || data_type == ExportDataType::Ratings {
            let ratings = self.rating_repo.find_by_student(actor.id, date_range).await?;
            sections.push(render_ratings(&ratings));
        }

        if all || data_type == ExportDataType::Activities {
            sections.push(self.render_activities(&reports, &complaints).await?);
        }

        Ok(ExportDocument {
            filename: format!(
                "user-data-{}-{}.csv",
                actor.id,
                chrono::Utc::now().format("%Y%m%d")
            ),
            content: sections.join("\n"),
        })
    }

    /// Merged, date-sorted timeline of the caller's reports and complaints.
    async fn render_activities(
        &self,
        reports: &[report::Model],
        complaints: &[complaint::Model],
    ) -> AppResult<String> {
        let classes = self
            .class_repo
            .find_by_ids(&dedup_ids(reports.iter().map(|r| r.class_id)))
            .await?;
        let courses = self
            .course_repo
            .find_by_ids(&dedup_ids(reports.iter().map(|r| r.course_id)))
            .await?;
        let targets = self
            .user_repo
            .find_by_ids(&dedup_ids(
                complaints.iter().map(|c| c.complaint_against_id),
            ))
            .await?;

        let class_names: HashMap<i32, String> =
            classes.into_iter().map(|c| (c.id, c.name)).collect();
        let course_names: HashMap<i32, String> =
            courses.into_iter().map(|c| (c.id, c.name)).collect();
        let target_names: HashMap<i32, String> =
            targets.into_iter().map(|u| (u.id, u.name)).collect();

        let mut rows = Vec::new();

        for r in reports {
            let class_name = class_names
                .get(&r.class_id)
                .map_or("Unknown class", String::as_str);
            let course_name = course_names
                .get(&r.course_id)
                .map_or("Unknown course", String::as_str);
            let description = format!("Lecture report for {class_name} - {course_name}");
            let details = format!(
                "Students: {}, Topic: {}",
                r.students_present,
                snippet(&r.topic_taught)
            );
            rows.push((
                r.created_at,
                format!(
                    "Report,{},{},{},{}\n",
                    escape_csv(&description),
                    r.created_at.format("%Y-%m-%d"),
                    r.status.as_str(),
                    escape_csv(&details),
                ),
            ));
        }

        for c in complaints {
            let against = target_names
                .get(&c.complaint_against_id)
                .map_or("Unknown user", String::as_str);
            let description = format!("Complaint against {against}");
            rows.push((
                c.created_at,
                format!(
                    "Complaint,{},{},{},{}\n",
                    escape_csv(&description),
                    c.created_at.format("%Y-%m-%d"),
                    c.status.as_str(),
                    escape_csv(&snippet(&c.complaint_text)),
                ),
            ));
        }

        rows.sort_by(|a, b| b.0.cmp(&a.0));

        let mut csv = String::from("ACTIVITIES\ntype,description,date,status,details\n");
        for (_, line) in rows {
            csv.push_str(&line);
        }

        Ok(csv)
    }
}

fn dedup_ids(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

// First 50 characters, matching the activity detail columns
fn snippet(s: &str) -> String {
    s.chars().take(50).collect()
}

// Escape CSV fields (double quotes and newlines)
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn render_reports(reports: &[report::Model]) -> String {
    let mut csv = String::from(
        "REPORTS\nid,week_number,date_of_lecture,class_id,course_id,students_present,venue,scheduled_time,topic_taught,learning_outcomes,recommendations,status\n",
    );

    for r in reports {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}\n",
            r.id,
            r.week_number,
            r.date_of_lecture,
            r.class_id,
            r.course_id,
            r.students_present,
            escape_csv(&r.venue),
            escape_csv(&r.scheduled_time),
            escape_csv(&r.topic_taught),
            escape_csv(&r.learning_outcomes),
            escape_csv(r.recommendations.as_deref().unwrap_or("")),
            r.status.as_str(),
        ));
    }

    csv
}

fn render_complaints(complaints: &[complaint::Model]) -> String {
    let mut csv = String::from(
        "COMPLAINTS\nid,complaint_against_id,report_id,complaint_text,status,recipient_role,response_text,created_at\n",
    );

    for c in complaints {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            c.id,
            c.complaint_against_id,
            c.report_id.map(|id| id.to_string()).unwrap_or_default(),
            escape_csv(&c.complaint_text),
            c.status.as_str(),
            c.recipient_role.as_str(),
            escape_csv(c.response_text.as_deref().unwrap_or("")),
            c.created_at.format("%Y-%m-%d"),
        ));
    }

    csv
}

fn render_ratings(ratings: &[rating::Model]) -> String {
    let mut csv = String::from("RATINGS\nid,report_id,lecturer_id,rating,comment,created_at\n");

    for r in ratings {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            r.id,
            r.report_id.map(|id| id.to_string()).unwrap_or_default(),
            r.lecturer_id.map(|id| id.to_string()).unwrap_or_default(),
            r.rating,
            escape_csv(r.comment.as_deref().unwrap_or("")),
            r.created_at.format("%Y-%m-%d"),
        ));
    }

    csv
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_support::{test_class, test_course, test_report, test_user};
    use chrono::Utc;
    use reporter_db::entities::{ComplaintStatus, ReportStatus, Role};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> ExportService {
        ExportService::new(
            ReportRepository::new(db.clone()),
            ComplaintRepository::new(db.clone()),
            RatingRepository::new(db.clone()),
            ClassRepository::new(db.clone()),
            CourseRepository::new(db.clone()),
            UserRepository::new(db),
        )
    }

    fn test_complaint(id: i32, against: i32) -> complaint::Model {
        complaint::Model {
            id,
            complainant_id: 4,
            complaint_against_id: against,
            report_id: None,
            complaint_text: "Sessions keep starting late".to_string(),
            status: ComplaintStatus::Pending,
            recipient_role: Role::Prl,
            response_text: None,
            responded_by: None,
            responded_at: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn report_section_has_header_and_rows() {
        let reports = [report::Model {
            venue: "Room 12, Block A".to_string(),
            ..test_report(1, 4, ReportStatus::Signed)
        }];
        let csv = render_reports(&reports);

        assert!(csv.starts_with("REPORTS\nid,week_number"));
        assert!(csv.contains("\"Room 12, Block A\""));
        assert!(csv.contains("signed"));
    }

    #[tokio::test]
    async fn inverted_date_range_is_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);
        let actor = test_user(4, Role::Lecturer);

        let err = svc
            .user_data(
                &actor,
                ExportQuery {
                    start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
                    end_date: NaiveDate::from_ymd_opt(2026, 1, 1),
                    data_type: ExportDataType::Reports,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn activities_merge_reports_and_complaints() {
        let target = test_user(7, Role::Lecturer);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_report(1, 4, ReportStatus::Signed)]])
                .append_query_results([[test_complaint(2, 7)]])
                .append_query_results([[test_class(7, 2, 45)]])
                .append_query_results([[test_course(2, 1)]])
                .append_query_results([[target.clone()]])
                .into_connection(),
        );
        let svc = service(db);
        let actor = test_user(4, Role::Lecturer);

        let doc = svc
            .user_data(
                &actor,
                ExportQuery {
                    data_type: ExportDataType::Activities,
                    ..ExportQuery::default()
                },
            )
            .await
            .unwrap();

        assert!(doc.content.starts_with("ACTIVITIES\ntype,description"));
        assert!(doc.content.contains("Report,"));
        assert!(doc
            .content
            .contains(&format!("Complaint against {}", target.name)));
    }

    #[tokio::test]
    async fn all_sections_are_concatenated() {
        let rating = rating::Model {
            id: 1,
            report_id: Some(1),
            lecturer_id: None,
            student_id: 4,
            rating: 4,
            comment: None,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_report(1, 4, ReportStatus::Signed)]])
                .append_query_results([Vec::<complaint::Model>::new()])
                .append_query_results([[rating]])
                .append_query_results([[test_class(7, 2, 45)]])
                .append_query_results([[test_course(2, 1)]])
                .into_connection(),
        );
        let svc = service(db);
        let actor = test_user(4, Role::Lecturer);

        let doc = svc.user_data(&actor, ExportQuery::default()).await.unwrap();
        assert!(doc.content.contains("REPORTS\n"));
        assert!(doc.content.contains("COMPLAINTS\n"));
        assert!(doc.content.contains("RATINGS\n"));
        assert!(doc.content.contains("ACTIVITIES\n"));
        assert!(doc.filename.ends_with(".csv"));
    }
}
