//! Public statistics service.
//!
//! Unauthenticated landing-page data: headline counts, per-faculty
//! breakdowns, the staff hierarchy, and the latest signed reports.

use std::collections::BTreeMap;

use reporter_common::AppResult;
use reporter_db::{
    entities::{ReportStatus, Role},
    repositories::{
        ClassRepository, CourseRepository, FacultyRepository, ReportRepository, UserRepository,
    },
};
use serde::Serialize;

/// Headline counts for the landing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub total_faculties: u64,
    pub total_courses: u64,
    pub total_classes: u64,
    pub total_reports: u64,
    pub total_staff: u64,
    pub total_students: u64,
}

/// A faculty with its headcounts.
#[derive(Debug, Serialize)]
pub struct FacultyOverview {
    pub id: i32,
    pub name: String,
    pub course_count: i64,
    pub class_count: i64,
    pub staff_count: i64,
    pub student_count: i64,
}

/// One staff member inside the hierarchy view.
#[derive(Debug, Serialize)]
pub struct StaffMember {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub position: &'static str,
}

/// Staff of one faculty, bucketed by role in descending hierarchy order.
#[derive(Debug, Default, Serialize)]
pub struct FacultyHierarchy {
    pub faculty_name: String,
    pub total_staff: usize,
    pub fmg: Vec<StaffMember>,
    pub pl: Vec<StaffMember>,
    pub prl: Vec<StaffMember>,
    pub lecturer: Vec<StaffMember>,
}

/// Per-faculty staff totals with a per-role breakdown.
#[derive(Debug, Default, Serialize)]
pub struct StaffCount {
    pub total: i64,
    pub breakdown: BTreeMap<String, i64>,
}

/// A signed report stripped down for the public feed.
#[derive(Debug, Serialize)]
pub struct PublicReport {
    pub id: i32,
    pub week_number: i32,
    pub date_of_lecture: chrono::NaiveDate,
    pub topic_taught: String,
    pub status: ReportStatus,
    pub class_name: Option<String>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub faculty_name: Option<String>,
    pub lecturer_name: Option<String>,
}

/// Number of reports shown in the public feed.
const PUBLIC_REPORT_LIMIT: u64 = 10;

/// Statistics service.
#[derive(Clone)]
pub struct StatsService {
    faculty_repo: FacultyRepository,
    course_repo: CourseRepository,
    class_repo: ClassRepository,
    report_repo: ReportRepository,
    user_repo: UserRepository,
}

impl StatsService {
    /// Create a new statistics service.
    #[must_use]
    pub const fn new(
        faculty_repo: FacultyRepository,
        course_repo: CourseRepository,
        class_repo: ClassRepository,
        report_repo: ReportRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            faculty_repo,
            course_repo,
            class_repo,
            report_repo,
            user_repo,
        }
    }

    /// Headline counts.
    pub async fn overview(&self) -> AppResult<PublicStats> {
        Ok(PublicStats {
            total_faculties: self.faculty_repo.count().await?,
            total_courses: self.course_repo.count().await?,
            total_classes: self.class_repo.count().await?,
            total_reports: self.report_repo.count_signed().await?,
            total_staff: self.user_repo.count_staff().await?,
            total_students: self.user_repo.count_students().await?,
        })
    }

    /// Faculties with course, class, staff, and student headcounts.
    pub async fn faculties(&self) -> AppResult<Vec<FacultyOverview>> {
        let faculties = self.faculty_repo.find_all().await?;
        let courses = self.course_repo.count_by_faculty().await?;
        let classes = self.class_repo.count_by_faculty().await?;
        let staff = self.user_repo.count_by_faculty(&Role::STAFF).await?;
        let students = self.user_repo.count_by_faculty(&[Role::Student]).await?;

        let count_in = |counts: &[(i32, i64)], faculty_id: i32| {
            counts
                .iter()
                .find(|(id, _)| *id == faculty_id)
                .map_or(0, |(_, n)| *n)
        };

        Ok(faculties
            .into_iter()
            .map(|f| FacultyOverview {
                course_count: count_in(&courses, f.id),
                class_count: count_in(&classes, f.id),
                staff_count: count_in(&staff, f.id),
                student_count: count_in(&students, f.id),
                id: f.id,
                name: f.name,
            })
            .collect())
    }

    /// Staff grouped per faculty into role buckets.
    pub async fn staff_hierarchy(&self) -> AppResult<BTreeMap<i32, FacultyHierarchy>> {
        let faculties = self.faculty_repo.find_all().await?;
        let staff = self.user_repo.find_all_staff().await?;

        let mut hierarchy: BTreeMap<i32, FacultyHierarchy> = BTreeMap::new();

        for member in staff {
            let entry = hierarchy.entry(member.faculty_id).or_insert_with(|| {
                FacultyHierarchy {
                    faculty_name: faculties
                        .iter()
                        .find(|f| f.id == member.faculty_id)
                        .map(|f| f.name.clone())
                        .unwrap_or_default(),
                    ..Default::default()
                }
            });

            let view = StaffMember {
                id: member.id,
                name: member.name,
                email: member.email,
                position: member.role.position_title(),
            };

            match member.role {
                Role::Fmg => entry.fmg.push(view),
                Role::Pl => entry.pl.push(view),
                Role::Prl => entry.prl.push(view),
                Role::Lecturer => entry.lecturer.push(view),
                Role::Student => continue,
            }
            entry.total_staff += 1;
        }

        Ok(hierarchy)
    }

    /// Per-faculty staff totals with a per-role breakdown.
    pub async fn staff_count(&self) -> AppResult<BTreeMap<i32, StaffCount>> {
        let grouped = self.user_repo.count_staff_grouped().await?;

        let mut result: BTreeMap<i32, StaffCount> = BTreeMap::new();
        for row in grouped {
            let entry = result.entry(row.faculty_id).or_default();
            entry.breakdown.insert(row.role.as_str().to_string(), row.count);
            entry.total += row.count;
        }

        Ok(result)
    }

    /// Latest signed reports for the public feed.
    pub async fn recent_reports(&self) -> AppResult<Vec<PublicReport>> {
        let reports = self.report_repo.find_recent_signed(PUBLIC_REPORT_LIMIT).await?;

        let mut lecturer_ids: Vec<i32> = reports.iter().map(|r| r.lecturer_id).collect();
        lecturer_ids.sort_unstable();
        lecturer_ids.dedup();
        let lecturers = self.user_repo.find_by_ids(&lecturer_ids).await?;

        let mut class_ids: Vec<i32> = reports.iter().map(|r| r.class_id).collect();
        class_ids.sort_unstable();
        class_ids.dedup();
        let classes = self.class_repo.find_by_ids(&class_ids).await?;

        let mut course_ids: Vec<i32> = reports.iter().map(|r| r.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();
        let courses = self.course_repo.find_by_ids(&course_ids).await?;

        let faculties = self.faculty_repo.find_all().await?;

        Ok(reports
            .into_iter()
            .map(|r| PublicReport {
                id: r.id,
                week_number: r.week_number,
                date_of_lecture: r.date_of_lecture,
                topic_taught: r.topic_taught,
                status: r.status,
                class_name: classes
                    .iter()
                    .find(|c| c.id == r.class_id)
                    .map(|c| c.name.clone()),
                course_name: courses
                    .iter()
                    .find(|c| c.id == r.course_id)
                    .map(|c| c.name.clone()),
                course_code: courses
                    .iter()
                    .find(|c| c.id == r.course_id)
                    .map(|c| c.code.clone()),
                faculty_name: faculties
                    .iter()
                    .find(|f| f.id == r.faculty_id)
                    .map(|f| f.name.clone()),
                lecturer_name: lecturers
                    .iter()
                    .find(|u| u.id == r.lecturer_id)
                    .map(|u| u.name.clone()),
            })
            .collect())
    }
}
