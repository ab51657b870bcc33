//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{CourseSection, EnrollmentSection, Exchange, StudentSection};
use crate::constants::DEFAULT_API_BASE_URL;
use crate::messages::ui_events::{AppTab, Field, InputMode};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Tab
    pub active_tab: AppTab,

    // Input
    pub focused_field: Field,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Sections
    pub students: StudentSection,
    pub courses: CourseSection,
    pub enrollments: EnrollmentSection,
    pub refreshing: bool,

    // Status bar
    pub last_exchange: Option<Exchange>,
    pub api_base: String,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::StudentName => &self.students.form.name,
            Field::StudentEmail => &self.students.form.email,
            Field::StudentId => &self.students.student_id,
            Field::CourseName => &self.courses.form.name,
            Field::CourseNumber => &self.courses.form.number,
            Field::CourseDepartment => &self.courses.form.department,
            Field::LookupNumber => &self.courses.lookup.number,
            Field::LookupDepartment => &self.courses.lookup.department,
            Field::EnrollmentStudentId => &self.enrollments.form.student_id,
            Field::EnrollmentNumber => &self.enrollments.form.number,
            Field::EnrollmentDepartment => &self.enrollments.form.department,
        }
    }

    pub fn is_busy(&self, tab: AppTab) -> bool {
        match tab {
            AppTab::Students => self.students.pending.is_some(),
            AppTab::Courses => self.courses.pending.is_some(),
            AppTab::Enrollments => self.enrollments.pending.is_some(),
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_tab: AppTab::Students,
            focused_field: Field::StudentName,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            students: StudentSection::default(),
            courses: CourseSection::default(),
            enrollments: EnrollmentSection::default(),
            refreshing: false,
            last_exchange: None,
            api_base: String::from(DEFAULT_API_BASE_URL),
            show_help: false,
        }
    }
}
