//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::messages::ui_events::{AppTab, Field, InputMode};
use crate::messages::RenderState;
use crate::models::{
    Course, CourseDetails, CourseKey, Enrollment, EnrollmentRecord, HttpMethod, Student,
};

/// A banner line with the time it was raised
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub at: DateTime<Local>,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            at: Local::now(),
        }
    }
}

/// Success and error banners of one section
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Banner {
    pub message: Option<Notice>,
    pub error: Option<Notice>,
}

impl Banner {
    pub fn success(&mut self, text: impl Into<String>) {
        self.message = Some(Notice::new(text));
    }

    pub fn fail(&mut self, text: impl Into<String>) {
        self.error = Some(Notice::new(text));
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.error = None;
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|n| n.text.as_str())
    }

    pub fn error_text(&self) -> Option<&str> {
        self.error.as_ref().map(|n| n.text.as_str())
    }
}

/// Students tab
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudentSection {
    /// Add form, also the new values for update
    pub form: Student,
    /// Lookup key for get/update/delete
    pub student_id: String,
    pub fetched: Option<Student>,
    pub banner: Banner,
    pub pending: Option<u64>,
}

impl StudentSection {
    pub fn clear_messages(&mut self) {
        self.banner.clear();
        self.fetched = None;
    }
}

/// Courses tab
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseSection {
    /// Add form; its name is the new name for update
    pub form: Course,
    /// Lookup key for find/update/delete
    pub lookup: CourseKey,
    pub fetched: Option<CourseDetails>,
    pub banner: Banner,
    pub pending: Option<u64>,
}

impl CourseSection {
    pub fn clear_messages(&mut self) {
        self.banner.clear();
        self.fetched = None;
    }
}

/// Enrollments tab
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnrollmentSection {
    pub form: Enrollment,
    pub enrollments: Vec<EnrollmentRecord>,
    pub banner: Banner,
    /// Outstanding add/delete
    pub pending: Option<u64>,
    /// Most recently issued list refresh; older refreshes are discarded
    pub refresh_id: Option<u64>,
    pub list_scroll: u16,
}

impl EnrollmentSection {
    pub fn clear_messages(&mut self) {
        self.banner.clear();
    }
}

/// Last request sent, shown in the status bar
#[derive(Clone, Debug, PartialEq)]
pub struct Exchange {
    pub id: u64,
    pub method: HttpMethod,
    pub path: String,
    pub status: Option<u16>,
    pub time_ms: u64,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Tab navigation
    pub active_tab: AppTab,

    // Field focus and editing
    pub focus: [usize; 3],
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Sections
    pub students: StudentSection,
    pub courses: CourseSection,
    pub enrollments: EnrollmentSection,

    // Requests
    pub next_request_id: u64,
    pub last_exchange: Option<Exchange>,

    // Popups
    pub show_help: bool,

    pub api_base: String,
}

impl AppState {
    pub fn new(api_base: impl Into<String>) -> Self {
        AppState {
            active_tab: AppTab::Students,
            focus: [0; 3],
            input_mode: InputMode::Normal,
            cursor_position: 0,
            students: StudentSection::default(),
            courses: CourseSection::default(),
            enrollments: EnrollmentSection::default(),
            next_request_id: 1,
            last_exchange: None,
            show_help: false,
            api_base: api_base.into(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Field with keyboard focus in the active tab
    pub fn focused_field(&self) -> Field {
        let fields = self.active_tab.fields();
        let idx = self.focus[self.active_tab.index()].min(fields.len() - 1);
        fields[idx]
    }

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

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::StudentName => &mut self.students.form.name,
            Field::StudentEmail => &mut self.students.form.email,
            Field::StudentId => &mut self.students.student_id,
            Field::CourseName => &mut self.courses.form.name,
            Field::CourseNumber => &mut self.courses.form.number,
            Field::CourseDepartment => &mut self.courses.form.department,
            Field::LookupNumber => &mut self.courses.lookup.number,
            Field::LookupDepartment => &mut self.courses.lookup.department,
            Field::EnrollmentStudentId => &mut self.enrollments.form.student_id,
            Field::EnrollmentNumber => &mut self.enrollments.form.number,
            Field::EnrollmentDepartment => &mut self.enrollments.form.department,
        }
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        self.field(self.focused_field())
    }

    pub fn banner(&self, tab: AppTab) -> &Banner {
        match tab {
            AppTab::Students => &self.students.banner,
            AppTab::Courses => &self.courses.banner,
            AppTab::Enrollments => &self.enrollments.banner,
        }
    }

    pub fn banner_mut(&mut self, tab: AppTab) -> &mut Banner {
        match tab {
            AppTab::Students => &mut self.students.banner,
            AppTab::Courses => &mut self.courses.banner,
            AppTab::Enrollments => &mut self.enrollments.banner,
        }
    }

    /// Whether the section's action controls are disabled
    pub fn is_busy(&self, tab: AppTab) -> bool {
        match tab {
            AppTab::Students => self.students.pending.is_some(),
            AppTab::Courses => self.courses.pending.is_some(),
            AppTab::Enrollments => self.enrollments.pending.is_some(),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            focused_field: self.focused_field(),
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            students: self.students.clone(),
            courses: self.courses.clone(),
            enrollments: self.enrollments.clone(),
            refreshing: self.enrollments.refresh_id.is_some(),
            last_exchange: self.last_exchange.clone(),
            show_help: self.show_help,
            api_base: self.api_base.clone(),
        }
    }
}
