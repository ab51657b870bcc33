//! REST routes of the roster service - one `ApiCall` per operation

use serde_json::Value;

use crate::messages::ui_events::AppTab;
use crate::models::{Course, CourseKey, Enrollment, HttpMethod, Student};

/// Operation identity, without payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    AddStudent,
    GetStudent,
    UpdateStudent,
    DeleteStudent,
    AddCourse,
    FindCourse,
    UpdateCourse,
    DeleteCourse,
    AddEnrollment,
    DeleteEnrollment,
    ListEnrollments,
}

impl Operation {
    /// The section whose banner reports this operation's outcome
    pub fn section(&self) -> AppTab {
        match self {
            Operation::AddStudent
            | Operation::GetStudent
            | Operation::UpdateStudent
            | Operation::DeleteStudent => AppTab::Students,
            Operation::AddCourse
            | Operation::FindCourse
            | Operation::UpdateCourse
            | Operation::DeleteCourse => AppTab::Courses,
            Operation::AddEnrollment
            | Operation::DeleteEnrollment
            | Operation::ListEnrollments => AppTab::Enrollments,
        }
    }

    /// Banner text when the server gave nothing usable
    pub fn fallback_error(&self) -> &'static str {
        match self {
            Operation::AddStudent => "Failed to add student.",
            Operation::GetStudent => "Failed to fetch student.",
            Operation::UpdateStudent => "Failed to update student.",
            Operation::DeleteStudent => "Failed to delete student.",
            Operation::AddCourse => "Failed to add course.",
            Operation::FindCourse => "Failed to find course.",
            Operation::UpdateCourse => "Failed to update course.",
            Operation::DeleteCourse => "Failed to delete course.",
            Operation::AddEnrollment => "Failed to add enrollment.",
            Operation::DeleteEnrollment => "Failed to delete enrollment.",
            Operation::ListEnrollments => "Failed to fetch enrollments.",
        }
    }
}

/// A fully specified request against the roster service
#[derive(Clone, Debug, PartialEq)]
pub enum ApiCall {
    AddStudent(Student),
    GetStudent(String),
    UpdateStudent { id: String, student: Student },
    DeleteStudent(String),
    AddCourse(Course),
    FindCourse(CourseKey),
    UpdateCourse(Course),
    DeleteCourse(CourseKey),
    AddEnrollment(Enrollment),
    DeleteEnrollment(Enrollment),
    ListEnrollments,
}

/// Method, path segments and optional JSON body of a call
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    pub body: Option<Value>,
}

impl Route {
    fn new(method: HttpMethod, segments: &[&str]) -> Self {
        Route {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            body: None,
        }
    }

    fn with_body(mut self, body: impl serde::Serialize) -> Self {
        // Plain string-field structs always serialize
        self.body = serde_json::to_value(body).ok();
        self
    }

    /// Unencoded path, for logs and the status bar
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl ApiCall {
    pub fn operation(&self) -> Operation {
        match self {
            ApiCall::AddStudent(_) => Operation::AddStudent,
            ApiCall::GetStudent(_) => Operation::GetStudent,
            ApiCall::UpdateStudent { .. } => Operation::UpdateStudent,
            ApiCall::DeleteStudent(_) => Operation::DeleteStudent,
            ApiCall::AddCourse(_) => Operation::AddCourse,
            ApiCall::FindCourse(_) => Operation::FindCourse,
            ApiCall::UpdateCourse(_) => Operation::UpdateCourse,
            ApiCall::DeleteCourse(_) => Operation::DeleteCourse,
            ApiCall::AddEnrollment(_) => Operation::AddEnrollment,
            ApiCall::DeleteEnrollment(_) => Operation::DeleteEnrollment,
            ApiCall::ListEnrollments => Operation::ListEnrollments,
        }
    }

    pub fn route(&self) -> Route {
        use HttpMethod::*;

        match self {
            ApiCall::AddStudent(student) => Route::new(POST, &["students"]).with_body(student),
            ApiCall::GetStudent(id) => Route::new(GET, &["students", id.trim()]),
            ApiCall::UpdateStudent { id, student } => {
                Route::new(PUT, &["students", id.trim()]).with_body(student)
            }
            ApiCall::DeleteStudent(id) => Route::new(DELETE, &["students", id.trim()]),
            ApiCall::AddCourse(course) => Route::new(POST, &["courses"]).with_body(course),
            ApiCall::FindCourse(key) => Route::new(POST, &["courses", "find"]).with_body(key),
            ApiCall::UpdateCourse(course) => Route::new(PUT, &["courses"]).with_body(course),
            ApiCall::DeleteCourse(key) => Route::new(DELETE, &["courses"]).with_body(key),
            ApiCall::AddEnrollment(enrollment) => {
                Route::new(POST, &["enrollments"]).with_body(enrollment)
            }
            ApiCall::DeleteEnrollment(enrollment) => {
                Route::new(DELETE, &["enrollments"]).with_body(enrollment)
            }
            ApiCall::ListEnrollments => Route::new(GET, &["enrollments"]),
        }
    }
}
