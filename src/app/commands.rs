//! Command handlers - business logic for processing UI events

use crate::app::payload::{error_text, payload_text};
use crate::app::state::Exchange;
use crate::app::validation;
use crate::app::AppState;
use crate::messages::ui_events::{AppTab, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{CourseDetails, EnrollmentList, Student};
use crate::network::routes::{ApiCall, Operation};

impl AppState {
    // ========================
    // Navigation
    // ========================

    /// Activate a tab. Clears the banners of every section and, when the
    /// enrollments tab becomes active, returns the list refresh to send.
    pub fn switch_tab(&mut self, tab: AppTab) -> Option<NetworkCommand> {
        if tab == self.active_tab {
            return None;
        }

        self.active_tab = tab;
        self.input_mode = InputMode::Normal;
        self.cursor_position = self.current_input().len();

        self.students.clear_messages();
        self.courses.clear_messages();
        self.enrollments.clear_messages();

        if tab == AppTab::Enrollments {
            Some(self.refresh_enrollments())
        } else {
            None
        }
    }

    pub fn next_field(&mut self) {
        let len = self.active_tab.fields().len();
        let slot = &mut self.focus[self.active_tab.index()];
        *slot = (*slot + 1) % len;
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        let len = self.active_tab.fields().len();
        let slot = &mut self.focus[self.active_tab.index()];
        *slot = slot.checked_sub(1).unwrap_or(len - 1);
        self.cursor_position = self.current_input().len();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let field = self.focused_field();
        if let Some(max) = field.max_len() {
            if self.field(field).chars().count() >= max {
                return;
            }
        }
        let cursor_pos = self.cursor_position;
        self.field_mut(field).insert(cursor_pos, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let field = self.focused_field();
            let input = self.field_mut(field);
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.replace_range(prev_pos..cursor_pos, "");
            self.cursor_position = prev_pos;
        }
    }

    /// Keep the cursor inside the focused field after it was cleared
    fn clamp_cursor(&mut self) {
        self.cursor_position = self.cursor_position.min(self.current_input().len());
    }

    // ========================
    // Enrollment list scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.enrollments.list_scroll = self.enrollments.list_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.enrollments.enrollments.len().saturating_sub(1) as u16;
        self.enrollments.list_scroll = self.enrollments.list_scroll.saturating_add(1).min(max);
    }

    // ========================
    // Banners and popups
    // ========================

    pub fn dismiss_banner(&mut self) {
        self.banner_mut(self.active_tab).clear();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Requests
    // ========================

    /// Validate and dispatch a section action. Returns `None` when the
    /// section is busy or local validation fails.
    pub fn submit(&mut self, op: Operation) -> Option<NetworkCommand> {
        if self.input_mode == InputMode::Editing {
            self.stop_editing();
        }

        let section = op.section();
        if op != Operation::ListEnrollments && self.is_busy(section) {
            tracing::debug!(?op, "Section busy, submit ignored");
            return None;
        }

        let checked = match op {
            Operation::ListEnrollments => return Some(self.refresh_enrollments()),
            Operation::AddStudent => {
                self.students.clear_messages();
                validation::add_student(&self.students.form)
            }
            Operation::GetStudent => {
                self.students.clear_messages();
                validation::get_student(&self.students.student_id)
            }
            Operation::UpdateStudent => {
                self.students.clear_messages();
                validation::update_student(&self.students.student_id, &self.students.form)
            }
            Operation::DeleteStudent => {
                self.students.clear_messages();
                validation::delete_student(&self.students.student_id)
            }
            Operation::AddCourse => {
                self.courses.clear_messages();
                validation::add_course(&self.courses.form)
            }
            Operation::FindCourse => {
                self.courses.clear_messages();
                validation::find_course(&self.courses.lookup)
            }
            Operation::UpdateCourse => {
                self.courses.clear_messages();
                validation::update_course(&self.courses.form, &self.courses.lookup)
            }
            Operation::DeleteCourse => {
                self.courses.clear_messages();
                validation::delete_course(&self.courses.lookup)
            }
            Operation::AddEnrollment => {
                self.enrollments.clear_messages();
                validation::add_enrollment(&self.enrollments.form)
            }
            Operation::DeleteEnrollment => {
                self.enrollments.clear_messages();
                validation::delete_enrollment(&self.enrollments.form)
            }
        };

        match checked {
            Ok(call) => Some(self.dispatch(call)),
            Err(message) => {
                tracing::debug!(?op, reason = message, "Rejected locally");
                self.banner_mut(section).fail(message);
                None
            }
        }
    }

    /// Issue a fresh enrollment list request, superseding any in flight
    pub fn refresh_enrollments(&mut self) -> NetworkCommand {
        self.dispatch(ApiCall::ListEnrollments)
    }

    fn dispatch(&mut self, call: ApiCall) -> NetworkCommand {
        let id = self.next_id();
        let op = call.operation();
        let route = call.route();

        match op.section() {
            _ if op == Operation::ListEnrollments => self.enrollments.refresh_id = Some(id),
            AppTab::Students => self.students.pending = Some(id),
            AppTab::Courses => self.courses.pending = Some(id),
            AppTab::Enrollments => self.enrollments.pending = Some(id),
        }

        tracing::info!(id, method = %route.method, path = %route.path(), "Dispatching request");
        self.last_exchange = Some(Exchange {
            id,
            method: route.method,
            path: route.path(),
            status: None,
            time_ms: 0,
        });

        NetworkCommand::Execute { id, call }
    }

    /// Apply a network response. May return a follow-up command (the list
    /// refresh after an enrollment change).
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        let id = response.id();
        let op = response.operation();

        let outstanding = match op.section() {
            _ if op == Operation::ListEnrollments => &mut self.enrollments.refresh_id,
            AppTab::Students => &mut self.students.pending,
            AppTab::Courses => &mut self.courses.pending,
            AppTab::Enrollments => &mut self.enrollments.pending,
        };
        if *outstanding != Some(id) {
            tracing::debug!(id, ?op, "Discarding superseded response");
            return None;
        }
        *outstanding = None;

        if let Some(exchange) = self.last_exchange.as_mut().filter(|e| e.id == id) {
            exchange.status = response.status();
            exchange.time_ms = response.time_ms();
        }

        match response {
            NetworkResponse::Success { body, .. } => self.apply_success(op, &body),
            NetworkResponse::Error {
                payload, message, ..
            } => {
                tracing::warn!(id, ?op, error = %message, "Request failed");
                self.apply_failure(op, payload.as_deref());
                None
            }
        }
    }

    fn apply_success(&mut self, op: Operation, body: &str) -> Option<NetworkCommand> {
        match op {
            Operation::AddStudent => {
                self.students
                    .banner
                    .success(format!("Student added! {}", payload_text(body)));
                self.students.form.clear();
            }
            Operation::GetStudent => match serde_json::from_str::<Student>(body) {
                Ok(student) => {
                    self.students.fetched = Some(student);
                    self.students.banner.success("Student fetched successfully.");
                }
                Err(_) => self.apply_failure(op, None),
            },
            Operation::UpdateStudent => {
                self.students.banner.success("Student updated successfully.");
                self.students.form.clear();
            }
            Operation::DeleteStudent => {
                self.students.banner.success("Student deleted successfully.");
                self.students.student_id.clear();
            }
            Operation::AddCourse => {
                self.courses.banner.success(payload_text(body));
                self.courses.form.clear();
            }
            Operation::FindCourse => match serde_json::from_str::<CourseDetails>(body) {
                Ok(course) => {
                    self.courses.fetched = Some(course);
                    self.courses.banner.success("Course fetched successfully.");
                }
                Err(_) => self.apply_failure(op, None),
            },
            Operation::UpdateCourse => {
                self.courses.banner.success(payload_text(body));
                self.courses.form.clear();
                self.courses.lookup.clear();
            }
            Operation::DeleteCourse => {
                self.courses.banner.success(payload_text(body));
                self.courses.lookup.clear();
            }
            Operation::AddEnrollment | Operation::DeleteEnrollment => {
                self.enrollments.banner.success(payload_text(body));
                self.enrollments.form.clear();
                self.clamp_cursor();
                return Some(self.refresh_enrollments());
            }
            Operation::ListEnrollments => match serde_json::from_str::<EnrollmentList>(body) {
                Ok(list) => {
                    self.enrollments.enrollments = list.enrollments;
                    let max = self.enrollments.enrollments.len().saturating_sub(1) as u16;
                    self.enrollments.list_scroll = self.enrollments.list_scroll.min(max);
                    self.enrollments.banner.success("Enrollments refreshed.");
                    self.enrollments.banner.error = None;
                }
                Err(_) => self.apply_failure(op, None),
            },
        }

        self.clamp_cursor();
        None
    }

    fn apply_failure(&mut self, op: Operation, payload: Option<&str>) {
        let text = error_text(payload, op.fallback_error());
        self.banner_mut(op.section()).fail(text);

        if op == Operation::ListEnrollments {
            self.enrollments.enrollments.clear();
            self.enrollments.list_scroll = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::Field;
    use crate::models::{Course, CourseKey, Enrollment, EnrollmentRecord, Identifier};

    fn state() -> AppState {
        AppState::new("http://localhost:5000")
    }

    fn sent_call(cmd: Option<NetworkCommand>) -> (u64, ApiCall) {
        match cmd {
            Some(NetworkCommand::Execute { id, call }) => (id, call),
            other => panic!("expected Execute, got {:?}", other),
        }
    }

    fn ok(id: u64, operation: Operation, body: &str) -> NetworkResponse {
        NetworkResponse::Success {
            id,
            operation,
            status: 200,
            body: body.to_string(),
            time_ms: 3,
        }
    }

    fn failed(id: u64, operation: Operation, payload: Option<&str>) -> NetworkResponse {
        NetworkResponse::Error {
            id,
            operation,
            status: payload.map(|_| 400),
            payload: payload.map(str::to_string),
            message: "boom".to_string(),
            time_ms: 3,
        }
    }

    fn type_into(state: &mut AppState, field: Field, text: &str) {
        while state.focused_field() != field {
            state.next_field();
        }
        state.start_editing();
        for c in text.chars() {
            state.enter_char(c);
        }
        state.stop_editing();
    }

    #[test]
    fn test_add_course_short_department_is_rejected_locally() {
        let mut state = state();
        state.switch_tab(AppTab::Courses);
        state.courses.form = Course::new("Intro", "101", "CS");

        assert_eq!(state.submit(Operation::AddCourse), None);
        assert_eq!(
            state.courses.banner.error_text(),
            Some("Department prefix must be 4 characters.")
        );
        assert_eq!(state.courses.pending, None);
        assert_eq!(state.last_exchange, None);
    }

    #[test]
    fn test_add_student_success_resets_form() {
        let mut state = state();
        state.students.form = Student::new("Ada", "ada@x.com");

        let (id, call) = sent_call(state.submit(Operation::AddStudent));
        assert_eq!(call, ApiCall::AddStudent(Student::new("Ada", "ada@x.com")));
        assert!(state.is_busy(AppTab::Students));

        let follow_up = state.handle_response(ok(id, Operation::AddStudent, "Keep this safe. Your ID is: 12"));
        assert_eq!(follow_up, None);
        assert_eq!(state.students.form, Student::new("", ""));
        assert_eq!(
            state.students.banner.message_text(),
            Some("Student added! Keep this safe. Your ID is: 12")
        );
        assert!(!state.is_busy(AppTab::Students));
    }

    #[test]
    fn test_get_student_shows_fetched_fields() {
        let mut state = state();
        state.students.student_id = "42".into();

        let (id, call) = sent_call(state.submit(Operation::GetStudent));
        assert_eq!(call, ApiCall::GetStudent("42".into()));

        state.handle_response(ok(id, Operation::GetStudent, r#"{"name": "Ada", "email": "ada@x.com"}"#));
        assert_eq!(state.students.fetched, Some(Student::new("Ada", "ada@x.com")));
        assert_eq!(
            state.students.banner.message_text(),
            Some("Student fetched successfully.")
        );
        assert_eq!(state.students.student_id, "42");
    }

    #[test]
    fn test_get_student_unreadable_body_uses_fallback() {
        let mut state = state();
        state.students.student_id = "42".into();
        let (id, _) = sent_call(state.submit(Operation::GetStudent));

        state.handle_response(ok(id, Operation::GetStudent, "not json"));
        assert_eq!(state.students.fetched, None);
        assert_eq!(state.students.banner.error_text(), Some("Failed to fetch student."));
    }

    #[test]
    fn test_delete_enrollment_refreshes_list() {
        let mut state = state();
        let (refresh_id, _) = sent_call(state.switch_tab(AppTab::Enrollments));
        state.handle_response(ok(refresh_id, Operation::ListEnrollments, r#"{"enrollments": [{"studentID": 7, "courseID": 3}]}"#));
        assert_eq!(state.enrollments.enrollments.len(), 1);

        state.enrollments.form = Enrollment::new("7", "101", "MATH");
        let (id, call) = sent_call(state.submit(Operation::DeleteEnrollment));
        assert_eq!(
            call.route().body,
            Some(serde_json::json!({"studentID": "7", "number": "101", "department": "MATH"}))
        );

        let (list_id, list_call) = sent_call(state.handle_response(ok(id, Operation::DeleteEnrollment, "Success")));
        assert_eq!(list_call, ApiCall::ListEnrollments);
        assert_eq!(state.enrollments.form, Enrollment::default());
        assert_eq!(state.enrollments.banner.message_text(), Some("Success"));

        state.handle_response(ok(list_id, Operation::ListEnrollments, r#"{"enrollments": [{"studentID": 8, "courseID": 4}]}"#));
        assert_eq!(
            state.enrollments.enrollments,
            vec![EnrollmentRecord {
                student_id: Identifier::Number(8),
                course_id: Identifier::Number(4),
            }]
        );
        assert_eq!(
            state.enrollments.banner.message_text(),
            Some("Enrollments refreshed.")
        );
    }

    #[test]
    fn test_superseded_refresh_is_discarded() {
        let mut state = state();
        let (first, _) = sent_call(state.submit(Operation::ListEnrollments));
        let (second, _) = sent_call(state.submit(Operation::ListEnrollments));

        state.handle_response(ok(second, Operation::ListEnrollments, r#"{"enrollments": []}"#));
        state.handle_response(ok(first, Operation::ListEnrollments, r#"{"enrollments": [{"studentID": 1, "courseID": 1}]}"#));

        assert!(state.enrollments.enrollments.is_empty());
        assert_eq!(state.enrollments.refresh_id, None);
    }

    #[test]
    fn test_switching_tabs_clears_every_banner() {
        let mut state = state();
        state.students.banner.success("Student updated successfully.");
        state.students.fetched = Some(Student::new("Ada", "ada@x.com"));
        state.courses.banner.fail("Failed to find course.");
        state.enrollments.banner.fail("Failed to add enrollment.");
        state.courses.lookup = CourseKey::new("101", "MATH");

        assert_eq!(state.switch_tab(AppTab::Courses), None);

        for tab in AppTab::ALL {
            assert_eq!(state.banner(tab), &Default::default(), "{:?}", tab);
        }
        assert_eq!(state.students.fetched, None);
        assert_eq!(state.courses.lookup, CourseKey::new("101", "MATH"));
    }

    #[test]
    fn test_reselecting_active_tab_is_a_no_op() {
        let mut state = state();
        state.students.banner.success("kept");
        assert_eq!(state.switch_tab(AppTab::Students), None);
        assert_eq!(state.students.banner.message_text(), Some("kept"));
    }

    #[test]
    fn test_busy_section_ignores_second_submit() {
        let mut state = state();
        state.students.student_id = "42".into();
        let (first, _) = sent_call(state.submit(Operation::GetStudent));

        assert_eq!(state.submit(Operation::DeleteStudent), None);
        assert_eq!(state.students.pending, Some(first));
        assert_eq!(state.students.student_id, "42");

        // Other sections stay usable
        state.courses.lookup = CourseKey::new("101", "MATH");
        assert!(state.submit(Operation::FindCourse).is_some());
    }

    #[test]
    fn test_server_error_payload_is_shown() {
        let mut state = state();
        state.students.student_id = "99".into();
        let (id, _) = sent_call(state.submit(Operation::GetStudent));

        state.handle_response(failed(id, Operation::GetStudent, Some("Could not find student")));
        assert_eq!(state.students.banner.error_text(), Some("Could not find student"));
        assert_eq!(state.last_exchange.as_ref().and_then(|e| e.status), Some(400));
    }

    #[test]
    fn test_transport_failure_uses_fallback() {
        let mut state = state();
        state.courses.form = Course::new("Calculus", "101", "MATH");
        let (id, _) = sent_call(state.submit(Operation::AddCourse));

        state.handle_response(failed(id, Operation::AddCourse, None));
        assert_eq!(state.courses.banner.error_text(), Some("Failed to add course."));
        assert_eq!(state.courses.form, Course::new("Calculus", "101", "MATH"));
    }

    #[test]
    fn test_failed_refresh_empties_list() {
        let mut state = state();
        state.enrollments.enrollments = vec![EnrollmentRecord {
            student_id: Identifier::Number(1),
            course_id: Identifier::Number(2),
        }];
        let (id, _) = sent_call(state.submit(Operation::ListEnrollments));

        state.handle_response(failed(id, Operation::ListEnrollments, Some(r#"{"message": "db offline"}"#)));
        assert!(state.enrollments.enrollments.is_empty());
        assert_eq!(state.enrollments.banner.error_text(), Some("db offline"));
    }

    #[test]
    fn test_update_course_clears_both_forms() {
        let mut state = state();
        state.courses.form.name = "Linear Algebra".into();
        state.courses.lookup = CourseKey::new("201", "MATH");

        let (id, call) = sent_call(state.submit(Operation::UpdateCourse));
        assert_eq!(call, ApiCall::UpdateCourse(Course::new("Linear Algebra", "201", "MATH")));

        state.handle_response(ok(id, Operation::UpdateCourse, "Success"));
        assert_eq!(state.courses.form, Course::default());
        assert_eq!(state.courses.lookup, CourseKey::default());
        assert_eq!(state.courses.banner.message_text(), Some("Success"));
    }

    #[test]
    fn test_department_input_stops_at_four_characters() {
        let mut state = state();
        state.switch_tab(AppTab::Courses);
        type_into(&mut state, Field::CourseDepartment, "MATHS");
        assert_eq!(state.courses.form.department, "MATH");

        type_into(&mut state, Field::CourseName, "Discrete Mathematics");
        assert_eq!(state.courses.form.name, "Discrete Mathematics");
    }

    #[test]
    fn test_editing_with_cursor_moves() {
        let mut state = state();
        type_into(&mut state, Field::StudentName, "Ad");
        state.start_editing();
        state.move_cursor_left();
        state.enter_char('x');
        assert_eq!(state.students.form.name, "Axd");
        state.move_cursor_right();
        state.delete_char();
        assert_eq!(state.students.form.name, "Ax");
    }

    #[test]
    fn test_dismiss_only_touches_active_section() {
        let mut state = state();
        state.students.banner.fail("Please enter a Student ID.");
        state.courses.banner.success("Success");

        state.dismiss_banner();
        assert_eq!(state.students.banner.error_text(), None);
        assert_eq!(state.courses.banner.message_text(), Some("Success"));
    }

    #[test]
    fn test_blank_student_id_sends_nothing() {
        let mut state = state();
        state.students.student_id = "   ".into();

        assert_eq!(state.submit(Operation::DeleteStudent), None);
        assert_eq!(
            state.students.banner.error_text(),
            Some("Please enter a Student ID to delete.")
        );
        assert!(!state.is_busy(AppTab::Students));
        assert_eq!(state.last_exchange, None);
    }

    #[test]
    fn test_failed_enrollment_add_keeps_form_and_list() {
        let mut state = state();
        let current = vec![EnrollmentRecord {
            student_id: Identifier::Number(1),
            course_id: Identifier::Number(2),
        }];
        state.enrollments.enrollments = current.clone();
        state.enrollments.form = Enrollment::new("7", "101", "MATH");

        let (id, _) = sent_call(state.submit(Operation::AddEnrollment));
        let follow_up = state.handle_response(failed(id, Operation::AddEnrollment, Some("invalid inputs")));

        assert_eq!(follow_up, None);
        assert_eq!(state.enrollments.banner.error_text(), Some("invalid inputs"));
        assert_eq!(state.enrollments.banner.message_text(), None);
        assert_eq!(state.enrollments.form, Enrollment::new("7", "101", "MATH"));
        assert_eq!(state.enrollments.enrollments, current);
        assert_eq!(state.enrollments.refresh_id, None);
        assert!(!state.is_busy(AppTab::Enrollments));
    }

    #[test]
    fn test_failed_enrollment_delete_does_not_refresh() {
        let mut state = state();
        state.enrollments.form = Enrollment::new("7", "101", "MATH");

        let (id, _) = sent_call(state.submit(Operation::DeleteEnrollment));
        let follow_up = state.handle_response(failed(id, Operation::DeleteEnrollment, None));

        assert_eq!(follow_up, None);
        assert_eq!(
            state.enrollments.banner.error_text(),
            Some("Failed to delete enrollment.")
        );
        assert_eq!(state.enrollments.form, Enrollment::new("7", "101", "MATH"));
    }
}
