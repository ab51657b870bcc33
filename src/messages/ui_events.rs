//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::constants::DEPARTMENT_CODE_LEN;
use crate::network::routes::Operation;

/// Application tabs, one per entity section
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum AppTab {
    #[default]
    Students,
    Courses,
    Enrollments,
}

impl AppTab {
    pub const ALL: [AppTab; 3] = [AppTab::Students, AppTab::Courses, AppTab::Enrollments];

    pub fn title(&self) -> &'static str {
        match self {
            AppTab::Students => "Students",
            AppTab::Courses => "Courses",
            AppTab::Enrollments => "Enrollments",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AppTab::Students => 0,
            AppTab::Courses => 1,
            AppTab::Enrollments => 2,
        }
    }

    pub fn next(&self) -> AppTab {
        match self {
            AppTab::Students => AppTab::Courses,
            AppTab::Courses => AppTab::Enrollments,
            AppTab::Enrollments => AppTab::Students,
        }
    }

    pub fn prev(&self) -> AppTab {
        match self {
            AppTab::Students => AppTab::Enrollments,
            AppTab::Courses => AppTab::Students,
            AppTab::Enrollments => AppTab::Courses,
        }
    }

    /// Editable fields in tab order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            AppTab::Students => &[Field::StudentName, Field::StudentEmail, Field::StudentId],
            AppTab::Courses => &[
                Field::CourseName,
                Field::CourseNumber,
                Field::CourseDepartment,
                Field::LookupNumber,
                Field::LookupDepartment,
            ],
            AppTab::Enrollments => &[
                Field::EnrollmentStudentId,
                Field::EnrollmentNumber,
                Field::EnrollmentDepartment,
            ],
        }
    }
}

/// A single text input
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    StudentName,
    StudentEmail,
    StudentId,
    CourseName,
    CourseNumber,
    CourseDepartment,
    LookupNumber,
    LookupDepartment,
    EnrollmentStudentId,
    EnrollmentNumber,
    EnrollmentDepartment,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::StudentName => "Name",
            Field::StudentEmail => "Email",
            Field::StudentId => "Student ID",
            Field::CourseName => "Course Name",
            Field::CourseNumber => "Course Number (e.g., 101)",
            Field::CourseDepartment => "Department (4 chars)",
            Field::LookupNumber => "Course No. (Identifier)",
            Field::LookupDepartment => "Department (Identifier)",
            Field::EnrollmentStudentId => "Student ID",
            Field::EnrollmentNumber => "Course Number",
            Field::EnrollmentDepartment => "Department (4 chars)",
        }
    }

    /// Keyboard input stops at this many characters
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Field::CourseDepartment | Field::LookupDepartment | Field::EnrollmentDepartment => {
                Some(DEPARTMENT_CODE_LEN)
            }
            _ => None,
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),

    // Field navigation
    NextField,
    PrevField,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Section actions
    Submit(Operation),
    DismissBanner,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_tab: AppTab,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Editing => handle_editing_keys(key),
        InputMode::Normal => handle_global_keys(key, active_tab)
            .or_else(|| handle_section_keys(key, active_tab)),
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_global_keys(key: KeyEvent, active_tab: AppTab) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('1') => Some(UiEvent::SwitchTab(AppTab::Students)),
        KeyCode::Char('2') => Some(UiEvent::SwitchTab(AppTab::Courses)),
        KeyCode::Char('3') => Some(UiEvent::SwitchTab(AppTab::Enrollments)),
        KeyCode::Right => Some(UiEvent::SwitchTab(active_tab.next())),
        KeyCode::Left => Some(UiEvent::SwitchTab(active_tab.prev())),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Char('x') => Some(UiEvent::DismissBanner),
        _ => None,
    }
}

fn handle_section_keys(key: KeyEvent, active_tab: AppTab) -> Option<UiEvent> {
    let op = match (active_tab, key.code) {
        (AppTab::Students, KeyCode::Char('a')) => Operation::AddStudent,
        (AppTab::Students, KeyCode::Char('g')) => Operation::GetStudent,
        (AppTab::Students, KeyCode::Char('u')) => Operation::UpdateStudent,
        (AppTab::Students, KeyCode::Char('d')) => Operation::DeleteStudent,
        (AppTab::Courses, KeyCode::Char('a')) => Operation::AddCourse,
        (AppTab::Courses, KeyCode::Char('f')) => Operation::FindCourse,
        (AppTab::Courses, KeyCode::Char('u')) => Operation::UpdateCourse,
        (AppTab::Courses, KeyCode::Char('d')) => Operation::DeleteCourse,
        (AppTab::Enrollments, KeyCode::Char('a')) => Operation::AddEnrollment,
        (AppTab::Enrollments, KeyCode::Char('d')) => Operation::DeleteEnrollment,
        (AppTab::Enrollments, KeyCode::Char('r')) => Operation::ListEnrollments,
        (AppTab::Enrollments, KeyCode::Up) => return Some(UiEvent::ScrollUp),
        (AppTab::Enrollments, KeyCode::Down) => return Some(UiEvent::ScrollDown),
        _ => return None,
    };
    Some(UiEvent::Submit(op))
}
