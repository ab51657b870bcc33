//! # Roster TUI
//!
//! A terminal front-end for a student/course/enrollment REST service.
//!
//! ## Features
//! - Students: add, get, update, delete by ID
//! - Courses: add, find, rename, delete by number + department
//! - Enrollments: add, delete, live list
//! - Local checks before any request (required fields, 4-character department codes)
//! - One outstanding request per section
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::{Config, ConfigError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Course, CourseDetails, CourseKey, Enrollment, EnrollmentRecord, Student};
pub use network::{ApiCall, ApiClient, ApiError, ApiResponse, NetworkActor, Operation};
