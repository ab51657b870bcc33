//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Base URL of the roster service when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Client-wide HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory under `$HOME` holding the config file
pub const CONFIG_DIR_NAME: &str = ".roster";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "ROSTER_API_URL";

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "roster.log";

/// Required length of a department code
pub const DEPARTMENT_CODE_LEN: usize = 4;

/// Application name
pub const APP_NAME: &str = "Student & Course Management";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
