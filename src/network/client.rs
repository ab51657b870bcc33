//! HTTP client wrapper - one function per roster operation

use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::models::{Course, CourseKey, Enrollment, HttpMethod, Student};
use crate::network::routes::{ApiCall, Route};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Server responded with {status}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidBaseUrl(_) => None,
        }
    }

    /// Response body, when the server sent one
    pub fn payload(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// A 2xx response, body untouched
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Client for the roster REST service
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| ApiError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(ApiClient {
            client: create_client(timeout)?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a route; segments are percent-encoded
    pub fn endpoint(&self, route: &Route) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(&route.segments);
        Ok(url)
    }

    /// Execute any call; non-2xx responses become `ApiError::Status`
    pub async fn execute(&self, call: &ApiCall) -> Result<ApiResponse> {
        let route = call.route();
        let url = self.endpoint(&route)?;

        let mut builder = match route.method {
            HttpMethod::GET => self.client.get(url),
            HttpMethod::POST => self.client.post(url),
            HttpMethod::PUT => self.client.put(url),
            HttpMethod::DELETE => self.client.delete(url),
        };
        if let Some(body) = &route.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    // Students

    pub async fn add_student(&self, student: Student) -> Result<ApiResponse> {
        self.execute(&ApiCall::AddStudent(student)).await
    }

    pub async fn get_student(&self, id: &str) -> Result<ApiResponse> {
        self.execute(&ApiCall::GetStudent(id.to_string())).await
    }

    pub async fn update_student(&self, id: &str, student: Student) -> Result<ApiResponse> {
        self.execute(&ApiCall::UpdateStudent {
            id: id.to_string(),
            student,
        })
        .await
    }

    pub async fn delete_student(&self, id: &str) -> Result<ApiResponse> {
        self.execute(&ApiCall::DeleteStudent(id.to_string())).await
    }

    // Courses

    pub async fn add_course(&self, course: Course) -> Result<ApiResponse> {
        self.execute(&ApiCall::AddCourse(course)).await
    }

    pub async fn find_course(&self, key: CourseKey) -> Result<ApiResponse> {
        self.execute(&ApiCall::FindCourse(key)).await
    }

    pub async fn update_course(&self, course: Course) -> Result<ApiResponse> {
        self.execute(&ApiCall::UpdateCourse(course)).await
    }

    pub async fn delete_course(&self, key: CourseKey) -> Result<ApiResponse> {
        self.execute(&ApiCall::DeleteCourse(key)).await
    }

    // Enrollments

    pub async fn add_enrollment(&self, enrollment: Enrollment) -> Result<ApiResponse> {
        self.execute(&ApiCall::AddEnrollment(enrollment)).await
    }

    pub async fn delete_enrollment(&self, enrollment: Enrollment) -> Result<ApiResponse> {
        self.execute(&ApiCall::DeleteEnrollment(enrollment)).await
    }

    pub async fn list_enrollments(&self) -> Result<ApiResponse> {
        self.execute(&ApiCall::ListEnrollments).await
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_path() {
        let api = client("http://localhost:5000/api/");
        let url = api.endpoint(&ApiCall::ListEnrollments.route()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/enrollments");
    }

    #[test]
    fn test_endpoint_encodes_student_id() {
        let api = client("http://localhost:5000");
        let url = api
            .endpoint(&ApiCall::GetStudent("4 2/x".into()).route())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/students/4%202%2Fx");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            ApiClient::new("mailto:ops@example.com", Duration::from_secs(1)),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_status_error_exposes_payload() {
        let err = ApiError::Status {
            status: 400,
            body: "invalid inputs".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.payload(), Some("invalid inputs"));
    }

    #[test]
    fn test_client_keeps_configured_timeout() {
        assert!(create_client(Duration::from_millis(250)).is_ok());
        let api = client("http://localhost:5000/");
        assert_eq!(api.base_url().as_str(), "http://localhost:5000/");
    }
}
