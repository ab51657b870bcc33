use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Student form data and the shape returned by `GET /students/{id}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Student {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Student {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }
}

/// A course as sent on add and update
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub number: String,
    pub department: String,
}

impl Course {
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Course {
            name: name.into(),
            number: number.into(),
            department: department.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.number.clear();
        self.department.clear();
    }
}

/// Composite identity of a course
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseKey {
    pub number: String,
    pub department: String,
}

impl CourseKey {
    pub fn new(number: impl Into<String>, department: impl Into<String>) -> Self {
        CourseKey {
            number: number.into(),
            department: department.into(),
        }
    }

    pub fn clear(&mut self) {
        self.number.clear();
        self.department.clear();
    }
}

/// Course details returned by `POST /courses/find`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CourseDetails {
    #[serde(default)]
    pub name: String,
}

/// Enrollment payload: a student paired with a course key
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "studentID")]
    pub student_id: String,
    pub number: String,
    pub department: String,
}

impl Enrollment {
    pub fn new(
        student_id: impl Into<String>,
        number: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Enrollment {
            student_id: student_id.into(),
            number: number.into(),
            department: department.into(),
        }
    }

    pub fn clear(&mut self) {
        self.student_id.clear();
        self.number.clear();
        self.department.clear();
    }
}

/// Server-assigned identifier; the service reports these as numbers but
/// strings are accepted too
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

/// One row of `GET /enrollments`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    #[serde(rename = "studentID")]
    pub student_id: Identifier,
    #[serde(rename = "courseID")]
    pub course_id: Identifier,
}

/// Body of `GET /enrollments`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EnrollmentList {
    #[serde(default, deserialize_with = "skip_malformed_rows")]
    pub enrollments: Vec<EnrollmentRecord>,
}

/// Rows that do not read as an `EnrollmentRecord` are dropped, the rest kept
fn skip_malformed_rows<'de, D>(deserializer: D) -> Result<Vec<EnrollmentRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = rows.len();
    let records: Vec<EnrollmentRecord> = rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();
    if records.len() < total {
        tracing::warn!(skipped = total - records.len(), "Dropped malformed enrollment rows");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_serializes_student_id_key() {
        let body = serde_json::to_value(Enrollment::new("7", "101", "MATH")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"studentID": "7", "number": "101", "department": "MATH"})
        );
    }

    #[test]
    fn test_enrollment_list_accepts_numeric_and_text_ids() {
        let list: EnrollmentList = serde_json::from_str(
            r#"{"enrollments": [{"studentID": 7, "courseID": 3}, {"studentID": "8", "courseID": "4"}]}"#,
        )
        .unwrap();
        assert_eq!(list.enrollments.len(), 2);
        assert_eq!(list.enrollments[0].student_id.to_string(), "7");
        assert_eq!(list.enrollments[1].course_id, Identifier::Text("4".into()));
    }

    #[test]
    fn test_enrollment_list_skips_malformed_rows() {
        let list: EnrollmentList = serde_json::from_str(
            r#"{"enrollments": [
                {"studentID": 7, "courseID": 3},
                {"studentID": 8, "courseID": null},
                {"studentID": 9.5, "courseID": 4},
                "garbage",
                {"studentID": "10", "courseID": 5}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            list.enrollments,
            vec![
                EnrollmentRecord {
                    student_id: Identifier::Number(7),
                    course_id: Identifier::Number(3),
                },
                EnrollmentRecord {
                    student_id: Identifier::Text("10".into()),
                    course_id: Identifier::Number(5),
                },
            ]
        );
    }

    #[test]
    fn test_enrollment_list_null_is_empty() {
        let list: EnrollmentList = serde_json::from_str(r#"{"enrollments": null}"#).unwrap();
        assert!(list.enrollments.is_empty());
    }

    #[test]
    fn test_enrollment_list_missing_key_is_empty() {
        let list: EnrollmentList = serde_json::from_str("{}").unwrap();
        assert!(list.enrollments.is_empty());
    }
}
