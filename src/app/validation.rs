//! Client-side precondition checks run before any request is issued
//!
//! Each check either yields the `ApiCall` to send or the banner text to show.
//! Checks run in a fixed order per action, so the first failing rule decides
//! the message.

use crate::constants::DEPARTMENT_CODE_LEN;
use crate::models::{Course, CourseKey, Enrollment, Student};
use crate::network::routes::ApiCall;

pub type Checked = Result<ApiCall, &'static str>;

/// Department codes are exactly four characters
pub fn is_department_code(department: &str) -> bool {
    department.chars().count() == DEPARTMENT_CODE_LEN
}

fn all_present(values: &[&str]) -> bool {
    values.iter().all(|v| !v.is_empty())
}

pub fn add_student(form: &Student) -> Checked {
    Ok(ApiCall::AddStudent(form.clone()))
}

pub fn get_student(student_id: &str) -> Checked {
    if student_id.trim().is_empty() {
        return Err("Please enter a Student ID.");
    }
    Ok(ApiCall::GetStudent(student_id.to_string()))
}

pub fn update_student(student_id: &str, form: &Student) -> Checked {
    if student_id.trim().is_empty() {
        return Err("Please enter a Student ID to update.");
    }
    Ok(ApiCall::UpdateStudent {
        id: student_id.to_string(),
        student: form.clone(),
    })
}

pub fn delete_student(student_id: &str) -> Checked {
    if student_id.trim().is_empty() {
        return Err("Please enter a Student ID to delete.");
    }
    Ok(ApiCall::DeleteStudent(student_id.to_string()))
}

pub fn add_course(form: &Course) -> Checked {
    if !is_department_code(&form.department) {
        return Err("Department prefix must be 4 characters.");
    }
    Ok(ApiCall::AddCourse(form.clone()))
}

pub fn find_course(lookup: &CourseKey) -> Checked {
    if !is_department_code(&lookup.department) {
        return Err("Department prefix for finding must be 4 characters.");
    }
    if !all_present(&[lookup.number.as_str(), lookup.department.as_str()]) {
        return Err("Course Number and Department are required to find.");
    }
    Ok(ApiCall::FindCourse(lookup.clone()))
}

/// New name from the form, identity from the lookup key
pub fn update_course(form: &Course, lookup: &CourseKey) -> Checked {
    if !all_present(&[form.name.as_str(), lookup.number.as_str(), lookup.department.as_str()]) {
        return Err(
            "New Course Name, and current Course Number & Department are required to update.",
        );
    }
    if !is_department_code(&lookup.department) {
        return Err("Department prefix for updating must be 4 characters.");
    }
    Ok(ApiCall::UpdateCourse(Course {
        name: form.name.clone(),
        number: lookup.number.clone(),
        department: lookup.department.clone(),
    }))
}

pub fn delete_course(lookup: &CourseKey) -> Checked {
    if !all_present(&[lookup.number.as_str(), lookup.department.as_str()]) {
        return Err("Course Number and Department are required to delete.");
    }
    if !is_department_code(&lookup.department) {
        return Err("Department prefix for deleting must be 4 characters.");
    }
    Ok(ApiCall::DeleteCourse(lookup.clone()))
}

pub fn add_enrollment(form: &Enrollment) -> Checked {
    if !is_department_code(&form.department) {
        return Err("Department prefix must be 4 characters.");
    }
    if !all_present(&[form.student_id.as_str(), form.number.as_str(), form.department.as_str()]) {
        return Err("All fields are required to add enrollment.");
    }
    Ok(ApiCall::AddEnrollment(form.clone()))
}

pub fn delete_enrollment(form: &Enrollment) -> Checked {
    if !all_present(&[form.student_id.as_str(), form.number.as_str(), form.department.as_str()]) {
        return Err(
            "All fields (Student ID, Course Number, Department) are required to delete an enrollment.",
        );
    }
    if !is_department_code(&form.department) {
        return Err("Department prefix for delete must be 4 characters.");
    }
    Ok(ApiCall::DeleteEnrollment(form.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAD_CODES: [&str; 5] = ["", "C", "CS", "MAT", "MATHS"];

    #[test]
    fn test_department_length_counts_characters() {
        assert!(is_department_code("MATH"));
        assert!(is_department_code("ÉCON"));
        assert!(!is_department_code("CS"));
    }

    #[test]
    fn test_bad_department_rejects_every_course_action() {
        for code in BAD_CODES {
            let form = Course::new("Calculus", "101", code);
            let lookup = CourseKey::new("101", code);
            assert!(add_course(&form).is_err(), "add {:?}", code);
            assert!(find_course(&lookup).is_err(), "find {:?}", code);
            assert!(update_course(&form, &lookup).is_err(), "update {:?}", code);
            assert!(delete_course(&lookup).is_err(), "delete {:?}", code);
        }
    }

    #[test]
    fn test_bad_department_rejects_every_enrollment_action() {
        for code in BAD_CODES {
            let form = Enrollment::new("7", "101", code);
            assert!(add_enrollment(&form).is_err(), "add {:?}", code);
            assert!(delete_enrollment(&form).is_err(), "delete {:?}", code);
        }
    }

    #[test]
    fn test_add_course_short_department_message() {
        let form = Course::new("Intro", "101", "CS");
        assert_eq!(add_course(&form), Err("Department prefix must be 4 characters."));
    }

    #[test]
    fn test_check_order_decides_message() {
        // Length is checked before presence when finding
        assert_eq!(
            find_course(&CourseKey::new("", "")),
            Err("Department prefix for finding must be 4 characters.")
        );
        assert_eq!(
            find_course(&CourseKey::new("", "MATH")),
            Err("Course Number and Department are required to find.")
        );
        // Presence is checked before length when deleting
        assert_eq!(
            delete_course(&CourseKey::new("101", "")),
            Err("Course Number and Department are required to delete.")
        );
        assert_eq!(
            add_enrollment(&Enrollment::new("", "101", "MATH")),
            Err("All fields are required to add enrollment.")
        );
        assert_eq!(
            delete_enrollment(&Enrollment::new("7", "101", "MAT")),
            Err("Department prefix for delete must be 4 characters.")
        );
    }

    #[test]
    fn test_update_course_uses_lookup_identity() {
        let form = Course::new("Linear Algebra", "999", "XXXX");
        let lookup = CourseKey::new("201", "MATH");
        assert_eq!(
            update_course(&form, &lookup),
            Ok(ApiCall::UpdateCourse(Course::new("Linear Algebra", "201", "MATH")))
        );
        assert!(update_course(&Course::default(), &lookup).is_err());
    }

    #[test]
    fn test_student_id_required() {
        assert_eq!(get_student(""), Err("Please enter a Student ID."));
        assert_eq!(get_student("42"), Ok(ApiCall::GetStudent("42".into())));
        assert!(update_student("", &Student::default()).is_err());
        assert_eq!(delete_student(""), Err("Please enter a Student ID to delete."));
    }

    #[test]
    fn test_blank_student_id_is_rejected() {
        assert_eq!(get_student("   "), Err("Please enter a Student ID."));
        assert_eq!(
            update_student(" \t", &Student::new("Ada", "ada@x.com")),
            Err("Please enter a Student ID to update.")
        );
        assert_eq!(delete_student("   "), Err("Please enter a Student ID to delete."));
    }
}
