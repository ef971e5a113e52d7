//! Free-text filter over listed students.

use super::model::Student;

/// True if `term` occurs in the student's name, studentId or email
/// (case-insensitive) or verbatim in the phone number.
///
/// An empty term matches every student.
pub fn matches(student: &Student, term: &str) -> bool {
    let needle = term.to_lowercase();
    student.name.to_lowercase().contains(&needle)
        || student.student_id.to_lowercase().contains(&needle)
        || student.email.to_lowercase().contains(&needle)
        || student.phone.contains(term)
}

/// Keep the students matching `term`, preserving order.
pub fn filter(students: Vec<Student>, term: &str) -> Vec<Student> {
    students.into_iter().filter(|s| matches(s, term)).collect()
}
