//! Validation Invariant Tests
//!
//! Properties of the sanitize and validate pipeline:
//! - Sanitizing is idempotent
//! - Validation is deterministic
//! - Length bounds are inclusive
//! - Every field is checked independently

use student_registry::students::{sanitize, validate, Field, StudentFields, StudentInput};

// =============================================================================
// Helper Functions
// =============================================================================

fn valid_fields() -> StudentFields {
    StudentFields {
        student_id: "STU001".to_string(),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "123-456-7890".to_string(),
    }
}

fn with_student_id(student_id: &str) -> StudentFields {
    StudentFields {
        student_id: student_id.to_string(),
        ..valid_fields()
    }
}

fn with_email(email: &str) -> StudentFields {
    StudentFields {
        email: email.to_string(),
        ..valid_fields()
    }
}

fn with_phone(phone: &str) -> StudentFields {
    StudentFields {
        phone: phone.to_string(),
        ..valid_fields()
    }
}

// =============================================================================
// Sanitizer Tests
// =============================================================================

/// sanitize(sanitize(x)) == sanitize(x)
#[test]
fn test_sanitize_is_idempotent() {
    let inputs = [
        StudentInput::new("  STU001 ", " Jane ", " JANE@Example.Com ", " 555 010 0100 "),
        StudentInput::default(),
        StudentInput::new("\tA-1\n", "O'Brien", "MiXeD@Case.ORG", "+1 (555) 010-0100"),
    ];

    for input in inputs {
        let once = sanitize(&input);
        let twice = sanitize(&StudentInput::from(once.clone()));
        assert_eq!(once, twice);
    }
}

/// Absent fields become empty strings and fail as "required".
#[test]
fn test_absent_fields_are_required() {
    let validation = validate(&sanitize(&StudentInput::default()));

    assert_eq!(validation.message(Field::StudentId), Some("Student ID is required"));
    assert_eq!(validation.message(Field::Name), Some("Full name is required"));
    assert_eq!(validation.message(Field::Email), Some("Email address is required"));
    assert_eq!(validation.message(Field::Phone), Some("Phone number is required"));
}

// =============================================================================
// Validation Determinism Tests
// =============================================================================

/// Same record validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let bad = StudentFields {
        student_id: "x".to_string(),
        name: "J4ne".to_string(),
        email: "nope".to_string(),
        phone: "12".to_string(),
    };

    let first = validate(&bad);
    for _ in 0..100 {
        assert_eq!(validate(&bad), first);
    }
    assert!(validate(&valid_fields()).is_valid());
}

/// One bad field does not hide errors on the others.
#[test]
fn test_fields_checked_independently() {
    let fields = StudentFields {
        student_id: "ab".to_string(),
        name: "Jane Doe".to_string(),
        email: "a@b".to_string(),
        phone: "123-456-7890".to_string(),
    };

    let validation = validate(&fields);
    let failed: Vec<Field> = validation.errors().keys().copied().collect();
    assert_eq!(failed, vec![Field::StudentId, Field::Email]);
}

// =============================================================================
// Boundary Tests
// =============================================================================

#[test]
fn test_student_id_length_bounds() {
    assert!(validate(&with_student_id("abc")).is_valid());
    assert!(validate(&with_student_id(&"a".repeat(20))).is_valid());

    assert_eq!(
        validate(&with_student_id("ab")).message(Field::StudentId),
        Some("Student ID must be at least 3 characters")
    );
    assert_eq!(
        validate(&with_student_id(&"a".repeat(21))).message(Field::StudentId),
        Some("Student ID must be at most 20 characters")
    );
}

#[test]
fn test_email_shapes() {
    assert!(validate(&with_email("a@b.c")).is_valid());

    for bad in ["a@b", "a @b.com"] {
        assert_eq!(
            validate(&with_email(bad)).message(Field::Email),
            Some("Please enter a valid email address"),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_phone_digit_counts() {
    assert!(validate(&with_phone("123-456-7890")).is_valid());

    assert_eq!(
        validate(&with_phone("123456789")).message(Field::Phone),
        Some("Phone number must be at least 10 digits")
    );
    assert_eq!(
        validate(&with_phone(&"1".repeat(16))).message(Field::Phone),
        Some("Phone number must be at most 15 digits")
    );
}
