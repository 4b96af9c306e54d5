use rollbook_core::{validate, FormField, StudentDraft};

fn draft(name: &str, phone: &str, subjects: &[&str], address: &str) -> StudentDraft {
    StudentDraft {
        name: name.to_string(),
        grade: "10th".to_string(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
        phone: phone.to_string(),
        address: address.to_string(),
    }
}

#[test]
fn well_formed_draft_passes_every_rule() {
    let report = validate(&draft("John Doe", "1234567890", &["Math"], &"x".repeat(10)));

    assert!(report.is_valid());
    assert!(!report.name_error);
    assert!(!report.phone_error);
    assert!(!report.subject_error);
    assert!(!report.address_error);
    assert!(report.failed_fields().is_empty());
}

#[test]
fn every_rule_fails_independently() {
    let report = validate(&draft("John3", "123", &[], &"x".repeat(60)));

    assert!(!report.is_valid());
    assert!(report.name_error);
    assert!(report.phone_error);
    assert!(report.subject_error);
    assert!(report.address_error);
    assert_eq!(report.failed_fields(), FormField::ALL.to_vec());
}

#[test]
fn empty_name_fails() {
    let report = validate(&draft("", "1234567890", &["Math"], ""));
    assert_eq!(report.failed_fields(), vec![FormField::Name]);
}

#[test]
fn blank_subjects_count_as_none_selected() {
    let report = validate(&draft("John Doe", "1234567890", &["", "  "], ""));
    assert!(report.has_error(FormField::Subject));
}

#[test]
fn address_boundary_is_inclusive() {
    let at_limit = validate(&draft("John Doe", "1234567890", &["Math"], &"x".repeat(55)));
    let over_limit = validate(&draft("John Doe", "1234567890", &["Math"], &"x".repeat(56)));

    assert!(at_limit.is_valid());
    assert!(over_limit.has_error(FormField::Address));
}

#[test]
fn phone_with_separators_fails() {
    let report = validate(&draft("John Doe", "98765 43210", &["Math"], ""));
    assert_eq!(report.failed_fields(), vec![FormField::Phone]);
}
