//! Student record model.
//!
//! # Responsibility
//! - Define the persisted `Student` record and its candidate shape.
//! - Own the fixed seed set used when no persisted state exists.
//!
//! # Invariants
//! - `id` is assigned by the store only and never reused after deletion.
//! - `subject` is the flattened, `", "`-joined form of `StudentDraft::subjects`.
//! - Wire field for `grade` is `class` to stay readable by existing slots.

use serde::{Deserialize, Serialize};

/// Stable integer identifier assigned by `StudentStore`.
pub type StudentId = i64;

/// Separator used when flattening selected subjects into one text field.
pub const SUBJECT_SEPARATOR: &str = ", ";

/// One persisted student entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Grade/class label. Serialized as `class`.
    #[serde(rename = "class")]
    pub grade: String,
    /// Comma-joined subject names.
    pub subject: String,
    /// Exactly 10 ASCII digits when created through the store.
    pub phone: String,
    pub address: String,
}

impl Student {
    /// Builds a record from a candidate and a store-assigned id.
    ///
    /// Does not validate; callers go through `validate()` first.
    pub fn from_draft(id: StudentId, draft: &StudentDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            grade: draft.grade.clone(),
            subject: draft.joined_subjects(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
        }
    }
}

/// Candidate field set prior to validation and id assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub grade: String,
    /// Selected subjects, un-flattened. At least one is required.
    pub subjects: Vec<String>,
    pub phone: String,
    pub address: String,
}

impl StudentDraft {
    /// Returns the selected subjects trimmed, with blanks dropped.
    pub fn selected_subjects(&self) -> Vec<&str> {
        self.subjects
            .iter()
            .map(|subject| subject.trim())
            .filter(|subject| !subject.is_empty())
            .collect()
    }

    /// Flattens selected subjects into the persisted `subject` text.
    pub fn joined_subjects(&self) -> String {
        self.selected_subjects().join(SUBJECT_SEPARATOR)
    }
}

/// Returns the fixed three-record default set (ids 1..=3).
pub fn seed_students() -> Vec<Student> {
    vec![
        seed(1, "Rahul Sharma", "10th", "Math", "9876543210", "Mumbai"),
        seed(2, "Priya Patel", "9th", "Science", "9876543211", "Delhi"),
        seed(3, "Amit Kumar", "11th", "Physics", "9876543212", "Bangalore"),
    ]
}

fn seed(
    id: StudentId,
    name: &str,
    grade: &str,
    subject: &str,
    phone: &str,
    address: &str,
) -> Student {
    Student {
        id,
        name: name.to_string(),
        grade: grade.to_string(),
        subject: subject.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{seed_students, Student, StudentDraft};

    #[test]
    fn from_draft_joins_subjects_and_skips_blanks() {
        let draft = StudentDraft {
            name: "Asha Rao".to_string(),
            grade: "8th".to_string(),
            subjects: vec!["Math".to_string(), "  ".to_string(), " Art ".to_string()],
            phone: "9000000000".to_string(),
            address: "Pune".to_string(),
        };

        let student = Student::from_draft(7, &draft);
        assert_eq!(student.id, 7);
        assert_eq!(student.subject, "Math, Art");
        assert_eq!(student.grade, "8th");
    }

    #[test]
    fn seed_ids_are_one_to_three() {
        let ids: Vec<_> = seed_students().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
