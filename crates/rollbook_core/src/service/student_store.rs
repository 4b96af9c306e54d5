//! Student record store.
//!
//! # Responsibility
//! - Own the authoritative in-memory sequence of students for one session.
//! - Load once from the persistent slot and flush full state on every mutation.
//! - Notify registered views when the list changes.
//!
//! # Invariants
//! - Records keep insertion order; removal never reorders survivors.
//! - Ids come from a persisted counter and are never reissued, even after the
//!   highest id is removed.
//! - Once `StudentId::MAX` has been assigned the id space is exhausted and
//!   `add` refuses further records.
//! - Persisted state is always the complete sequence plus the counter.

use crate::model::student::{seed_students, Student, StudentDraft, StudentId};
use crate::repo::slot_repo::{RepoError, RepoResult, SlotRepository};
use crate::validation::form::{validate, ValidationReport};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot holding the JSON array of students.
pub const STUDENTS_SLOT_KEY: &str = "students";
/// Slot holding the next id to assign, as decimal text.
pub const NEXT_ID_SLOT_KEY: &str = "students_next_id";

/// Counter value persisted once `StudentId::MAX` has been handed out.
const EXHAUSTED_NEXT_ID: i128 = StudentId::MAX as i128 + 1;

/// Callback invoked with the current records after each mutation.
pub type ChangeListener = Box<dyn FnMut(&[Student])>;

/// Store error for record creation and explicit flushes.
#[derive(Debug)]
pub enum StoreError {
    /// Candidate failed form validation; nothing was stored.
    Validation(ValidationReport),
    /// Every `StudentId` has been assigned; nothing was stored.
    IdSpaceExhausted,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(report) => write!(f, "student rejected: {report}"),
            Self::IdSpaceExhausted => f.write_str("student id space exhausted"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(report) => Some(report),
            Self::IdSpaceExhausted => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationReport> for StoreError {
    fn from(value: ValidationReport) -> Self {
        Self::Validation(value)
    }
}

/// Where the records came from when the store was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the persistent slot.
    Persisted,
    /// Slot was absent; seed set used.
    SeedMissing,
    /// Slot was unreadable or malformed; seed set used.
    SeedRecovered,
}

/// Session-scoped student store over a slot repository.
pub struct StudentStore<R: SlotRepository> {
    repo: R,
    students: Vec<Student>,
    /// `None` once the id space is exhausted.
    next_id: Option<StudentId>,
    load_source: LoadSource,
    listeners: Vec<ChangeListener>,
}

impl<R: SlotRepository> StudentStore<R> {
    /// Loads the store from `repo`.
    ///
    /// Never fails: a missing or malformed slot falls back to the seed set.
    /// A persisted empty array is kept as an empty store.
    pub fn load(repo: R) -> Self {
        let (students, load_source) = load_students(&repo);
        let stored_next_id = load_next_id(&repo);
        let next_id = resolve_next_id(stored_next_id, &students);

        info!(
            "event=store_load module=store status=ok source={:?} count={} next_id={:?}",
            load_source,
            students.len(),
            next_id
        );

        Self {
            repo,
            students,
            next_id,
            load_source,
            listeners: Vec::new(),
        }
    }

    /// Returns the current records in insertion order.
    pub fn list(&self) -> &[Student] {
        &self.students
    }

    /// Returns one record by id.
    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Id the next successful `add` will assign; `None` when exhausted.
    pub fn next_id(&self) -> Option<StudentId> {
        self.next_id
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// Registers a "list changed" callback.
    pub fn on_change(&mut self, listener: impl FnMut(&[Student]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Validates and appends a new student.
    ///
    /// # Errors
    /// - `StoreError::Validation` when any form rule fails; state is unchanged.
    /// - `StoreError::IdSpaceExhausted` when no id is left to assign.
    ///
    /// Persistence failures are logged, not returned; the in-memory record
    /// stays authoritative and the next successful flush writes it.
    pub fn add(&mut self, draft: &StudentDraft) -> Result<Student, StoreError> {
        if let Err(report) = validate(draft).into_result() {
            debug!(
                "event=student_add module=store status=rejected fields={}",
                report
                    .failed_fields()
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            );
            return Err(report.into());
        }

        let Some(id) = self.next_id else {
            warn!("event=student_add module=store status=rejected error_code=id_space_exhausted");
            return Err(StoreError::IdSpaceExhausted);
        };
        let student = Student::from_draft(id, draft);
        self.next_id = id.checked_add(1);
        self.students.push(student.clone());
        info!(
            "event=student_add module=store status=ok id={} count={}",
            student.id,
            self.students.len()
        );

        self.persist();
        self.notify();
        Ok(student)
    }

    /// Removes the record with `id`.
    ///
    /// Returns `false` without touching storage when no record matches.
    pub fn remove(&mut self, id: StudentId) -> bool {
        let before = self.students.len();
        self.students.retain(|student| student.id != id);
        if self.students.len() == before {
            debug!("event=student_remove module=store status=not_found id={id}");
            return false;
        }

        info!(
            "event=student_remove module=store status=ok id={} count={}",
            id,
            self.students.len()
        );
        self.persist();
        self.notify();
        true
    }

    /// Writes the full state now and reports failures to the caller.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.write_state()?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(err) = self.write_state() {
            error!(
                "event=store_persist module=store status=error count={} error={}",
                self.students.len(),
                err
            );
        }
    }

    fn write_state(&self) -> RepoResult<()> {
        let payload = serde_json::to_string(&self.students)
            .map_err(|err| RepoError::InvalidData(format!("encode students: {err}")))?;
        let next_id = self
            .next_id
            .map_or_else(|| EXHAUSTED_NEXT_ID.to_string(), |id| id.to_string());
        self.repo.write_all(&[
            (STUDENTS_SLOT_KEY, payload.as_str()),
            (NEXT_ID_SLOT_KEY, next_id.as_str()),
        ])?;
        debug!(
            "event=store_persist module=store status=ok count={} bytes={}",
            self.students.len(),
            payload.len()
        );
        Ok(())
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.students);
        }
    }
}

/// Decodes the persisted student array.
///
/// # Errors
/// - `RepoError::InvalidData` when the text is not an array of students.
pub fn decode_students(payload: &str) -> RepoResult<Vec<Student>> {
    serde_json::from_str(payload).map_err(|err| RepoError::InvalidData(err.to_string()))
}

fn load_students<R: SlotRepository>(repo: &R) -> (Vec<Student>, LoadSource) {
    let payload = match repo.read_slot(STUDENTS_SLOT_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return (seed_students(), LoadSource::SeedMissing),
        Err(err) => {
            warn!("event=store_load module=store status=recovered error_code=slot_read_failed error={err}");
            return (seed_students(), LoadSource::SeedRecovered);
        }
    };

    match decode_students(&payload) {
        Ok(students) => (students, LoadSource::Persisted),
        Err(err) => {
            warn!("event=store_load module=store status=recovered error_code=slot_decode_failed error={err}");
            (seed_students(), LoadSource::SeedRecovered)
        }
    }
}

// Parsed wider than `StudentId` so the exhausted marker round-trips.
fn load_next_id<R: SlotRepository>(repo: &R) -> Option<i128> {
    match repo.read_slot(NEXT_ID_SLOT_KEY) {
        Ok(Some(text)) => match text.trim().parse::<i128>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("event=store_load module=store status=recovered error_code=next_id_invalid");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!("event=store_load module=store status=recovered error_code=next_id_read_failed error={err}");
            None
        }
    }
}

/// Counter never falls behind live ids and never drops below 1.
///
/// Returns `None` when the next id would not fit in `StudentId`.
fn resolve_next_id(stored: Option<i128>, students: &[Student]) -> Option<StudentId> {
    let after_max = students
        .iter()
        .map(|student| i128::from(student.id))
        .max()
        .map_or(1, |max| max + 1);
    let next = stored.unwrap_or(1).max(after_max).max(1);
    StudentId::try_from(next).ok()
}

#[cfg(test)]
mod tests {
    use super::{resolve_next_id, EXHAUSTED_NEXT_ID};
    use crate::model::student::{seed_students, StudentId};

    #[test]
    fn next_id_uses_max_of_counter_and_live_ids() {
        let seed = seed_students();
        assert_eq!(resolve_next_id(None, &seed), Some(4));
        assert_eq!(resolve_next_id(Some(10), &seed), Some(10));
        assert_eq!(resolve_next_id(Some(2), &seed), Some(4));
        assert_eq!(resolve_next_id(None, &[]), Some(1));
        assert_eq!(resolve_next_id(Some(-5), &[]), Some(1));
    }

    #[test]
    fn next_id_past_max_is_exhausted() {
        let mut top = seed_students().remove(0);
        top.id = StudentId::MAX;
        assert_eq!(resolve_next_id(None, &[top]), None);
        assert_eq!(resolve_next_id(Some(EXHAUSTED_NEXT_ID), &[]), None);
        assert_eq!(
            resolve_next_id(Some(i128::from(StudentId::MAX)), &[]),
            Some(StudentId::MAX)
        );
    }
}
