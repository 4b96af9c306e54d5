//! Student form validation.
//!
//! # Responsibility
//! - Decide pass/fail per field for a `StudentDraft`.
//! - Provide cosmetic input helpers used by views while the user types.
//!
//! # Invariants
//! - Validation is pure and never consults stored records.
//! - Every field is checked; a failing field never short-circuits the rest.

use crate::model::student::StudentDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum address length, counted in characters.
pub const ADDRESS_MAX_CHARS: usize = 55;
/// Required phone length in ASCII digits.
pub const PHONE_DIGITS: usize = 10;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name regex"));
// ASCII class on purpose: `\d` in `regex` matches every Unicode digit.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[0-9]{{{PHONE_DIGITS}}}$")).expect("valid phone regex")
});

/// Form fields covered by validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Phone,
    Subject,
    Address,
}

impl FormField {
    /// All validated fields in form order.
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Phone,
        FormField::Subject,
        FormField::Address,
    ];

    /// Stable field name for views and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Address => "address",
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation outcome. `true` means the field failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub name_error: bool,
    pub phone_error: bool,
    pub subject_error: bool,
    pub address_error: bool,
}

impl ValidationReport {
    /// Returns whether every field passed.
    pub fn is_valid(&self) -> bool {
        !(self.name_error || self.phone_error || self.subject_error || self.address_error)
    }

    /// Returns the error flag for one field.
    pub fn has_error(&self, field: FormField) -> bool {
        match field {
            FormField::Name => self.name_error,
            FormField::Phone => self.phone_error,
            FormField::Subject => self.subject_error,
            FormField::Address => self.address_error,
        }
    }

    /// Lists failed fields in form order.
    pub fn failed_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.has_error(*field))
            .collect()
    }

    /// Converts the report into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let failed = self
            .failed_fields()
            .into_iter()
            .map(FormField::as_str)
            .collect::<Vec<_>>();
        if failed.is_empty() {
            f.write_str("all fields valid")
        } else {
            write!(f, "invalid fields: {}", failed.join(", "))
        }
    }
}

impl Error for ValidationReport {}

/// Validates a candidate against the fixed form rules.
///
/// Rules:
/// - `name`: non-empty, letters and whitespace only.
/// - `phone`: exactly 10 ASCII digits, no separators.
/// - `subject`: at least one non-blank subject.
/// - `address`: at most 55 characters, may be empty.
pub fn validate(draft: &StudentDraft) -> ValidationReport {
    ValidationReport {
        name_error: !is_valid_name(&draft.name),
        phone_error: !is_valid_phone(&draft.phone),
        subject_error: draft.selected_subjects().is_empty(),
        address_error: address_over_limit(&draft.address),
    }
}

/// Returns whether `name` is non-empty and alphabetic plus whitespace.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Returns whether `phone` is exactly 10 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Strips every non-digit character from phone input.
///
/// View-side filtering only; `validate` still checks the final value.
pub fn sanitize_phone_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Character count shown by the live address counter.
pub fn address_char_count(address: &str) -> usize {
    address.chars().count()
}

/// Returns whether the address exceeds the allowed length.
pub fn address_over_limit(address: &str) -> bool {
    address_char_count(address) > ADDRESS_MAX_CHARS
}

#[cfg(test)]
mod tests {
    use super::{
        address_char_count, address_over_limit, is_valid_name, is_valid_phone,
        sanitize_phone_input, FormField, ValidationReport, PHONE_DIGITS, PHONE_RE,
    };

    #[test]
    fn name_accepts_letters_and_spaces_only() {
        assert!(is_valid_name("John Doe"));
        assert!(is_valid_name("Ana\tMaria"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("John3"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name("José"));
    }

    #[test]
    fn phone_requires_ten_ascii_digits() {
        assert!(is_valid_phone("1234567890"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("12345678901"));
        assert!(!is_valid_phone("123-456-7890"));
        // Arabic-Indic digits are Unicode `\d` but not ASCII.
        assert!(!is_valid_phone("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn phone_length_follows_phone_digits() {
        assert_eq!(PHONE_RE.as_str(), "^[0-9]{10}$");
        assert!(is_valid_phone(&"7".repeat(PHONE_DIGITS)));
        assert!(!is_valid_phone(&"7".repeat(PHONE_DIGITS + 1)));
    }

    #[test]
    fn sanitize_phone_input_keeps_ascii_digits() {
        assert_eq!(sanitize_phone_input("(987) 654-3210"), "9876543210");
        assert_eq!(sanitize_phone_input("abc"), "");
    }

    #[test]
    fn address_limit_counts_characters_not_bytes() {
        let at_limit = "é".repeat(55);
        assert_eq!(address_char_count(&at_limit), 55);
        assert!(!address_over_limit(&at_limit));
        assert!(address_over_limit(&"x".repeat(56)));
        assert!(!address_over_limit(""));
    }

    #[test]
    fn report_lists_failed_fields_in_form_order() {
        let report = ValidationReport {
            name_error: false,
            phone_error: true,
            subject_error: false,
            address_error: true,
        };
        assert!(!report.is_valid());
        assert_eq!(
            report.failed_fields(),
            vec![FormField::Phone, FormField::Address]
        );
        assert_eq!(report.to_string(), "invalid fields: phone, address");
        assert!(report.into_result().is_err());
    }
}
