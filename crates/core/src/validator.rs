//! Field-level validation accumulator.
//!
//! A [`Validator`] is created per request, fed a series of boolean checks,
//! and then either converted into [`CoreError::ValidationFailed`] or
//! discarded. It is never shared between callers.
//!
//! When several checks fail for the same field, the first recorded message
//! wins; later failures for that field are ignored.

use std::collections::{BTreeMap, HashSet};

use crate::error::CoreError;

/// Field name -> error message. Ordered so responses are deterministic.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` under `field` if `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Record an error unconditionally. First message per field wins.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// `true` when no check has failed.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, yielding `Ok(())` or the accumulated errors.
    pub fn finish(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::ValidationFailed(self.errors))
        }
    }
}

/// `true` if no two items are equal (case-sensitive).
pub fn unique<I, S>(items: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .all(|item| seen.insert(item.as_ref().to_owned()))
}

/// `true` if `value` is one of `permitted_values`.
pub fn permitted(value: &str, permitted_values: &[&str]) -> bool {
    permitted_values.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validator_is_valid() {
        let v = Validator::new();
        assert!(v.valid());
        assert!(v.finish().is_ok());
    }

    #[test]
    fn passing_check_records_nothing() {
        let mut v = Validator::new();
        v.check(true, "title", "must be provided");
        assert!(v.valid());
    }

    #[test]
    fn failing_check_records_message_under_field() {
        let mut v = Validator::new();
        v.check(false, "title", "must be provided");
        assert!(!v.valid());
        assert_eq!(v.errors().get("title").map(String::as_str), Some("must be provided"));
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut v = Validator::new();
        v.check(false, "genres", "must be provided");
        v.check(false, "genres", "must not contain duplicate values");
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()["genres"], "must be provided");
    }

    #[test]
    fn finish_returns_validation_failed_with_all_fields() {
        let mut v = Validator::new();
        v.check(false, "title", "must be provided");
        v.check(false, "artist", "must be provided");
        match v.finish() {
            Err(CoreError::ValidationFailed(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains_key("title"));
                assert!(errors.contains_key("artist"));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn unique_detects_duplicates_in_any_position() {
        assert!(unique(["jazz", "modal", "bop"]));
        assert!(!unique(["jazz", "modal", "jazz"]));
        assert!(!unique(vec!["rock".to_string(), "rock".to_string()]));
    }

    #[test]
    fn unique_is_case_sensitive() {
        assert!(unique(["Jazz", "jazz"]));
    }

    #[test]
    fn unique_accepts_empty_input() {
        assert!(unique(Vec::<String>::new()));
    }

    #[test]
    fn permitted_matches_exact_values_only() {
        let list = ["id", "-id"];
        assert!(permitted("-id", &list));
        assert!(!permitted("ID", &list));
        assert!(!permitted("", &list));
    }
}
