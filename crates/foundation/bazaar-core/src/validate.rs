//! Field-level validation primitives shared by every form

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Maximum characters in an ad title
pub const AD_TITLE_MAX: usize = 70;
/// Maximum characters in a description
pub const DESCRIPTION_MAX: usize = 4096;
/// Maximum characters in a contact name
pub const NAME_MAX: usize = 30;

/// A single message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors produced by one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// `Ok(value)` when no errors were collected
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Length in characters, not bytes
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Cut `s` down to at most `max` characters, like an input's `maxlength`
pub fn cap_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// "12 / 70" style counter shown under capped inputs
pub fn counter(s: &str, max: usize) -> String {
    format!("{} / {}", char_len(s), max)
}

fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$").ok()
    })
    .as_ref()
}

/// Syntactic e-mail check, no DNS lookups
pub fn is_email(s: &str) -> bool {
    email_regex().map(|re| re.is_match(s.trim())).unwrap_or(false)
}

/// Ten digit mobile number, optionally prefixed by +91 and spaced
pub fn is_mobile_number(s: &str) -> bool {
    let digits: String = s
        .trim()
        .trim_start_matches("+91")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Push `message` when the trimmed `value` is empty
pub fn require(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, message);
        false
    } else {
        true
    }
}

/// Push `message` when `value` is shorter than `min` characters
pub fn min_chars(errors: &mut ValidationErrors, field: &str, value: &str, min: usize, message: &str) {
    if char_len(value) < min {
        errors.push(field, message);
    }
}

/// Push a cap message when `value` is longer than `max` characters
pub fn max_chars(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if char_len(value) > max {
        errors.push(field, format!("Must be at most {max} characters."));
    }
}
