//! Field specs and the value store every detail form is built on

use bazaar_core::price::{parse_grouped, reformat_input};
use bazaar_core::validate::{cap_chars, is_mobile_number};
use bazaar_core::ValidationErrors;
use chrono::Datelike;
use std::collections::BTreeMap;

/// Oldest model year a car listing accepts
pub const MIN_CAR_YEAR: u64 = 1950;

/// States and union territories offered as listing locations
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jammu and Kashmir",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttarakhand",
    "Uttar Pradesh",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli",
    "Daman and Diu",
    "Delhi",
    "Lakshadweep",
    "Puducherry",
];

/// How a field is entered and checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single line, capped at `max` characters
    Text { max: usize },
    /// Multi-line, capped at `max` characters
    LongText { max: usize },
    /// One of a fixed option list
    Choice(&'static [&'static str]),
    /// Whole currency units, typed with grouping separators
    Price,
    /// Whole number within bounds
    Number { min: u64, max: Option<u64> },
    /// Model year, [`MIN_CAR_YEAR`] up to the current year
    Year,
    /// One of [`INDIAN_STATES`]
    State,
    /// Ten digit mobile number, shown with a +91 prefix
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }

    /// Options to render for choice-like fields
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice(options) => options,
            FieldKind::State => INDIAN_STATES,
            _ => &[],
        }
    }

    /// Character cap for text-like fields
    pub fn max_chars(&self) -> Option<usize> {
        match self.kind {
            FieldKind::Text { max } | FieldKind::LongText { max } => Some(max),
            _ => None,
        }
    }

    /// Normalise input the way the control would as the user types
    fn normalise(&self, value: &str) -> String {
        match self.kind {
            FieldKind::Text { max } => cap_chars(value, max),
            FieldKind::LongText { max } => cap_chars(value, max),
            FieldKind::Price => reformat_input(value),
            _ => value.trim().to_string(),
        }
    }

    /// Constraint message for a non-empty value, if it is invalid
    fn check(&self, value: &str) -> Option<String> {
        match self.kind {
            FieldKind::Text { .. } | FieldKind::LongText { .. } => None,
            FieldKind::Choice(options) => {
                (!options.contains(&value)).then(|| "Choose one of the listed options.".to_string())
            }
            FieldKind::State => {
                (!INDIAN_STATES.contains(&value)).then(|| "Select a state from the list.".to_string())
            }
            FieldKind::Price => match parse_grouped(value) {
                None => Some("Enter a valid price.".to_string()),
                Some(0) => Some(format!("{} must be at least 1.", self.label)),
                Some(_) => None,
            },
            FieldKind::Number { min, max } => match value.parse::<u64>() {
                Err(_) => Some("Enter a whole number.".to_string()),
                Ok(n) if n < min => Some(format!("{} must be at least {min}.", self.label)),
                Ok(n) => match max {
                    Some(max) if n > max => {
                        Some(format!("{} cannot be more than {max}.", self.label))
                    }
                    _ => None,
                },
            },
            FieldKind::Year => {
                let current = current_year();
                match value.parse::<u64>() {
                    Ok(year) if (MIN_CAR_YEAR..=current).contains(&year) => None,
                    _ => Some(format!("Year must be between {MIN_CAR_YEAR} and {current}.")),
                }
            }
            FieldKind::Phone => (!is_mobile_number(value))
                .then(|| "Enter a valid 10 digit mobile number.".to_string()),
        }
    }
}

fn current_year() -> u64 {
    u64::try_from(chrono::Local::now().year()).unwrap_or(MIN_CAR_YEAR)
}

/// Ten bare digits of a phone entry, without the +91 prefix
pub fn phone_digits(value: &str) -> String {
    value
        .trim()
        .trim_start_matches("+91")
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

/// Current values of one form, keyed by the spec's field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    specs: &'static [FieldSpec],
    values: BTreeMap<&'static str, String>,
}

impl FieldSet {
    pub fn new(specs: &'static [FieldSpec]) -> Self {
        Self {
            specs,
            values: BTreeMap::new(),
        }
    }

    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }

    pub fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Store a value, normalised for its kind. Returns `false` for a field
    /// the form does not have.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match self.spec(name) {
            Some(spec) => {
                let value = spec.normalise(value);
                if value.is_empty() {
                    self.values.remove(spec.name);
                } else {
                    self.values.insert(spec.name, value);
                }
                true
            }
            None => false,
        }
    }

    /// Raw value, empty when unset
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, `None` when blank
    pub fn opt(&self, name: &str) -> Option<String> {
        let value = self.get(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Trimmed value, empty when blank
    pub fn text(&self, name: &str) -> String {
        self.get(name).trim().to_string()
    }

    pub fn price(&self, name: &str) -> Option<u64> {
        parse_grouped(self.get(name))
    }

    pub fn number(&self, name: &str) -> Option<u64> {
        self.get(name).trim().parse().ok()
    }

    /// Phone in display form, `+91` followed by ten digits
    pub fn phone(&self, name: &str) -> Option<String> {
        self.opt(name).map(|v| format!("+91{}", phone_digits(&v)))
    }

    /// Required fields that are still blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.specs
            .iter()
            .filter(|s| s.required && self.get(s.name).trim().is_empty())
            .map(|s| s.name)
            .collect()
    }

    /// Errors on filled-in fields only. These are shown as soon as the
    /// value is entered.
    pub fn constraint_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for spec in self.specs {
            let value = self.get(spec.name).trim();
            if value.is_empty() {
                continue;
            }
            if let Some(message) = spec.check(value) {
                errors.push(spec.name, message);
            }
        }
        errors
    }

    /// Full pass: required fields plus constraints
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for name in self.missing_required() {
            let label = self.spec(name).map(|s| s.label).unwrap_or(name);
            errors.push(name, format!("{label} is required."));
        }
        errors.extend(self.constraint_errors());
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
