//! Listing submission form and where finished listings go

use crate::forms::CategoryDetails;
use crate::{Result, WizardError};
use bazaar_core::validate::{char_len, is_email, min_chars};
use bazaar_core::{merge_keyword, parse_grouped, split_keywords, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TITLE_MIN: usize = 5;
pub const DESCRIPTION_MIN: usize = 20;
pub const KEYWORDS_MIN: usize = 3;
pub const LOCATION_MIN: usize = 2;

/// Raw listing fields as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub keywords: String,
    pub location: String,
    pub contact: String,
}

impl SellForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        min_chars(
            &mut errors,
            "title",
            self.title.trim(),
            TITLE_MIN,
            "Title must be at least 5 characters long.",
        );
        min_chars(
            &mut errors,
            "description",
            self.description.trim(),
            DESCRIPTION_MIN,
            "Description must be at least 20 characters long.",
        );
        match parse_grouped(&self.price) {
            None => errors.push("price", "Price must be a number."),
            Some(0) => errors.push("price", "Price must be at least ₹1."),
            Some(_) => {}
        }
        if char_len(self.keywords.trim()) < KEYWORDS_MIN || split_keywords(&self.keywords).is_empty() {
            errors.push("keywords", "At least one keyword is required.");
        }
        min_chars(
            &mut errors,
            "location",
            self.location.trim(),
            LOCATION_MIN,
            "Location is required.",
        );
        if !is_email(&self.contact) {
            errors.push("contact", "A valid contact email is required.");
        }
        errors
    }

    /// Accept one suggested keyword. Returns the updated field.
    pub fn accept_keyword(&mut self, keyword: &str) -> &str {
        self.keywords = merge_keyword(&self.keywords, keyword);
        &self.keywords
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Combine with the wizard selection into the final record
    pub fn to_record(
        &self,
        category: &str,
        subcategory: Option<&str>,
        details: Option<CategoryDetails>,
    ) -> std::result::Result<ListingRecord, ValidationErrors> {
        self.validate().into_result(())?;
        Ok(ListingRecord {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: parse_grouped(&self.price).unwrap_or_default(),
            keywords: split_keywords(&self.keywords),
            location: self.location.trim().to_string(),
            contact: self.contact.trim().to_string(),
            category: category.to_string(),
            subcategory: subcategory.map(str::to_string),
            category_details: details,
            submitted_at: Utc::now(),
        })
    }
}

/// A finished listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub keywords: Vec<String>,
    pub location: String,
    pub contact: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_details: Option<CategoryDetails>,
    pub submitted_at: DateTime<Utc>,
}

/// What the seller is told after a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub listing_id: Uuid,
    pub title: String,
    pub message: String,
}

impl SubmissionReceipt {
    pub fn for_record(record: &ListingRecord) -> Self {
        Self {
            listing_id: record.id,
            title: "Listing Submitted!".to_string(),
            message: "Your item is now live (demo).".to_string(),
        }
    }
}

/// Destination for submitted listings
pub trait ListingSink: Send + Sync {
    fn accept(&self, record: &ListingRecord) -> Result<()>;
}

/// Logs each record and keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ListingSink for LogSink {
    fn accept(&self, record: &ListingRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        tracing::info!(id = %record.id, category = %record.category, listing = %json, "Listing submitted");
        Ok(())
    }
}

/// Keeps records in memory; clones share storage
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<ListingRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ListingRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ListingSink for MemorySink {
    fn accept(&self, record: &ListingRecord) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| WizardError::Sink("memory sink poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::GenericDetails;

    fn valid_form() -> SellForm {
        SellForm {
            title: "Oak dining table".into(),
            description: "Solid oak, seats six, minor scratches.".into(),
            price: "12,500".into(),
            keywords: "table, oak".into(),
            location: "Pune".into(),
            contact: "seller@example.com".into(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_description_boundary() {
        let mut form = valid_form();
        form.description = "d".repeat(19);
        assert_eq!(
            form.validate().get("description"),
            Some("Description must be at least 20 characters long.")
        );
        form.description = "d".repeat(20);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_field_messages() {
        let form = SellForm {
            title: "Sofa".into(),
            price: "0".into(),
            keywords: "ab".into(),
            location: "X".into(),
            contact: "nope".into(),
            ..SellForm::default()
        };
        let errors = form.validate();
        assert_eq!(errors.get("title"), Some("Title must be at least 5 characters long."));
        assert_eq!(errors.get("price"), Some("Price must be at least ₹1."));
        assert_eq!(errors.get("keywords"), Some("At least one keyword is required."));
        assert_eq!(errors.get("location"), Some("Location is required."));
        assert_eq!(errors.get("contact"), Some("A valid contact email is required."));

        let mut form = valid_form();
        form.price = "twelve".into();
        assert_eq!(form.validate().get("price"), Some("Price must be a number."));
    }

    #[test]
    fn test_record_strips_price_grouping() {
        let mut form = valid_form();
        form.price = "1,40,000".into();
        let record = form.to_record("Electronics & Appliances", None, None).unwrap();
        assert_eq!(record.price, 140000);
        assert_eq!(record.keywords, vec!["table", "oak"]);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("subcategory").is_none());
        assert!(json.get("categoryDetails").is_none());
    }

    #[test]
    fn test_record_carries_details() {
        let details = CategoryDetails::Generic(GenericDetails {
            condition: Some("Used".into()),
            brand: None,
        });
        let record = valid_form()
            .to_record("Furniture", None, Some(details.clone()))
            .unwrap();
        assert_eq!(record.category_details, Some(details));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["categoryDetails"]["kind"], "generic");
    }

    #[test]
    fn test_accept_keyword_dedups() {
        let mut form = valid_form();
        assert_eq!(form.accept_keyword("dining"), "table, oak, dining");
        assert_eq!(form.accept_keyword("oak"), "table, oak, dining");
    }

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        let record = valid_form().to_record("Furniture", None, None).unwrap();
        sink.clone().accept(&record).unwrap();
        LogSink.accept(&record).unwrap();
        assert_eq!(sink.records(), vec![record]);
    }
}
