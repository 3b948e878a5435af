//! Navigable wizard parameters
//!
//! `category` and `subcategory` are URL-encoded strings; `details_submitted`
//! is a presence flag (any value, including empty, counts as set).

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const CATEGORY: &str = "category";
pub const SUBCATEGORY: &str = "subcategory";
pub const DETAILS_SUBMITTED: &str = "details_submitted";

/// Base path of the sell flow
pub const SELL_PATH: &str = "/sell";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WizardParams {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub details_submitted: bool,
}

impl WizardParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn submitted(mut self) -> Self {
        self.details_submitted = true;
        self
    }

    /// Parse from a raw query string (without the leading `?`).
    ///
    /// Empty `category`/`subcategory` values count as absent. Unknown keys
    /// are ignored; for repeated keys the first one wins.
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(form_urlencoded::parse(query.trim_start_matches('?').as_bytes()))
    }

    /// Same rules as [`WizardParams::from_query`], over decoded pairs such
    /// as the hidden inputs of a posted form
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                CATEGORY if params.category.is_none() && !value.is_empty() => {
                    params.category = Some(value.to_string());
                }
                SUBCATEGORY if params.subcategory.is_none() && !value.is_empty() => {
                    params.subcategory = Some(value.to_string());
                }
                DETAILS_SUBMITTED => params.details_submitted = true,
                _ => {}
            }
        }
        params
    }

    /// Encode as a query string, empty when no parameter is set
    pub fn to_query(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = &self.category {
            ser.append_pair(CATEGORY, category);
        }
        if let Some(subcategory) = &self.subcategory {
            ser.append_pair(SUBCATEGORY, subcategory);
        }
        if self.details_submitted {
            ser.append_pair(DETAILS_SUBMITTED, "true");
        }
        ser.finish()
    }

    /// Location of this state within the sell flow
    pub fn href(&self) -> String {
        let query = self.to_query();
        if query.is_empty() {
            SELL_PATH.to_string()
        } else {
            format!("{SELL_PATH}?{query}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_encodes_names() {
        let params = WizardParams::with_category("Properties")
            .with_subcategory("For Sale: Houses & Apartments");
        assert_eq!(
            params.href(),
            "/sell?category=Properties&subcategory=For+Sale%3A+Houses+%26+Apartments"
        );
        assert_eq!(WizardParams::new().href(), "/sell");
    }

    #[test]
    fn test_parse_from_query() {
        let params = WizardParams::from_query(
            "?category=Properties&subcategory=For%20Sale%3A%20Houses%20%26%20Apartments&details_submitted",
        );
        assert_eq!(params.category.as_deref(), Some("Properties"));
        assert_eq!(params.subcategory.as_deref(), Some("For Sale: Houses & Apartments"));
        assert!(params.details_submitted);
    }

    #[test]
    fn test_empty_values_are_absent() {
        let params = WizardParams::from_query("category=&subcategory=&x=1");
        assert_eq!(params, WizardParams::new());
    }

    #[test]
    fn test_query_is_reparseable() {
        let params = WizardParams::with_category("Jobs")
            .with_subcategory("Part-time")
            .submitted();
        assert_eq!(WizardParams::from_query(&params.to_query()), params);
    }

    #[test]
    fn test_from_form_pairs() {
        let posted = vec![
            ("category".to_string(), "Cars".to_string()),
            ("brand".to_string(), "Maruti".to_string()),
            ("category".to_string(), "Pets".to_string()),
        ];
        let params = WizardParams::from_pairs(posted.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        assert_eq!(params, WizardParams::with_category("Cars"));
    }
}
