//! Listing records

use serde::{Deserialize, Serialize};

/// Who is selling a listing and how to reach them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub name: String,
    pub contact: String,
}

/// A single advertisement in the catalog.
///
/// Listings are static sample data and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Whole currency units, always positive
    pub price: u64,
    /// Image references, first one is the card image
    pub images: Vec<String>,
    #[serde(default)]
    pub image_hints: Vec<String>,
    pub category: String,
    pub location: String,
    pub seller: Seller,
    pub keywords: Vec<String>,
}

impl Listing {
    /// Image shown on cards and as the first carousel slide
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Hint for the image at `index`, cycling through the hint list
    pub fn image_hint(&self, index: usize) -> Option<&str> {
        if self.image_hints.is_empty() {
            return None;
        }
        self.image_hints
            .get(index % self.image_hints.len())
            .map(String::as_str)
    }

    /// Case-insensitive substring match against title, description or any keyword.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guitar() -> Listing {
        Listing {
            id: "3".into(),
            title: "Acoustic Guitar with Case".into(),
            description: "Great for beginners.".into(),
            price: 12000,
            images: vec!["a.png".into(), "b.png".into()],
            image_hints: vec!["acoustic guitar".into()],
            category: "Musical Instruments".into(),
            location: "Pune, MH".into(),
            seller: Seller {
                name: "Emily White".into(),
                contact: "em.white@example.com".into(),
            },
            keywords: vec!["yamaha".into(), "Music".into()],
        }
    }

    #[test]
    fn test_matches_any_field() {
        let l = guitar();
        assert!(l.matches_text("guitar"));
        assert!(l.matches_text("beginners"));
        assert!(l.matches_text("music"));
        assert!(!l.matches_text("sofa"));
    }

    #[test]
    fn test_image_hint_cycles() {
        let l = guitar();
        assert_eq!(l.cover_image(), Some("a.png"));
        assert_eq!(l.image_hint(1), Some("acoustic guitar"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(guitar()).unwrap();
        assert!(json.get("imageHints").is_some());
        assert_eq!(json["seller"]["name"], "Emily White");
    }
}
