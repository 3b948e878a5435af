//! Category taxonomy used by the sell wizard

use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level category and its optional subcategories.
///
/// `subcategories == None` means the category does not branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub subcategories: Option<&'static [&'static str]>,
}

impl Category {
    pub fn has_subcategories(&self) -> bool {
        self.subcategories.map(|s| !s.is_empty()).unwrap_or(false)
    }

    pub fn subcategories(&self) -> &'static [&'static str] {
        self.subcategories.unwrap_or(&[])
    }

    pub fn find_subcategory(&self, name: &str) -> Option<&'static str> {
        self.subcategories().iter().copied().find(|s| *s == name)
    }

    /// Dedicated detail flow for this category, given the chosen subcategory.
    ///
    /// Returns `None` when the pair converges straight on the generic
    /// listing form.
    pub fn detail_flow(&self, subcategory: Option<&str>) -> Option<DetailKind> {
        match (self.name, subcategory) {
            ("Cars", _) => Some(DetailKind::Car),
            ("Properties", Some(PROPERTY_FOR_SALE)) => Some(DetailKind::Property),
            ("Mobiles", Some("Mobile Phones" | "Tablets")) => Some(DetailKind::Mobile),
            ("Jobs", Some(_)) => Some(DetailKind::Job),
            _ => None,
        }
    }
}

/// The one property subcategory with its own detail form
pub const PROPERTY_FOR_SALE: &str = "For Sale: Houses & Apartments";

/// The full, ordered taxonomy
pub static CATEGORIES: &[Category] = &[
    Category { name: "Cars", subcategories: None },
    Category {
        name: "Properties",
        subcategories: Some(&[
            PROPERTY_FOR_SALE,
            "For Rent: Houses & Apartments",
            "Lands & Plots",
            "For Rent: Shops & Offices",
            "For Sale: Shops & Offices",
            "PG & Guest Houses",
        ]),
    },
    Category { name: "Mobiles", subcategories: Some(&["Mobile Phones", "Tablets", "Accessories"]) },
    Category { name: "Jobs", subcategories: Some(&["Full-time", "Part-time", "Internship"]) },
    Category { name: "Bikes", subcategories: None },
    Category { name: "Electronics & Appliances", subcategories: None },
    Category { name: "Commercial Vehicles & Spares", subcategories: None },
    Category { name: "Furniture", subcategories: None },
    Category { name: "Fashion", subcategories: None },
    Category { name: "Books, Sports & Hobbies", subcategories: None },
    Category { name: "Pets", subcategories: None },
];

/// Look a category up by exact name
pub fn find_category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

/// Like [`find_category`], but an unknown name is an error
pub fn resolve_category(name: &str) -> crate::Result<&'static Category> {
    find_category(name).ok_or_else(|| crate::Error::UnknownCategory(name.to_string()))
}

/// Resolve a subcategory name within `category`
pub fn resolve_subcategory(category: &Category, name: &str) -> crate::Result<&'static str> {
    category
        .find_subcategory(name)
        .ok_or_else(|| crate::Error::UnknownSubcategory {
            category: category.name.to_string(),
            subcategory: name.to_string(),
        })
}

/// Closed set of category detail form variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Property,
    Car,
    Mobile,
    Job,
    Generic,
}

impl DetailKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Property => "Property",
            Self::Car => "Car",
            Self::Mobile => "Mobile",
            Self::Job => "Job",
            Self::Generic => "Generic",
        }
    }

    /// Variants that carry an uploadable photo set
    pub fn has_photos(self) -> bool {
        matches!(self, Self::Property | Self::Mobile)
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_lookup() {
        let props = find_category("Properties").unwrap();
        assert!(props.has_subcategories());
        assert_eq!(props.subcategories().len(), 6);
        assert!(find_category("Bikes").unwrap().subcategories.is_none());
        assert!(find_category("bikes").is_none());
        assert!(resolve_category("Spaceships").is_err());
        assert!(resolve_subcategory(props, "Castles").is_err());
        assert_eq!(resolve_subcategory(props, "Lands & Plots").unwrap(), "Lands & Plots");
    }

    #[test]
    fn test_detail_flows() {
        let props = find_category("Properties").unwrap();
        assert_eq!(props.detail_flow(Some(PROPERTY_FOR_SALE)), Some(DetailKind::Property));
        assert_eq!(props.detail_flow(Some("Lands & Plots")), None);

        let cars = find_category("Cars").unwrap();
        assert_eq!(cars.detail_flow(None), Some(DetailKind::Car));

        let mobiles = find_category("Mobiles").unwrap();
        assert_eq!(mobiles.detail_flow(Some("Tablets")), Some(DetailKind::Mobile));
        assert_eq!(mobiles.detail_flow(Some("Accessories")), None);

        let jobs = find_category("Jobs").unwrap();
        assert_eq!(jobs.detail_flow(Some("Internship")), Some(DetailKind::Job));
        assert_eq!(jobs.detail_flow(None), None);

        assert_eq!(find_category("Pets").unwrap().detail_flow(None), None);
    }
}
