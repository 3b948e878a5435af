//! Houses & apartments for sale

use super::fields::{FieldKind, FieldSet, FieldSpec};
use super::ContactDetails;
use crate::photos::{PhotoGallery, PhotoSet};
use bazaar_core::validate::{AD_TITLE_MAX, DESCRIPTION_MAX, NAME_MAX};
use serde::{Deserialize, Serialize};

pub const PROPERTY_TYPES: &[&str] = &[
    "Flats / Apartments",
    "Independent / Builder Floors",
    "Farm House",
    "House & Villa",
];
pub const ROOM_COUNTS: &[&str] = &["1", "2", "3", "4", "4+"];
pub const FURNISHING: &[&str] = &["Furnished", "Semi-Furnished", "Unfurnished"];
pub const CONSTRUCTION_STATUS: &[&str] = &["New Launch", "Ready to Move", "Under Construction"];
pub const LISTED_BY: &[&str] = &["Builder", "Dealer", "Owner"];
pub const CAR_PARKING: &[&str] = &["0", "1", "2", "3", "3+"];
pub const FACING: &[&str] = &[
    "East",
    "North",
    "North-East",
    "North-West",
    "South",
    "South-East",
    "South-West",
    "West",
];

/// Highest floor count accepted for a building
pub const MAX_FLOORS: u64 = 200;

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("type", "Type", FieldKind::Choice(PROPERTY_TYPES)),
    FieldSpec::optional("bhk", "BHK", FieldKind::Choice(ROOM_COUNTS)),
    FieldSpec::optional("bathrooms", "Bathrooms", FieldKind::Choice(ROOM_COUNTS)),
    FieldSpec::optional("furnishing", "Furnishing", FieldKind::Choice(FURNISHING)),
    FieldSpec::optional(
        "construction_status",
        "Construction Status",
        FieldKind::Choice(CONSTRUCTION_STATUS),
    ),
    FieldSpec::optional("listed_by", "Listed by", FieldKind::Choice(LISTED_BY)),
    FieldSpec::required(
        "super_builtup_area",
        "Super Builtup area sqft",
        FieldKind::Number { min: 1, max: None },
    ),
    FieldSpec::required(
        "carpet_area",
        "Carpet Area sqft",
        FieldKind::Number { min: 1, max: None },
    ),
    FieldSpec::optional("maintenance", "Maintenance (Monthly)", FieldKind::Price),
    FieldSpec::optional(
        "total_floors",
        "Total Floors",
        FieldKind::Number { min: 0, max: Some(MAX_FLOORS) },
    ),
    FieldSpec::optional(
        "floor_no",
        "Floor No",
        FieldKind::Number { min: 0, max: Some(MAX_FLOORS) },
    ),
    FieldSpec::optional("car_parking", "Car Parking", FieldKind::Choice(CAR_PARKING)),
    FieldSpec::optional("facing", "Facing", FieldKind::Choice(FACING)),
    FieldSpec::optional("project_name", "Project Name", FieldKind::Text { max: AD_TITLE_MAX }),
    FieldSpec::required("ad_title", "Ad title", FieldKind::Text { max: AD_TITLE_MAX }),
    FieldSpec::required(
        "description",
        "Description",
        FieldKind::LongText { max: DESCRIPTION_MAX },
    ),
    FieldSpec::required("price", "Price", FieldKind::Price),
    FieldSpec::optional("state", "State", FieldKind::State),
    FieldSpec::optional("name", "Name", FieldKind::Text { max: NAME_MAX }),
    FieldSpec::optional("phone", "Mobile Phone Number", FieldKind::Phone),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetails {
    #[serde(rename = "type")]
    pub property_type: String,
    pub bhk: Option<String>,
    pub bathrooms: Option<String>,
    pub furnishing: Option<String>,
    pub construction_status: Option<String>,
    pub listed_by: Option<String>,
    pub super_builtup_area: u64,
    pub carpet_area: u64,
    pub maintenance: Option<u64>,
    pub total_floors: Option<u64>,
    pub floor_no: Option<u64>,
    pub car_parking: Option<String>,
    pub facing: Option<String>,
    pub project_name: Option<String>,
    pub ad_title: String,
    pub description: String,
    pub price: u64,
    pub photos: PhotoSet,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

/// Collect validated fields into the details object
pub(crate) fn build(fields: &FieldSet, photos: &PhotoGallery) -> PropertyDetails {
    PropertyDetails {
        property_type: fields.text("type"),
        bhk: fields.opt("bhk"),
        bathrooms: fields.opt("bathrooms"),
        furnishing: fields.opt("furnishing"),
        construction_status: fields.opt("construction_status"),
        listed_by: fields.opt("listed_by"),
        super_builtup_area: fields.number("super_builtup_area").unwrap_or_default(),
        carpet_area: fields.number("carpet_area").unwrap_or_default(),
        maintenance: fields.price("maintenance"),
        total_floors: fields.number("total_floors"),
        floor_no: fields.number("floor_no"),
        car_parking: fields.opt("car_parking"),
        facing: fields.opt("facing"),
        project_name: fields.opt("project_name"),
        ad_title: fields.text("ad_title"),
        description: fields.text("description"),
        price: fields.price("price").unwrap_or_default(),
        photos: photos.snapshot(),
        contact: ContactDetails::from_fields(fields),
    }
}
