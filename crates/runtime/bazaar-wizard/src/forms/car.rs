//! Cars

use super::fields::{FieldKind, FieldSet, FieldSpec};
use super::ContactDetails;
use bazaar_core::validate::{AD_TITLE_MAX, DESCRIPTION_MAX, NAME_MAX};
use serde::{Deserialize, Serialize};

pub const FUEL: &[&str] = &["CNG & Hybrids", "Diesel", "Electric", "LPG", "Petrol"];
pub const TRANSMISSION: &[&str] = &["Automatic", "Manual"];
pub const OWNERS: &[&str] = &["1st", "2nd", "3rd", "4th", "4+"];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("brand", "Brand", FieldKind::Text { max: AD_TITLE_MAX }),
    FieldSpec::required("year", "Year", FieldKind::Year),
    FieldSpec::optional("fuel", "Fuel", FieldKind::Choice(FUEL)),
    FieldSpec::optional("transmission", "Transmission", FieldKind::Choice(TRANSMISSION)),
    FieldSpec::required("km_driven", "KM driven", FieldKind::Number { min: 0, max: None }),
    FieldSpec::optional("owners", "No. of Owners", FieldKind::Choice(OWNERS)),
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
pub struct CarDetails {
    pub brand: String,
    pub year: u64,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub km_driven: u64,
    pub owners: Option<String>,
    pub ad_title: String,
    pub description: String,
    pub price: u64,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

pub(crate) fn build(fields: &FieldSet) -> CarDetails {
    CarDetails {
        brand: fields.text("brand"),
        year: fields.number("year").unwrap_or_default(),
        fuel: fields.opt("fuel"),
        transmission: fields.opt("transmission"),
        km_driven: fields.number("km_driven").unwrap_or_default(),
        owners: fields.opt("owners"),
        ad_title: fields.text("ad_title"),
        description: fields.text("description"),
        price: fields.price("price").unwrap_or_default(),
        contact: ContactDetails::from_fields(fields),
    }
}
