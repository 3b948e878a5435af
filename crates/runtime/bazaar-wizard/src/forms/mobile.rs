//! Mobile phones and tablets

use super::fields::{FieldKind, FieldSet, FieldSpec};
use super::ContactDetails;
use crate::photos::{PhotoGallery, PhotoSet};
use bazaar_core::validate::{AD_TITLE_MAX, DESCRIPTION_MAX, NAME_MAX};
use serde::{Deserialize, Serialize};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("brand", "Brand", FieldKind::Text { max: AD_TITLE_MAX }),
    FieldSpec::required("ad_title", "Ad title", FieldKind::Text { max: AD_TITLE_MAX }),
    FieldSpec::required(
        "description",
        "Description",
        FieldKind::LongText { max: DESCRIPTION_MAX },
    ),
    FieldSpec::required("price", "Price", FieldKind::Price),
    FieldSpec::required("state", "State", FieldKind::State),
    FieldSpec::optional("name", "Name", FieldKind::Text { max: NAME_MAX }),
    FieldSpec::optional("phone", "Mobile Phone Number", FieldKind::Phone),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileDetails {
    pub brand: String,
    pub ad_title: String,
    pub description: String,
    pub price: u64,
    pub photos: PhotoSet,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

pub(crate) fn build(fields: &FieldSet, photos: &PhotoGallery) -> MobileDetails {
    MobileDetails {
        brand: fields.text("brand"),
        ad_title: fields.text("ad_title"),
        description: fields.text("description"),
        price: fields.price("price").unwrap_or_default(),
        photos: photos.snapshot(),
        contact: ContactDetails::from_fields(fields),
    }
}
