//! Fallback for every category without a dedicated flow.
//!
//! Its fields are optional and ride along with the listing form.

use super::fields::{FieldKind, FieldSet, FieldSpec};
use bazaar_core::validate::AD_TITLE_MAX;
use serde::{Deserialize, Serialize};

pub const CONDITION: &[&str] = &["New", "Used"];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("condition", "Condition", FieldKind::Choice(CONDITION)),
    FieldSpec::optional("brand", "Brand", FieldKind::Text { max: AD_TITLE_MAX }),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericDetails {
    pub condition: Option<String>,
    pub brand: Option<String>,
}

impl GenericDetails {
    pub fn is_empty(&self) -> bool {
        self.condition.is_none() && self.brand.is_none()
    }
}

pub(crate) fn build(fields: &FieldSet) -> GenericDetails {
    GenericDetails {
        condition: fields.opt("condition"),
        brand: fields.opt("brand"),
    }
}
