//! Jobs

use super::fields::{FieldKind, FieldSet, FieldSpec};
use super::ContactDetails;
use bazaar_core::validate::{AD_TITLE_MAX, DESCRIPTION_MAX, NAME_MAX};
use bazaar_core::ValidationErrors;
use serde::{Deserialize, Serialize};

pub const SALARY_PERIOD: &[&str] = &["Hourly", "Monthly", "Yearly"];
pub const POSITION_TYPE: &[&str] = &["Full-time", "Part-time", "Contract", "Internship"];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("salary_period", "Salary period", FieldKind::Choice(SALARY_PERIOD)),
    FieldSpec::optional("position_type", "Position type", FieldKind::Choice(POSITION_TYPE)),
    FieldSpec::optional("salary_from", "Salary from", FieldKind::Price),
    FieldSpec::optional("salary_to", "Salary to", FieldKind::Price),
    FieldSpec::required("ad_title", "Ad title", FieldKind::Text { max: AD_TITLE_MAX }),
    FieldSpec::required(
        "description",
        "Description",
        FieldKind::LongText { max: DESCRIPTION_MAX },
    ),
    FieldSpec::optional("state", "State", FieldKind::State),
    FieldSpec::optional("name", "Name", FieldKind::Text { max: NAME_MAX }),
    FieldSpec::required("phone", "Mobile Phone Number", FieldKind::Phone),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    pub salary_period: Option<String>,
    pub position_type: Option<String>,
    pub salary_from: Option<u64>,
    pub salary_to: Option<u64>,
    pub ad_title: String,
    pub description: String,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

/// Salary range must not be inverted
pub(crate) fn cross_check(fields: &FieldSet, errors: &mut ValidationErrors) {
    if let (Some(from), Some(to)) = (fields.price("salary_from"), fields.price("salary_to")) {
        if to < from {
            errors.push("salary_to", "Salary to must not be less than salary from.");
        }
    }
}

pub(crate) fn build(fields: &FieldSet) -> JobDetails {
    JobDetails {
        salary_period: fields.opt("salary_period"),
        position_type: fields.opt("position_type"),
        salary_from: fields.price("salary_from"),
        salary_to: fields.price("salary_to"),
        ad_title: fields.text("ad_title"),
        description: fields.text("description"),
        contact: ContactDetails::from_fields(fields),
    }
}
