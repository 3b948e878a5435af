//! Category detail forms
//!
//! One closed enum over the variants. Each variant is a [`FieldSet`] driven
//! by a static field table; photo-bearing variants also own a
//! [`PhotoGallery`]. Validation, submit gating and value normalisation are
//! shared, only the final details object is variant specific.

pub mod car;
pub mod fields;
pub mod generic;
pub mod job;
pub mod mobile;
pub mod property;

pub use car::CarDetails;
pub use fields::{phone_digits, FieldKind, FieldSet, FieldSpec, INDIAN_STATES};
pub use generic::GenericDetails;
pub use job::JobDetails;
pub use mobile::MobileDetails;
pub use property::PropertyDetails;

use crate::photos::PhotoGallery;
use crate::{Result, WizardError};
use bazaar_core::{DetailKind, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Location and contact block shared by the dedicated variants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub state: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ContactDetails {
    fn from_fields(fields: &FieldSet) -> Self {
        Self {
            state: fields.opt("state"),
            name: fields.opt("name"),
            phone: fields.phone("phone"),
        }
    }
}

/// Output of a submitted detail form, handed to the listing step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryDetails {
    Property(PropertyDetails),
    Car(CarDetails),
    Mobile(MobileDetails),
    Job(JobDetails),
    Generic(GenericDetails),
}

impl CategoryDetails {
    pub fn kind(&self) -> DetailKind {
        match self {
            Self::Property(_) => DetailKind::Property,
            Self::Car(_) => DetailKind::Car,
            Self::Mobile(_) => DetailKind::Mobile,
            Self::Job(_) => DetailKind::Job,
            Self::Generic(_) => DetailKind::Generic,
        }
    }
}

/// A detail form in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailForm {
    Property { fields: FieldSet, photos: PhotoGallery },
    Car { fields: FieldSet },
    Mobile { fields: FieldSet, photos: PhotoGallery },
    Job { fields: FieldSet },
    Generic { fields: FieldSet },
}

impl DetailForm {
    /// Empty form for `kind`
    pub fn new(kind: DetailKind) -> Self {
        match kind {
            DetailKind::Property => Self::Property {
                fields: FieldSet::new(property::FIELDS),
                photos: PhotoGallery::new(),
            },
            DetailKind::Car => Self::Car {
                fields: FieldSet::new(car::FIELDS),
            },
            DetailKind::Mobile => Self::Mobile {
                fields: FieldSet::new(mobile::FIELDS),
                photos: PhotoGallery::new(),
            },
            DetailKind::Job => Self::Job {
                fields: FieldSet::new(job::FIELDS),
            },
            DetailKind::Generic => Self::Generic {
                fields: FieldSet::new(generic::FIELDS),
            },
        }
    }

    pub fn kind(&self) -> DetailKind {
        match self {
            Self::Property { .. } => DetailKind::Property,
            Self::Car { .. } => DetailKind::Car,
            Self::Mobile { .. } => DetailKind::Mobile,
            Self::Job { .. } => DetailKind::Job,
            Self::Generic { .. } => DetailKind::Generic,
        }
    }

    pub fn fields(&self) -> &FieldSet {
        match self {
            Self::Property { fields, .. }
            | Self::Car { fields }
            | Self::Mobile { fields, .. }
            | Self::Job { fields }
            | Self::Generic { fields } => fields,
        }
    }

    fn fields_mut(&mut self) -> &mut FieldSet {
        match self {
            Self::Property { fields, .. }
            | Self::Car { fields }
            | Self::Mobile { fields, .. }
            | Self::Job { fields }
            | Self::Generic { fields } => fields,
        }
    }

    pub fn photos(&self) -> Option<&PhotoGallery> {
        match self {
            Self::Property { photos, .. } | Self::Mobile { photos, .. } => Some(photos),
            _ => None,
        }
    }

    pub fn photos_mut(&mut self) -> Result<&mut PhotoGallery> {
        let kind = self.kind();
        match self {
            Self::Property { photos, .. } | Self::Mobile { photos, .. } => Ok(photos),
            _ => Err(WizardError::NoPhotos { kind }),
        }
    }

    /// Set one field
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let kind = self.kind();
        if self.fields_mut().set(field, value) {
            Ok(())
        } else {
            Err(WizardError::UnknownField {
                kind,
                field: field.to_string(),
            })
        }
    }

    /// Set several fields, as posted by a form. Unknown keys are skipped.
    pub fn fill<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = self.fields_mut();
        for (name, value) in pairs {
            if !fields.set(name, value) {
                tracing::debug!(field = name, "Ignoring unknown detail field");
            }
        }
    }

    /// Constraint errors currently active on filled-in fields
    pub fn active_errors(&self) -> ValidationErrors {
        let fields = self.fields();
        let mut errors = fields.constraint_errors();
        if let Self::Job { .. } = self {
            job::cross_check(fields, &mut errors);
        }
        errors
    }

    /// Full validation: required fields plus active errors
    pub fn validate(&self) -> ValidationErrors {
        let fields = self.fields();
        let mut errors = fields.validate();
        if let Self::Job { .. } = self {
            job::cross_check(fields, &mut errors);
        }
        errors
    }

    /// Submit gate: no blank required field and no active error
    pub fn can_submit(&self) -> bool {
        self.fields().missing_required().is_empty() && self.active_errors().is_empty()
    }

    /// Produce the details object, or every field error blocking it
    pub fn submit(&self) -> std::result::Result<CategoryDetails, ValidationErrors> {
        self.validate().into_result(())?;
        Ok(match self {
            Self::Property { fields, photos } => {
                CategoryDetails::Property(property::build(fields, photos))
            }
            Self::Car { fields } => CategoryDetails::Car(car::build(fields)),
            Self::Mobile { fields, photos } => CategoryDetails::Mobile(mobile::build(fields, photos)),
            Self::Job { fields } => CategoryDetails::Job(job::build(fields)),
            Self::Generic { fields } => CategoryDetails::Generic(generic::build(fields)),
        })
    }
}
