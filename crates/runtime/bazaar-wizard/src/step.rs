//! Step derivation: a pure function of [`WizardParams`]

use crate::params::WizardParams;
use bazaar_core::{find_category, Category, DetailKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ChoosingCategory,
    ChoosingSubcategory {
        category: &'static Category,
    },
    CategoryDetailForm {
        category: &'static Category,
        subcategory: Option<&'static str>,
        kind: DetailKind,
    },
    /// `kind` is the variant whose details were collected, or
    /// [`DetailKind::Generic`] when the pair has no dedicated flow
    ListingSubmission {
        category: &'static Category,
        subcategory: Option<&'static str>,
        kind: DetailKind,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChoosingCategory => "choosing_category",
            Self::ChoosingSubcategory { .. } => "choosing_subcategory",
            Self::CategoryDetailForm { .. } => "category_detail_form",
            Self::ListingSubmission { .. } => "listing_submission",
        }
    }

    pub fn category(&self) -> Option<&'static Category> {
        match self {
            Self::ChoosingCategory => None,
            Self::ChoosingSubcategory { category }
            | Self::CategoryDetailForm { category, .. }
            | Self::ListingSubmission { category, .. } => Some(*category),
        }
    }

    pub fn subcategory(&self) -> Option<&'static str> {
        match self {
            Self::CategoryDetailForm { subcategory, .. }
            | Self::ListingSubmission { subcategory, .. } => *subcategory,
            _ => None,
        }
    }

    /// Detail variant in play at this step, if any
    pub fn detail_kind(&self) -> Option<DetailKind> {
        match self {
            Self::CategoryDetailForm { kind, .. } | Self::ListingSubmission { kind, .. } => {
                Some(*kind)
            }
            _ => None,
        }
    }

    /// Canonical parameters for this step. Unknown or irrelevant inputs
    /// that led here are dropped.
    pub fn params(&self) -> WizardParams {
        match self {
            Self::ChoosingCategory => WizardParams::new(),
            Self::ChoosingSubcategory { category } => WizardParams::with_category(category.name),
            Self::CategoryDetailForm { category, subcategory, .. } => WizardParams {
                category: Some(category.name.to_string()),
                subcategory: subcategory.map(str::to_string),
                details_submitted: false,
            },
            Self::ListingSubmission { category, subcategory, kind } => WizardParams {
                category: Some(category.name.to_string()),
                subcategory: subcategory.map(str::to_string),
                details_submitted: *kind != DetailKind::Generic,
            },
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChoosingCategory => f.write_str("choosing a category"),
            Self::ChoosingSubcategory { category } => {
                write!(f, "choosing a subcategory of {}", category.name)
            }
            Self::CategoryDetailForm { kind, .. } => write!(f, "filling in {kind} details"),
            Self::ListingSubmission { .. } => f.write_str("submitting the listing"),
        }
    }
}

/// Resolve the step for a parameter triple.
///
/// - no known category: choose one
/// - branching category without a known subcategory: choose one (the
///   submitted flag is ignored)
/// - dedicated flow not yet submitted: its detail form
/// - otherwise: the listing form
pub fn derive_step(params: &WizardParams) -> Step {
    let Some(category) = params.category.as_deref().and_then(find_category) else {
        return Step::ChoosingCategory;
    };

    let subcategory = if category.has_subcategories() {
        match params
            .subcategory
            .as_deref()
            .and_then(|s| category.find_subcategory(s))
        {
            Some(sub) => Some(sub),
            None => return Step::ChoosingSubcategory { category },
        }
    } else {
        None
    };

    match category.detail_flow(subcategory) {
        Some(kind) if !params.details_submitted => Step::CategoryDetailForm {
            category,
            subcategory,
            kind,
        },
        Some(kind) => Step::ListingSubmission {
            category,
            subcategory,
            kind,
        },
        None => Step::ListingSubmission {
            category,
            subcategory,
            kind: DetailKind::Generic,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{CATEGORIES, PROPERTY_FOR_SALE};

    #[test]
    fn test_no_category() {
        assert_eq!(derive_step(&WizardParams::new()), Step::ChoosingCategory);
        assert_eq!(
            derive_step(&WizardParams::with_category("Spaceships")),
            Step::ChoosingCategory
        );
    }

    #[test]
    fn test_branching_category_asks_for_subcategory() {
        let step = derive_step(&WizardParams::with_category("Properties"));
        assert_eq!(step.name(), "choosing_subcategory");

        let unknown = WizardParams::with_category("Properties").with_subcategory("Castles");
        assert_eq!(derive_step(&unknown).name(), "choosing_subcategory");

        let flagged = WizardParams::with_category("Mobiles").submitted();
        assert_eq!(derive_step(&flagged).name(), "choosing_subcategory");
    }

    #[test]
    fn test_dedicated_flows() {
        let property = WizardParams::with_category("Properties").with_subcategory(PROPERTY_FOR_SALE);
        assert_eq!(derive_step(&property).detail_kind(), Some(DetailKind::Property));
        assert_eq!(derive_step(&property).name(), "category_detail_form");

        let cars = WizardParams::with_category("Cars");
        assert_eq!(derive_step(&cars).detail_kind(), Some(DetailKind::Car));

        let job = WizardParams::with_category("Jobs").with_subcategory("Internship");
        assert_eq!(derive_step(&job).detail_kind(), Some(DetailKind::Job));

        let submitted = derive_step(&property.clone().submitted());
        assert_eq!(submitted.name(), "listing_submission");
        assert_eq!(submitted.detail_kind(), Some(DetailKind::Property));
    }

    #[test]
    fn test_generic_goes_straight_to_listing() {
        let bikes = derive_step(&WizardParams::with_category("Bikes"));
        assert_eq!(bikes.name(), "listing_submission");
        assert_eq!(bikes.detail_kind(), Some(DetailKind::Generic));

        let rent = WizardParams::with_category("Properties").with_subcategory("Lands & Plots");
        assert_eq!(derive_step(&rent).name(), "listing_submission");
    }

    #[test]
    fn test_stray_subcategory_on_flat_category_ignored() {
        let params = WizardParams::with_category("Pets").with_subcategory("Cats");
        let step = derive_step(&params);
        assert_eq!(step.subcategory(), None);
        assert_eq!(step.params(), WizardParams::with_category("Pets"));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        for category in CATEGORIES {
            let mut subs: Vec<Option<&str>> = vec![None, Some("nonsense")];
            subs.extend(category.subcategories().iter().copied().map(Some));
            for sub in subs {
                for submitted in [false, true] {
                    let params = WizardParams {
                        category: Some(category.name.to_string()),
                        subcategory: sub.map(str::to_string),
                        details_submitted: submitted,
                    };
                    let first = derive_step(&params);
                    assert_eq!(first, derive_step(&params));
                    // canonical params land on the same step
                    assert_eq!(derive_step(&first.params()), first);
                }
            }
        }
    }
}
