//! `(params, action) -> params`

use crate::params::WizardParams;
use crate::step::{derive_step, Step};
use crate::{Result, WizardError};
use bazaar_core::{resolve_category, resolve_subcategory};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Pick (or change) the top-level category. Allowed from any step.
    SelectCategory(String),
    /// Pick a subcategory of the current category
    SelectSubcategory(String),
    /// The active detail form was submitted
    SubmitDetails,
    /// Go one step back, dropping what belongs to the step being left
    Back,
    /// Start over
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectCategory(_) => "select_category",
            Self::SelectSubcategory(_) => "select_subcategory",
            Self::SubmitDetails => "submit_details",
            Self::Back => "back",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn invalid(action: &Action, step: &Step) -> WizardError {
    WizardError::InvalidTransition {
        action: action.name(),
        step: step.to_string(),
    }
}

/// Next parameters for `action` taken from the step `params` resolve to
pub fn apply(params: &WizardParams, action: &Action) -> Result<WizardParams> {
    let step = derive_step(params);
    let next = match action {
        Action::SelectCategory(name) => {
            let category = resolve_category(name)?;
            WizardParams::with_category(category.name)
        }
        Action::SelectSubcategory(name) => {
            let category = step
                .category()
                .filter(|c| c.has_subcategories())
                .ok_or_else(|| invalid(action, &step))?;
            let subcategory = resolve_subcategory(category, name)?;
            WizardParams::with_category(category.name).with_subcategory(subcategory)
        }
        Action::SubmitDetails => match step {
            Step::CategoryDetailForm { .. } => step.params().submitted(),
            _ => return Err(invalid(action, &step)),
        },
        Action::Back => back(&step),
        Action::Reset => WizardParams::new(),
    };

    tracing::debug!(
        action = action.name(),
        from = step.name(),
        to = derive_step(&next).name(),
        "Wizard transition"
    );
    Ok(next)
}

fn back(step: &Step) -> WizardParams {
    match *step {
        Step::ChoosingCategory | Step::ChoosingSubcategory { .. } => WizardParams::new(),
        Step::CategoryDetailForm { category, .. } => {
            if category.has_subcategories() {
                WizardParams::with_category(category.name)
            } else {
                WizardParams::new()
            }
        }
        Step::ListingSubmission { category, subcategory, kind } => {
            if kind != bazaar_core::DetailKind::Generic {
                // back onto the detail form that was submitted
                let mut params = step.params();
                params.details_submitted = false;
                params
            } else if subcategory.is_some() {
                WizardParams::with_category(category.name)
            } else {
                WizardParams::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{DetailKind, PROPERTY_FOR_SALE};

    fn run(actions: &[Action]) -> WizardParams {
        actions
            .iter()
            .try_fold(WizardParams::new(), |params, action| apply(&params, action))
            .unwrap()
    }

    #[test]
    fn test_property_flow_forward() {
        let params = run(&[
            Action::SelectCategory("Properties".into()),
            Action::SelectSubcategory(PROPERTY_FOR_SALE.into()),
        ]);
        assert_eq!(derive_step(&params).detail_kind(), Some(DetailKind::Property));

        let params = apply(&params, &Action::SubmitDetails).unwrap();
        assert!(params.details_submitted);
        assert_eq!(derive_step(&params).name(), "listing_submission");
    }

    #[test]
    fn test_flat_category_straight_to_listing() {
        let params = run(&[Action::SelectCategory("Furniture".into())]);
        assert_eq!(derive_step(&params).name(), "listing_submission");

        let params = run(&[Action::SelectCategory("Cars".into())]);
        assert_eq!(derive_step(&params).name(), "category_detail_form");
    }

    #[test]
    fn test_back_chain_from_submitted_property() {
        let mut params = run(&[
            Action::SelectCategory("Properties".into()),
            Action::SelectSubcategory(PROPERTY_FOR_SALE.into()),
            Action::SubmitDetails,
        ]);

        params = apply(&params, &Action::Back).unwrap();
        assert_eq!(derive_step(&params).name(), "category_detail_form");
        assert!(!params.details_submitted);

        params = apply(&params, &Action::Back).unwrap();
        assert_eq!(params, WizardParams::with_category("Properties"));

        params = apply(&params, &Action::Back).unwrap();
        assert_eq!(params, WizardParams::new());
    }

    #[test]
    fn test_back_from_generic_listing() {
        let params = run(&[
            Action::SelectCategory("Mobiles".into()),
            Action::SelectSubcategory("Accessories".into()),
            Action::Back,
        ]);
        assert_eq!(params, WizardParams::with_category("Mobiles"));

        let params = run(&[Action::SelectCategory("Pets".into()), Action::Back]);
        assert_eq!(params, WizardParams::new());

        let params = run(&[Action::SelectCategory("Cars".into()), Action::Back]);
        assert_eq!(params, WizardParams::new());
    }

    #[test]
    fn test_rejected_actions() {
        let start = WizardParams::new();
        assert!(matches!(
            apply(&start, &Action::SelectSubcategory("Tablets".into())),
            Err(WizardError::InvalidTransition { .. })
        ));
        assert!(matches!(
            apply(&start, &Action::SelectCategory("Boats".into())),
            Err(WizardError::Core(_))
        ));
        let furniture = WizardParams::with_category("Furniture");
        assert!(apply(&furniture, &Action::SubmitDetails).is_err());

        let mobiles = WizardParams::with_category("Mobiles");
        assert!(apply(&mobiles, &Action::SelectSubcategory("Laptops".into())).is_err());
    }

    #[test]
    fn test_change_category_discards_subcategory() {
        let params = run(&[
            Action::SelectCategory("Jobs".into()),
            Action::SelectSubcategory("Part-time".into()),
            Action::SelectCategory("Bikes".into()),
        ]);
        assert_eq!(params, WizardParams::with_category("Bikes"));
    }
}
