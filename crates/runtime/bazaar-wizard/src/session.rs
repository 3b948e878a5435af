//! One seller's pass through the wizard
//!
//! Holds the transient state that the navigable parameters do not carry:
//! the detail form being filled in, the details object it produced, the
//! generic extras and the listing draft. All of it is scoped to one
//! (category, subcategory) pair and dropped as soon as navigation leaves it.

use crate::forms::{CategoryDetails, DetailForm};
use crate::params::WizardParams;
use crate::step::{derive_step, Step};
use crate::submission::{ListingSink, SellForm, SubmissionReceipt};
use crate::transition::{apply, Action};
use crate::{Result, WizardError};
use bazaar_core::DetailKind;
use chrono::{DateTime, Utc};
use uuid::Uuid;

type Scope = Option<(&'static str, Option<&'static str>)>;

#[derive(Debug, Clone)]
pub struct Wizard {
    id: Uuid,
    params: WizardParams,
    step: Step,
    scope: Scope,
    detail_form: Option<DetailForm>,
    details: Option<CategoryDetails>,
    generic: DetailForm,
    sell_form: SellForm,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            params: WizardParams::new(),
            step: Step::ChoosingCategory,
            scope: None,
            detail_form: None,
            details: None,
            generic: DetailForm::new(DetailKind::Generic),
            sell_form: SellForm::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn params(&self) -> &WizardParams {
        &self.params
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn clear_transient(&mut self) {
        self.detail_form = None;
        self.details = None;
        self.generic = DetailForm::new(DetailKind::Generic);
        self.sell_form.reset();
    }

    /// Move to whatever step `params` resolve to (a link, the browser's
    /// back button, a typed URL). Returns the resolved step.
    pub fn navigate(&mut self, params: &WizardParams) -> Step {
        let step = derive_step(params);
        let scope: Scope = step.category().map(|c| (c.name, step.subcategory()));
        if scope != self.scope {
            self.clear_transient();
            self.scope = scope;
        }

        match step {
            Step::ChoosingCategory | Step::ChoosingSubcategory { .. } => self.clear_transient(),
            Step::CategoryDetailForm { kind, .. } => {
                // leaving the listing step drops everything collected there
                self.details = None;
                self.generic = DetailForm::new(DetailKind::Generic);
                self.sell_form.reset();
                if self.detail_form.as_ref().map(DetailForm::kind) != Some(kind) {
                    self.detail_form = Some(DetailForm::new(kind));
                }
            }
            Step::ListingSubmission { .. } => {}
        }

        self.params = step.params();
        self.step = step;
        self.updated_at = Utc::now();
        step
    }

    /// Apply an action and move to the resulting step
    pub fn dispatch(&mut self, action: &Action) -> Result<Step> {
        let next = apply(&self.params, action)?;

        if let Action::SubmitDetails = action {
            let form = self.detail_form.as_ref().ok_or(WizardError::NoDetailForm)?;
            let details = form.submit().map_err(WizardError::Validation)?;
            tracing::info!(wizard = %self.id, kind = %details.kind(), "Category details submitted");
            let step = self.navigate(&next);
            self.details = Some(details);
            return Ok(step);
        }

        Ok(self.navigate(&next))
    }

    pub fn detail_form(&self) -> Option<&DetailForm> {
        self.detail_form.as_ref()
    }

    /// The form to edit at the detail step
    pub fn detail_form_mut(&mut self) -> Result<&mut DetailForm> {
        match self.step {
            Step::CategoryDetailForm { .. } => {
                self.updated_at = Utc::now();
                self.detail_form.as_mut().ok_or(WizardError::NoDetailForm)
            }
            _ => Err(WizardError::NoDetailForm),
        }
    }

    /// Details carried into the listing step
    pub fn details(&self) -> Option<&CategoryDetails> {
        self.details.as_ref()
    }

    /// At the listing step of a dedicated flow whose details were never submitted
    pub fn details_missing(&self) -> bool {
        match self.step {
            Step::ListingSubmission { kind, .. } if kind != DetailKind::Generic => {
                self.details.as_ref().map(CategoryDetails::kind) != Some(kind)
            }
            _ => false,
        }
    }

    /// Optional extras for categories without a dedicated flow
    pub fn generic_form(&self) -> &DetailForm {
        &self.generic
    }

    pub fn generic_form_mut(&mut self) -> &mut DetailForm {
        self.updated_at = Utc::now();
        &mut self.generic
    }

    pub fn sell_form(&self) -> &SellForm {
        &self.sell_form
    }

    pub fn sell_form_mut(&mut self) -> &mut SellForm {
        self.updated_at = Utc::now();
        &mut self.sell_form
    }

    /// Accept one suggested keyword into the listing draft
    pub fn accept_keyword(&mut self, keyword: &str) -> String {
        self.updated_at = Utc::now();
        self.sell_form.accept_keyword(keyword).to_string()
    }

    /// Validate the listing draft, hand the record to `sink` and start over.
    ///
    /// On a validation error the draft is kept so the seller can fix it.
    pub fn submit_listing(&mut self, sink: &dyn ListingSink) -> Result<SubmissionReceipt> {
        let Step::ListingSubmission { category, subcategory, kind } = self.step else {
            return Err(WizardError::InvalidTransition {
                action: "submit_listing",
                step: self.step.to_string(),
            });
        };

        let details = if kind == DetailKind::Generic {
            match self.generic.submit().map_err(WizardError::Validation)? {
                CategoryDetails::Generic(extras) if extras.is_empty() => None,
                other => Some(other),
            }
        } else {
            // a typed `details_submitted` reaches this step without the form ever passing
            match &self.details {
                Some(details) if details.kind() == kind => Some(details.clone()),
                _ => return Err(WizardError::NoDetailForm),
            }
        };

        let record = self
            .sell_form
            .to_record(category.name, subcategory, details)
            .map_err(WizardError::Validation)?;
        sink.accept(&record)?;

        let receipt = SubmissionReceipt::for_record(&record);
        tracing::info!(wizard = %self.id, listing = %record.id, "Listing flow finished");
        self.navigate(&WizardParams::new());
        Ok(receipt)
    }
}
