//! Create-category form

use spendweb_client::{ApiResponse, Category, CategoryApi, ClientResult};
use spendweb_utils::truncate_chars;

use crate::error::{CoreError, CoreResult};
use crate::phase::{Outcome, Phase, PhaseEvent};

/// Longest category name the input holds
pub const CATEGORY_NAME_MAX_CHARS: usize = 50;

pub const EMPTY_NAME_ERROR: &str = "Please enter a category name";
pub const CREATE_FAILED_FALLBACK: &str = "Failed to create category";

/// Request payload produced by a successful [`CreateCategoryForm::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySubmission {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCategoryForm {
    name: String,
    phase: Phase,
}

impl CreateCategoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Replace the field value; clears any shown message
    pub fn set_name(&mut self, value: &str) {
        self.name = truncate_chars(value, CATEGORY_NAME_MAX_CHARS);
        self.phase.transition(PhaseEvent::Edited);
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty() && !self.phase.is_pending()
    }

    /// Validate and enter the pending phase.
    ///
    /// # Errors
    ///
    /// `SubmissionInFlight` leaves the form untouched; `Validation` shows
    /// the message on the form. Neither should be followed by a request.
    pub fn begin_submit(&mut self) -> CoreResult<CategorySubmission> {
        if self.phase.is_pending() {
            return Err(CoreError::SubmissionInFlight);
        }

        let name = self.name.trim().to_string();
        if name.is_empty() {
            self.phase.transition(PhaseEvent::Rejected(EMPTY_NAME_ERROR.to_string()));
            return Err(CoreError::Validation { message: EMPTY_NAME_ERROR.to_string() });
        }

        self.phase.transition(PhaseEvent::Started);
        Ok(CategorySubmission { name })
    }

    /// Apply the service result of a submission.
    ///
    /// Returns false when no submission was pending.
    pub fn finish_submit(&mut self, result: ClientResult<ApiResponse<Category>>) -> bool {
        if !self.phase.is_pending() {
            return false;
        }
        let outcome = Outcome::from_result(result, CREATE_FAILED_FALLBACK);
        if outcome.is_accepted() {
            self.name.clear();
        }
        self.phase.transition(outcome.event());
        true
    }

    /// Full submission against `api`
    pub async fn submit(&mut self, api: &dyn CategoryApi) -> CoreResult<()> {
        let submission = self.begin_submit()?;
        let result = api.create_category(&submission.name).await;
        self.finish_submit(result);
        Ok(())
    }
}
