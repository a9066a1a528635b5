use serde::Serialize;

use super::cities::{qualifies_for_lookup, CityLookup, CityQuery, CitySuggestions};
use super::domain::{ApplicationDraft, DraftField};

pub const SUBMIT_LABEL: &str = "Enviar Inscrição para Mentoria";
pub const SUBMITTING_LABEL: &str = "Enviando...";

/// Submission lifecycle of a single form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Form state holder: the draft, its submission state and the city dropdown.
///
/// A session has exactly one owner; every mutation goes through `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    draft: ApplicationDraft,
    state: SubmissionState,
    cities: CitySuggestions,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_draft(draft: ApplicationDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    /// Direct access for plain text, selection and checkbox fields.
    ///
    /// Phone and city changes should go through [`FormSession::set_phone`] and
    /// [`FormSession::set_city`] so the mask and the dropdown stay in sync.
    pub fn draft_mut(&mut self) -> &mut ApplicationDraft {
        &mut self.draft
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.draft.set_phone(raw);
    }

    /// Record a keystroke in the city field and open the dropdown.
    ///
    /// Returns the lookup to run when the input is long enough; shorter
    /// inputs clear the current suggestions instead.
    pub fn set_city(&mut self, value: &str) -> Option<CityQuery> {
        self.draft.city = value.to_string();
        self.cities.show();

        if qualifies_for_lookup(value) {
            Some(self.cities.issue(value))
        } else {
            self.cities.clear();
            None
        }
    }

    /// Store a lookup result. Returns `false` when a newer query superseded it.
    pub fn apply_city_lookup(&mut self, lookup: CityLookup) -> bool {
        self.cities.apply(lookup)
    }

    /// Pick a suggestion: it replaces the city text and closes the dropdown.
    pub fn select_city(&mut self, city: &str) {
        self.draft.city = city.to_string();
        self.cities.hide();
    }

    pub fn city_suggestions(&self) -> &CitySuggestions {
        &self.cities
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn is_valid(&self) -> bool {
        self.draft.is_valid()
    }

    pub fn missing_fields(&self) -> Vec<DraftField> {
        self.draft.missing_fields()
    }

    /// Whether the submit control is enabled.
    pub fn submit_enabled(&self) -> bool {
        !self.is_submitting() && self.is_valid()
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            SubmissionState::Idle => SUBMIT_LABEL,
            SubmissionState::Submitting => SUBMITTING_LABEL,
        }
    }

    pub(crate) fn begin_submission(&mut self) {
        self.state = SubmissionState::Submitting;
    }

    pub(crate) fn finish_submission(&mut self) {
        self.state = SubmissionState::Idle;
    }

    /// Back to the initial empty draft with no suggestions.
    pub(crate) fn reset(&mut self) {
        self.draft.reset();
        self.cities.reset();
    }
}
