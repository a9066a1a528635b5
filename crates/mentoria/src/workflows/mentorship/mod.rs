//! Mentorship application form: the draft and its validity rule, the phone
//! mask, city autocomplete against the municipality directory and the
//! single-shot webhook submission.

pub mod cities;
pub mod domain;
pub mod notifications;
pub mod phone;
pub mod router;
pub mod service;
pub mod session;
pub mod webhook;

#[cfg(test)]
mod tests;

pub use cities::{
    filter_suggestions, CityLookup, CityQuery, CitySuggestionFetcher, CitySuggestions,
    DirectoryError, IbgeDirectory, Municipality, MunicipalityDirectory, MAX_SUGGESTIONS,
    MIN_QUERY_CHARS,
};
pub use domain::{
    ApplicationDraft, ApplicationForm, BusinessStatus, DraftField, InterestLevel, UnknownOption,
    WorkType,
};
pub use notifications::{
    FeedbackRecorder, Navigator, Notification, NotificationVariant, Notifier, CONFIRMATION_ROUTE,
};
pub use phone::{mask_phone, MASKED_PHONE_LEN};
pub use router::{mentorship_router, SubmissionResponse};
pub use service::{HttpFormService, MentorshipFormService, SubmissionError, SubmissionReceipt};
pub use session::{FormSession, SubmissionState, SUBMITTING_LABEL, SUBMIT_LABEL};
pub use webhook::{
    MentorshipApplication, N8nWebhook, WebhookError, WebhookPayload, WebhookReceipt, WebhookSink,
};
