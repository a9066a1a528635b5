use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::MentorshipConfig;

use super::cities::{CitySuggestionFetcher, IbgeDirectory, MunicipalityDirectory};
use super::domain::DraftField;
use super::notifications::{Navigator, Notification, Notifier, CONFIRMATION_ROUTE};
use super::session::FormSession;
use super::webhook::{
    MentorshipApplication, N8nWebhook, WebhookError, WebhookPayload, WebhookSink,
};

/// Service composing the city lookup and the webhook submission for a form.
pub struct MentorshipFormService<D, W> {
    cities: CitySuggestionFetcher<D>,
    webhook: Arc<W>,
}

impl<D, W> MentorshipFormService<D, W>
where
    D: MunicipalityDirectory + 'static,
    W: WebhookSink + 'static,
{
    pub fn new(directory: Arc<D>, webhook: Arc<W>) -> Self {
        Self {
            cities: CitySuggestionFetcher::new(directory),
            webhook,
        }
    }

    pub fn cities(&self) -> &CitySuggestionFetcher<D> {
        &self.cities
    }

    /// Handle a change of the city field, refreshing the session's dropdown.
    pub async fn update_city(&self, session: &mut FormSession, value: &str) {
        if let Some(query) = session.set_city(value) {
            let lookup = self.cities.lookup(query).await;
            session.apply_city_lookup(lookup);
        }
    }

    /// Submit the session's draft, stamped with the current time.
    pub async fn submit<N, V>(
        &self,
        session: &mut FormSession,
        notifier: &N,
        navigator: &V,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        N: Notifier + ?Sized,
        V: Navigator + ?Sized,
    {
        self.submit_at(session, Utc::now(), notifier, navigator).await
    }

    /// Submit the session's draft with an explicit timestamp.
    ///
    /// Invalid drafts only produce a notification. Otherwise the payload is
    /// posted once; any answer from the webhook counts as success, which
    /// resets the draft and navigates to the confirmation route. Transport
    /// failures keep the draft for another attempt.
    pub async fn submit_at<N, V>(
        &self,
        session: &mut FormSession,
        timestamp: DateTime<Utc>,
        notifier: &N,
        navigator: &V,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        N: Notifier + ?Sized,
        V: Navigator + ?Sized,
    {
        if session.is_submitting() {
            warn!("submission ignored while another is in flight");
            return Err(SubmissionError::InFlight);
        }

        let application = match MentorshipApplication::try_from(session.draft()) {
            Ok(application) => application,
            Err(missing) => {
                info!(?missing, "mentorship application incomplete");
                notifier.notify(Notification::validation_failed());
                return Err(SubmissionError::Incomplete { missing });
            }
        };

        let guard = SubmittingGuard::begin(session);
        let payload = WebhookPayload::new(timestamp, application);

        match self.webhook.deliver(&payload).await {
            Ok(receipt) => {
                info!(
                    status = receipt.status,
                    city = %payload.mentorship_application.cidade,
                    "mentorship application delivered"
                );
                notifier.notify(Notification::submission_succeeded());
                guard.session.reset();
                navigator.navigate(CONFIRMATION_ROUTE);
                Ok(SubmissionReceipt {
                    submitted_at: timestamp,
                    webhook_status: receipt.status,
                    redirect: CONFIRMATION_ROUTE,
                })
            }
            Err(err) => {
                error!(error = %err, "failed to deliver mentorship application");
                notifier.notify(Notification::submission_failed());
                Err(SubmissionError::Delivery(err))
            }
        }
    }
}

/// Service wired to the real directory and webhook over HTTP.
pub type HttpFormService = MentorshipFormService<IbgeDirectory, N8nWebhook>;

impl HttpFormService {
    /// Build both adapters on one shared client. No request timeout is set.
    pub fn from_config(config: &MentorshipConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mentoria/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let directory = IbgeDirectory::new(http.clone(), config.directory_url.clone());
        let webhook = N8nWebhook::new(http, config.webhook_url.clone());
        Ok(Self::new(Arc::new(directory), Arc::new(webhook)))
    }
}

/// Clears the submitting flag however the submission ends, including when
/// the future is dropped mid-flight.
struct SubmittingGuard<'a> {
    session: &'a mut FormSession,
}

impl<'a> SubmittingGuard<'a> {
    fn begin(session: &'a mut FormSession) -> Self {
        session.begin_submission();
        Self { session }
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.session.finish_submission();
    }
}

/// Successful hand-off to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub submitted_at: DateTime<Utc>,
    pub webhook_status: u16,
    pub redirect: &'static str,
}

/// Error raised by the submission handler. All variants are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("application incomplete: {}", format_missing(.missing))]
    Incomplete { missing: Vec<DraftField> },
    #[error(transparent)]
    Delivery(#[from] WebhookError),
}

impl SubmissionError {
    /// HTTP status reported to clients of the form endpoints.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InFlight => StatusCode::CONFLICT,
            Self::Incomplete { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Delivery(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short machine-readable outcome for response bodies.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::InFlight => "in_flight",
            Self::Incomplete { .. } => "invalid",
            Self::Delivery(_) => "failed",
        }
    }

    pub fn missing_fields(&self) -> &[DraftField] {
        match self {
            Self::Incomplete { missing } => missing,
            Self::InFlight | Self::Delivery(_) => &[],
        }
    }
}

fn format_missing(missing: &[DraftField]) -> String {
    missing
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}
