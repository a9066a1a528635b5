use metrics_exporter_prometheus::PrometheusHandle;
use mentoria::workflows::mentorship::ApplicationForm;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Urlencoded body posted by the landing page form.
///
/// Browsers omit unchecked checkboxes and send `on` for checked ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LandingFormInput {
    pub(crate) name: String,
    pub(crate) whatsapp: String,
    pub(crate) interest: String,
    pub(crate) current_job: String,
    pub(crate) work_type: String,
    pub(crate) business_owner: String,
    pub(crate) city: String,
    pub(crate) motivation: String,
    pub(crate) accept_frequency: Option<String>,
    pub(crate) accept_time_commitment: Option<String>,
    pub(crate) accept_group_participation: Option<String>,
}

impl From<LandingFormInput> for ApplicationForm {
    fn from(input: LandingFormInput) -> Self {
        Self {
            name: input.name,
            whatsapp: input.whatsapp,
            interest: input.interest,
            current_job: input.current_job,
            work_type: input.work_type,
            business_owner: input.business_owner,
            city: input.city,
            motivation: input.motivation,
            accept_frequency: is_checked(input.accept_frequency.as_deref()),
            accept_time_commitment: is_checked(input.accept_time_commitment.as_deref()),
            accept_group_participation: is_checked(input.accept_group_participation.as_deref()),
        }
    }
}

fn is_checked(value: Option<&str>) -> bool {
    match value {
        Some(raw) => !matches!(raw.trim().to_ascii_lowercase().as_str(), "" | "off" | "false"),
        None => false,
    }
}
