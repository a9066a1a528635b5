use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tracing::warn;
use url::Url;

use super::domain::{ApplicationDraft, BusinessStatus, DraftField, InterestLevel, WorkType};

/// Body posted to the automation webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub mentorship_application: MentorshipApplication,
}

impl WebhookPayload {
    pub fn new(timestamp: DateTime<Utc>, application: MentorshipApplication) -> Self {
        Self {
            timestamp,
            mentorship_application: application,
        }
    }
}

/// Completed draft under the key names the automation flow expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorshipApplication {
    pub nome: String,
    pub telefone_whatsapp: String,
    pub interesse_mentoria: InterestLevel,
    pub trabalho_atual: String,
    pub tipo_trabalho: WorkType,
    pub dono_empresa: BusinessStatus,
    pub cidade: String,
    pub motivacao: String,
    pub aceita_frequencia: bool,
    pub aceita_tempo_comprometimento: bool,
    pub aceita_grupo: bool,
}

impl TryFrom<&ApplicationDraft> for MentorshipApplication {
    type Error = Vec<DraftField>;

    fn try_from(draft: &ApplicationDraft) -> Result<Self, Self::Error> {
        draft.validate()?;

        match (draft.interest, draft.work_type, draft.business_status) {
            (Some(interest), Some(work_type), Some(business_status)) => Ok(Self {
                nome: draft.name.clone(),
                telefone_whatsapp: draft.phone.clone(),
                interesse_mentoria: interest,
                trabalho_atual: draft.current_job.clone(),
                tipo_trabalho: work_type,
                dono_empresa: business_status,
                cidade: draft.city.clone(),
                motivacao: draft.motivation.clone(),
                aceita_frequencia: draft.accept_frequency,
                aceita_tempo_comprometimento: draft.accept_time_commitment,
                aceita_grupo: draft.accept_group_participation,
            }),
            _ => Err(draft.missing_fields()),
        }
    }
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Acknowledgement of a delivered payload. The status is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookReceipt {
    pub status: u16,
}

/// Outbound sink receiving completed applications.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn deliver(&self, payload: &WebhookPayload) -> Result<WebhookReceipt, WebhookError>;
}

/// Failure to hand the payload to the webhook at all.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook unreachable: {0}")]
    Transport(String),
}

/// HTTP adapter posting JSON to the n8n webhook.
#[derive(Debug, Clone)]
pub struct N8nWebhook {
    http: reqwest::Client,
    url: Url,
}

impl N8nWebhook {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl WebhookSink for N8nWebhook {
    async fn deliver(&self, payload: &WebhookPayload) -> Result<WebhookReceipt, WebhookError> {
        let response = self
            .http
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|err| WebhookError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %self.url, "webhook answered with non-success status");
        }

        Ok(WebhookReceipt {
            status: status.as_u16(),
        })
    }
}
