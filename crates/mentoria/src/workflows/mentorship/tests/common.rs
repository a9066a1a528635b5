use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::mentorship::cities::{DirectoryError, Municipality, MunicipalityDirectory};
use crate::workflows::mentorship::domain::{
    ApplicationDraft, ApplicationForm, BusinessStatus, InterestLevel, WorkType,
};
use crate::workflows::mentorship::service::MentorshipFormService;
use crate::workflows::mentorship::webhook::{
    WebhookError, WebhookPayload, WebhookReceipt, WebhookSink,
};

pub(super) fn complete_draft() -> ApplicationDraft {
    ApplicationDraft {
        name: "Ana Souza".to_string(),
        phone: "(11) 98765-4321".to_string(),
        interest: Some(InterestLevel::MuitoAlto),
        current_job: "Analista de suporte".to_string(),
        work_type: Some(WorkType::Agencia),
        business_status: Some(BusinessStatus::AprenderProfissao),
        city: "Santos".to_string(),
        motivation: "Quero automatizar processos com IA".to_string(),
        accept_frequency: true,
        accept_time_commitment: true,
        accept_group_participation: true,
    }
}

pub(super) fn complete_form() -> ApplicationForm {
    ApplicationForm {
        name: "Ana Souza".to_string(),
        whatsapp: "11987654321".to_string(),
        interest: "muito_alto".to_string(),
        current_job: "Analista de suporte".to_string(),
        work_type: "agencia".to_string(),
        business_owner: "aprender_profissao".to_string(),
        city: "Santos".to_string(),
        motivation: "Quero automatizar processos com IA".to_string(),
        accept_frequency: true,
        accept_time_commitment: true,
        accept_group_participation: true,
    }
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 2, 12, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn sao_paulo_cities() -> Vec<Municipality> {
    [
        "São Paulo",
        "Salvador",
        "Santos",
        "Sapucaia",
        "Sabará",
        "Saquarema",
        "Santana",
        "Sarandi",
        "Saubara",
    ]
    .into_iter()
    .map(Municipality::new)
    .collect()
}

/// Directory answering with a fixed list and counting calls.
#[derive(Default)]
pub(super) struct StaticDirectory {
    municipalities: Vec<Municipality>,
    calls: AtomicUsize,
}

impl StaticDirectory {
    pub(super) fn new(municipalities: Vec<Municipality>) -> Self {
        Self {
            municipalities,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MunicipalityDirectory for StaticDirectory {
    async fn municipalities(&self) -> Result<Vec<Municipality>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.municipalities.clone())
    }
}

pub(super) struct UnavailableDirectory;

#[async_trait]
impl MunicipalityDirectory for UnavailableDirectory {
    async fn municipalities(&self) -> Result<Vec<Municipality>, DirectoryError> {
        Err(DirectoryError::Transport("connection refused".to_string()))
    }
}

/// Webhook that records every payload and answers with a fixed status.
pub(super) struct MemoryWebhook {
    payloads: Mutex<Vec<WebhookPayload>>,
    status: u16,
}

impl Default for MemoryWebhook {
    fn default() -> Self {
        Self::with_status(200)
    }
}

impl MemoryWebhook {
    pub(super) fn with_status(status: u16) -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            status,
        }
    }

    pub(super) fn payloads(&self) -> Vec<WebhookPayload> {
        self.payloads.lock().expect("webhook mutex poisoned").clone()
    }
}

#[async_trait]
impl WebhookSink for MemoryWebhook {
    async fn deliver(&self, payload: &WebhookPayload) -> Result<WebhookReceipt, WebhookError> {
        self.payloads
            .lock()
            .expect("webhook mutex poisoned")
            .push(payload.clone());
        Ok(WebhookReceipt {
            status: self.status,
        })
    }
}

/// Webhook whose first `failures` deliveries fail at the transport level.
pub(super) struct FlakyWebhook {
    failures: usize,
    attempts: AtomicUsize,
    delivered: Mutex<Vec<WebhookPayload>>,
}

impl FlakyWebhook {
    pub(super) fn failing(failures: usize) -> Self {
        Self {
            failures,
            attempts: AtomicUsize::new(0),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub(super) fn delivered(&self) -> Vec<WebhookPayload> {
        self.delivered.lock().expect("webhook mutex poisoned").clone()
    }
}

#[async_trait]
impl WebhookSink for FlakyWebhook {
    async fn deliver(&self, payload: &WebhookPayload) -> Result<WebhookReceipt, WebhookError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(WebhookError::Transport("dns error".to_string()));
        }
        self.delivered
            .lock()
            .expect("webhook mutex poisoned")
            .push(payload.clone());
        Ok(WebhookReceipt { status: 200 })
    }
}

pub(super) type MemoryService = MentorshipFormService<StaticDirectory, MemoryWebhook>;

pub(super) fn build_service() -> (Arc<MemoryService>, Arc<StaticDirectory>, Arc<MemoryWebhook>) {
    let directory = Arc::new(StaticDirectory::new(sao_paulo_cities()));
    let webhook = Arc::new(MemoryWebhook::default());
    let service = Arc::new(MentorshipFormService::new(
        directory.clone(),
        webhook.clone(),
    ));
    (service, directory, webhook)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
