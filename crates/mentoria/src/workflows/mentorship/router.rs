use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::cities::MunicipalityDirectory;
use super::domain::{ApplicationForm, DraftField};
use super::notifications::{FeedbackRecorder, Notification};
use super::phone::mask_phone;
use super::service::MentorshipFormService;
use super::session::FormSession;
use super::webhook::WebhookSink;

/// Router builder exposing the form operations as JSON endpoints.
pub fn mentorship_router<D, W>(service: Arc<MentorshipFormService<D, W>>) -> Router
where
    D: MunicipalityDirectory + 'static,
    W: WebhookSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/mentorship/applications",
            post(submit_handler::<D, W>),
        )
        .route("/api/v1/mentorship/cities", get(cities_handler::<D, W>))
        .route("/api/v1/mentorship/phone-mask", get(phone_mask_handler))
        .with_state(service)
}

/// Body returned by the submission endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<DraftField>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CityQueryParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhoneMaskParams {
    #[serde(default)]
    raw: String,
}

pub(crate) async fn submit_handler<D, W>(
    State(service): State<Arc<MentorshipFormService<D, W>>>,
    Json(form): Json<ApplicationForm>,
) -> Response
where
    D: MunicipalityDirectory + 'static,
    W: WebhookSink + 'static,
{
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(error) => {
            let payload = json!({ "status": "invalid", "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    let mut session = FormSession::from_draft(draft);
    let feedback = FeedbackRecorder::default();
    let result = service.submit(&mut session, &feedback, &feedback).await;
    let notification = feedback.last_notification();

    match result {
        Ok(_) => {
            let body = SubmissionResponse {
                status: "submitted",
                notification,
                redirect: feedback.redirect(),
                missing_fields: Vec::new(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => {
            let body = SubmissionResponse {
                status: error.outcome(),
                notification,
                redirect: None,
                missing_fields: error.missing_fields().to_vec(),
            };
            (error.status_code(), Json(body)).into_response()
        }
    }
}

pub(crate) async fn cities_handler<D, W>(
    State(service): State<Arc<MentorshipFormService<D, W>>>,
    Query(params): Query<CityQueryParams>,
) -> Response
where
    D: MunicipalityDirectory + 'static,
    W: WebhookSink + 'static,
{
    let suggestions = service.cities().suggest(&params.q).await;
    (StatusCode::OK, Json(json!({ "suggestions": suggestions }))).into_response()
}

pub(crate) async fn phone_mask_handler(Query(params): Query<PhoneMaskParams>) -> Response {
    let masked = mask_phone(&params.raw);
    (StatusCode::OK, Json(json!({ "masked": masked }))).into_response()
}
