use crate::infra::{AppState, LandingFormInput};
use crate::pages::{confirmation_page, landing_page, LandingView};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Json};
use mentoria::workflows::mentorship::{
    mentorship_router, ApplicationForm, FeedbackRecorder, FormSession, MentorshipFormService,
    MunicipalityDirectory, Notification, WebhookSink, CONFIRMATION_ROUTE,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub(crate) fn with_mentorship_routes<D, W>(
    service: Arc<MentorshipFormService<D, W>>,
) -> axum::Router
where
    D: MunicipalityDirectory + 'static,
    W: WebhookSink + 'static,
{
    mentorship_router(service.clone())
        .route("/", get(landing_endpoint))
        .route("/inscricao", post(enrollment_endpoint::<D, W>))
        .route(CONFIRMATION_ROUTE, get(confirmation_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(service))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn landing_endpoint() -> Html<String> {
    Html(landing_page(&ApplicationForm::default(), LandingView::default()).into_string())
}

pub(crate) async fn confirmation_endpoint() -> Html<String> {
    Html(confirmation_page().into_string())
}

/// Browser form submission. Success redirects to the confirmation page,
/// anything else re-renders the landing page with the values kept.
pub(crate) async fn enrollment_endpoint<D, W>(
    Extension(service): Extension<Arc<MentorshipFormService<D, W>>>,
    Form(input): Form<LandingFormInput>,
) -> Response
where
    D: MunicipalityDirectory + 'static,
    W: WebhookSink + 'static,
{
    let form = ApplicationForm::from(input);
    let draft = match form.clone().into_draft() {
        Ok(draft) => draft,
        Err(error) => {
            debug!(%error, "landing form carried an unknown option");
            let notification = Notification::validation_failed();
            let view = LandingView {
                notification: Some(&notification),
                missing: &[error.field],
            };
            return rerender(StatusCode::UNPROCESSABLE_ENTITY, &form, view);
        }
    };

    let mut session = FormSession::from_draft(draft);
    let feedback = FeedbackRecorder::default();
    let result = service.submit(&mut session, &feedback, &feedback).await;

    let error = match result {
        Ok(receipt) => return Redirect::to(receipt.redirect).into_response(),
        Err(error) => error,
    };

    let notification = feedback.last_notification();
    let view = LandingView {
        notification: notification.as_ref(),
        missing: error.missing_fields(),
    };
    rerender(
        error.status_code(),
        &ApplicationForm::from(session.draft()),
        view,
    )
}

fn rerender(status: StatusCode, form: &ApplicationForm, view: LandingView<'_>) -> Response {
    (status, Html(landing_page(form, view).into_string())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use mentoria::config::MentorshipConfig;
    use mentoria::workflows::mentorship::HttpFormService;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMPLETE_FORM: &str = "name=Ana+Souza&whatsapp=11987654321&interest=muito_alto\
        &current_job=Analista&work_type=agencia&business_owner=aprender_profissao\
        &city=Santos&motivation=Quero+aprender&accept_frequency=on\
        &accept_time_commitment=on&accept_group_participation=on";

    async fn service_against(server: &MockServer) -> Arc<HttpFormService> {
        let config = MentorshipConfig {
            webhook_url: format!("{}/webhook/mentoria", server.uri())
                .parse()
                .expect("webhook url"),
            directory_url: format!("{}/municipios", server.uri())
                .parse()
                .expect("directory url"),
        };
        Arc::new(HttpFormService::from_config(&config).expect("client builds"))
    }

    fn form_request(body: &'static str) -> Request<Body> {
        Request::post("/inscricao")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request builds")
    }

    async fn read_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn landing_page_renders_form() {
        let server = MockServer::start().await;
        let router = with_mentorship_routes(service_against(&server).await);

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let html = read_text(response).await;
        assert!(html.contains("action=\"/inscricao\""));
        assert!(html.contains("Enviar Inscrição para Mentoria"));
    }

    #[tokio::test]
    async fn confirmation_page_renders() {
        let server = MockServer::start().await;
        let router = with_mentorship_routes(service_against(&server).await);

        let response = router
            .oneshot(
                Request::get("/parabens")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(read_text(response).await.contains("Parabéns pela inscrição!"));
    }

    #[tokio::test]
    async fn complete_form_posts_webhook_and_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/mentoria"))
            .and(body_partial_json(json!({
                "mentorship_application": {
                    "nome": "Ana Souza",
                    "telefone_whatsapp": "(11) 98765-4321",
                    "aceita_grupo": true
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        let router = with_mentorship_routes(service_against(&server).await);

        let response = router
            .oneshot(form_request(COMPLETE_FORM))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/parabens")
        );
    }

    #[tokio::test]
    async fn unchecked_consent_rerenders_without_posting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let router = with_mentorship_routes(service_against(&server).await);

        let response = router
            .oneshot(form_request(
                "name=Ana+Souza&whatsapp=11987654321&city=Santos&accept_frequency=on",
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = read_text(response).await;
        assert!(html.contains("Campos obrigatórios"));
        assert!(html.contains("value=\"(11) 98765-4321\""));
        assert!(html.contains("value=\"Santos\""));
        assert!(html.contains("name=\"accept_frequency\" checked"));
        assert!(html.contains("<li>Por que gostaria"));
    }

    #[tokio::test]
    async fn unknown_option_rerenders_with_field() {
        let server = MockServer::start().await;
        let router = with_mentorship_routes(service_against(&server).await);

        let response = router
            .oneshot(form_request("name=Ana&work_type=astronauta"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = read_text(response).await;
        assert!(html.contains("<li>Como pretende trabalhar?</li>"));
        assert!(html.contains("value=\"Ana\""));
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
