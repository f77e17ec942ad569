use std::sync::{Arc, Mutex};

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use product_server::{
    router, AppState, ErrorResult, FieldValidationError, InMemoryProductStore, RegisterUseCase,
    User, UserResource,
};
use tower::ServiceExt;

#[derive(Clone, Default)]
struct RecordingRegistrar {
    calls: Arc<Mutex<Vec<(User, bool)>>>,
}

impl RegisterUseCase for RecordingRegistrar {
    fn register_user(&self, user: User, send_welcome_mail: bool) {
        self.calls.lock().unwrap().push((user, send_welcome_mail));
    }
}

fn app_with(registrar: RecordingRegistrar) -> axum::Router {
    router(AppState::new(InMemoryProductStore::new(), registrar))
}

fn register(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/forums/42/register?sendWelcomeMail=true")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn user(name: Option<&str>, email: Option<&str>) -> String {
    serde_json::to_string(&UserResource {
        name: name.map(str::to_string),
        email: email.map(str::to_string),
        registration_date: None,
    })
    .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn must_not_be_null(field: &str) -> FieldValidationError {
    FieldValidationError::new(field, "must not be null")
}

#[tokio::test]
async fn valid_input_returns_200_and_echoes_resource() {
    let registrar = RecordingRegistrar::default();
    let resp = app_with(registrar)
        .oneshot(register(&user(Some("Zaphod"), Some("zaphod@galaxy.net"))))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: UserResource = body_json(resp).await;
    assert_eq!(echoed.name.as_deref(), Some("Zaphod"));
    assert_eq!(echoed.email.as_deref(), Some("zaphod@galaxy.net"));
}

#[tokio::test]
async fn echoed_resource_drops_client_registration_date() {
    let body = r#"{"name":"Zaphod","email":"zaphod@galaxy.net","registrationDate":"2024-01-01"}"#;
    let resp = app_with(RecordingRegistrar::default())
        .oneshot(register(body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: serde_json::Value = body_json(resp).await;
    assert_eq!(echoed["name"], "Zaphod");
    assert!(echoed["registrationDate"].is_null());
}

#[tokio::test]
async fn valid_input_maps_to_business_model_once() {
    let registrar = RecordingRegistrar::default();
    let calls = Arc::clone(&registrar.calls);
    let resp = app_with(registrar)
        .oneshot(register(&user(Some("Zaphod"), Some("zaphod@galaxy.net"))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (user, send_welcome_mail) = &calls[0];
    assert_eq!(user.name, "Zaphod");
    assert_eq!(user.email, "zaphod@galaxy.net");
    assert!(*send_welcome_mail);
}

#[tokio::test]
async fn null_name_returns_400_with_single_field_error() {
    let registrar = RecordingRegistrar::default();
    let calls = Arc::clone(&registrar.calls);
    let resp = app_with(registrar)
        .oneshot(register(&user(None, Some("zaphod@galaxy.net"))))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let errors: ErrorResult = body_json(resp).await;
    let matching: Vec<_> = errors
        .field_errors
        .iter()
        .filter(|e| **e == must_not_be_null("name"))
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(errors.field_errors.len(), 1);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn null_name_and_email_returns_both_errors() {
    let resp = app_with(RecordingRegistrar::default())
        .oneshot(register(&user(None, None)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let errors: ErrorResult = body_json(resp).await;
    let mut actual = errors.field_errors;
    actual.sort_by(|a, b| a.field.cmp(&b.field));
    assert_eq!(
        actual,
        vec![must_not_be_null("email"), must_not_be_null("name")]
    );
}

#[tokio::test]
async fn missing_welcome_mail_flag_defaults_to_false() {
    let registrar = RecordingRegistrar::default();
    let calls = Arc::clone(&registrar.calls);
    let resp = app_with(registrar)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/forums/42/register")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(user(Some("Arthur"), Some("arthur@earth.net")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!calls.lock().unwrap()[0].1);
}
