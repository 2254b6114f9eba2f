//! Router setup shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use reignivy::{
    AppState,
    config::{
        BusinessConfig, Config, DeliveryBackend, DeliveryConfig, ObservabilityConfig,
        ServerConfig,
    },
};
use reignivy_captcha::{Recaptcha, RecaptchaConfig};
use reignivy_lead::{DeliveryClient, DeliveryTarget, TemplateParams};
use tower::ServiceExt;

#[derive(Default)]
pub struct RecordingDelivery {
    pub fail: bool,
    pub sent: Mutex<Vec<(DeliveryTarget, TemplateParams)>>,
}

impl RecordingDelivery {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn sent(&self) -> Vec<(DeliveryTarget, TemplateParams)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryClient for RecordingDelivery {
    async fn send(&self, target: &DeliveryTarget, params: &TemplateParams) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("delivery provider returned 500");
        }

        self.sent
            .lock()
            .unwrap()
            .push((target.clone(), params.clone()));

        Ok(())
    }
}

pub fn config(site_key: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        observability: ObservabilityConfig::default(),
        business: BusinessConfig::default(),
        recaptcha: RecaptchaConfig {
            site_key: site_key.to_owned(),
            ..Default::default()
        },
        delivery: DeliveryConfig {
            backend: DeliveryBackend::Smtp,
            service_id: "service_test".to_owned(),
            template_id: "template_test".to_owned(),
            ..Default::default()
        },
    }
}

pub fn app_with(config: Config, delivery: Arc<RecordingDelivery>) -> Router {
    let recaptcha = Recaptcha::new(config.recaptcha.clone());

    reignivy::router(AppState {
        config,
        recaptcha,
        delivery,
    })
}

pub fn app(delivery: Arc<RecordingDelivery>) -> Router {
    app_with(config("test-key"), delivery)
}

pub async fn body_string(response: axum::response::Response) -> anyhow::Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn get(app: Router, uri: &str) -> anyhow::Result<(StatusCode, String)> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();

    Ok((status, body_string(response).await?))
}

pub async fn post_form(
    app: Router,
    uri: &str,
    form: &[(&str, &str)],
    htmx: bool,
) -> anyhow::Result<(StatusCode, String)> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if htmx {
        request = request.header("HX-Request", "true");
    }

    let response = app
        .oneshot(request.body(Body::from(serde_urlencoded::to_string(form)?))?)
        .await?;
    let status = response.status();

    Ok((status, body_string(response).await?))
}

pub fn invitation_form<'a>(token: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Jane Doe"),
        ("email", "jane@example.com"),
        ("phone", "07946 000000"),
        ("membership", "curated"),
        ("message", "I would love a private tour next week"),
        ("g-recaptcha-response", token),
    ]
}

pub fn contact_form<'a>(token: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "John Smith"),
        ("email", "john@example.com"),
        ("phone", "+447946000000"),
        ("membership", "bespoke"),
        ("message", "Can we arrange a consultation?"),
        ("g-recaptcha-response", token),
    ]
}
