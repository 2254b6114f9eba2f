use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use reignivy_captcha::Recaptcha;
use reignivy_lead::DeliveryClient;

use crate::template::{NotFoundTemplate, Template};

mod health;
mod index;
mod lead;

pub use lead::{FormView, LeadInput};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub recaptcha: Recaptcha,
    pub delivery: Arc<dyn DeliveryClient>,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, template.render(NotFoundTemplate))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/invitation", post(lead::invitation))
        .route("/contact", post(lead::contact))
        .nest_service("/static", crate::assets::AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
