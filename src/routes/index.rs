use axum::{extract::State, response::IntoResponse};
use reignivy_lead::{FormOptions, NotificationBanner};

use crate::{
    config::BusinessConfig,
    routes::{AppState, FormView},
    template::Template,
};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub business: BusinessConfig,
    pub site_key: String,
    pub invitation: FormView,
    pub contact: FormView,
    /// Render the invitation dialog already open (no-script fallback).
    pub open_invitation: bool,
    pub toast: NotificationBanner,
    pub toast_timeout_ms: u128,
}

impl IndexTemplate {
    pub fn new(app: &AppState) -> Self {
        let target = app.config.delivery.target();

        Self {
            business: app.config.business.clone(),
            site_key: app.recaptcha.site_key().to_owned(),
            invitation: FormView::new(&FormOptions::invitation(target.clone())),
            contact: FormView::new(&FormOptions::contact(target)),
            open_invitation: false,
            toast: NotificationBanner::default(),
            toast_timeout_ms: 0,
        }
    }
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    template.render(IndexTemplate::new(&app))
}
