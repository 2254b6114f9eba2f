use std::{str::FromStr, sync::Arc};

use axum::{Form, extract::State, response::IntoResponse};
use reignivy_lead::{
    FieldErrors, FormController, FormFields, FormOptions, NotificationBanner, Notifier,
};
use reignivy_shared::lead::{Field, Membership};
use serde::Deserialize;
use strum::VariantArray;

use crate::{routes::AppState, routes::index::IndexTemplate, template::Template};

/// Body posted by either lead form.
#[derive(Deserialize, Default, Debug)]
pub struct LeadInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub membership: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "g-recaptcha-response")]
    pub token: String,
}

/// What a form partial needs to redraw itself.
#[derive(Default, Clone, Debug)]
pub struct FormView {
    pub fields: FormFields,
    pub errors: FieldErrors,
}

impl FormView {
    pub fn new(options: &FormOptions) -> Self {
        Self {
            fields: options.defaults(),
            errors: FieldErrors::default(),
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        Field::from_str(field)
            .ok()
            .and_then(|field| self.errors.get(field))
    }

    pub fn root_error(&self) -> Option<&str> {
        self.errors.root()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.has_no_errors()
    }

    pub fn is_selected(&self, membership: &Membership) -> bool {
        self.fields.membership == membership.to_string()
    }

    pub fn memberships(&self) -> &'static [Membership] {
        Membership::VARIANTS
    }
}

impl From<&FormController> for FormView {
    fn from(controller: &FormController) -> Self {
        Self {
            fields: controller.fields().clone(),
            errors: controller.errors().clone(),
        }
    }
}

#[derive(askama::Template)]
#[template(path = "partials/invitation-response.html")]
pub struct InvitationResponseTemplate {
    pub invitation: FormView,
    pub toast: NotificationBanner,
    pub toast_timeout_ms: u128,
}

#[derive(askama::Template)]
#[template(path = "partials/contact-response.html")]
pub struct ContactResponseTemplate {
    pub contact: FormView,
    pub toast: NotificationBanner,
    pub toast_timeout_ms: u128,
}

struct Submitted {
    form: FormView,
    toast: NotificationBanner,
    toast_timeout_ms: u128,
}

#[tracing::instrument(skip_all, fields(action = options.action))]
async fn submit(app: &AppState, options: FormOptions, input: LeadInput) -> Submitted {
    let notifier = Notifier::new();
    let challenge = Arc::new(app.recaptcha.for_submission(input.token));
    let mut controller =
        FormController::new(options, challenge, app.delivery.clone(), notifier.clone());

    for (field, value) in [
        (Field::Name, input.name),
        (Field::Email, input.email),
        (Field::Phone, input.phone),
        (Field::Membership, input.membership),
        (Field::Message, input.message),
    ] {
        controller.set_field(field, value);
    }

    let outcome = controller.submit().await;
    tracing::info!(outcome = ?outcome, "Lead form submitted");

    Submitted {
        form: FormView::from(&controller),
        toast: notifier.banner(),
        toast_timeout_ms: notifier.remaining().map(|d| d.as_millis()).unwrap_or(0),
    }
}

pub async fn invitation(
    template: Template,
    State(app): State<AppState>,
    Form(input): Form<LeadInput>,
) -> impl IntoResponse {
    let options = FormOptions::invitation(app.config.delivery.target());
    let submitted = submit(&app, options, input).await;

    if template.is_htmx {
        return template.render(InvitationResponseTemplate {
            invitation: submitted.form,
            toast: submitted.toast,
            toast_timeout_ms: submitted.toast_timeout_ms,
        });
    }

    let mut page = IndexTemplate::new(&app);
    page.open_invitation = submitted.form.has_errors();
    page.invitation = submitted.form;
    page.toast = submitted.toast;
    page.toast_timeout_ms = submitted.toast_timeout_ms;

    template.render(page)
}

pub async fn contact(
    template: Template,
    State(app): State<AppState>,
    Form(input): Form<LeadInput>,
) -> impl IntoResponse {
    let options = FormOptions::contact(app.config.delivery.target());
    let submitted = submit(&app, options, input).await;

    if template.is_htmx {
        return template.render(ContactResponseTemplate {
            contact: submitted.form,
            toast: submitted.toast,
            toast_timeout_ms: submitted.toast_timeout_ms,
        });
    }

    let mut page = IndexTemplate::new(&app);
    page.contact = submitted.form;
    page.toast = submitted.toast;
    page.toast_timeout_ms = submitted.toast_timeout_ms;

    template.render(page)
}
