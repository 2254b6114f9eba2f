use std::sync::Arc;

use reignivy_shared::{Error, ErrorKind, lead::Field, lead::Membership};
use strum::{AsRefStr, Display};

use crate::{
    ChallengeProvider, DeliveryClient, DeliveryTarget, FieldErrors, FormFields, Notifier,
    submit_lead, validate_fields,
};

pub const CHALLENGE_FAILED_MESSAGE: &str = "reCAPTCHA verification failed. Please try again.";

#[derive(Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;

        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Sending)
                | (Sending, Succeeded)
                | (Sending, Failed)
                | (Sending, Idle)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; inline errors are set.
    Invalid,
    /// The lead was delivered and the form reset.
    Sent,
    /// Submission failed; the root error is set and values are kept.
    Failed(ErrorKind),
}

/// What distinguishes one lead form from another.
#[derive(Clone, Debug)]
pub struct FormOptions {
    /// Action label the challenge token is scoped to.
    pub action: &'static str,
    /// Fields pre-seeded with a constant and not editable by the visitor.
    pub fixed: Vec<(Field, String)>,
    pub success_message: &'static str,
    pub failure_message: &'static str,
    /// Root message when the challenge provider cannot be used at all.
    pub unavailable_message: &'static str,
    pub target: DeliveryTarget,
}

impl FormOptions {
    pub fn invitation(target: DeliveryTarget) -> Self {
        Self {
            action: "submit_modal",
            fixed: vec![],
            success_message: "Your request was sent successfully! You should hear from us soon.",
            failure_message: "There was a problem sending your request. Please try again.",
            unavailable_message: "There was a problem sending your request. Please try again.",
            target,
        }
    }

    pub fn contact(target: DeliveryTarget) -> Self {
        Self {
            action: "submit_contact",
            fixed: vec![(Field::Membership, Membership::Consultation.to_string())],
            success_message: "Your message was sent successfully! You should hear from us soon.",
            failure_message: "There was a problem sending your message. Please try again.",
            unavailable_message: CHALLENGE_FAILED_MESSAGE,
            target,
        }
    }

    pub fn is_fixed(&self, field: Field) -> bool {
        self.fixed.iter().any(|(f, _)| *f == field)
    }

    pub fn defaults(&self) -> FormFields {
        let mut fields = FormFields::default();
        for (field, value) in self.fixed.iter() {
            fields.set(*field, value.to_owned());
        }

        fields
    }

    fn root_message(&self, err: &Error) -> &'static str {
        match err {
            Error::ChallengeFailed => CHALLENGE_FAILED_MESSAGE,
            Error::ChallengeUnavailable => self.unavailable_message,
            _ => self.failure_message,
        }
    }
}

/// Puts the controller back to `Idle` if a send is dropped before it settles.
struct SendingGuard<'a> {
    state: &'a mut SubmissionState,
    armed: bool,
}

impl<'a> SendingGuard<'a> {
    fn new(state: &'a mut SubmissionState) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed && *self.state == SubmissionState::Sending {
            tracing::warn!("Submission cancelled before it settled");
            *self.state = SubmissionState::Idle;
        }
    }
}

pub struct FormController {
    options: FormOptions,
    fields: FormFields,
    errors: FieldErrors,
    state: SubmissionState,
    challenge: Arc<dyn ChallengeProvider>,
    delivery: Arc<dyn DeliveryClient>,
    notifier: Notifier,
}

impl FormController {
    pub fn new(
        options: FormOptions,
        challenge: Arc<dyn ChallengeProvider>,
        delivery: Arc<dyn DeliveryClient>,
        notifier: Notifier,
    ) -> Self {
        Self {
            fields: options.defaults(),
            options,
            errors: FieldErrors::default(),
            state: SubmissionState::Idle,
            challenge,
            delivery,
            notifier,
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Stores a value without validating it. Fixed fields ignore the call.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if self.options.is_fixed(field) {
            tracing::debug!(field = %field, "Ignoring value for fixed field");
            return;
        }

        self.fields.set(field, value);
    }

    pub fn validate_all(&mut self) -> bool {
        self.errors.replace_fields(validate_fields(&self.fields));
        self.errors.is_valid()
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.errors.clear_root();
        self.transition(SubmissionState::Validating);

        if !self.validate_all() {
            tracing::info!(
                action = self.options.action,
                invalid = self.errors.invalid_count(),
                "Form validation failed"
            );
            self.transition(SubmissionState::Idle);

            return SubmitOutcome::Invalid;
        }

        self.transition(SubmissionState::Sending);

        let guard = SendingGuard::new(&mut self.state);
        let result = submit_lead(
            self.challenge.as_ref(),
            self.delivery.as_ref(),
            self.options.action,
            &self.options.target,
            &self.fields,
        )
        .await;
        guard.disarm();

        match result {
            Ok(_) => {
                self.transition(SubmissionState::Succeeded);
                self.notifier.show(self.options.success_message);
                self.reset();

                SubmitOutcome::Sent
            }
            Err(err) => {
                let kind = err.kind();
                match kind {
                    ErrorKind::ChallengeFailed => {
                        tracing::warn!(action = self.options.action, "{err}")
                    }
                    _ => tracing::error!(action = self.options.action, kind = %kind, "{err}"),
                }

                self.transition(SubmissionState::Failed);
                self.errors.set_root(self.options.root_message(&err));
                self.transition(SubmissionState::Idle);

                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// Back to the form defaults with no errors. Idempotent.
    pub fn reset(&mut self) {
        self.fields = self.options.defaults();
        self.errors.clear();
        self.state = SubmissionState::Idle;
    }

    fn transition(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!(from = %self.state, to = %next, "Submission state");
        self.state = next;
    }
}
