use std::{sync::Arc, time::Duration};

use reignivy_lead::{
    CHALLENGE_FAILED_MESSAGE, FormFields, FormOptions, Notifier, SubmissionState, SubmitOutcome,
};
use reignivy_shared::{ErrorKind, lead::Field};

mod helpers;

use helpers::{FakeChallenge, PendingDelivery, RecordingDelivery};

#[tokio::test]
async fn test_empty_invitation_submit_surfaces_every_required_error() {
    let challenge = FakeChallenge::with_token("mock-token");
    let delivery = RecordingDelivery::ok();
    let notifier = Notifier::new();
    let mut form = helpers::controller(
        FormOptions::invitation(helpers::target()),
        challenge.clone(),
        delivery.clone(),
        notifier.clone(),
    );

    assert_eq!(form.submit().await, SubmitOutcome::Invalid);
    assert_eq!(form.state(), SubmissionState::Idle);

    let errors = form.errors();
    assert_eq!(errors.get(Field::Name), Some("Full name is required"));
    assert_eq!(errors.get(Field::Email), Some("Email is required"));
    assert_eq!(errors.get(Field::Phone), Some("Phone number is required"));
    assert_eq!(
        errors.get(Field::Membership),
        Some("Please select a membership plan")
    );
    assert_eq!(
        errors.get(Field::Message),
        Some("Message must be at least 10 characters")
    );
    assert_eq!(errors.root(), None);

    assert_eq!(challenge.calls(), 0);
    assert!(delivery.sent().is_empty());
    assert!(!notifier.banner().visible);
}

#[tokio::test]
async fn test_empty_contact_submit_has_no_membership_error() {
    let mut form = helpers::controller(
        FormOptions::contact(helpers::target()),
        FakeChallenge::with_token("mock-token"),
        RecordingDelivery::ok(),
        Notifier::new(),
    );

    assert_eq!(form.submit().await, SubmitOutcome::Invalid);

    let errors = form.errors();
    assert_eq!(errors.invalid_count(), 4);
    assert_eq!(errors.get(Field::Membership), None);
    assert_eq!(errors.get(Field::Name), Some("Full name is required"));
    assert_eq!(errors.get(Field::Email), Some("Email is required"));
    assert_eq!(errors.get(Field::Phone), Some("Phone number is required"));
    assert_eq!(
        errors.get(Field::Message),
        Some("Message must be at least 10 characters")
    );
}

#[tokio::test]
async fn test_successful_submit_delivers_once_and_resets() {
    let challenge = FakeChallenge::with_token("mock-token");
    let delivery = RecordingDelivery::ok();
    let notifier = Notifier::new();
    let mut form = helpers::controller(
        FormOptions::invitation(helpers::target()),
        challenge.clone(),
        delivery.clone(),
        notifier.clone(),
    );
    helpers::fill(&mut form);

    assert_eq!(form.submit().await, SubmitOutcome::Sent);

    let sent = delivery.sent();
    assert_eq!(sent.len(), 1);

    let (target, params) = &sent[0];
    assert_eq!(target, &helpers::target());
    assert_eq!(params.name, "Jane Doe");
    assert_eq!(params.email, "jane.doe@example.com");
    assert_eq!(params.phone, "+447946000000");
    assert_eq!(params.membership, "bespoke");
    assert_eq!(params.message, "Please arrange a private tour.");
    assert_eq!(params.challenge.as_str(), "mock-token");

    assert_eq!(
        *challenge.actions.lock().unwrap(),
        vec!["submit_modal".to_owned()]
    );

    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(form.fields(), &FormFields::default());
    assert!(form.errors().has_no_errors());

    let banner = notifier.banner();
    assert!(banner.visible);
    assert_eq!(
        banner.message,
        "Your request was sent successfully! You should hear from us soon."
    );
}

#[tokio::test]
async fn test_contact_submit_keeps_fixed_membership() {
    let challenge = FakeChallenge::with_token("contact-token");
    let delivery = RecordingDelivery::ok();
    let mut form = helpers::controller(
        FormOptions::contact(helpers::target()),
        challenge.clone(),
        delivery.clone(),
        Notifier::new(),
    );
    helpers::fill(&mut form);

    assert_eq!(form.fields().membership, "consultation");
    assert_eq!(form.submit().await, SubmitOutcome::Sent);

    let sent = delivery.sent();
    assert_eq!(sent[0].1.membership, "consultation");
    assert_eq!(
        *challenge.actions.lock().unwrap(),
        vec!["submit_contact".to_owned()]
    );

    assert_eq!(form.fields().membership, "consultation");
    assert_eq!(form.fields().name, "");
    assert_eq!(
        form.notifier().banner().message,
        "Your message was sent successfully! You should hear from us soon."
    );
}

#[tokio::test]
async fn test_delivery_failure_keeps_values() {
    let notifier = Notifier::new();
    let mut form = helpers::controller(
        FormOptions::invitation(helpers::target()),
        FakeChallenge::with_token("mock-token"),
        RecordingDelivery::failing(),
        notifier.clone(),
    );
    helpers::fill(&mut form);
    let before = form.fields().clone();

    assert_eq!(
        form.submit().await,
        SubmitOutcome::Failed(ErrorKind::DeliveryFailed)
    );
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(form.fields(), &before);
    assert_eq!(
        form.errors().root(),
        Some("There was a problem sending your request. Please try again.")
    );
    assert!(form.errors().is_valid());
    assert!(!notifier.banner().visible);
}

#[tokio::test]
async fn test_missing_token_never_reaches_delivery() {
    let delivery = RecordingDelivery::ok();
    let mut form = helpers::controller(
        FormOptions::contact(helpers::target()),
        FakeChallenge::without_token(),
        delivery.clone(),
        Notifier::new(),
    );
    helpers::fill(&mut form);

    assert_eq!(
        form.submit().await,
        SubmitOutcome::Failed(ErrorKind::ChallengeFailed)
    );
    assert_eq!(form.errors().root(), Some(CHALLENGE_FAILED_MESSAGE));
    assert!(delivery.sent().is_empty());
    assert_eq!(form.fields().name, "Jane Doe");
}

#[tokio::test]
async fn test_unavailable_challenge() {
    let cases = [
        (
            FormOptions::invitation(helpers::target()),
            "There was a problem sending your request. Please try again.",
        ),
        (
            FormOptions::contact(helpers::target()),
            CHALLENGE_FAILED_MESSAGE,
        ),
    ];

    for (options, root) in cases {
        let challenge = FakeChallenge::unavailable();
        let delivery = RecordingDelivery::ok();
        let mut form = helpers::controller(
            options,
            challenge.clone(),
            delivery.clone(),
            Notifier::new(),
        );
        helpers::fill(&mut form);

        assert_eq!(
            form.submit().await,
            SubmitOutcome::Failed(ErrorKind::ChallengeUnavailable)
        );
        assert_eq!(form.errors().root(), Some(root));
        assert_eq!(challenge.calls(), 0);
        assert!(delivery.sent().is_empty());
    }
}

#[tokio::test]
async fn test_challenge_error_is_a_delivery_failure() {
    let delivery = RecordingDelivery::ok();
    let mut form = helpers::controller(
        FormOptions::invitation(helpers::target()),
        FakeChallenge::failing(),
        delivery.clone(),
        Notifier::new(),
    );
    helpers::fill(&mut form);

    assert_eq!(
        form.submit().await,
        SubmitOutcome::Failed(ErrorKind::DeliveryFailed)
    );
    assert!(delivery.sent().is_empty());
}

#[tokio::test]
async fn test_root_error_cleared_on_next_submit() {
    let mut form = helpers::controller(
        FormOptions::invitation(helpers::target()),
        FakeChallenge::without_token(),
        RecordingDelivery::ok(),
        Notifier::new(),
    );
    helpers::fill(&mut form);

    form.submit().await;
    assert!(form.errors().root().is_some());

    form.set_field(Field::Email, "");
    assert_eq!(form.submit().await, SubmitOutcome::Invalid);
    assert_eq!(form.errors().root(), None);
    assert_eq!(form.errors().get(Field::Email), Some("Email is required"));
}

#[tokio::test]
async fn test_errors_only_change_on_validation() {
    let mut form = helpers::controller(
        FormOptions::invitation(helpers::target()),
        FakeChallenge::with_token("mock-token"),
        RecordingDelivery::ok(),
        Notifier::new(),
    );

    form.submit().await;
    assert_eq!(form.errors().invalid_count(), 5);

    form.set_field(Field::Name, "Jane Doe");
    assert_eq!(form.errors().get(Field::Name), Some("Full name is required"));

    assert!(!form.validate_all());
    assert_eq!(form.errors().get(Field::Name), None);
    assert_eq!(form.errors().invalid_count(), 4);
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let mut form = helpers::controller(
        FormOptions::contact(helpers::target()),
        FakeChallenge::with_token("mock-token"),
        RecordingDelivery::ok(),
        Notifier::new(),
    );
    helpers::fill(&mut form);
    form.set_field(Field::Email, "nope");
    form.submit().await;

    form.reset();
    let once = (form.fields().clone(), form.errors().clone(), form.state());

    form.reset();
    let twice = (form.fields().clone(), form.errors().clone(), form.state());

    assert_eq!(once, twice);
    assert_eq!(once.0.membership, "consultation");
    assert!(once.1.is_empty());
    assert_eq!(once.2, SubmissionState::Idle);
}

#[tokio::test]
async fn test_dropped_submit_returns_to_idle() {
    let delivery = Arc::new(PendingDelivery {
        calls: Default::default(),
    });
    let notifier = Notifier::new();
    let mut form = helpers::controller(
        FormOptions::invitation(helpers::target()),
        FakeChallenge::with_token("mock-token"),
        delivery.clone(),
        notifier.clone(),
    );
    helpers::fill(&mut form);

    let res = tokio::time::timeout(Duration::from_millis(20), form.submit()).await;
    assert!(res.is_err());

    assert_eq!(delivery.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(form.fields().name, "Jane Doe");
    assert!(!notifier.banner().visible);
}
