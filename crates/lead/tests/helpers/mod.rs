use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use reignivy_lead::{
    ChallengeProvider, ChallengeToken, DeliveryClient, DeliveryTarget, FormController,
    FormOptions, Notifier, TemplateParams,
};
use reignivy_shared::lead::Field;

#[derive(Default)]
pub struct FakeChallenge {
    pub ready: bool,
    pub token: Option<String>,
    pub fail: bool,
    pub actions: Mutex<Vec<String>>,
}

impl FakeChallenge {
    pub fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self {
            ready: true,
            token: Some(token.to_owned()),
            ..Default::default()
        })
    }

    #[allow(dead_code)]
    pub fn without_token() -> Arc<Self> {
        Arc::new(Self {
            ready: true,
            ..Default::default()
        })
    }

    #[allow(dead_code)]
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            ready: true,
            fail: true,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.actions.lock().unwrap().len()
    }
}

#[async_trait]
impl ChallengeProvider for FakeChallenge {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn execute(&self, action: &str) -> anyhow::Result<Option<ChallengeToken>> {
        self.actions.lock().unwrap().push(action.to_owned());

        if self.fail {
            anyhow::bail!("challenge script crashed");
        }

        Ok(self.token.as_deref().map(ChallengeToken::new))
    }
}

#[derive(Default)]
pub struct RecordingDelivery {
    pub fail: bool,
    pub sent: Mutex<Vec<(DeliveryTarget, TemplateParams)>>,
}

impl RecordingDelivery {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
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

/// Never settles, to exercise cancellation.
#[allow(dead_code)]
pub struct PendingDelivery {
    pub calls: AtomicUsize,
}

#[async_trait]
impl DeliveryClient for PendingDelivery {
    async fn send(&self, _target: &DeliveryTarget, _params: &TemplateParams) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        futures::future::pending::<()>().await;

        Ok(())
    }
}

pub fn target() -> DeliveryTarget {
    DeliveryTarget {
        service_id: "service_test".to_owned(),
        template_id: "template_test".to_owned(),
    }
}

pub fn controller(
    options: FormOptions,
    challenge: Arc<dyn ChallengeProvider>,
    delivery: Arc<dyn DeliveryClient>,
    notifier: Notifier,
) -> FormController {
    FormController::new(options, challenge, delivery, notifier)
}

pub fn fill(controller: &mut FormController) {
    controller.set_field(Field::Name, "Jane Doe");
    controller.set_field(Field::Email, "jane.doe@example.com");
    controller.set_field(Field::Phone, "+447946000000");
    controller.set_field(Field::Membership, "bespoke");
    controller.set_field(Field::Message, "Please arrange a private tour.");
}
