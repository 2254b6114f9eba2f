use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::FormFields;

/// Opaque anti-automation token, never interpreted by the forms.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct ChallengeToken(String);

impl ChallengeToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issues a challenge token for a named action.
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// False when the provider cannot be used at all (not loaded, no site key).
    fn is_ready(&self) -> bool;

    async fn execute(&self, action: &str) -> anyhow::Result<Option<ChallengeToken>>;
}

/// Service/template pair the delivery provider routes a lead with.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DeliveryTarget {
    pub service_id: String,
    pub template_id: String,
}

/// Exactly the values handed to the delivery provider.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TemplateParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub membership: String,
    pub message: String,
    #[serde(rename = "g-recaptcha-response")]
    pub challenge: ChallengeToken,
}

impl TemplateParams {
    pub fn new(fields: &FormFields, challenge: ChallengeToken) -> Self {
        Self {
            name: fields.name.to_owned(),
            email: fields.email.to_owned(),
            phone: fields.phone.to_owned(),
            membership: fields.membership.to_owned(),
            message: fields.message.to_owned(),
            challenge,
        }
    }
}

/// Dispatches a captured lead as an email.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn send(&self, target: &DeliveryTarget, params: &TemplateParams) -> anyhow::Result<()>;
}
