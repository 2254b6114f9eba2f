//! reCAPTCHA v3 challenge provider.
//!
//! The browser runs the invisible challenge and posts the token along with
//! the form. On the server that token is what the forms "execute" against,
//! optionally verified with Google's `siteverify` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reignivy_lead::{ChallengeProvider, ChallengeToken};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RecaptchaConfig {
    #[serde(default)]
    pub site_key: String,
    /// Verification is skipped when empty.
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_min_score")]
    pub min_score: f32,
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            site_key: String::new(),
            secret_key: String::new(),
            min_score: default_min_score(),
            verify_url: default_verify_url(),
        }
    }
}

fn default_min_score() -> f32 {
    0.5
}

fn default_verify_url() -> String {
    "https://www.google.com/recaptcha/api/siteverify".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteVerifyResponse {
    pub success: bool,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,
}

impl SiteVerifyResponse {
    pub fn accepts(&self, action: &str, min_score: f32) -> bool {
        if !self.success {
            return false;
        }

        if self.action.as_deref().is_some_and(|a| a != action) {
            return false;
        }

        self.score.is_none_or(|score| score >= min_score)
    }
}

#[derive(Clone)]
pub struct Recaptcha {
    config: RecaptchaConfig,
    client: reqwest::Client,
}

impl Recaptcha {
    pub fn new(config: RecaptchaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();

        if config.secret_key.is_empty() {
            tracing::warn!("reCAPTCHA secret not configured, tokens are accepted unverified");
        }

        Self { config, client }
    }

    pub fn site_key(&self) -> &str {
        &self.config.site_key
    }

    /// Challenge provider answering with the token posted by the browser.
    pub fn for_submission(&self, token: impl Into<String>) -> SubmittedChallenge {
        SubmittedChallenge {
            recaptcha: self.clone(),
            token: token.into(),
        }
    }

    pub async fn verify(&self, token: &str) -> anyhow::Result<SiteVerifyResponse> {
        let response = self
            .client
            .post(&self.config.verify_url)
            .form(&[
                ("secret", self.config.secret_key.as_str()),
                ("response", token),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<SiteVerifyResponse>()
            .await?;

        Ok(response)
    }
}

pub struct SubmittedChallenge {
    recaptcha: Recaptcha,
    token: String,
}

#[async_trait]
impl ChallengeProvider for SubmittedChallenge {
    fn is_ready(&self) -> bool {
        !self.recaptcha.config.site_key.is_empty()
    }

    async fn execute(&self, action: &str) -> anyhow::Result<Option<ChallengeToken>> {
        let token = self.token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        if self.recaptcha.config.secret_key.is_empty() {
            return Ok(Some(ChallengeToken::new(token)));
        }

        let response = self.recaptcha.verify(token).await?;
        if !response.accepts(action, self.recaptcha.config.min_score) {
            tracing::warn!(
                action,
                reported_action = response.action.as_deref().unwrap_or_default(),
                score = response.score.unwrap_or_default(),
                errors = ?response.error_codes,
                "reCAPTCHA token rejected"
            );

            return Ok(None);
        }

        Ok(Some(ChallengeToken::new(token)))
    }
}
