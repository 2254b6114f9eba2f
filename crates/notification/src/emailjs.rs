//! Lead delivery through the EmailJS REST API.

use std::time::Duration;

use async_trait::async_trait;
use reignivy_lead::{DeliveryClient, DeliveryTarget, TemplateParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct EmailJsConfig {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: String::new(),
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.emailjs.com".to_string()
}

#[derive(Serialize, Debug)]
pub struct SendRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<&'a str>,
    pub template_params: &'a TemplateParams,
}

#[derive(Clone)]
pub struct EmailJs {
    config: EmailJsConfig,
    client: reqwest::Client,
}

impl EmailJs {
    pub fn new(config: EmailJsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v1.0/email/send",
            self.config.api_url.trim_end_matches('/')
        )
    }

    pub fn request<'a>(
        &'a self,
        target: &'a DeliveryTarget,
        params: &'a TemplateParams,
    ) -> SendRequest<'a> {
        SendRequest {
            service_id: &target.service_id,
            template_id: &target.template_id,
            user_id: &self.config.public_key,
            access_token: Some(self.config.private_key.as_str()).filter(|k| !k.is_empty()),
            template_params: params,
        }
    }
}

#[async_trait]
impl DeliveryClient for EmailJs {
    #[tracing::instrument(skip_all, fields(service_id = %target.service_id, template_id = %target.template_id))]
    async fn send(&self, target: &DeliveryTarget, params: &TemplateParams) -> anyhow::Result<()> {
        tracing::info!("Sending lead through EmailJS");

        let response = self
            .client
            .post(self.endpoint())
            .json(&self.request(target, params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("EmailJS responded with {status}: {body}");
        }

        Ok(())
    }
}
