//! Lead delivery over SMTP using lettre

use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport, message::MultiPart,
    transport::smtp::authentication::Credentials,
};
use reignivy_lead::{DeliveryClient, DeliveryTarget, TemplateParams};
use serde::Deserialize;

use crate::template::render_lead;

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_contact_address")]
    pub contact_address: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            contact_address: default_contact_address(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_address() -> String {
    "Reign Ivy <noreply@reignivy.localhost>".to_string()
}

fn default_contact_address() -> String {
    "concierge@reignivy.localhost".to_string()
}

/// Sends each lead to the concierge mailbox.
#[derive(Clone)]
pub struct SmtpDelivery {
    mailer: SmtpTransport,
    from: String,
    to: String,
}

impl SmtpDelivery {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "SMTP delivery initialized with authentication and TLS"
            );

            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from_address.clone(),
            to: config.contact_address.clone(),
        })
    }

    pub fn message(&self, target: &DeliveryTarget, params: &TemplateParams) -> anyhow::Result<Message> {
        let (html, plain) = render_lead(params)?;

        let message = Message::builder()
            .from(self.from.parse()?)
            .reply_to(params.email.parse()?)
            .to(self.to.parse()?)
            .subject(format!(
                "[{}] New enquiry from {}",
                target.template_id, params.name
            ))
            .multipart(MultiPart::alternative_plain_html(plain, html))?;

        Ok(message)
    }
}

#[async_trait]
impl DeliveryClient for SmtpDelivery {
    #[tracing::instrument(skip_all, fields(template_id = %target.template_id, membership = %params.membership))]
    async fn send(&self, target: &DeliveryTarget, params: &TemplateParams) -> anyhow::Result<()> {
        let message = self.message(target, params)?;
        let mailer = self.mailer.clone();

        tracing::info!("Sending lead email");

        tokio::task::spawn_blocking(move || mailer.send(&message)).await??;

        Ok(())
    }
}
