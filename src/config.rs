use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use reignivy_captcha::RecaptchaConfig;
use reignivy_lead::DeliveryTarget;
use reignivy_notification::{EmailJsConfig, SmtpConfig};
use serde::Deserialize;
use std::env;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub business: BusinessConfig,
    #[serde(default)]
    pub recaptcha: RecaptchaConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Display metadata rendered on the page. Never interpreted.
#[derive(Debug, Deserialize, Clone)]
pub struct BusinessConfig {
    #[serde(default = "default_business_name")]
    pub name: String,
    #[serde(default = "default_business_logo")]
    pub logo: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: default_business_name(),
            logo: default_business_logo(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
        }
    }
}

fn default_business_name() -> String {
    "Reign Ivy".to_string()
}

fn default_business_logo() -> String {
    "/static/images/logo.svg".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryBackend {
    #[default]
    EmailJs,
    Smtp,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DeliveryConfig {
    #[serde(default)]
    pub backend: DeliveryBackend,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub emailjs: EmailJsConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl DeliveryConfig {
    pub fn target(&self) -> DeliveryTarget {
        DeliveryTarget {
            service_id: self.service_id.to_owned(),
            template_id: self.template_id.to_owned(),
        }
    }
}

/// Unprefixed variables kept from the static-site deployment.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("RECAPTCHA_SITE_KEY", "recaptcha.site_key"),
    ("RECAPTCHA_SECRET_KEY", "recaptcha.secret_key"),
    ("EMAILJS_SERVICE_ID", "delivery.service_id"),
    ("EMAILJS_TEMPLATE_ID", "delivery.template_id"),
    ("EMAILJS_PUBLIC_KEY", "delivery.emailjs.public_key"),
    ("BUSINESS_NAME", "business.name"),
    ("BUSINESS_LOGO", "business.logo"),
    ("BUSINESS_EMAIL", "business.email"),
    ("BUSINESS_PHONE", "business.phone"),
    ("BUSINESS_ADDRESS", "business.address"),
    ("BUSINESS_CITY", "business.city"),
    ("BUSINESS_COUNTRY", "business.country"),
];

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (RECAPTCHA_SITE_KEY, BUSINESS_NAME, etc.)
    /// 2. Environment variables (REIGNIVY__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("REIGNIVY")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in LEGACY_ENV {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.recaptcha.min_score) {
            return Err("reCAPTCHA min_score must be between 0 and 1".to_string());
        }
        if self.delivery.backend == DeliveryBackend::EmailJs
            && self.delivery.emailjs.public_key.is_empty()
        {
            return Err("EmailJS delivery requires delivery.emailjs.public_key".to_string());
        }
        Ok(())
    }
}
