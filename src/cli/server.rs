use std::sync::Arc;

use anyhow::Result;
use reignivy_captcha::Recaptcha;
use reignivy_lead::DeliveryClient;
use reignivy_notification::{EmailJs, SmtpDelivery};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    config::{Config, DeliveryBackend, DeliveryConfig},
    routes::AppState,
};

/// Picks the configured delivery backend.
pub fn delivery_client(config: &DeliveryConfig) -> Result<Arc<dyn DeliveryClient>> {
    let client: Arc<dyn DeliveryClient> = match config.backend {
        DeliveryBackend::EmailJs => Arc::new(EmailJs::new(config.emailjs.clone())),
        DeliveryBackend::Smtp => Arc::new(SmtpDelivery::new(&config.smtp)?),
    };

    tracing::info!(backend = %config.backend, "Lead delivery configured");

    Ok(client)
}

pub fn app_state(config: Config) -> Result<AppState> {
    let delivery = delivery_client(&config.delivery)?;

    if config.recaptcha.site_key.is_empty() {
        tracing::warn!("reCAPTCHA site key missing, lead forms will refuse submissions");
    }
    if config.recaptcha.secret_key.is_empty() {
        tracing::warn!("reCAPTCHA secret key missing, tokens are forwarded unverified");
    }

    let recaptcha = Recaptcha::new(config.recaptcha.clone());

    Ok(AppState {
        config,
        recaptcha,
        delivery,
    })
}

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting reignivy server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let state = app_state(config)?;

    let app = crate::routes::router(state)
        .layer(axum::middleware::from_fn(
            crate::middleware::cache_control_middleware,
        ))
        // Minify HTML responses before compression
        .layer(axum::middleware::map_response(
            crate::middleware::minify_html_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
