use reignivy_shared::{Error, Result};
use validator::Validate;

use crate::{ChallengeProvider, DeliveryClient, DeliveryTarget, FormFields, TemplateParams};

/// Acquires a challenge token for `action` and hands the lead to the delivery
/// client. Steps run strictly in order and nothing is retried.
#[tracing::instrument(skip_all, fields(action = action, service_id = %target.service_id))]
pub async fn submit_lead(
    challenge: &dyn ChallengeProvider,
    delivery: &dyn DeliveryClient,
    action: &str,
    target: &DeliveryTarget,
    fields: &FormFields,
) -> Result<()> {
    fields.validate()?;

    if !challenge.is_ready() {
        return Err(Error::ChallengeUnavailable);
    }

    let Some(token) = challenge.execute(action).await.map_err(Error::Delivery)? else {
        return Err(Error::ChallengeFailed);
    };

    delivery
        .send(target, &TemplateParams::new(fields, token))
        .await
        .map_err(Error::Delivery)?;

    tracing::info!("Lead delivered");

    Ok(())
}
