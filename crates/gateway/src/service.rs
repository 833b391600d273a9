use async_trait::async_trait;
use tracing::{info, warn};

use packfit_core::{LeadGateway, LeadSnapshot};

use crate::client::{GatewayClient, SubmitPayload};
use crate::fallback::{fallback_summary, local_reference};

/// Implements the core gateway port over a transport client. Single
/// attempt, immediate local fallback: the visitor always gets a summary and
/// a reference number, just a less personalized one when offline.
pub struct LeadGatewayService<C> {
    client: C,
}

impl<C> LeadGatewayService<C>
where
    C: GatewayClient,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C> LeadGateway for LeadGatewayService<C>
where
    C: GatewayClient,
{
    async fn analyze(&self, snapshot: &LeadSnapshot) -> String {
        let prompt = build_analysis_prompt(snapshot);
        match self.client.analyze(&prompt).await {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) => {
                warn!("gateway returned an empty summary; using local fallback");
                fallback_summary(snapshot)
            }
            Err(error) => {
                warn!(%error, "analysis call failed; using local fallback");
                fallback_summary(snapshot)
            }
        }
    }

    async fn submit(&self, snapshot: &LeadSnapshot, summary: &str) -> String {
        let payload = SubmitPayload::from_snapshot(snapshot, summary);
        match self.client.submit(&payload).await {
            Ok(reference) if !reference.trim().is_empty() => {
                info!(%reference, "lead stored remotely");
                reference
            }
            Ok(_) => {
                warn!("gateway returned an empty reference; minting a local one");
                local_reference()
            }
            Err(error) => {
                warn!(%error, "submission call failed; minting a local reference");
                local_reference()
            }
        }
    }
}

/// Prompt for the remote analysis model: contact, answers, selection and
/// pricing, rendered as labelled lines.
fn build_analysis_prompt(snapshot: &LeadSnapshot) -> String {
    let mut lines = vec![
        "Write a short, friendly summary of the recommended automation package.".to_owned(),
        format!("Language: {}", snapshot.language),
        format!("Company: {}", snapshot.contact.company),
    ];

    for (question, answer) in snapshot.answers.iter() {
        let rendered = match answer.as_scalar() {
            Some(value) => value.to_owned(),
            None => answer.as_many().join(", "),
        };
        lines.push(format!("{question}: {rendered}"));
    }

    lines.push(format!(
        "Selected automations: {}",
        snapshot
            .selected
            .iter()
            .map(|offering| offering.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    lines.push(format!(
        "Pricing: {} setup, {} per month ({} billing, {} items, discount rate {})",
        snapshot.pricing.total_setup,
        snapshot.pricing.monthly_final,
        snapshot.billing.as_str(),
        snapshot.pricing.count,
        snapshot.pricing.discount_rate,
    ));

    lines.join("\n")
}
