use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use packfit_core::{Contact, GatewayConfig, LeadSnapshot};

/// Wire request for the single gateway endpoint, discriminated by `action`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum GatewayRequest {
    Analyze { prompt: String },
    Submit(SubmitPayload),
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    pub contact: Contact,
    pub answers: serde_json::Value,
    pub selected_automations: Vec<String>,
    pub ai_summary: String,
    pub pricing: PricingPayload,
    pub language: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPayload {
    pub total_setup: Decimal,
    pub monthly_final: Decimal,
    pub billing: String,
    pub count: usize,
    pub discount_rate: Decimal,
}

impl SubmitPayload {
    pub fn from_snapshot(snapshot: &LeadSnapshot, summary: &str) -> Self {
        Self {
            contact: snapshot.contact.clone(),
            answers: serde_json::to_value(&snapshot.answers)
                .unwrap_or(serde_json::Value::Null),
            selected_automations: snapshot
                .selected
                .iter()
                .map(|offering| offering.name.clone())
                .collect(),
            ai_summary: summary.to_owned(),
            pricing: PricingPayload {
                total_setup: snapshot.pricing.total_setup,
                monthly_final: snapshot.pricing.monthly_final,
                billing: snapshot.billing.as_str().to_owned(),
                count: snapshot.pricing.count,
                discount_rate: snapshot.pricing.discount_rate,
            },
            language: snapshot.language.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub summary: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SubmitResponse {
    #[serde(rename = "refNumber")]
    pub ref_number: String,
}

/// Transport over the gateway endpoint. The service layer owns the fallback
/// policy; implementations just succeed or fail.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn analyze(&self, prompt: &str) -> Result<String>;
    async fn submit(&self, payload: &SubmitPayload) -> Result<String>;
}

/// reqwest-backed client for the gateway HTTP contract. Any non-2xx status
/// is an error; retries are deliberately absent.
pub struct HttpGatewayClient {
    client: Client,
    endpoint: String,
    auth_token: Option<SecretString>,
}

impl HttpGatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building gateway http client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    async fn post(&self, body: &GatewayRequest) -> Result<reqwest::Response> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token.expose_secret());
        }
        let response = request.send().await.context("gateway request failed")?;
        response.error_for_status().context("gateway returned an error status")
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn analyze(&self, prompt: &str) -> Result<String> {
        let request = GatewayRequest::Analyze { prompt: prompt.to_owned() };
        let response = self.post(&request).await?;
        let parsed: AnalyzeResponse =
            response.json().await.context("decoding analyze response")?;
        Ok(parsed.summary)
    }

    async fn submit(&self, payload: &SubmitPayload) -> Result<String> {
        let request = GatewayRequest::Submit(payload.clone());
        let response = self.post(&request).await?;
        let parsed: SubmitResponse =
            response.json().await.context("decoding submit response")?;
        Ok(parsed.ref_number)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{GatewayRequest, PricingPayload, SubmitPayload};

    #[test]
    fn analyze_request_carries_the_action_tag() {
        let request = GatewayRequest::Analyze { prompt: "describe the lead".to_owned() };
        let json = serde_json::to_value(&request).expect("serialize");

        assert_eq!(json["action"], "analyze");
        assert_eq!(json["prompt"], "describe the lead");
    }

    #[test]
    fn submit_request_uses_the_camel_case_contract() {
        let request = GatewayRequest::Submit(SubmitPayload {
            contact: packfit_core::Contact::default(),
            answers: serde_json::json!({"industry": "Dental"}),
            selected_automations: vec!["Call Desk".to_owned()],
            ai_summary: "summary".to_owned(),
            pricing: PricingPayload {
                total_setup: Decimal::new(49_900, 2),
                monthly_final: Decimal::new(14_900, 2),
                billing: "annual".to_owned(),
                count: 1,
                discount_rate: Decimal::ZERO,
            },
            language: "en".to_owned(),
        });
        let json = serde_json::to_value(&request).expect("serialize");

        assert_eq!(json["action"], "submit");
        assert_eq!(json["selectedAutomations"][0], "Call Desk");
        assert_eq!(json["aiSummary"], "summary");
        assert_eq!(json["pricing"]["totalSetup"], serde_json::json!("499.00"));
        assert_eq!(json["pricing"]["discountRate"], serde_json::json!("0"));
        assert_eq!(json["language"], "en");
    }

    #[test]
    fn submit_response_reads_ref_number() {
        let parsed: super::SubmitResponse =
            serde_json::from_str(r#"{"refNumber": "AIQ-REMOTE01"}"#).expect("parse");
        assert_eq!(parsed.ref_number, "AIQ-REMOTE01");
    }
}
