//! Summary & submission gateway for the discovery wizard.
//!
//! Talks to the remote analysis/storage endpoint and guarantees the flow
//! never stalls on it:
//! - **Analysis** (`service`) - ask the remote for a tailored summary; on
//!   any transport or status failure, synthesize one locally from the
//!   selection and pricing.
//! - **Submission** (`service`) - store the lead remotely and return its
//!   reference number; on failure, mint a local reference of the same
//!   lexical shape.
//!
//! Both operations are single-attempt with immediate fallback, never
//! retried, and fire once per flow (the wizard reducer guards re-entry).
//!
//! # Key Types
//!
//! - `GatewayClient` - pluggable transport trait (see `client`)
//! - `HttpGatewayClient` - reqwest implementation of the wire contract
//! - `LeadGatewayService` - implements the core `LeadGateway` port with the
//!   fallback policy (see `service`)

pub mod client;
pub mod fallback;
pub mod service;

pub use client::{
    AnalyzeResponse, GatewayClient, GatewayRequest, HttpGatewayClient, PricingPayload,
    SubmitPayload, SubmitResponse,
};
pub use fallback::{fallback_summary, is_reference_shaped, local_reference, REFERENCE_PREFIX};
pub use service::LeadGatewayService;
