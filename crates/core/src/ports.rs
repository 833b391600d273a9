//! Outbound ports. Adapter crates implement these; the core stays testable
//! with in-process stubs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::contact::Contact;
use crate::domain::offering::Offering;
use crate::domain::questionnaire::AnswerSet;
use crate::draft::SessionDraft;
use crate::errors::ApplicationError;
use crate::pricing::{BillingMode, PricingState};

/// Durable per-client draft storage under one fixed key. Last writer wins;
/// concurrent writers (e.g. a second tab) are an accepted hazard.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, draft: &SessionDraft) -> Result<(), ApplicationError>;
    /// Absent and unreadable drafts both load as `None`.
    async fn load(&self) -> Result<Option<SessionDraft>, ApplicationError>;
    async fn discard(&self) -> Result<(), ApplicationError>;
}

/// Everything the gateway needs to describe the lead.
#[derive(Clone, Debug, PartialEq)]
pub struct LeadSnapshot {
    pub contact: Contact,
    pub answers: AnswerSet,
    pub selected: Vec<Offering>,
    pub pricing: PricingState,
    pub billing: BillingMode,
    pub language: String,
}

/// Remote analysis and submission. Implementations absorb transport
/// failures behind deterministic fallbacks, so both operations are
/// infallible from the controller's point of view and are invoked exactly
/// once per flow (the reducer guards re-entry).
#[async_trait]
pub trait LeadGateway: Send + Sync {
    async fn analyze(&self, snapshot: &LeadSnapshot) -> String;
    async fn submit(&self, snapshot: &LeadSnapshot, summary: &str) -> String;
}

#[async_trait]
impl<T: LeadGateway + ?Sized> LeadGateway for Arc<T> {
    async fn analyze(&self, snapshot: &LeadSnapshot) -> String {
        (**self).analyze(snapshot).await
    }

    async fn submit(&self, snapshot: &LeadSnapshot, summary: &str) -> String {
        (**self).submit(snapshot, summary).await
    }
}
