//! Resumable wizard snapshot persisted by the draft store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::contact::Contact;
use crate::domain::questionnaire::AnswerSet;
use crate::pricing::BillingMode;
use crate::wizard::states::Phase;

/// Snapshot of in-progress wizard state, JSON-serialized under one fixed
/// storage key. Overwritten on every mutation between the questionnaire and
/// booking phases, deleted at confirmation or explicit discard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub session_id: Uuid,
    pub contact: Contact,
    pub answers: AnswerSet,
    pub step: usize,
    pub phase: Phase,
    pub selected_offering_names: Vec<String>,
    pub billing_mode: BillingMode,
    pub saved_at: DateTime<Utc>,
}

impl SessionDraft {
    /// A draft is worth a resume prompt when the visitor already identified
    /// themselves and the flow is strictly between intake and confirmation.
    pub fn is_resumable(&self) -> bool {
        !self.contact.email.trim().is_empty()
            && self.phase > Phase::Intake
            && self.phase < Phase::Confirmation
    }
}
