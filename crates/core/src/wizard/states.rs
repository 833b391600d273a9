use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::contact::{Contact, ContactField, FieldError};
use crate::domain::questionnaire::AnswerSet;
use crate::pricing::BillingMode;

/// Wizard phases in flow order. Strictly linear; the ordering derive backs
/// the draft resumability window.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Phase {
    Intake,
    Questionnaire,
    SelectionPricing,
    Generating,
    SummaryBooking,
    Confirmation,
}

/// Discrete user or controller action fed to the reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    ContactEdited { field: ContactField, value: String },
    ContactSubmitted,
    AnswerChanged { question_id: String, value: String },
    OptionToggled { question_id: String, option: String },
    NextQuestion,
    PrevQuestion,
    OfferingToggled { name: String },
    BillingModeChanged { mode: BillingMode },
    SelectionConfirmed,
    SummaryReady { summary: String },
    BookingConfirmed,
    SendWithoutBooking,
    SubmissionRecorded { reference: String },
    Restart,
}

/// Side effect the controller must execute after a transition commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    PersistDraft,
    DiscardDraft,
    RunAnalysis,
    SubmitLead,
}

/// Guard failure. Non-fatal by design: the host renders it inline and the
/// state is left untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("contact details are incomplete or invalid")]
    ContactInvalid(Vec<FieldError>),
    #[error("question `{question_id}` needs an answer before continuing")]
    QuestionIncomplete { question_id: String },
    #[error("select at least one offering to continue")]
    EmptySelection,
    #[error("offering `{name}` is not available for the chosen industry")]
    UnknownOffering { name: String },
    #[error("event {event:?} does not apply in phase {phase:?}")]
    UnsupportedEvent { phase: Phase, event: WizardEvent },
}

/// Full wizard state. Only the reducer produces new values of this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub session_id: Uuid,
    pub phase: Phase,
    pub contact: Contact,
    pub answers: AnswerSet,
    pub step: usize,
    pub selection: Vec<String>,
    pub billing: BillingMode,
    pub summary: Option<String>,
    pub reference: Option<String>,
    pub selection_seeded: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            phase: Phase::Intake,
            contact: Contact::default(),
            answers: AnswerSet::new(),
            step: 0,
            selection: Vec::new(),
            billing: BillingMode::Monthly,
            summary: None,
            reference: None,
            selection_seeded: false,
        }
    }

    /// The draft persistence window spans questionnaire through booking.
    pub fn in_persistence_window(&self) -> bool {
        self.phase >= Phase::Questionnaire && self.phase <= Phase::SummaryBooking
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one reducer application.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionOutcome {
    pub from: Phase,
    pub to: Phase,
    pub state: WizardState,
    pub actions: Vec<WizardAction>,
}
