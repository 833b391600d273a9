//! Async orchestrator over the pure reducer: executes the actions each
//! transition emits against the draft store and the lead gateway.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::offering::{Catalog, Offering};
use crate::domain::questionnaire::{build_questions, QuestionDefinition, INDUSTRY};
use crate::draft::SessionDraft;
use crate::ports::{DraftStore, LeadGateway, LeadSnapshot};
use crate::pricing::{price_selection, DiscountSchedule, PricingState};
use crate::scoring::{self, Recommendations};
use crate::wizard::reducer::{reduce, WizardContext};
use crate::wizard::states::{
    Phase, Rejection, TransitionOutcome, WizardAction, WizardEvent, WizardState,
};

/// Startup decision: show intake, or offer to resume a stored draft first.
#[derive(Clone, Debug, PartialEq)]
pub enum Bootstrap {
    Fresh,
    ResumeAvailable(SessionDraft),
}

pub struct WizardController<S, G> {
    state: WizardState,
    catalog: Catalog,
    questions: Vec<QuestionDefinition>,
    schedule: DiscountSchedule,
    annual_discount: Decimal,
    language: String,
    store: S,
    gateway: G,
}

impl<S, G> WizardController<S, G>
where
    S: DraftStore,
    G: LeadGateway,
{
    pub fn new(config: &EngineConfig, catalog: Catalog, store: S, gateway: G) -> Self {
        let questions = build_questions(&catalog.industries());
        Self {
            state: WizardState::new(),
            catalog,
            questions,
            schedule: config.pricing.schedule(),
            annual_discount: config.pricing.annual_discount,
            language: config.language.clone(),
            store,
            gateway,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&QuestionDefinition> {
        self.questions.get(self.state.step)
    }

    /// Derived pricing for the current selection and billing mode.
    pub fn pricing(&self) -> PricingState {
        let selected: Vec<&Offering> =
            self.state.selection.iter().filter_map(|name| self.catalog.find(name)).collect();
        price_selection(&selected, &self.schedule, self.annual_discount, self.state.billing)
    }

    /// Current recommendation split for the selection screen.
    pub fn recommendations(&self) -> Recommendations {
        scoring::recommend(&self.catalog, &self.state.answers)
    }

    /// Startup check. Store failures and unreadable drafts degrade to a
    /// fresh session.
    pub async fn bootstrap(&self) -> Bootstrap {
        match self.store.load().await {
            Ok(Some(draft)) if draft.is_resumable() => Bootstrap::ResumeAvailable(draft),
            Ok(_) => Bootstrap::Fresh,
            Err(error) => {
                warn!(%error, "draft load failed; starting fresh");
                Bootstrap::Fresh
            }
        }
    }

    /// Rebuild wizard state from a stored draft. The transient generating
    /// and booking phases are clamped back to the selection screen: their
    /// summary is never persisted, so analysis simply runs again.
    pub fn resume(&mut self, draft: SessionDraft) {
        let phase = match draft.phase {
            Phase::Generating | Phase::SummaryBooking => Phase::SelectionPricing,
            other => other,
        };
        let selection_seeded = !draft.selected_offering_names.is_empty();
        self.state = WizardState {
            session_id: draft.session_id,
            phase,
            contact: draft.contact,
            answers: draft.answers,
            step: draft.step.min(self.questions.len().saturating_sub(1)),
            selection: draft.selected_offering_names,
            billing: draft.billing_mode,
            summary: None,
            reference: None,
            selection_seeded,
        };
        info!(phase = ?self.state.phase, "resumed stored draft");
    }

    /// Drop any stored draft and begin a fresh session.
    pub async fn restart(&mut self) {
        self.discard().await;
        self.state = WizardState::new();
    }

    /// Pre-select the industry answer from an entry query parameter.
    /// Unknown hints are ignored. Runs before the first event only.
    pub fn start_with_hint(&mut self, hint: Option<&str>) {
        if let Some(industry) = hint.and_then(|value| self.catalog.match_industry(value)) {
            self.state.answers.set_scalar(INDUSTRY, industry);
        }
    }

    /// Apply one event. Guard rejections come back to the host for inline
    /// rendering; everything else (persistence, gateway calls, follow-up
    /// transitions) happens before this returns.
    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<(), Rejection> {
        let outcome = {
            let ctx = WizardContext { catalog: &self.catalog, questions: &self.questions };
            reduce(&self.state, &event, &ctx)
        }
        .map_err(|rejection| {
            debug!(%rejection, "wizard event rejected");
            rejection
        })?;
        self.commit(outcome).await;
        Ok(())
    }

    async fn commit(&mut self, mut outcome: TransitionOutcome) {
        loop {
            if outcome.from != outcome.to {
                info!(from = ?outcome.from, to = ?outcome.to, "wizard phase transition");
            }
            self.state = outcome.state;

            let mut follow_up = None;
            for action in &outcome.actions {
                match action {
                    WizardAction::PersistDraft => self.persist().await,
                    WizardAction::DiscardDraft => self.discard().await,
                    WizardAction::RunAnalysis => {
                        let snapshot = self.snapshot();
                        let summary = self.gateway.analyze(&snapshot).await;
                        follow_up = Some(WizardEvent::SummaryReady { summary });
                    }
                    WizardAction::SubmitLead => {
                        let snapshot = self.snapshot();
                        let summary = self.state.summary.clone().unwrap_or_default();
                        let reference = self.gateway.submit(&snapshot, &summary).await;
                        follow_up = Some(WizardEvent::SubmissionRecorded { reference });
                    }
                }
            }

            let Some(event) = follow_up else { break };
            let next = {
                let ctx = WizardContext { catalog: &self.catalog, questions: &self.questions };
                reduce(&self.state, &event, &ctx)
            };
            match next {
                Ok(applied) => outcome = applied,
                Err(rejection) => {
                    warn!(%rejection, "follow-up transition rejected");
                    break;
                }
            }
        }
    }

    async fn persist(&self) {
        let draft = SessionDraft {
            session_id: self.state.session_id,
            contact: self.state.contact.clone(),
            answers: self.state.answers.clone(),
            step: self.state.step,
            phase: self.state.phase,
            selected_offering_names: self.state.selection.clone(),
            billing_mode: self.state.billing,
            saved_at: Utc::now(),
        };
        if let Err(error) = self.store.save(&draft).await {
            warn!(%error, "draft save failed; continuing without persistence");
        }
    }

    async fn discard(&self) {
        if let Err(error) = self.store.discard().await {
            warn!(%error, "draft discard failed");
        }
    }

    fn snapshot(&self) -> LeadSnapshot {
        let selected: Vec<Offering> = self
            .state
            .selection
            .iter()
            .filter_map(|name| self.catalog.find(name).cloned())
            .collect();
        LeadSnapshot {
            contact: self.state.contact.clone(),
            answers: self.state.answers.clone(),
            selected,
            pricing: self.pricing(),
            billing: self.state.billing,
            language: self.language.clone(),
        }
    }
}
