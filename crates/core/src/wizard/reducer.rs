//! Pure wizard transition function. Every state change flows through
//! [`reduce`]; the controller executes the returned actions against the
//! ports and commits the new state atomically.

use crate::domain::contact::{self, Contact, ContactField};
use crate::domain::offering::Catalog;
use crate::domain::questionnaire::{QuestionDefinition, QuestionKind, INDUSTRY};
use crate::scoring;
use crate::wizard::states::{
    Phase, Rejection, TransitionOutcome, WizardAction, WizardEvent, WizardState,
};

/// Immutable collaborators the reducer needs: the offering catalog and the
/// session's question list.
#[derive(Clone, Copy, Debug)]
pub struct WizardContext<'a> {
    pub catalog: &'a Catalog,
    pub questions: &'a [QuestionDefinition],
}

impl WizardContext<'_> {
    fn question(&self, id: &str) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Names of offerings visible under the current industry answer.
    fn scoped_names(&self, state: &WizardState) -> Vec<String> {
        match state.answers.scalar(INDUSTRY) {
            Some(industry) => self
                .catalog
                .for_industry(industry)
                .into_iter()
                .map(|offering| offering.name.clone())
                .collect(),
            None => self.catalog.all().iter().map(|offering| offering.name.clone()).collect(),
        }
    }
}

/// Apply one event. `Err` means the guard rejected it: the caller keeps the
/// old state and renders the rejection inline.
pub fn reduce(
    state: &WizardState,
    event: &WizardEvent,
    ctx: &WizardContext<'_>,
) -> Result<TransitionOutcome, Rejection> {
    if matches!(event, WizardEvent::Restart) {
        let next = WizardState::new();
        return Ok(finish(state, next, vec![WizardAction::DiscardDraft]));
    }

    let mut next = state.clone();
    let mut extras = Vec::new();

    match (state.phase, event) {
        (Phase::Intake, WizardEvent::ContactEdited { field, value }) => {
            set_contact_field(&mut next.contact, *field, value.clone());
        }
        (Phase::Intake, WizardEvent::ContactSubmitted) => {
            let errors = contact::validate(&state.contact);
            if !errors.is_empty() {
                return Err(Rejection::ContactInvalid(errors));
            }
            next.phase = Phase::Questionnaire;
            next.step = 0;
        }

        (Phase::Questionnaire, WizardEvent::AnswerChanged { question_id, value }) => {
            let question = ctx
                .question(question_id)
                .filter(|q| matches!(q.kind, QuestionKind::Single | QuestionKind::Text))
                .ok_or_else(|| unsupported(state, event))?;
            if question.id == INDUSTRY {
                apply_industry_answer(&mut next, ctx, value);
            } else {
                next.answers.set_scalar(&question.id, value.clone());
            }
        }
        (Phase::Questionnaire, WizardEvent::OptionToggled { question_id, option }) => {
            let question = ctx
                .question(question_id)
                .filter(|q| q.kind == QuestionKind::Multi)
                .cloned()
                .ok_or_else(|| unsupported(state, event))?;
            next.answers.toggle_option(&question, option);
        }
        (Phase::Questionnaire, WizardEvent::NextQuestion) => {
            if let Some(question) = ctx.questions.get(state.step) {
                if !state.answers.satisfies(question) {
                    return Err(Rejection::QuestionIncomplete {
                        question_id: question.id.clone(),
                    });
                }
            }
            if state.step + 1 >= ctx.questions.len() {
                enter_selection(&mut next, ctx);
            } else {
                next.step = state.step + 1;
            }
        }
        (Phase::Questionnaire, WizardEvent::PrevQuestion) => {
            if state.step == 0 {
                next.phase = Phase::Intake;
            } else {
                next.step = state.step - 1;
            }
        }

        (Phase::SelectionPricing, WizardEvent::OfferingToggled { name }) => {
            if !ctx.scoped_names(state).contains(name) {
                return Err(Rejection::UnknownOffering { name: name.clone() });
            }
            if let Some(position) = next.selection.iter().position(|selected| selected == name) {
                next.selection.remove(position);
            } else {
                next.selection.push(name.clone());
            }
        }
        (Phase::SelectionPricing, WizardEvent::PrevQuestion) => {
            next.phase = Phase::Questionnaire;
            next.step = ctx.questions.len().saturating_sub(1);
        }
        (Phase::SelectionPricing, WizardEvent::BillingModeChanged { mode }) => {
            next.billing = *mode;
        }
        (Phase::SelectionPricing, WizardEvent::SelectionConfirmed) => {
            if state.selection.is_empty() {
                return Err(Rejection::EmptySelection);
            }
            if state.summary.is_some() {
                // Analysis already ran for this session; do not invoke twice.
                next.phase = Phase::SummaryBooking;
            } else {
                next.phase = Phase::Generating;
                extras.push(WizardAction::RunAnalysis);
            }
        }

        (Phase::Generating, WizardEvent::SummaryReady { summary }) => {
            next.summary = Some(summary.clone());
            next.phase = Phase::SummaryBooking;
        }

        (
            Phase::SummaryBooking,
            WizardEvent::BookingConfirmed | WizardEvent::SendWithoutBooking,
        ) => {
            if state.reference.is_some() {
                next.phase = Phase::Confirmation;
                extras.push(WizardAction::DiscardDraft);
            } else {
                extras.push(WizardAction::SubmitLead);
            }
        }
        (Phase::SummaryBooking, WizardEvent::SubmissionRecorded { reference }) => {
            next.reference = Some(reference.clone());
            next.phase = Phase::Confirmation;
            extras.push(WizardAction::DiscardDraft);
        }

        _ => return Err(unsupported(state, event)),
    }

    Ok(finish(state, next, extras))
}

fn unsupported(state: &WizardState, event: &WizardEvent) -> Rejection {
    Rejection::UnsupportedEvent { phase: state.phase, event: event.clone() }
}

fn finish(previous: &WizardState, next: WizardState, extras: Vec<WizardAction>) -> TransitionOutcome {
    let mut actions = Vec::with_capacity(extras.len() + 1);
    if next.in_persistence_window() {
        actions.push(WizardAction::PersistDraft);
    }
    actions.extend(extras);
    TransitionOutcome { from: previous.phase, to: next.phase, state: next, actions }
}

fn set_contact_field(target: &mut Contact, field: ContactField, value: String) {
    match field {
        ContactField::Company => target.company = value,
        ContactField::Name => target.name = value,
        ContactField::Email => target.email = value,
        ContactField::Phone => target.phone = value,
    }
}

/// The industry answer deterministically re-scopes the catalog: selections
/// outside the new industry are dropped and the next selection-phase entry
/// reseeds recommendations.
fn apply_industry_answer(next: &mut WizardState, ctx: &WizardContext<'_>, value: &str) {
    let changed = next.answers.scalar(INDUSTRY) != Some(value);
    next.answers.set_scalar(INDUSTRY, value);
    if changed {
        let scoped = ctx.scoped_names(next);
        next.selection.retain(|name| scoped.contains(name));
        next.selection_seeded = false;
    }
}

/// First entry seeds the selection with the scorer's recommendations; later
/// entries keep whatever the visitor toggled.
fn enter_selection(next: &mut WizardState, ctx: &WizardContext<'_>) {
    next.phase = Phase::SelectionPricing;
    if !next.selection_seeded {
        next.selection = scoring::recommend(ctx.catalog, &next.answers).recommended_names();
        next.selection_seeded = true;
    }
}
