//! End-to-end discovery flow: intake, questionnaire, recommendation
//! seeding, pricing, generation, submission, and draft resume.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use packfit_core::{
    ApplicationError, BillingMode, Bootstrap, Catalog, Complexity, Contact, ContactField,
    DiscountTier, DraftStore, EngineConfig, LeadGateway, LeadSnapshot, Offering, Phase,
    SessionDraft, WizardController, WizardEvent,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[derive(Clone, Default)]
struct SharedDraftStore {
    slot: Arc<Mutex<Option<SessionDraft>>>,
}

#[async_trait]
impl DraftStore for SharedDraftStore {
    async fn save(&self, draft: &SessionDraft) -> Result<(), ApplicationError> {
        *self.slot.lock().expect("store lock") = Some(draft.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionDraft>, ApplicationError> {
        Ok(self.slot.lock().expect("store lock").clone())
    }

    async fn discard(&self) -> Result<(), ApplicationError> {
        *self.slot.lock().expect("store lock") = None;
        Ok(())
    }
}

#[derive(Default)]
struct CountingGateway {
    analyze_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

#[async_trait]
impl LeadGateway for CountingGateway {
    async fn analyze(&self, snapshot: &LeadSnapshot) -> String {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        format!("Tailored plan for {}", snapshot.contact.company)
    }

    async fn submit(&self, _snapshot: &LeadSnapshot, _summary: &str) -> String {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        "AIQ-E2E00001".to_owned()
    }
}

fn catalog() -> Catalog {
    let entry = |name: &str, industry: &str, description: &str, monthly: i64| Offering {
        name: name.to_owned(),
        industry: industry.to_owned(),
        category: "Reception".to_owned(),
        monthly_price: Decimal::new(monthly, 2),
        setup_price: Decimal::new(49_900, 2),
        complexity: Complexity::Low,
        implementation_time: "1-2 weeks".to_owned(),
        description: description.to_owned(),
        benefit: "Faster response".to_owned(),
    };
    Catalog::new(vec![
        entry("Call Desk", "Dental", "Answers every phone call around the clock", 19_900),
        entry("Recall Bot", "Dental", "Appointment booking and reminder follow-up", 14_900),
        entry("FAQ Concierge", "Dental", "Handles repetitive patient questions", 9_900),
        entry("Intake Router", "Legal", "Routes inbound client inquiries", 24_900),
    ])
}

fn config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.pricing.tiers = vec![
        DiscountTier { min_count: 2, rate: Decimal::new(5, 2) },
        DiscountTier { min_count: 3, rate: Decimal::new(10, 2) },
    ];
    config.pricing.annual_discount = Decimal::new(10, 2);
    config
}

async fn fill_contact<S, G>(controller: &mut WizardController<S, G>)
where
    S: DraftStore,
    G: LeadGateway,
{
    for (field, value) in [
        (ContactField::Company, "Harbor Dental"),
        (ContactField::Name, "Dana Reyes"),
        (ContactField::Email, "dana@harbordental.com"),
        (ContactField::Phone, "+1 415 555 0134"),
    ] {
        controller
            .dispatch(WizardEvent::ContactEdited { field, value: value.to_owned() })
            .await
            .expect("contact edit applies");
    }
}

async fn answer_questionnaire<S, G>(controller: &mut WizardController<S, G>)
where
    S: DraftStore,
    G: LeadGateway,
{
    controller
        .dispatch(WizardEvent::AnswerChanged {
            question_id: "industry".to_owned(),
            value: "Dental".to_owned(),
        })
        .await
        .expect("industry answer");
    controller.dispatch(WizardEvent::NextQuestion).await.expect("advance");

    controller
        .dispatch(WizardEvent::OptionToggled {
            question_id: "pain_points".to_owned(),
            option: "missed-calls".to_owned(),
        })
        .await
        .expect("pain point");
    controller.dispatch(WizardEvent::NextQuestion).await.expect("advance");

    controller
        .dispatch(WizardEvent::OptionToggled {
            question_id: "contact_channels".to_owned(),
            option: "phone".to_owned(),
        })
        .await
        .expect("channel");
    controller.dispatch(WizardEvent::NextQuestion).await.expect("advance");

    for (id, value) in
        [("missed_inquiries", "daily"), ("investment", "medium"), ("team_size", "2-5")]
    {
        controller
            .dispatch(WizardEvent::AnswerChanged {
                question_id: id.to_owned(),
                value: value.to_owned(),
            })
            .await
            .expect("scalar answer");
        controller.dispatch(WizardEvent::NextQuestion).await.expect("advance");
    }

    // Final question is optional free text; advancing without an answer is
    // allowed and enters the selection phase.
    controller.dispatch(WizardEvent::NextQuestion).await.expect("finish questionnaire");
}

#[tokio::test]
async fn discovery_flow_end_to_end() {
    init_tracing();
    let store = SharedDraftStore::default();
    let gateway = Arc::new(CountingGateway::default());
    let mut controller =
        WizardController::new(&config(), catalog(), store.clone(), Arc::clone(&gateway));

    assert_eq!(controller.bootstrap().await, Bootstrap::Fresh);

    // Intake blocks until the contact validates.
    assert!(controller.dispatch(WizardEvent::ContactSubmitted).await.is_err());
    fill_contact(&mut controller).await;
    controller.dispatch(WizardEvent::ContactSubmitted).await.expect("intake passes");
    assert_eq!(controller.state().phase, Phase::Questionnaire);

    answer_questionnaire(&mut controller).await;
    assert_eq!(controller.state().phase, Phase::SelectionPricing);

    // Seeded with dental recommendations, scoped away from legal.
    let seeded = controller.state().selection.clone();
    assert!(!seeded.is_empty());
    assert!(!seeded.contains(&"Intake Router".to_owned()));

    // Add the remaining dental offering so the package hits the top tier.
    for name in ["Call Desk", "Recall Bot", "FAQ Concierge"] {
        if !controller.state().selection.contains(&name.to_owned()) {
            controller
                .dispatch(WizardEvent::OfferingToggled { name: name.to_owned() })
                .await
                .expect("toggle");
        }
    }
    assert_eq!(controller.state().selection.len(), 3);

    let monthly = controller.pricing();
    assert_eq!(monthly.count, 3);
    assert_eq!(monthly.discount_rate, Decimal::new(10, 2));
    assert!(monthly.monthly_final <= monthly.total_monthly_raw);
    assert_eq!(monthly.annual_total, monthly.monthly_final * Decimal::from(12));

    controller
        .dispatch(WizardEvent::BillingModeChanged { mode: BillingMode::Annual })
        .await
        .expect("billing change");
    let annual = controller.pricing();
    assert!(annual.monthly_final < monthly.monthly_final);
    assert_eq!(annual.total_setup, monthly.total_setup);

    // Confirming runs analysis once and lands on the summary screen.
    controller.dispatch(WizardEvent::SelectionConfirmed).await.expect("confirm");
    assert_eq!(controller.state().phase, Phase::SummaryBooking);
    assert_eq!(gateway.analyze_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        controller.state().summary.as_deref(),
        Some("Tailored plan for Harbor Dental")
    );

    // Submission is fire-once and terminal.
    controller.dispatch(WizardEvent::SendWithoutBooking).await.expect("send");
    assert_eq!(controller.state().phase, Phase::Confirmation);
    assert_eq!(controller.state().reference.as_deref(), Some("AIQ-E2E00001"));
    assert_eq!(gateway.submit_calls.load(Ordering::SeqCst), 1);

    // Terminal confirmation deletes the stored draft.
    assert_eq!(store.load().await.expect("load"), None);
}

#[tokio::test]
async fn draft_resume_round_trip() {
    init_tracing();
    let store = SharedDraftStore::default();
    let gateway = Arc::new(CountingGateway::default());

    {
        let mut controller =
            WizardController::new(&config(), catalog(), store.clone(), Arc::clone(&gateway));
        fill_contact(&mut controller).await;
        controller.dispatch(WizardEvent::ContactSubmitted).await.expect("intake passes");
        controller
            .dispatch(WizardEvent::AnswerChanged {
                question_id: "industry".to_owned(),
                value: "Dental".to_owned(),
            })
            .await
            .expect("industry answer");
        controller.dispatch(WizardEvent::NextQuestion).await.expect("advance");
    }

    // A fresh process sees the stored draft and offers to resume.
    let mut revived =
        WizardController::new(&config(), catalog(), store.clone(), Arc::clone(&gateway));
    let Bootstrap::ResumeAvailable(draft) = revived.bootstrap().await else {
        panic!("expected a resumable draft");
    };
    assert_eq!(draft.phase, Phase::Questionnaire);
    assert_eq!(draft.step, 1);

    revived.resume(draft);
    assert_eq!(revived.state().phase, Phase::Questionnaire);
    assert_eq!(revived.state().contact.email, "dana@harbordental.com");
    assert_eq!(revived.state().answers.scalar("industry"), Some("Dental"));

    // Restarting instead discards the draft.
    revived.restart().await;
    assert_eq!(revived.state().phase, Phase::Intake);
    assert_eq!(revived.state().contact, Contact::default());
    assert_eq!(store.load().await.expect("load"), None);
}
