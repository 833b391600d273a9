pub mod config;
pub mod domain;
pub mod draft;
pub mod errors;
pub mod ports;
pub mod pricing;
pub mod scoring;
pub mod wizard;

pub use config::{ConfigError, EngineConfig, GatewayConfig, LogFormat, LoggingConfig};
pub use domain::contact::{Contact, ContactField, FieldError};
pub use domain::offering::{Catalog, Complexity, Offering};
pub use domain::questionnaire::{
    build_questions, AnswerSet, AnswerValue, QuestionDefinition, QuestionKind,
};
pub use draft::SessionDraft;
pub use errors::{ApplicationError, DomainError};
pub use ports::{DraftStore, LeadGateway, LeadSnapshot};
pub use pricing::{
    price_selection, BillingMode, DiscountSchedule, DiscountTier, PricingState,
};
pub use scoring::{recommend, score, Recommendations, ScoredOffering};
pub use wizard::controller::{Bootstrap, WizardController};
pub use wizard::reducer::{reduce, WizardContext};
pub use wizard::states::{
    Phase, Rejection, TransitionOutcome, WizardAction, WizardEvent, WizardState,
};
