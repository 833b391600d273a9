pub mod contact;
pub mod offering;
pub mod questionnaire;
