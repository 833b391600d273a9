//! Discovery questionnaire: the fixed question list and the mutable answer
//! set keyed by question id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Question ids referenced by the scorer and the wizard.
pub const INDUSTRY: &str = "industry";
pub const PAIN_POINTS: &str = "pain_points";
pub const CONTACT_CHANNELS: &str = "contact_channels";
pub const MISSED_INQUIRIES: &str = "missed_inquiries";
pub const INVESTMENT: &str = "investment";
pub const TEAM_SIZE: &str = "team_size";
pub const NOTES: &str = "notes";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    Multi,
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub max_selections: Option<usize>,
    pub optional: bool,
}

#[derive(Clone, Copy)]
struct QuestionTemplate {
    id: &'static str,
    kind: QuestionKind,
    prompt: &'static str,
    options: &'static [&'static str],
    max_selections: Option<usize>,
    optional: bool,
}

/// The fixed discovery question list. The industry question's options are
/// injected from the catalog at build time.
const QUESTION_LIST: &[QuestionTemplate] = &[
    QuestionTemplate {
        id: INDUSTRY,
        kind: QuestionKind::Single,
        prompt: "What industry is your business in?",
        options: &[],
        max_selections: None,
        optional: false,
    },
    QuestionTemplate {
        id: PAIN_POINTS,
        kind: QuestionKind::Multi,
        prompt: "Where do inquiries slip through today?",
        options: &[
            "missed-calls",
            "after-hours",
            "scheduling",
            "faq-load",
            "channel-overflow",
            "follow-up",
        ],
        max_selections: Some(3),
        optional: false,
    },
    QuestionTemplate {
        id: CONTACT_CHANNELS,
        kind: QuestionKind::Multi,
        prompt: "How do customers reach you?",
        options: &["phone", "email", "chat", "social", "sms"],
        max_selections: None,
        optional: false,
    },
    QuestionTemplate {
        id: MISSED_INQUIRIES,
        kind: QuestionKind::Single,
        prompt: "How often do inquiries go unanswered?",
        options: &["daily", "weekly", "monthly", "rarely"],
        max_selections: None,
        optional: false,
    },
    QuestionTemplate {
        id: INVESTMENT,
        kind: QuestionKind::Single,
        prompt: "What monthly investment level fits your plans?",
        options: &["low", "medium", "high"],
        max_selections: None,
        optional: false,
    },
    QuestionTemplate {
        id: TEAM_SIZE,
        kind: QuestionKind::Single,
        prompt: "How large is your team?",
        options: &["solo", "2-5", "6-15", "16-50", "51-200", "200+"],
        max_selections: None,
        optional: false,
    },
    QuestionTemplate {
        id: NOTES,
        kind: QuestionKind::Text,
        prompt: "Anything else we should know?",
        options: &[],
        max_selections: None,
        optional: true,
    },
];

/// Build the immutable question list for one session. `industries` comes
/// from the offering catalog and populates the industry single-choice.
pub fn build_questions(industries: &[String]) -> Vec<QuestionDefinition> {
    QUESTION_LIST
        .iter()
        .map(|template| QuestionDefinition {
            id: template.id.to_owned(),
            kind: template.kind,
            prompt: template.prompt.to_owned(),
            options: if template.id == INDUSTRY {
                industries.to_vec()
            } else {
                template.options.iter().map(|option| (*option).to_owned()).collect()
            },
            max_selections: template.max_selections,
            optional: template.optional,
        })
        .collect()
}

/// A stored answer: scalar for single/text questions, ordered set for
/// multi-choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(Vec<String>),
}

impl AnswerValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }

    pub fn as_many(&self) -> &[String] {
        match self {
            Self::Single(_) => &[],
            Self::Multi(values) => values,
        }
    }
}

/// Mutable questionnaire answers keyed by question id. Grows incrementally;
/// earlier answers are never retroactively invalidated (the industry answer
/// re-scopes the catalog, handled by the wizard).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.answers.get(id)
    }

    pub fn scalar(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(AnswerValue::as_scalar)
    }

    pub fn many(&self, id: &str) -> &[String] {
        self.get(id).map(AnswerValue::as_many).unwrap_or_default()
    }

    /// Store a scalar answer for a single/text question.
    pub fn set_scalar(&mut self, id: &str, value: impl Into<String>) {
        self.answers.insert(id.to_owned(), AnswerValue::Single(value.into()));
    }

    /// Toggle one option of a multi-choice answer: add if absent, remove if
    /// present. Adding past `max_selections` is a no-op. Idempotent pairwise.
    pub fn toggle_option(&mut self, question: &QuestionDefinition, option: &str) {
        let entry = self
            .answers
            .entry(question.id.clone())
            .or_insert_with(|| AnswerValue::Multi(Vec::new()));
        let AnswerValue::Multi(values) = entry else {
            return;
        };

        if let Some(position) = values.iter().position(|value| value == option) {
            values.remove(position);
            return;
        }
        if question.max_selections.is_some_and(|cap| values.len() >= cap) {
            return;
        }
        values.push(option.to_owned());
    }

    /// Completeness rule guarding `Next`: non-empty text, a value for
    /// single-choice, at least one value for multi-choice.
    pub fn satisfies(&self, question: &QuestionDefinition) -> bool {
        if question.optional {
            return true;
        }
        match (question.kind, self.get(&question.id)) {
            (QuestionKind::Single | QuestionKind::Text, Some(AnswerValue::Single(value))) => {
                !value.trim().is_empty()
            }
            (QuestionKind::Multi, Some(AnswerValue::Multi(values))) => !values.is_empty(),
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.answers.iter()
    }
}
