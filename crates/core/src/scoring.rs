//! Keyword-weighted recommendation scoring over the offering catalog.
//!
//! Intentionally simple substring matching, not a learned model. The rest of
//! the engine only consumes `score`'s output, so a token-set or embedding
//! similarity can replace the match without touching callers.

use tracing::debug;

use crate::domain::offering::{Catalog, Complexity, Offering};
use crate::domain::questionnaire::{
    AnswerSet, CONTACT_CHANNELS, INDUSTRY, INVESTMENT, MISSED_INQUIRIES, PAIN_POINTS, TEAM_SIZE,
};

/// Points for the first keyword match of a selected pain point.
pub const PAIN_POINT_WEIGHT: u32 = 10;
/// Points for the first keyword match of a selected contact channel.
pub const CHANNEL_WEIGHT: u32 = 5;
/// One-time bonus when inquiries go unanswered daily/weekly and the offering
/// reads as urgency-relevant.
pub const URGENCY_WEIGHT: u32 = 8;
/// Minimum score for an offering to be recommended.
pub const RECOMMENDATION_THRESHOLD: u32 = 5;
/// Maximum recommended offerings.
pub const MAX_RECOMMENDED: usize = 6;

struct KeywordSet {
    key: &'static str,
    keywords: &'static [&'static str],
}

const PAIN_POINT_KEYWORDS: &[KeywordSet] = &[
    KeywordSet { key: "missed-calls", keywords: &["call", "phone", "answer", "reception"] },
    KeywordSet { key: "after-hours", keywords: &["after-hours", "24/7", "night", "weekend"] },
    KeywordSet { key: "scheduling", keywords: &["appointment", "booking", "calendar", "schedul"] },
    KeywordSet { key: "faq-load", keywords: &["faq", "question", "inquir", "knowledge"] },
    KeywordSet { key: "channel-overflow", keywords: &["channel", "routing", "triage", "overflow"] },
    KeywordSet { key: "follow-up", keywords: &["follow-up", "reminder", "callback", "lead"] },
];

const CHANNEL_KEYWORDS: &[KeywordSet] = &[
    KeywordSet { key: "phone", keywords: &["phone", "call", "voice"] },
    KeywordSet { key: "email", keywords: &["email", "inbox", "mail"] },
    KeywordSet { key: "chat", keywords: &["chat", "widget", "message"] },
    KeywordSet { key: "social", keywords: &["social", "instagram", "facebook", "whatsapp"] },
    KeywordSet { key: "sms", keywords: &["sms", "text message", "texting"] },
];

const URGENCY_KEYWORDS: &[&str] =
    &["24/7", "instant", "immediate", "real-time", "response", "always-on"];

/// An offering paired with its score for one answer set.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredOffering {
    pub offering: Offering,
    pub score: u32,
}

/// Scorer output: `recommended` holds at most [`MAX_RECOMMENDED`] offerings
/// with score >= [`RECOMMENDATION_THRESHOLD`], ordered by descending score;
/// `others` holds the remainder in the same order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recommendations {
    pub recommended: Vec<ScoredOffering>,
    pub others: Vec<ScoredOffering>,
}

impl Recommendations {
    pub fn recommended_names(&self) -> Vec<String> {
        self.recommended.iter().map(|scored| scored.offering.name.clone()).collect()
    }
}

/// Deterministic score of one offering against the answer set. Each pain
/// point and channel counts at most once regardless of how many of its
/// keywords appear.
pub fn score(offering: &Offering, answers: &AnswerSet) -> u32 {
    let haystack = offering.haystack();
    let mut total = 0;

    for pain_point in answers.many(PAIN_POINTS) {
        if keyword_set_matches(PAIN_POINT_KEYWORDS, pain_point, &haystack) {
            total += PAIN_POINT_WEIGHT;
        }
    }

    for channel in answers.many(CONTACT_CHANNELS) {
        if keyword_set_matches(CHANNEL_KEYWORDS, channel, &haystack) {
            total += CHANNEL_WEIGHT;
        }
    }

    if matches!(answers.scalar(MISSED_INQUIRIES), Some("daily" | "weekly"))
        && URGENCY_KEYWORDS.iter().any(|keyword| haystack.contains(keyword))
    {
        total += URGENCY_WEIGHT;
    }

    total += match (answers.scalar(INVESTMENT), offering.complexity) {
        (Some("low"), Complexity::Low) => 3,
        (Some("medium"), Complexity::Low | Complexity::Medium) => 2,
        (Some("high"), _) => 1,
        _ => 0,
    };

    total += match answers.scalar(TEAM_SIZE) {
        Some("solo" | "2-5") if offering.complexity == Complexity::Low => 2,
        Some("16-50" | "51-200" | "200+") if offering.complexity != Complexity::Low => 2,
        _ => 0,
    };

    total
}

fn keyword_set_matches(sets: &[KeywordSet], key: &str, haystack: &str) -> bool {
    sets.iter()
        .find(|set| set.key == key)
        .is_some_and(|set| set.keywords.iter().any(|keyword| haystack.contains(keyword)))
}

/// Rank the catalog against the answers. Scoping follows the industry
/// answer; without one the full catalog is ranked. Ties keep catalog order
/// (stable sort).
pub fn recommend(catalog: &Catalog, answers: &AnswerSet) -> Recommendations {
    let scoped: Vec<&Offering> = match answers.scalar(INDUSTRY) {
        Some(industry) => catalog.for_industry(industry),
        None => catalog.all().iter().collect(),
    };

    let mut ranked: Vec<ScoredOffering> = scoped
        .into_iter()
        .map(|offering| ScoredOffering { offering: offering.clone(), score: score(offering, answers) })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let cut = ranked
        .iter()
        .take(MAX_RECOMMENDED)
        .take_while(|scored| scored.score >= RECOMMENDATION_THRESHOLD)
        .count();
    let others = ranked.split_off(cut);

    debug!(recommended = ranked.len(), others = others.len(), "scored offering catalog");
    Recommendations { recommended: ranked, others }
}
