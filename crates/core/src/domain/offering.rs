use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Implementation complexity rating carried by every catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// One automatable business capability from the read-only offering catalog.
/// `name` is the unique key; the catalog collaborator owns the data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub name: String,
    pub industry: String,
    pub category: String,
    pub monthly_price: Decimal,
    pub setup_price: Decimal,
    pub complexity: Complexity,
    pub implementation_time: String,
    pub description: String,
    pub benefit: String,
}

impl Offering {
    /// Concatenated searchable text used by the keyword scorer.
    pub fn haystack(&self) -> String {
        let mut text = String::with_capacity(
            self.name.len() + self.description.len() + self.category.len() + self.benefit.len() + 3,
        );
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.description);
        text.push(' ');
        text.push_str(&self.category);
        text.push(' ');
        text.push_str(&self.benefit);
        text.to_lowercase()
    }
}

/// Read-only view over the externally supplied offering list. Preserves the
/// collaborator's ordering, which doubles as the scorer's tie-break order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    offerings: Vec<Offering>,
}

impl Catalog {
    pub fn new(offerings: Vec<Offering>) -> Self {
        Self { offerings }
    }

    pub fn all(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn find(&self, name: &str) -> Option<&Offering> {
        self.offerings.iter().find(|offering| offering.name == name)
    }

    /// Offerings for one industry, original order preserved.
    pub fn for_industry(&self, industry: &str) -> Vec<&Offering> {
        self.offerings
            .iter()
            .filter(|offering| offering.industry.eq_ignore_ascii_case(industry))
            .collect()
    }

    /// Distinct industry names in first-seen order. Feeds the industry
    /// question's options.
    pub fn industries(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for offering in &self.offerings {
            if !seen.iter().any(|known: &String| known.eq_ignore_ascii_case(&offering.industry)) {
                seen.push(offering.industry.clone());
            }
        }
        seen
    }

    /// Case-insensitive industry lookup used by the entry query parameter.
    pub fn match_industry(&self, hint: &str) -> Option<String> {
        let hint = hint.trim();
        if hint.is_empty() {
            return None;
        }
        self.industries().into_iter().find(|industry| industry.eq_ignore_ascii_case(hint))
    }
}
