//! Deterministic local substitutes used when the remote gateway fails.

use rand::distributions::Alphanumeric;
use rand::Rng;

use packfit_core::{BillingMode, LeadSnapshot};

/// Locally minted references share this prefix with server-issued ones.
pub const REFERENCE_PREFIX: &str = "AIQ-";

const REFERENCE_SUFFIX_LEN: usize = 8;

/// Summary synthesized from the top selected offerings and the computed
/// pricing. Same inputs, same text: the flow stays reproducible offline.
pub fn fallback_summary(snapshot: &LeadSnapshot) -> String {
    let mut lines = Vec::new();

    let company = snapshot.contact.company.trim();
    if company.is_empty() {
        lines.push(format!(
            "Your answers point to {} automation(s) worth starting with:",
            snapshot.selected.len()
        ));
    } else {
        lines.push(format!(
            "Based on your answers, {} would benefit most from {} automation(s):",
            company,
            snapshot.selected.len()
        ));
    }

    for offering in snapshot.selected.iter().take(3) {
        lines.push(format!("- {}: {}", offering.name, offering.description));
    }
    let remainder = snapshot.selected.len().saturating_sub(3);
    if remainder > 0 {
        lines.push(format!("- plus {remainder} further automation(s) in your package."));
    }

    let pricing = &snapshot.pricing;
    lines.push(format!(
        "Estimated investment: {} setup, then {} per month{}.",
        pricing.total_setup,
        pricing.monthly_final,
        match snapshot.billing {
            BillingMode::Annual => " on annual billing",
            BillingMode::Monthly => "",
        }
    ));
    lines.push(
        "Our team will review your answers and refine this plan with you.".to_owned(),
    );

    lines.join("\n")
}

/// Reference number of the same lexical shape the server issues: the fixed
/// prefix plus a random alphanumeric suffix.
pub fn local_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_SUFFIX_LEN)
        .map(|byte| (byte as char).to_ascii_uppercase())
        .collect();
    format!("{REFERENCE_PREFIX}{suffix}")
}

/// Shape check shared by tests and any host-side sanity validation.
pub fn is_reference_shaped(value: &str) -> bool {
    value
        .strip_prefix(REFERENCE_PREFIX)
        .is_some_and(|suffix| {
            suffix.len() == REFERENCE_SUFFIX_LEN
                && suffix.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use packfit_core::{
        price_selection, AnswerSet, BillingMode, Complexity, Contact, DiscountSchedule,
        LeadSnapshot, Offering,
    };

    use super::{fallback_summary, is_reference_shaped, local_reference};

    fn offering(name: &str, description: &str) -> Offering {
        Offering {
            name: name.to_owned(),
            industry: "Dental".to_owned(),
            category: "Reception".to_owned(),
            monthly_price: Decimal::new(14_900, 2),
            setup_price: Decimal::new(49_900, 2),
            complexity: Complexity::Low,
            implementation_time: "1-2 weeks".to_owned(),
            description: description.to_owned(),
            benefit: String::new(),
        }
    }

    fn snapshot(selected: Vec<Offering>) -> LeadSnapshot {
        let refs: Vec<&Offering> = selected.iter().collect();
        let pricing = price_selection(
            &refs,
            &DiscountSchedule::default(),
            Decimal::ZERO,
            BillingMode::Monthly,
        );
        LeadSnapshot {
            contact: Contact {
                company: "Harbor Dental".to_owned(),
                name: "Dana Reyes".to_owned(),
                email: "dana@harbordental.com".to_owned(),
                phone: "+1 415 555 0134".to_owned(),
            },
            answers: AnswerSet::new(),
            selected,
            pricing,
            billing: BillingMode::Monthly,
            language: "en".to_owned(),
        }
    }

    #[test]
    fn summary_is_deterministic_and_names_top_three() {
        let selected = vec![
            offering("Call Desk", "Answers every phone call"),
            offering("Recall Bot", "Booking reminders"),
            offering("FAQ Concierge", "Handles repeat questions"),
            offering("Overflow Line", "Catches peak-hour spill"),
        ];
        let snapshot = snapshot(selected);

        let first = fallback_summary(&snapshot);
        let second = fallback_summary(&snapshot);
        assert_eq!(first, second);

        assert!(first.contains("Harbor Dental"));
        assert!(first.contains("Call Desk"));
        assert!(first.contains("FAQ Concierge"));
        // The fourth offering is only counted, not listed.
        assert!(!first.contains("Overflow Line"));
        assert!(first.contains("plus 1 further automation(s)"));
    }

    #[test]
    fn summary_is_never_empty_even_without_company() {
        let mut snapshot = snapshot(vec![offering("Call Desk", "Answers calls")]);
        snapshot.contact.company = String::new();

        let summary = fallback_summary(&snapshot);
        assert!(!summary.trim().is_empty());
        assert!(summary.contains("Call Desk"));
    }

    #[test]
    fn local_reference_matches_the_server_shape() {
        for _ in 0..32 {
            let reference = local_reference();
            assert!(is_reference_shaped(&reference), "unexpected shape: {reference}");
        }
    }

    #[test]
    fn shape_check_rejects_foreign_strings() {
        assert!(is_reference_shaped("AIQ-1A2B3C4D"));
        assert!(!is_reference_shaped("AIQ-12345"));
        assert!(!is_reference_shaped("REF-1A2B3C4D"));
        assert!(!is_reference_shaped("AIQ-1A2B3C4!"));
    }
}
