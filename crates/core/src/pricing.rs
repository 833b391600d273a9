//! Package pricing: quantity-discount tiers and billing-mode reduction over
//! the current selection. No rounding happens here; presentation rounding is
//! the host's concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::offering::Offering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    #[default]
    Monthly,
    Annual,
}

impl BillingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

/// One quantity-discount breakpoint: selections of at least `min_count`
/// items earn `rate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_count: u32,
    pub rate: Decimal,
}

/// Integrator-supplied discount table. Rates are in `[0, 1)` and
/// non-decreasing in count; `EngineConfig` validation enforces both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSchedule {
    tiers: Vec<DiscountTier>,
}

impl DiscountSchedule {
    pub fn new(mut tiers: Vec<DiscountTier>) -> Self {
        tiers.sort_by_key(|tier| tier.min_count);
        Self { tiers }
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// Discount rate for a selection of `count` items. An empty table and
    /// counts below the first breakpoint both yield zero.
    pub fn rate_for(&self, count: usize) -> Decimal {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.tiers
            .iter()
            .rev()
            .find(|tier| count >= tier.min_count)
            .map(|tier| tier.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Derived pricing for the current selection. Recomputed on every selection
/// or billing-mode change, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingState {
    pub count: usize,
    pub discount_rate: Decimal,
    pub total_setup: Decimal,
    pub total_monthly_raw: Decimal,
    pub monthly_after_quantity_discount: Decimal,
    pub monthly_final: Decimal,
    pub annual_total: Decimal,
}

/// Reduce the selected offerings into a priced package. Tolerates an empty
/// selection: every derived value is zero.
pub fn price_selection(
    selected: &[&Offering],
    schedule: &DiscountSchedule,
    annual_discount: Decimal,
    billing: BillingMode,
) -> PricingState {
    let count = selected.len();
    if count == 0 {
        return PricingState::default();
    }

    let total_setup: Decimal = selected.iter().map(|offering| offering.setup_price).sum();
    let total_monthly_raw: Decimal = selected.iter().map(|offering| offering.monthly_price).sum();

    let discount_rate = schedule.rate_for(count);
    let monthly_after_quantity_discount = total_monthly_raw * (Decimal::ONE - discount_rate);
    let monthly_final = match billing {
        BillingMode::Monthly => monthly_after_quantity_discount,
        BillingMode::Annual => monthly_after_quantity_discount * (Decimal::ONE - annual_discount),
    };
    let annual_total = monthly_final * Decimal::from(12);

    PricingState {
        count,
        discount_rate,
        total_setup,
        total_monthly_raw,
        monthly_after_quantity_discount,
        monthly_final,
        annual_total,
    }
}
