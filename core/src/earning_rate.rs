//! Earning-rate advisor: suggests how many currency units of spend should
//! earn one point.
//!
//! Lower margins push the rate up (customers spend more per point), richer
//! reward budgets pull it down. The result is always within
//! [`MIN_RATE`, `MAX_RATE`] and rounded to one decimal.

use crate::{
    inputs::NormalizedInputs,
    normalize::{round1, safe_pct},
};
use serde::{Deserialize, Serialize};

pub const MIN_RATE: f64 = 1.0;
pub const MAX_RATE: f64 = 100.0;

/// The six inputs that drive the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningRateDrivers {
    pub gross_margin_pct:      f64,
    pub reward_budget_pct:     f64,
    pub redemption_rate_pct:   f64,
    pub avg_transaction_value: f64,
    pub fixed_program_cost:    f64,
    pub monthly_transactions:  f64,
}

impl From<&NormalizedInputs> for EarningRateDrivers {
    fn from(n: &NormalizedInputs) -> Self {
        Self {
            gross_margin_pct:      n.gross_margin_pct,
            reward_budget_pct:     n.reward_budget_pct,
            redemption_rate_pct:   n.redemption_rate_pct,
            avg_transaction_value: n.avg_transaction_value,
            fixed_program_cost:    n.fixed_program_cost,
            monthly_transactions:  n.monthly_transactions,
        }
    }
}

/// Intermediate terms of a recommendation, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningRateBreakdown {
    pub base_rate:                f64,
    pub budget_adjustment:        f64,
    pub redemption_adjustment:    f64,
    pub total_cost_pct:           f64,
    pub cost_pressure_adjustment: f64,
    /// Sum of the terms before clamping and rounding.
    pub unclamped:                f64,
    pub recommended:              f64,
}

/// Base rate by margin band.
pub fn base_rate_for_margin(margin: f64) -> f64 {
    if margin <= 15.0 {
        40.0 - (margin - 10.0) * 2.0
    } else if margin <= 35.0 {
        35.0 - margin
    } else if margin <= 50.0 {
        20.0 - (margin - 35.0) / 3.0
    } else {
        12.0 - (margin - 50.0) / 5.0
    }
}

pub fn breakdown(d: &EarningRateDrivers) -> EarningRateBreakdown {
    let monthly_revenue = d.monthly_transactions * d.avg_transaction_value;
    let reward_cost = monthly_revenue * (d.reward_budget_pct / 100.0);
    let total_cost_pct = safe_pct(reward_cost + d.fixed_program_cost, monthly_revenue);

    let base_rate = base_rate_for_margin(d.gross_margin_pct);
    let budget_adjustment = (d.reward_budget_pct - 2.0) * 2.0;
    let redemption_adjustment = (d.redemption_rate_pct - 50.0) * 0.1;
    let cost_pressure_adjustment = (total_cost_pct - 5.0).max(0.0) * 0.5;

    let unclamped = base_rate + budget_adjustment + redemption_adjustment + cost_pressure_adjustment;
    let recommended = if unclamped.is_nan() {
        MIN_RATE
    } else {
        round1(unclamped.clamp(MIN_RATE, MAX_RATE))
    };

    EarningRateBreakdown {
        base_rate,
        budget_adjustment,
        redemption_adjustment,
        total_cost_pct,
        cost_pressure_adjustment,
        unclamped,
        recommended,
    }
}

/// Recommended points-per-currency-unit rate.
pub fn recommend(d: &EarningRateDrivers) -> f64 {
    let b = breakdown(d);
    log::debug!(
        "earning_rate: base={:.2} budget={:+.2} redemption={:+.2} pressure={:+.2} -> {:.1}",
        b.base_rate,
        b.budget_adjustment,
        b.redemption_adjustment,
        b.cost_pressure_adjustment,
        b.recommended
    );
    b.recommended
}
