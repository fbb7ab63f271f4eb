//! Base program model: the always-on point-earning program.
//!
//! Every revenue-normalized ratio is guarded: with no revenue (zero
//! transactions or zero ticket size) the ratio is 0, never NaN or infinite.

use crate::{
    config::{ProgramAssumptions, TierAssumptions},
    inputs::NormalizedInputs,
    normalize::{safe_div, safe_pct},
    types::Money,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramMetrics {
    // Revenue and points
    pub monthly_revenue:               Money,
    pub reward_budget_amount:          Money,
    pub points_per_currency_unit:      f64,
    pub points_earned_per_transaction: f64,
    pub total_points_issued:           f64,
    pub points_redeemed:               f64,
    pub point_value:                   Money,
    // Costs
    pub total_monthly_cost:            Money,
    pub cost_to_revenue_ratio:         f64,
    pub annual_program_cost:           Money,
    // Uplift economics
    pub member_revenue:                      Money,
    pub additional_revenue_from_returning:   Money,
    pub additional_gross_profit:             Money,
    pub base_net_profit:                     Money,
    pub base_roi_pct:                        f64,
    // Safety
    pub margin_safety:                 f64,
    pub is_safe:                       bool,
    pub fixed_cost_ratio:              f64,
    pub is_revenue_too_small:          bool,
    // Break-even
    pub break_even_uplift_pct:           f64,
    pub additional_transactions_needed:  i64,
    pub break_even_transactions:         f64,
    // Per-transaction view
    pub current_gross_profit_per_transaction: Money,
    pub reward_cost_per_transaction:          Money,
    pub total_cost_per_transaction:           Money,
    pub fixed_cost_per_transaction:           Money,
    pub reward_cost_pct_of_revenue:           f64,
    pub fixed_cost_pct_of_revenue:            f64,
    // Static what-if
    pub tier:                          TierProjection,
}

/// Tier/VIP what-if: richer rewards for an assumed revenue uplift.
/// Not driven by campaign data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierProjection {
    pub tier_cost:         Money,
    pub tier_revenue:      Money,
    pub tier_gross_profit: Money,
    pub tier_net_profit:   Money,
    pub tier_roi_pct:      f64,
}

/// Value backing one redeemed point: reward budget spread over the points
/// expected to be redeemed. 0 when nothing is redeemed.
pub fn point_value(n: &NormalizedInputs) -> Money {
    let reward_budget_amount = n.monthly_revenue() * (n.reward_budget_pct / 100.0);
    safe_div(reward_budget_amount, points_redeemed(n))
}

fn points_redeemed(n: &NormalizedInputs) -> f64 {
    let per_tx = n.avg_transaction_value / n.points_per_currency_unit;
    n.monthly_transactions * per_tx * (n.redemption_rate_pct / 100.0)
}

pub fn project_tier(
    monthly_revenue: Money,
    reward_budget_amount: Money,
    gross_margin_pct: f64,
    assumptions: &TierAssumptions,
) -> TierProjection {
    let tier_cost = reward_budget_amount * assumptions.reward_cost_multiplier;
    let tier_revenue = monthly_revenue * (assumptions.revenue_uplift_pct / 100.0);
    let tier_gross_profit = tier_revenue * (gross_margin_pct / 100.0);
    let tier_net_profit = tier_gross_profit - tier_cost;

    TierProjection {
        tier_cost,
        tier_revenue,
        tier_gross_profit,
        tier_net_profit,
        tier_roi_pct: safe_pct(tier_net_profit, tier_cost),
    }
}

pub fn compute(
    n: &NormalizedInputs,
    program: &ProgramAssumptions,
    tier: &TierAssumptions,
) -> ProgramMetrics {
    let margin = n.gross_margin_pct;
    let monthly_revenue = n.monthly_revenue();
    let reward_budget_amount = monthly_revenue * (n.reward_budget_pct / 100.0);

    // ── Points ─────────────────────────────────────────────────
    let points_earned_per_transaction = n.avg_transaction_value / n.points_per_currency_unit;
    let total_points_issued = n.monthly_transactions * points_earned_per_transaction;
    let points_redeemed = total_points_issued * (n.redemption_rate_pct / 100.0);
    let point_value = safe_div(reward_budget_amount, points_redeemed);

    // ── Costs ──────────────────────────────────────────────────
    let total_monthly_cost = reward_budget_amount + n.fixed_program_cost;
    let cost_to_revenue_ratio = safe_pct(total_monthly_cost, monthly_revenue);

    // ── Uplift economics ───────────────────────────────────────
    let member_revenue = monthly_revenue * program.member_share;
    let additional_revenue_from_returning =
        member_revenue * (n.returning_customer_uplift_pct / 100.0);
    let additional_gross_profit = additional_revenue_from_returning * (margin / 100.0);
    let base_net_profit = additional_gross_profit - total_monthly_cost;
    let base_roi_pct = safe_pct(base_net_profit, total_monthly_cost);

    // ── Safety ─────────────────────────────────────────────────
    let reward_cost_pct_of_revenue = safe_pct(reward_budget_amount, monthly_revenue);
    let margin_safety = margin - reward_cost_pct_of_revenue;
    let fixed_cost_ratio = safe_pct(n.fixed_program_cost, monthly_revenue);

    // ── Break-even ─────────────────────────────────────────────
    let needed_additional_revenue = safe_div(total_monthly_cost, margin / 100.0);
    let break_even_uplift_pct = safe_pct(needed_additional_revenue, monthly_revenue);
    let current_gross_profit_per_transaction = n.avg_transaction_value * (margin / 100.0);
    let additional_transactions_needed = if current_gross_profit_per_transaction > 0.0 {
        (total_monthly_cost / current_gross_profit_per_transaction).ceil() as i64
    } else {
        0
    };

    let metrics = ProgramMetrics {
        monthly_revenue,
        reward_budget_amount,
        points_per_currency_unit: n.points_per_currency_unit,
        points_earned_per_transaction,
        total_points_issued,
        points_redeemed,
        point_value,
        total_monthly_cost,
        cost_to_revenue_ratio,
        annual_program_cost: total_monthly_cost * 12.0,
        member_revenue,
        additional_revenue_from_returning,
        additional_gross_profit,
        base_net_profit,
        base_roi_pct,
        margin_safety,
        is_safe: margin_safety > program.margin_safety_threshold_pct,
        fixed_cost_ratio,
        is_revenue_too_small: fixed_cost_ratio > program.fixed_cost_ratio_limit_pct,
        break_even_uplift_pct,
        additional_transactions_needed,
        break_even_transactions: n.monthly_transactions + additional_transactions_needed as f64,
        current_gross_profit_per_transaction,
        reward_cost_per_transaction: safe_div(reward_budget_amount, n.monthly_transactions),
        total_cost_per_transaction: safe_div(total_monthly_cost, n.monthly_transactions),
        fixed_cost_per_transaction: safe_div(n.fixed_program_cost, n.monthly_transactions),
        reward_cost_pct_of_revenue,
        fixed_cost_pct_of_revenue: fixed_cost_ratio,
        tier: project_tier(monthly_revenue, reward_budget_amount, margin, tier),
    };

    log::debug!(
        "base_program: revenue={:.2} cost={:.2} roi={:.2}% safety={:.1}",
        metrics.monthly_revenue,
        metrics.total_monthly_cost,
        metrics.base_roi_pct,
        metrics.margin_safety
    );

    metrics
}
