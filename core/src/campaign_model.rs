//! Campaign model: projects one campaign's participation, revenue and
//! reward cost, then derives its profit and ROI.
//!
//! Each variant has its own participation/revenue/cost formula; the profit
//! and ROI steps are shared. Participants stay fractional through every
//! intermediate step and are rounded only in the output.

use crate::{
    base_program,
    campaign::{
        Campaign, CampaignKind, CampaignMetrics, FrequencyRewardParams, GroupRewardParams,
        MinPurchaseParams, PointMultiplierParams, ReferralParams, SpecialOccasionParams,
        SpendingTierParams, TimeBasedParams,
    },
    inputs::NormalizedInputs,
    normalize::{safe_pct, FieldValue},
    types::{Money, DAYS_PER_MONTH},
};
use serde::Serialize;

/// Spending-tier members are assumed to spend this much more.
pub const SPENDING_TIER_EXTRA_SPEND: f64 = 0.20;
/// Share of spending-tier participants assumed to reach the threshold.
pub const SPENDING_TIER_ACHIEVER_RATE: f64 = 0.6;
/// Baseline visits per customer per month, used by frequency rewards.
pub const BASELINE_VISITS_PER_MONTH: f64 = 2.5;
/// Trading hours the happy-hour window is measured against.
pub const TRADING_HOURS_PER_DAY: f64 = 12.0;

/// Everything a campaign projection reads from the merchant context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignContext {
    pub inputs:      NormalizedInputs,
    /// Value of one redeemed point in the base program.
    pub point_value: Money,
}

impl CampaignContext {
    pub fn new(inputs: &NormalizedInputs) -> Self {
        Self {
            inputs:      *inputs,
            point_value: base_program::point_value(inputs),
        }
    }

    pub fn with_point_value(inputs: &NormalizedInputs, point_value: Money) -> Self {
        Self { inputs: *inputs, point_value }
    }
}

/// Variant-specific part of the projection, before costs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CampaignProjection {
    pub participants:        f64,
    pub revenue:             Money,
    pub incremental_revenue: Money,
    pub point_cost:          Money,
}

fn months(duration: FieldValue) -> f64 {
    duration.value() / DAYS_PER_MONTH
}

fn share(pct: FieldValue) -> f64 {
    pct.value() / 100.0
}

fn uplifted(avg_value: f64, additional_spending: FieldValue) -> f64 {
    avg_value * (1.0 + share(additional_spending))
}

/// Projection for the common "extra spend on participating transactions"
/// shape: revenue at the uplifted ticket, incremental over the plain ticket.
fn extra_spend(participants: f64, avg_value: f64, additional_spending: FieldValue) -> (Money, Money) {
    let revenue = participants * uplifted(avg_value, additional_spending);
    (revenue, revenue - participants * avg_value)
}

pub fn project(kind: &CampaignKind, ctx: &CampaignContext) -> CampaignProjection {
    let n = &ctx.inputs;
    let tx = n.monthly_transactions;
    let avg = n.avg_transaction_value;
    let budget_share = n.reward_budget_pct / 100.0;

    match kind {
        CampaignKind::PointMultiplier(PointMultiplierParams {
            duration,
            point_multiplier,
            target_participation,
            additional_spending,
        }) => {
            let participants = tx * share(*target_participation) * months(*duration);
            let (revenue, incremental_revenue) = extra_spend(participants, avg, *additional_spending);
            CampaignProjection {
                participants,
                revenue,
                incremental_revenue,
                point_cost: revenue * budget_share * point_multiplier.rate_denominator(),
            }
        }

        CampaignKind::GroupReward(GroupRewardParams {
            duration,
            min_group_size,
            bonus_points_per_person,
            target_participation,
            additional_spending,
        }) => {
            let group_tx = tx * share(*target_participation) * months(*duration);
            let participants = group_tx * min_group_size.rate_denominator();
            let (revenue, incremental_revenue) = extra_spend(group_tx, avg, *additional_spending);
            CampaignProjection {
                participants,
                revenue,
                incremental_revenue,
                point_cost: bonus_points_per_person.value() * participants * ctx.point_value,
            }
        }

        CampaignKind::SpendingTier(SpendingTierParams {
            duration,
            spending_threshold: _,
            tier_bonus,
            target_participation,
        }) => {
            let participants = tx * share(*target_participation) * months(*duration);
            let revenue = participants * avg * (1.0 + SPENDING_TIER_EXTRA_SPEND);
            CampaignProjection {
                participants,
                revenue,
                incremental_revenue: revenue - participants * avg,
                point_cost: SPENDING_TIER_ACHIEVER_RATE * participants * tier_bonus.value(),
            }
        }

        CampaignKind::Referral(ReferralParams {
            duration: _,
            referrer_bonus,
            referee_bonus,
            expected_referrals,
        }) => {
            let participants = expected_referrals.value();
            let revenue = participants * avg;
            CampaignProjection {
                participants,
                revenue,
                incremental_revenue: revenue,
                point_cost: participants * (referee_bonus.value() + referrer_bonus.value()),
            }
        }

        CampaignKind::SpecialOccasion(SpecialOccasionParams {
            occasion_bonus,
            expected_occasions,
            additional_spending,
        }) => {
            let participants = expected_occasions.value();
            let (revenue, incremental_revenue) = extra_spend(participants, avg, *additional_spending);
            CampaignProjection {
                participants,
                revenue,
                incremental_revenue,
                point_cost: participants * occasion_bonus.value(),
            }
        }

        CampaignKind::MinPurchase(MinPurchaseParams {
            duration,
            min_purchase_amount: _,
            bonus_reward,
            target_participation,
            additional_spending,
        }) => {
            let participants = tx * share(*target_participation) * months(*duration);
            let (revenue, incremental_revenue) = extra_spend(participants, avg, *additional_spending);
            CampaignProjection {
                participants,
                revenue,
                incremental_revenue,
                point_cost: participants * bonus_reward.value(),
            }
        }

        CampaignKind::TimeBased(TimeBasedParams {
            duration,
            daily_hours,
            point_multiplier,
            target_participation,
            additional_spending,
        }) => {
            let daily_tx = tx / DAYS_PER_MONTH;
            let window_share = daily_hours.value() / TRADING_HOURS_PER_DAY;
            let participants = daily_tx
                * window_share
                * share(*target_participation)
                * DAYS_PER_MONTH
                * months(*duration);
            let (revenue, incremental_revenue) = extra_spend(participants, avg, *additional_spending);
            CampaignProjection {
                participants,
                revenue,
                incremental_revenue,
                point_cost: revenue * budget_share * point_multiplier.rate_denominator(),
            }
        }

        CampaignKind::FrequencyReward(FrequencyRewardParams {
            duration,
            required_visits,
            bonus_reward,
            target_participation,
        }) => {
            let unique_customers = tx / BASELINE_VISITS_PER_MONTH;
            let participants = unique_customers * share(*target_participation) * months(*duration);
            let extra_visits = (required_visits.value() - BASELINE_VISITS_PER_MONTH).max(0.0);
            let incremental_revenue = extra_visits * participants * avg;
            CampaignProjection {
                participants,
                revenue: incremental_revenue,
                incremental_revenue,
                point_cost: participants * bonus_reward.value(),
            }
        }
    }
}

/// Full metrics for one campaign.
pub fn evaluate(campaign: &Campaign, ctx: &CampaignContext) -> CampaignMetrics {
    let p = project(&campaign.kind, ctx);

    let total_cost = p.point_cost + campaign.marketing_cost.value();
    let gross_profit_from_incremental = p.incremental_revenue * (ctx.inputs.gross_margin_pct / 100.0);
    let net_profit = gross_profit_from_incremental - total_cost;
    let roi_pct = safe_pct(net_profit, total_cost);

    log::debug!(
        "campaign {} ({:?}): participants={:.1} revenue={:.2} cost={:.2} roi={:.2}%",
        campaign.id,
        campaign.campaign_type(),
        p.participants,
        p.revenue,
        total_cost,
        roi_pct
    );

    CampaignMetrics {
        id: campaign.id,
        name: campaign.name.clone(),
        campaign_type: campaign.campaign_type(),
        enabled: campaign.enabled,
        participants: p.participants.round() as i64,
        revenue: p.revenue,
        incremental_revenue: p.incremental_revenue,
        point_cost: p.point_cost,
        total_cost,
        gross_profit_from_incremental,
        net_profit,
        roi_pct,
    }
}

/// Metrics for every campaign, in input order, disabled ones included.
pub fn evaluate_all(campaigns: &[Campaign], ctx: &CampaignContext) -> Vec<CampaignMetrics> {
    campaigns.iter().map(|c| evaluate(c, ctx)).collect()
}
