//! Optimization advisor: fixed, variant-specific parameter rules that push
//! an under-performing campaign toward a healthier ROI.
//!
//! This is a rule table, not a solver. A rule only fires when it would
//! change the parameter, so applying the advisor to its own output
//! eventually proposes nothing. `optimize` is pure: the caller decides
//! whether to commit the returned campaign.

use crate::{
    campaign::{Campaign, CampaignMetrics, CampaignParam, CampaignParam as P, CampaignType},
    config::OptimizerThresholds,
    normalize::FieldValue,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Lower to `max` if above it.
    Cap { max: f64 },
    /// Raise to `min` if below it.
    Floor { min: f64 },
    /// If above `above`, scale by `factor` but not below `floor`.
    Shrink { above: f64, factor: f64, floor: f64 },
    /// If below `below`, scale by `factor` but not above `ceiling`.
    Grow { below: f64, factor: f64, ceiling: f64 },
}

impl Rule {
    /// New value for `current`, or `None` if the rule leaves it alone.
    pub fn apply(&self, current: f64) -> Option<f64> {
        let next = match *self {
            Rule::Cap { max } if current > max => max,
            Rule::Floor { min } if current < min => min,
            Rule::Shrink { above, factor, floor } if current > above => (current * factor).max(floor),
            Rule::Grow { below, factor, ceiling } if current < below => (current * factor).min(ceiling),
            _ => return None,
        };
        (next != current).then_some(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamRule {
    pub param: CampaignParam,
    pub rule:  Rule,
}

const fn rule(param: CampaignParam, rule: Rule) -> ParamRule {
    ParamRule { param, rule }
}

const POINT_MULTIPLIER: &[ParamRule] = &[
    rule(P::PointMultiplier, Rule::Cap { max: 2.0 }),
    rule(P::TargetParticipation, Rule::Floor { min: 40.0 }),
    rule(P::MarketingCost, Rule::Shrink { above: 1_000.0, factor: 0.5, floor: 500.0 }),
];

const GROUP_REWARD: &[ParamRule] = &[
    rule(P::BonusPointsPerPerson, Rule::Shrink { above: 50.0, factor: 0.6, floor: 50.0 }),
    rule(P::TargetParticipation, Rule::Floor { min: 25.0 }),
];

const SPENDING_TIER: &[ParamRule] = &[
    rule(P::TierBonus, Rule::Shrink { above: 200.0, factor: 0.4, floor: 200.0 }),
    rule(P::SpendingThreshold, Rule::Floor { min: 8_000.0 }),
];

const REFERRAL: &[ParamRule] = &[
    rule(P::ReferrerBonus, Rule::Cap { max: 150.0 }),
    rule(P::RefereeBonus, Rule::Cap { max: 75.0 }),
    rule(P::ExpectedReferrals, Rule::Grow { below: 100.0, factor: 1.5, ceiling: 100.0 }),
];

const SPECIAL_OCCASION: &[ParamRule] = &[
    rule(P::OccasionBonus, Rule::Shrink { above: 150.0, factor: 0.5, floor: 150.0 }),
    rule(P::AdditionalSpending, Rule::Floor { min: 40.0 }),
];

const MIN_PURCHASE: &[ParamRule] = &[
    rule(P::BonusReward, Rule::Cap { max: 30.0 }),
    rule(P::MinPurchaseAmount, Rule::Floor { min: 600.0 }),
];

const TIME_BASED: &[ParamRule] = &[
    rule(P::PointMultiplier, Rule::Cap { max: 1.5 }),
    rule(P::MarketingCost, Rule::Cap { max: 1_000.0 }),
];

const FREQUENCY_REWARD: &[ParamRule] = &[
    rule(P::BonusReward, Rule::Cap { max: 150.0 }),
    rule(P::RequiredVisits, Rule::Floor { min: 7.0 }),
];

/// The rule set for one campaign variant, applied in order.
pub fn rules_for(campaign_type: CampaignType) -> &'static [ParamRule] {
    match campaign_type {
        CampaignType::PointMultiplier => POINT_MULTIPLIER,
        CampaignType::GroupReward     => GROUP_REWARD,
        CampaignType::SpendingTier    => SPENDING_TIER,
        CampaignType::Referral        => REFERRAL,
        CampaignType::SpecialOccasion => SPECIAL_OCCASION,
        CampaignType::MinPurchase     => MIN_PURCHASE,
        CampaignType::TimeBased       => TIME_BASED,
        CampaignType::FrequencyReward => FREQUENCY_REWARD,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterChange {
    pub param: CampaignParam,
    pub from:  f64,
    pub to:    f64,
}

impl fmt::Display for ParameterChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.param.label(), self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    pub campaign: Campaign,
    /// Empty when nothing is left to adjust automatically.
    pub changes:  Vec<ParameterChange>,
}

impl Optimization {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Optimize with the default thresholds.
pub fn optimize(campaign: &Campaign, metrics: &CampaignMetrics) -> Optimization {
    optimize_with(campaign, metrics, &OptimizerThresholds::default())
}

pub fn optimize_with(
    campaign: &Campaign,
    metrics: &CampaignMetrics,
    thresholds: &OptimizerThresholds,
) -> Optimization {
    let mut next = campaign.clone();
    let mut changes = Vec::new();

    if metrics.roi_pct > thresholds.trigger_roi_pct {
        log::debug!(
            "optimizer: campaign {} already at {:.2}% ROI, nothing to do",
            campaign.id,
            metrics.roi_pct
        );
        return Optimization { campaign: next, changes };
    }

    for r in rules_for(campaign.campaign_type()) {
        let Some(slot) = next.slot_mut(r.param) else {
            continue;
        };
        let current = slot.value();
        if let Some(to) = r.rule.apply(current) {
            *slot = FieldValue::Value(to);
            changes.push(ParameterChange { param: r.param, from: current, to });
        }
    }

    log::debug!(
        "optimizer: campaign {} at {:.2}% ROI, {} change(s) toward {:.0}%",
        campaign.id,
        metrics.roi_pct,
        changes.len(),
        thresholds.target_roi_pct
    );

    Optimization { campaign: next, changes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_only_lowers() {
        let r = Rule::Cap { max: 2.0 };
        assert_eq!(r.apply(3.0), Some(2.0));
        assert_eq!(r.apply(2.0), None);
        assert_eq!(r.apply(1.0), None);
    }

    #[test]
    fn shrink_respects_floor() {
        let r = Rule::Shrink { above: 1_000.0, factor: 0.5, floor: 500.0 };
        assert_eq!(r.apply(4_000.0), Some(2_000.0));
        assert_eq!(r.apply(1_200.0), Some(600.0));
        assert_eq!(r.apply(1_000.0), None);
    }

    #[test]
    fn grow_from_zero_is_a_noop() {
        let r = Rule::Grow { below: 100.0, factor: 1.5, ceiling: 100.0 };
        assert_eq!(r.apply(0.0), None);
        assert_eq!(r.apply(80.0), Some(100.0));
    }

    #[test]
    fn every_rule_targets_a_param_of_its_variant() {
        for t in CampaignType::ALL {
            for r in rules_for(t) {
                assert!(t.params().contains(&r.param), "{t:?} rule on {:?}", r.param);
            }
            assert!(rules_for(t).len() <= 3);
        }
    }
}
