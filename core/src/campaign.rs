//! Campaign definitions: a closed set of variants, each with its own fixed
//! parameter list.
//!
//! Parameters are addressed through `CampaignParam`, so edit commands and
//! the optimizer never go through string keys. A parameter that does not
//! belong to a variant is simply absent (`get` returns `None`).

use crate::{
    normalize::FieldValue,
    types::{CampaignId, Money},
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Variant catalog ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    PointMultiplier,
    GroupReward,
    SpendingTier,
    Referral,
    SpecialOccasion,
    MinPurchase,
    TimeBased,
    FrequencyReward,
}

impl CampaignType {
    pub const ALL: [CampaignType; 8] = [
        Self::PointMultiplier,
        Self::GroupReward,
        Self::SpendingTier,
        Self::Referral,
        Self::SpecialOccasion,
        Self::MinPurchase,
        Self::TimeBased,
        Self::FrequencyReward,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PointMultiplier => "Point Multiplier",
            Self::GroupReward     => "Group Reward",
            Self::SpendingTier    => "Spending Tier",
            Self::Referral        => "Referral Program",
            Self::SpecialOccasion => "Special Occasion",
            Self::MinPurchase     => "Minimum Purchase",
            Self::TimeBased       => "Happy Hour",
            Self::FrequencyReward => "Frequency Reward",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PointMultiplier => "Double/Triple points promotion",
            Self::GroupReward     => "Bonus for dining in groups",
            Self::SpendingTier    => "Unlock rewards at spending thresholds",
            Self::Referral        => "Invite friends, both earn rewards",
            Self::SpecialOccasion => "Birthday/anniversary bonuses",
            Self::MinPurchase     => "Bonus for spending above threshold",
            Self::TimeBased       => "Time-based promotions",
            Self::FrequencyReward => "Visit X times get bonus",
        }
    }

    /// Variant-specific parameters, in form order. Marketing cost is common
    /// to every variant and listed last.
    pub fn params(&self) -> &'static [CampaignParam] {
        use CampaignParam::*;
        match self {
            Self::PointMultiplier => &[Duration, PointMultiplier, TargetParticipation, AdditionalSpending, MarketingCost],
            Self::GroupReward     => &[Duration, MinGroupSize, BonusPointsPerPerson, TargetParticipation, AdditionalSpending, MarketingCost],
            Self::SpendingTier    => &[Duration, SpendingThreshold, TierBonus, TargetParticipation, MarketingCost],
            Self::Referral        => &[Duration, ReferrerBonus, RefereeBonus, ExpectedReferrals, MarketingCost],
            Self::SpecialOccasion => &[OccasionBonus, ExpectedOccasions, AdditionalSpending, MarketingCost],
            Self::MinPurchase     => &[Duration, MinPurchaseAmount, BonusReward, TargetParticipation, AdditionalSpending, MarketingCost],
            Self::TimeBased       => &[Duration, DailyHours, PointMultiplier, TargetParticipation, AdditionalSpending, MarketingCost],
            Self::FrequencyReward => &[Duration, RequiredVisits, BonusReward, TargetParticipation, MarketingCost],
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignParam {
    Duration,
    PointMultiplier,
    TargetParticipation,
    AdditionalSpending,
    MarketingCost,
    MinGroupSize,
    BonusPointsPerPerson,
    SpendingThreshold,
    TierBonus,
    ReferrerBonus,
    RefereeBonus,
    ExpectedReferrals,
    OccasionBonus,
    ExpectedOccasions,
    MinPurchaseAmount,
    BonusReward,
    DailyHours,
    RequiredVisits,
}

impl CampaignParam {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Duration             => "Duration (Days)",
            Self::PointMultiplier      => "Point Multiplier",
            Self::TargetParticipation  => "Target Participation (%)",
            Self::AdditionalSpending   => "Additional Spending (%)",
            Self::MarketingCost        => "Marketing Cost",
            Self::MinGroupSize         => "Minimum Group Size",
            Self::BonusPointsPerPerson => "Bonus Points per Person",
            Self::SpendingThreshold    => "Spending Threshold",
            Self::TierBonus            => "Tier Bonus",
            Self::ReferrerBonus        => "Referrer Bonus",
            Self::RefereeBonus         => "Referee Bonus",
            Self::ExpectedReferrals    => "Expected Referrals",
            Self::OccasionBonus        => "Occasion Bonus",
            Self::ExpectedOccasions    => "Expected Occasions",
            Self::MinPurchaseAmount    => "Minimum Purchase",
            Self::BonusReward          => "Bonus Reward",
            Self::DailyHours           => "Daily Hours",
            Self::RequiredVisits       => "Required Visits",
        }
    }

    pub fn helper(&self) -> &'static str {
        match self {
            Self::Duration             => "How long the campaign runs",
            Self::PointMultiplier      => "2X = Double Points, 3X = Triple",
            Self::TargetParticipation  => "Expected customer participation rate",
            Self::AdditionalSpending   => "How much more customers will spend",
            Self::MarketingCost        => "Total marketing budget",
            Self::MinGroupSize         => "Required number of people",
            Self::BonusPointsPerPerson => "Points awarded to each member",
            Self::SpendingThreshold    => "Amount needed to unlock tier",
            Self::TierBonus            => "Reward value at tier",
            Self::ReferrerBonus        => "Reward for person who refers",
            Self::RefereeBonus         => "Reward for new customer",
            Self::ExpectedReferrals    => "How many new customers expected",
            Self::OccasionBonus        => "Reward on birthday/anniversary",
            Self::ExpectedOccasions    => "Number of occasions per month",
            Self::MinPurchaseAmount    => "Threshold to earn bonus",
            Self::BonusReward          => "Value of reward earned",
            Self::DailyHours           => "Hours per day campaign is active",
            Self::RequiredVisits       => "Number of visits needed",
        }
    }
}

impl fmt::Display for CampaignParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Variant parameter records ─────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointMultiplierParams {
    pub duration:             FieldValue,
    pub point_multiplier:     FieldValue,
    pub target_participation: FieldValue,
    pub additional_spending:  FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupRewardParams {
    pub duration:                FieldValue,
    pub min_group_size:          FieldValue,
    pub bonus_points_per_person: FieldValue,
    pub target_participation:    FieldValue,
    pub additional_spending:     FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendingTierParams {
    pub duration:             FieldValue,
    pub spending_threshold:   FieldValue,
    pub tier_bonus:           FieldValue,
    pub target_participation: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralParams {
    pub duration:           FieldValue,
    pub referrer_bonus:     FieldValue,
    pub referee_bonus:      FieldValue,
    pub expected_referrals: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialOccasionParams {
    pub occasion_bonus:      FieldValue,
    pub expected_occasions:  FieldValue,
    pub additional_spending: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinPurchaseParams {
    pub duration:             FieldValue,
    pub min_purchase_amount:  FieldValue,
    pub bonus_reward:         FieldValue,
    pub target_participation: FieldValue,
    pub additional_spending:  FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBasedParams {
    pub duration:             FieldValue,
    pub daily_hours:          FieldValue,
    pub point_multiplier:     FieldValue,
    pub target_participation: FieldValue,
    pub additional_spending:  FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyRewardParams {
    pub duration:             FieldValue,
    pub required_visits:      FieldValue,
    pub bonus_reward:         FieldValue,
    pub target_participation: FieldValue,
}

/// Variant-specific part of a campaign. Serialized inline with the common
/// fields, discriminated by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampaignKind {
    PointMultiplier(PointMultiplierParams),
    GroupReward(GroupRewardParams),
    SpendingTier(SpendingTierParams),
    Referral(ReferralParams),
    SpecialOccasion(SpecialOccasionParams),
    MinPurchase(MinPurchaseParams),
    TimeBased(TimeBasedParams),
    FrequencyReward(FrequencyRewardParams),
}

impl CampaignKind {
    /// A variant with every parameter unset.
    pub fn empty(campaign_type: CampaignType) -> Self {
        match campaign_type {
            CampaignType::PointMultiplier => Self::PointMultiplier(Default::default()),
            CampaignType::GroupReward     => Self::GroupReward(Default::default()),
            CampaignType::SpendingTier    => Self::SpendingTier(Default::default()),
            CampaignType::Referral        => Self::Referral(Default::default()),
            CampaignType::SpecialOccasion => Self::SpecialOccasion(Default::default()),
            CampaignType::MinPurchase     => Self::MinPurchase(Default::default()),
            CampaignType::TimeBased       => Self::TimeBased(Default::default()),
            CampaignType::FrequencyReward => Self::FrequencyReward(Default::default()),
        }
    }

    pub fn campaign_type(&self) -> CampaignType {
        match self {
            Self::PointMultiplier(_) => CampaignType::PointMultiplier,
            Self::GroupReward(_)     => CampaignType::GroupReward,
            Self::SpendingTier(_)    => CampaignType::SpendingTier,
            Self::Referral(_)        => CampaignType::Referral,
            Self::SpecialOccasion(_) => CampaignType::SpecialOccasion,
            Self::MinPurchase(_)     => CampaignType::MinPurchase,
            Self::TimeBased(_)       => CampaignType::TimeBased,
            Self::FrequencyReward(_) => CampaignType::FrequencyReward,
        }
    }

    /// Mutable access to a variant parameter. `None` when the parameter
    /// is not part of this variant (marketing cost lives on `Campaign`).
    pub fn slot_mut(&mut self, param: CampaignParam) -> Option<&mut FieldValue> {
        use CampaignParam as P;
        let slot = match self {
            Self::PointMultiplier(p) => match param {
                P::Duration            => &mut p.duration,
                P::PointMultiplier     => &mut p.point_multiplier,
                P::TargetParticipation => &mut p.target_participation,
                P::AdditionalSpending  => &mut p.additional_spending,
                _ => return None,
            },
            Self::GroupReward(p) => match param {
                P::Duration             => &mut p.duration,
                P::MinGroupSize         => &mut p.min_group_size,
                P::BonusPointsPerPerson => &mut p.bonus_points_per_person,
                P::TargetParticipation  => &mut p.target_participation,
                P::AdditionalSpending   => &mut p.additional_spending,
                _ => return None,
            },
            Self::SpendingTier(p) => match param {
                P::Duration            => &mut p.duration,
                P::SpendingThreshold   => &mut p.spending_threshold,
                P::TierBonus           => &mut p.tier_bonus,
                P::TargetParticipation => &mut p.target_participation,
                _ => return None,
            },
            Self::Referral(p) => match param {
                P::Duration          => &mut p.duration,
                P::ReferrerBonus     => &mut p.referrer_bonus,
                P::RefereeBonus      => &mut p.referee_bonus,
                P::ExpectedReferrals => &mut p.expected_referrals,
                _ => return None,
            },
            Self::SpecialOccasion(p) => match param {
                P::OccasionBonus      => &mut p.occasion_bonus,
                P::ExpectedOccasions  => &mut p.expected_occasions,
                P::AdditionalSpending => &mut p.additional_spending,
                _ => return None,
            },
            Self::MinPurchase(p) => match param {
                P::Duration            => &mut p.duration,
                P::MinPurchaseAmount   => &mut p.min_purchase_amount,
                P::BonusReward         => &mut p.bonus_reward,
                P::TargetParticipation => &mut p.target_participation,
                P::AdditionalSpending  => &mut p.additional_spending,
                _ => return None,
            },
            Self::TimeBased(p) => match param {
                P::Duration            => &mut p.duration,
                P::DailyHours          => &mut p.daily_hours,
                P::PointMultiplier     => &mut p.point_multiplier,
                P::TargetParticipation => &mut p.target_participation,
                P::AdditionalSpending  => &mut p.additional_spending,
                _ => return None,
            },
            Self::FrequencyReward(p) => match param {
                P::Duration            => &mut p.duration,
                P::RequiredVisits      => &mut p.required_visits,
                P::BonusReward         => &mut p.bonus_reward,
                P::TargetParticipation => &mut p.target_participation,
                _ => return None,
            },
        };
        Some(slot)
    }

    pub fn get(&self, param: CampaignParam) -> Option<FieldValue> {
        // slot_mut on a scratch copy keeps the mapping in one place.
        self.clone().slot_mut(param).map(|v| *v)
    }
}

// ── Campaign ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id:             CampaignId,
    pub name:           String,
    pub enabled:        bool,
    #[serde(default)]
    pub marketing_cost: FieldValue,
    #[serde(flatten)]
    pub kind:           CampaignKind,
}

impl Campaign {
    pub fn new(id: CampaignId, name: impl Into<String>, kind: CampaignKind) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            marketing_cost: FieldValue::Unset,
            kind,
        }
    }

    pub fn with_marketing_cost(mut self, cost: Money) -> Self {
        self.marketing_cost = FieldValue::Value(cost);
        self
    }

    pub fn campaign_type(&self) -> CampaignType {
        self.kind.campaign_type()
    }

    pub fn get(&self, param: CampaignParam) -> Option<FieldValue> {
        match param {
            CampaignParam::MarketingCost => Some(self.marketing_cost),
            _ => self.kind.get(param),
        }
    }

    pub fn slot_mut(&mut self, param: CampaignParam) -> Option<&mut FieldValue> {
        match param {
            CampaignParam::MarketingCost => Some(&mut self.marketing_cost),
            _ => self.kind.slot_mut(param),
        }
    }
}

// ── Derived metrics ───────────────────────────────────────────────────

/// Per-campaign projection. Recomputed from a campaign plus the current
/// inputs; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetrics {
    pub id:                            CampaignId,
    pub name:                          String,
    #[serde(rename = "type")]
    pub campaign_type:                 CampaignType,
    pub enabled:                       bool,
    pub participants:                  i64,
    pub revenue:                       Money,
    pub incremental_revenue:           Money,
    pub point_cost:                    Money,
    pub total_cost:                    Money,
    pub gross_profit_from_incremental: Money,
    pub net_profit:                    Money,
    pub roi_pct:                       f64,
}
