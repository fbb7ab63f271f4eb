//! Campaign templates: starting parameters for a new campaign, looked up by
//! (variant, style, business size).
//!
//! Standard style at medium size is the baseline table below. Style scales
//! the reward and participation parameters; size scales marketing spend and
//! absolute volume figures (referrals, occasions).

use crate::{
    campaign::{
        Campaign, CampaignKind, CampaignParam, CampaignType, FrequencyRewardParams,
        GroupRewardParams, MinPurchaseParams, PointMultiplierParams, ReferralParams,
        SpecialOccasionParams, SpendingTierParams, TimeBasedParams,
    },
    normalize::FieldValue,
    types::{CampaignId, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStyle {
    Conservative,
    #[default]
    Standard,
    Aggressive,
}

impl TemplateStyle {
    pub const ALL: [TemplateStyle; 3] = [Self::Conservative, Self::Standard, Self::Aggressive];

    fn reward_factor(&self) -> f64 {
        match self {
            Self::Conservative => 0.6,
            Self::Standard     => 1.0,
            Self::Aggressive   => 1.5,
        }
    }

    fn participation_factor(&self) -> f64 {
        match self {
            Self::Conservative => 0.8,
            Self::Standard     => 1.0,
            Self::Aggressive   => 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessSizeTier {
    Small,
    #[default]
    Medium,
    Large,
}

impl BusinessSizeTier {
    pub const ALL: [BusinessSizeTier; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Monthly revenue below which a business counts as small.
    pub const SMALL_REVENUE_LIMIT: Money = 200_000.0;
    /// Monthly revenue below which a business counts as medium.
    pub const MEDIUM_REVENUE_LIMIT: Money = 1_000_000.0;

    pub fn from_monthly_revenue(revenue: Money) -> Self {
        if revenue < Self::SMALL_REVENUE_LIMIT {
            Self::Small
        } else if revenue < Self::MEDIUM_REVENUE_LIMIT {
            Self::Medium
        } else {
            Self::Large
        }
    }

    fn volume_factor(&self) -> f64 {
        match self {
            Self::Small  => 0.5,
            Self::Medium => 1.0,
            Self::Large  => 2.0,
        }
    }
}

/// How a parameter responds to style and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamRole {
    Reward,
    /// Reward expressed as a points multiplier; only the part above 1x scales.
    Multiplier,
    Participation,
    Volume,
    Marketing,
    Fixed,
}

fn role(param: CampaignParam) -> ParamRole {
    use CampaignParam as P;
    match param {
        P::PointMultiplier => ParamRole::Multiplier,
        P::BonusPointsPerPerson
        | P::TierBonus
        | P::ReferrerBonus
        | P::RefereeBonus
        | P::OccasionBonus
        | P::BonusReward => ParamRole::Reward,
        P::TargetParticipation => ParamRole::Participation,
        P::ExpectedReferrals | P::ExpectedOccasions => ParamRole::Volume,
        P::MarketingCost => ParamRole::Marketing,
        P::Duration
        | P::AdditionalSpending
        | P::MinGroupSize
        | P::SpendingThreshold
        | P::MinPurchaseAmount
        | P::DailyHours
        | P::RequiredVisits => ParamRole::Fixed,
    }
}

/// Parameters for a new campaign, before it gets an id and a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignTemplate {
    pub kind:           CampaignKind,
    pub marketing_cost: Money,
}

impl CampaignTemplate {
    pub fn into_campaign(self, id: CampaignId, name: impl Into<String>) -> Campaign {
        Campaign::new(id, name, self.kind).with_marketing_cost(self.marketing_cost)
    }
}

fn v(x: f64) -> FieldValue {
    FieldValue::Value(x)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Baseline parameters (standard style, medium business).
pub fn standard(campaign_type: CampaignType) -> CampaignTemplate {
    let (kind, marketing_cost) = match campaign_type {
        CampaignType::PointMultiplier => (
            CampaignKind::PointMultiplier(PointMultiplierParams {
                duration:             v(7.0),
                point_multiplier:     v(2.0),
                target_participation: v(30.0),
                additional_spending:  v(25.0),
            }),
            2_000.0,
        ),
        CampaignType::GroupReward => (
            CampaignKind::GroupReward(GroupRewardParams {
                duration:                v(14.0),
                min_group_size:          v(4.0),
                bonus_points_per_person: v(100.0),
                target_participation:    v(20.0),
                additional_spending:     v(30.0),
            }),
            1_500.0,
        ),
        CampaignType::SpendingTier => (
            CampaignKind::SpendingTier(SpendingTierParams {
                duration:             v(30.0),
                spending_threshold:   v(5_000.0),
                tier_bonus:           v(500.0),
                target_participation: v(25.0),
            }),
            1_000.0,
        ),
        CampaignType::Referral => (
            CampaignKind::Referral(ReferralParams {
                duration:           v(90.0),
                referrer_bonus:     v(200.0),
                referee_bonus:      v(100.0),
                expected_referrals: v(50.0),
            }),
            3_000.0,
        ),
        CampaignType::SpecialOccasion => (
            CampaignKind::SpecialOccasion(SpecialOccasionParams {
                occasion_bonus:      v(300.0),
                expected_occasions:  v(100.0),
                additional_spending: v(40.0),
            }),
            500.0,
        ),
        CampaignType::MinPurchase => (
            CampaignKind::MinPurchase(MinPurchaseParams {
                duration:             v(7.0),
                min_purchase_amount:  v(500.0),
                bonus_reward:         v(50.0),
                target_participation: v(35.0),
                additional_spending:  v(20.0),
            }),
            1_500.0,
        ),
        CampaignType::TimeBased => (
            CampaignKind::TimeBased(TimeBasedParams {
                duration:             v(30.0),
                daily_hours:          v(3.0),
                point_multiplier:     v(1.5),
                target_participation: v(25.0),
                additional_spending:  v(15.0),
            }),
            2_000.0,
        ),
        CampaignType::FrequencyReward => (
            CampaignKind::FrequencyReward(FrequencyRewardParams {
                duration:             v(30.0),
                required_visits:      v(5.0),
                bonus_reward:         v(200.0),
                target_participation: v(30.0),
            }),
            1_000.0,
        ),
    };
    CampaignTemplate { kind, marketing_cost }
}

pub fn template(
    campaign_type: CampaignType,
    style: TemplateStyle,
    size: BusinessSizeTier,
) -> CampaignTemplate {
    let mut t = standard(campaign_type);
    let reward = style.reward_factor();
    let volume = size.volume_factor();

    for &param in campaign_type.params() {
        if role(param) == ParamRole::Marketing {
            t.marketing_cost = round2(t.marketing_cost * volume);
            continue;
        }
        let Some(slot) = t.kind.slot_mut(param) else {
            continue;
        };
        let base = slot.value();
        let scaled = match role(param) {
            ParamRole::Reward        => base * reward,
            ParamRole::Multiplier    => 1.0 + (base - 1.0) * reward,
            ParamRole::Participation => (base * style.participation_factor()).min(100.0),
            ParamRole::Volume        => base * volume,
            ParamRole::Marketing | ParamRole::Fixed => base,
        };
        *slot = FieldValue::Value(round2(scaled));
    }

    t
}
