//! The model facade: one call turns a merchant context into a full report.
//!
//! PIPELINE (fixed order, each stage reads only earlier stages):
//!   1. Normalize inputs
//!   2. Earning-rate advisor
//!   3. Base program model
//!   4. Campaign model, per campaign
//!   5. Aggregation and portfolio insights
//!
//! The model holds only its assumptions. Every call recomputes from
//! scratch; nothing is cached between calls.

use crate::{
    aggregation::{self, PortfolioInsight, PortfolioMetrics},
    base_program::{self, ProgramMetrics},
    campaign::{Campaign, CampaignMetrics},
    campaign_model::{self, CampaignContext},
    config::ModelConfig,
    earning_rate::{self, EarningRateBreakdown, EarningRateDrivers},
    inputs::{NormalizedInputs, ProgramInputs},
    optimizer::{self, Optimization},
    types::CampaignId,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub inputs:        NormalizedInputs,
    pub earning_rate:  EarningRateBreakdown,
    pub program:       ProgramMetrics,
    pub campaigns:     Vec<CampaignMetrics>,
    pub portfolio:     PortfolioMetrics,
    pub insights:      Vec<PortfolioInsight>,
}

impl ModelReport {
    pub fn campaign(&self, id: CampaignId) -> Option<&CampaignMetrics> {
        self.campaigns.iter().find(|m| m.id == id)
    }

    /// Enabled campaigns at or below the optimizer trigger.
    pub fn optimization_candidates(&self, trigger_roi_pct: f64) -> impl Iterator<Item = &CampaignMetrics> {
        self.campaigns
            .iter()
            .filter(move |m| m.enabled && m.roi_pct <= trigger_roi_pct)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoyaltyModel {
    pub config: ModelConfig,
}

impl LoyaltyModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn program(&self, inputs: &ProgramInputs) -> ProgramMetrics {
        base_program::compute(&inputs.normalized(), &self.config.program, &self.config.tier)
    }

    pub fn evaluate_campaign(&self, inputs: &ProgramInputs, campaign: &Campaign) -> CampaignMetrics {
        campaign_model::evaluate(campaign, &CampaignContext::new(&inputs.normalized()))
    }

    pub fn evaluate(&self, inputs: &ProgramInputs, campaigns: &[Campaign]) -> ModelReport {
        let n = inputs.normalized();

        let earning_rate = earning_rate::breakdown(&EarningRateDrivers::from(&n));
        let program = base_program::compute(&n, &self.config.program, &self.config.tier);

        let ctx = CampaignContext::with_point_value(&n, program.point_value);
        let campaigns = campaign_model::evaluate_all(campaigns, &ctx);

        let portfolio = aggregation::aggregate(&campaigns);
        let insights = aggregation::insights(&campaigns, &portfolio, &self.config.portfolio);

        log::debug!(
            "engine: {} campaign(s), {} enabled, combined roi={:.2}%",
            campaigns.len(),
            portfolio.enabled_count,
            portfolio.combined_roi_pct
        );

        ModelReport {
            inputs: n,
            earning_rate,
            program,
            campaigns,
            portfolio,
            insights,
        }
    }

    /// Advisor proposal for one campaign under the current inputs.
    /// Does not modify anything.
    pub fn optimize_campaign(&self, inputs: &ProgramInputs, campaign: &Campaign) -> Optimization {
        let metrics = self.evaluate_campaign(inputs, campaign);
        optimizer::optimize_with(campaign, &metrics, &self.config.optimizer)
    }
}
