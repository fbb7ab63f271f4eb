//! Aggregation across campaigns: combined figures for the enabled set and
//! portfolio-level insights.
//!
//! Disabled campaigns contribute nothing to any sum but still appear in the
//! per-campaign list and in insights.

use crate::{
    campaign::CampaignMetrics,
    config::PortfolioThresholds,
    normalize::safe_pct,
    types::{CampaignId, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub enabled_count:                  usize,
    pub combined_revenue:               Money,
    pub combined_incremental_revenue:   Money,
    pub combined_cost:                  Money,
    pub combined_gross_profit:          Money,
    pub combined_net_profit:            Money,
    pub combined_roi_pct:               f64,
}

pub fn aggregate(metrics: &[CampaignMetrics]) -> PortfolioMetrics {
    let mut out = PortfolioMetrics::default();

    for m in metrics.iter().filter(|m| m.enabled) {
        out.enabled_count += 1;
        out.combined_revenue += m.revenue;
        out.combined_incremental_revenue += m.incremental_revenue;
        out.combined_cost += m.total_cost;
        out.combined_gross_profit += m.gross_profit_from_incremental;
    }

    out.combined_net_profit = out.combined_gross_profit - out.combined_cost;
    out.combined_roi_pct = safe_pct(out.combined_net_profit, out.combined_cost);
    out
}

/// Named campaign in an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRef {
    pub id:      CampaignId,
    pub name:    String,
    pub roi_pct: f64,
}

impl From<&CampaignMetrics> for CampaignRef {
    fn from(m: &CampaignMetrics) -> Self {
        Self { id: m.id, name: m.name.clone(), roi_pct: m.roi_pct }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PortfolioInsight {
    /// Disabled campaigns that would make money.
    EnableProfitable { campaigns: Vec<CampaignRef> },
    /// Enabled campaigns that lose money.
    DisableLossMaking { campaigns: Vec<CampaignRef> },
    WellOptimized { combined_roi_pct: f64 },
}

impl PortfolioInsight {
    pub fn message(&self) -> String {
        fn names(cs: &[CampaignRef]) -> String {
            cs.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ")
        }
        match self {
            Self::EnableProfitable { campaigns } => {
                let verb = if campaigns.len() == 1 { "has" } else { "have" };
                format!("Enable profitable campaigns: {} {verb} positive ROI", names(campaigns))
            }
            Self::DisableLossMaking { campaigns } => {
                let verb = if campaigns.len() == 1 { "is" } else { "are" };
                format!("Disable loss-making campaigns: {} {verb} losing money", names(campaigns))
            }
            Self::WellOptimized { combined_roi_pct } => {
                format!("Well optimized: combined ROI is {combined_roi_pct:.1}%")
            }
        }
    }
}

pub fn insights(
    metrics: &[CampaignMetrics],
    portfolio: &PortfolioMetrics,
    thresholds: &PortfolioThresholds,
) -> Vec<PortfolioInsight> {
    let mut out = Vec::new();

    let profitable_disabled: Vec<CampaignRef> = metrics
        .iter()
        .filter(|m| !m.enabled && m.roi_pct > 0.0)
        .map(CampaignRef::from)
        .collect();
    if !profitable_disabled.is_empty() {
        out.push(PortfolioInsight::EnableProfitable { campaigns: profitable_disabled });
    }

    let losing_enabled: Vec<CampaignRef> = metrics
        .iter()
        .filter(|m| m.enabled && m.roi_pct < 0.0)
        .map(CampaignRef::from)
        .collect();
    if !losing_enabled.is_empty() {
        out.push(PortfolioInsight::DisableLossMaking { campaigns: losing_enabled });
    }

    if portfolio.combined_roi_pct >= thresholds.well_optimized_roi_pct {
        out.push(PortfolioInsight::WellOptimized {
            combined_roi_pct: portfolio.combined_roi_pct,
        });
    }

    out
}
