//! Model assumptions: the fixed constants behind the formulas, named and
//! overridable.
//!
//! Defaults live in code. `ModelConfig::load` reads
//! `{data_dir}/assumptions.json`; any key missing from the file keeps its
//! default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramAssumptions {
    /// Share of revenue that comes from loyalty members (0..=1).
    /// Uplift is applied to this share only.
    pub member_share: f64,
    /// Margin headroom (percentage points) above which the program is safe.
    pub margin_safety_threshold_pct: f64,
    /// Fixed cost as % of revenue above which revenue is too small.
    pub fixed_cost_ratio_limit_pct: f64,
}

impl Default for ProgramAssumptions {
    fn default() -> Self {
        Self {
            member_share:                0.70,
            margin_safety_threshold_pct: 10.0,
            fixed_cost_ratio_limit_pct:  10.0,
        }
    }
}

/// Constants for the static Tier/VIP what-if.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierAssumptions {
    pub reward_cost_multiplier: f64,
    pub revenue_uplift_pct:     f64,
}

impl Default for TierAssumptions {
    fn default() -> Self {
        Self {
            reward_cost_multiplier: 1.3,
            revenue_uplift_pct:     35.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerThresholds {
    /// Campaigns at or below this ROI are candidates for optimization.
    pub trigger_roi_pct: f64,
    /// ROI the rule set aims for. Informational; the rules are fixed.
    pub target_roi_pct:  f64,
}

impl Default for OptimizerThresholds {
    fn default() -> Self {
        Self {
            trigger_roi_pct: 10.0,
            target_roi_pct:  15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioThresholds {
    /// Combined ROI at which the campaign mix counts as well optimized.
    pub well_optimized_roi_pct: f64,
}

impl Default for PortfolioThresholds {
    fn default() -> Self {
        Self { well_optimized_roi_pct: 50.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub program:   ProgramAssumptions,
    pub tier:      TierAssumptions,
    pub optimizer: OptimizerThresholds,
    pub portfolio: PortfolioThresholds,
}

impl ModelConfig {
    pub const ASSUMPTIONS_FILE: &'static str = "assumptions.json";

    /// Load from the data/ directory.
    /// In tests, use ModelConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{}", Self::ASSUMPTIONS_FILE);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ModelConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::debug!(
            "config: loaded {path} (member_share={:.2})",
            config.program.member_share
        );
        Ok(config)
    }

    /// Like `load`, but falls back to defaults when the file does not exist.
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{}", Self::ASSUMPTIONS_FILE);
        if std::path::Path::new(&path).exists() {
            Self::load(data_dir)
        } else {
            log::info!("config: {path} not found, using built-in assumptions");
            Ok(Self::default())
        }
    }
}
