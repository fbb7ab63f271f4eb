//! Scenario: one merchant context, the program inputs plus its campaign
//! book, serializable to and from JSON.
//!
//! A scenario is plain data. Reports are always recomputed from it through
//! `LoyaltyModel::evaluate`; they are never stored alongside it.

use crate::{
    campaign_book::CampaignBook,
    engine::{LoyaltyModel, ModelReport},
    error::ModelResult,
    inputs::ProgramInputs,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub inputs:    ProgramInputs,
    pub campaigns: CampaignBook,
}

impl Scenario {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a scenario file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let scenario: Scenario = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::debug!(
            "scenario: loaded {path} ({} campaign(s))",
            scenario.campaigns.len()
        );
        Ok(scenario)
    }

    pub fn report(&self, model: &LoyaltyModel) -> ModelReport {
        model.evaluate(&self.inputs, self.campaigns.as_slice())
    }
}
