use crate::{
    benchmark::BusinessVertical,
    campaign::{CampaignParam, CampaignType},
    engine::LoyaltyModel,
    error::ModelResult,
    inputs::{InputField, InputPreset},
    normalize::FieldValue,
    optimizer::ParameterChange,
    scenario::Scenario,
    templates::{BusinessSizeTier, TemplateStyle},
    types::CampaignId,
};
use serde::{Deserialize, Serialize};

/// All edits a caller can make to a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ScenarioCommand {
    // ── Program inputs ────────────────────────────
    SetInput {
        field: InputField,
        #[serde(default)]
        value: FieldValue,
    },
    SetAutoAdjust { enabled: bool },
    ApplyBenchmark { vertical: BusinessVertical },
    ApplyPreset { preset: InputPreset },

    // ── Campaigns ─────────────────────────────────
    AddCampaign {
        campaign_type: CampaignType,
        #[serde(default)]
        style:         TemplateStyle,
        /// Derived from current monthly revenue when absent.
        #[serde(default)]
        size:          Option<BusinessSizeTier>,
    },
    SetCampaignParam {
        id:    CampaignId,
        param: CampaignParam,
        #[serde(default)]
        value: FieldValue,
    },
    RenameCampaign { id: CampaignId, name: String },
    ToggleCampaign { id: CampaignId },
    DeleteCampaign { id: CampaignId },
    /// Run the advisor and commit its proposal.
    OptimizeCampaign { id: CampaignId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Updated,
    CampaignAdded { id: CampaignId },
    CampaignToggled { id: CampaignId, enabled: bool },
    CampaignDeleted { id: CampaignId },
    Optimized { id: CampaignId, changes: Vec<ParameterChange> },
}

impl Scenario {
    /// Apply one command. A refused command leaves the scenario untouched.
    pub fn apply(
        &mut self,
        command: ScenarioCommand,
        model: &LoyaltyModel,
    ) -> ModelResult<CommandOutcome> {
        let result = self.apply_inner(command, model);
        if let Err(e) = &result {
            log::warn!("command: refused: {e}");
        }
        result
    }

    fn apply_inner(
        &mut self,
        command: ScenarioCommand,
        model: &LoyaltyModel,
    ) -> ModelResult<CommandOutcome> {
        match command {
            ScenarioCommand::SetInput { field, value } => {
                self.inputs.set_field(field, value);
                Ok(CommandOutcome::Updated)
            }
            ScenarioCommand::SetAutoAdjust { enabled } => {
                self.inputs.auto_adjust_points = enabled;
                Ok(CommandOutcome::Updated)
            }
            ScenarioCommand::ApplyBenchmark { vertical } => {
                self.inputs = self.inputs.with_benchmark(vertical);
                log::info!("command: applied {vertical} benchmark");
                Ok(CommandOutcome::Updated)
            }
            ScenarioCommand::ApplyPreset { preset } => {
                self.inputs = self.inputs.with_preset(preset);
                log::info!("command: applied {preset:?} preset");
                Ok(CommandOutcome::Updated)
            }
            ScenarioCommand::AddCampaign { campaign_type, style, size } => {
                let size = size.unwrap_or_else(|| {
                    BusinessSizeTier::from_monthly_revenue(self.inputs.normalized().monthly_revenue())
                });
                let id = self.campaigns.add_from_template(campaign_type, style, size);
                Ok(CommandOutcome::CampaignAdded { id })
            }
            ScenarioCommand::SetCampaignParam { id, param, value } => {
                self.campaigns.set_param(id, param, value)?;
                Ok(CommandOutcome::Updated)
            }
            ScenarioCommand::RenameCampaign { id, name } => {
                self.campaigns.rename(id, name)?;
                Ok(CommandOutcome::Updated)
            }
            ScenarioCommand::ToggleCampaign { id } => {
                let enabled = self.campaigns.toggle(id)?;
                Ok(CommandOutcome::CampaignToggled { id, enabled })
            }
            ScenarioCommand::DeleteCampaign { id } => {
                self.campaigns.delete(id)?;
                log::info!("command: deleted campaign {id}");
                Ok(CommandOutcome::CampaignDeleted { id })
            }
            ScenarioCommand::OptimizeCampaign { id } => {
                let campaign = self.campaigns.get(id)?;
                let optimization = model.optimize_campaign(&self.inputs, campaign);
                for change in &optimization.changes {
                    log::info!("command: optimized campaign {id}: {change}");
                }
                self.campaigns.replace(optimization.campaign)?;
                Ok(CommandOutcome::Optimized { id, changes: optimization.changes })
            }
        }
    }
}
