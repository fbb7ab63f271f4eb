use crate::{campaign::{CampaignParam, CampaignType}, types::CampaignId};
use thiserror::Error;

/// Errors raised at the collaborator boundary (campaign book, commands,
/// configuration). The numeric engine itself never fails.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Campaign {id} not found")]
    CampaignNotFound { id: CampaignId },

    #[error("Parameter '{param}' does not apply to {campaign_type} campaigns")]
    ParamNotApplicable {
        param:         CampaignParam,
        campaign_type: CampaignType,
    },

    #[error("Cannot delete campaign {id}: at least one campaign must remain")]
    LastCampaign { id: CampaignId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
