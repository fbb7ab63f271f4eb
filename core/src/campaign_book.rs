//! Campaign book: the campaign collection owned by one merchant context.
//!
//! The book assigns ids (max existing + 1) and names, and refuses to delete
//! its last campaign. Lookups by an unknown id return `CampaignNotFound`.

use crate::{
    campaign::{Campaign, CampaignParam, CampaignType},
    error::{ModelError, ModelResult},
    normalize::FieldValue,
    templates::{self, BusinessSizeTier, TemplateStyle},
    types::CampaignId,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAMPAIGN_NAME: &str = "Double Points Weekend";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignBook {
    campaigns: Vec<Campaign>,
}

impl Default for CampaignBook {
    fn default() -> Self {
        let first = templates::standard(CampaignType::PointMultiplier)
            .into_campaign(1, DEFAULT_CAMPAIGN_NAME);
        Self { campaigns: vec![first] }
    }
}

impl CampaignBook {
    /// Wrap an existing list. Ids are taken as given.
    pub fn from_campaigns(campaigns: Vec<Campaign>) -> Self {
        Self { campaigns }
    }

    pub fn as_slice(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Campaign> {
        self.campaigns.iter()
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn next_id(&self) -> CampaignId {
        self.campaigns.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    pub fn get(&self, id: CampaignId) -> ModelResult<&Campaign> {
        self.campaigns
            .iter()
            .find(|c| c.id == id)
            .ok_or(ModelError::CampaignNotFound { id })
    }

    fn get_mut(&mut self, id: CampaignId) -> ModelResult<&mut Campaign> {
        self.campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ModelError::CampaignNotFound { id })
    }

    /// Append a campaign built from a template; returns the new id.
    pub fn add_from_template(
        &mut self,
        campaign_type: CampaignType,
        style: TemplateStyle,
        size: BusinessSizeTier,
    ) -> CampaignId {
        let id = self.next_id();
        let name = format!("{} {id}", campaign_type.display_name());
        let campaign = templates::template(campaign_type, style, size).into_campaign(id, name);
        log::info!("campaign_book: added {:?} campaign {id}", campaign_type);
        self.campaigns.push(campaign);
        id
    }

    pub fn set_param(
        &mut self,
        id: CampaignId,
        param: CampaignParam,
        value: FieldValue,
    ) -> ModelResult<()> {
        let campaign = self.get_mut(id)?;
        let campaign_type = campaign.campaign_type();
        let slot = campaign
            .slot_mut(param)
            .ok_or(ModelError::ParamNotApplicable { param, campaign_type })?;
        *slot = value;
        Ok(())
    }

    pub fn rename(&mut self, id: CampaignId, name: impl Into<String>) -> ModelResult<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Flip enabled; returns the new state.
    pub fn toggle(&mut self, id: CampaignId) -> ModelResult<bool> {
        let campaign = self.get_mut(id)?;
        campaign.enabled = !campaign.enabled;
        Ok(campaign.enabled)
    }

    /// Swap in an edited copy of an existing campaign, matched by id.
    pub fn replace(&mut self, campaign: Campaign) -> ModelResult<()> {
        let slot = self.get_mut(campaign.id)?;
        *slot = campaign;
        Ok(())
    }

    pub fn delete(&mut self, id: CampaignId) -> ModelResult<Campaign> {
        let idx = self
            .campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or(ModelError::CampaignNotFound { id })?;
        if self.campaigns.len() == 1 {
            return Err(ModelError::LastCampaign { id });
        }
        Ok(self.campaigns.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_follows_the_highest() {
        let mut book = CampaignBook::default();
        book.add_from_template(
            CampaignType::Referral,
            TemplateStyle::Standard,
            BusinessSizeTier::Medium,
        );
        book.delete(1).unwrap();
        assert_eq!(book.next_id(), 3);
    }
}
