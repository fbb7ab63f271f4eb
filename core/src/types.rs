//! Shared primitive types used across the modeling engine.

/// Caller-assigned campaign identifier. Unique within one campaign book.
pub type CampaignId = u64;

/// Amount of money in the merchant's single currency.
pub type Money = f64;

/// Days in the campaign month used to convert durations.
pub const DAYS_PER_MONTH: f64 = 30.0;
