//! Merchant program inputs and field-by-field editing.
//!
//! The points-per-currency-unit rate is derived on write: when
//! `auto_adjust_points` is on, editing any of the six driving fields
//! recomputes it from the edited snapshot. Editing the rate itself never
//! triggers a recompute, so manual overrides survive.

use crate::{
    benchmark::BusinessVertical,
    earning_rate::{self, EarningRateDrivers},
    normalize::FieldValue,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramInputs {
    pub gross_margin_pct:              FieldValue,
    pub reward_budget_pct:             FieldValue,
    pub avg_transaction_value:         FieldValue,
    pub redemption_rate_pct:           FieldValue,
    pub fixed_program_cost:            FieldValue,
    pub monthly_transactions:          FieldValue,
    pub returning_customer_uplift_pct: FieldValue,
    pub customer_retention_rate_pct:   FieldValue,
    /// Carried for display; no formula reads it.
    pub new_customer_acquisition_pct:  FieldValue,
    pub points_per_currency_unit:      FieldValue,
    pub auto_adjust_points:            bool,
}

impl Default for ProgramInputs {
    fn default() -> Self {
        Self {
            gross_margin_pct:              FieldValue::Value(65.0),
            reward_budget_pct:             FieldValue::Value(3.0),
            avg_transaction_value:         FieldValue::Value(350.0),
            redemption_rate_pct:           FieldValue::Value(60.0),
            fixed_program_cost:            FieldValue::Value(15_000.0),
            monthly_transactions:          FieldValue::Value(1_000.0),
            returning_customer_uplift_pct: FieldValue::Value(15.0),
            customer_retention_rate_pct:   FieldValue::Value(70.0),
            new_customer_acquisition_pct:  FieldValue::Value(5.0),
            points_per_currency_unit:      FieldValue::Value(3.5),
            auto_adjust_points:            true,
        }
    }
}

/// ProgramInputs with every field coerced to a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedInputs {
    pub gross_margin_pct:              f64,
    pub reward_budget_pct:             f64,
    pub avg_transaction_value:         f64,
    pub redemption_rate_pct:           f64,
    pub fixed_program_cost:            f64,
    pub monthly_transactions:          f64,
    pub returning_customer_uplift_pct: f64,
    pub customer_retention_rate_pct:   f64,
    pub points_per_currency_unit:      f64,
}

impl NormalizedInputs {
    pub fn monthly_revenue(&self) -> f64 {
        self.monthly_transactions * self.avg_transaction_value
    }
}

/// Numeric input fields, addressable by edit commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    GrossMarginPct,
    RewardBudgetPct,
    AvgTransactionValue,
    RedemptionRatePct,
    FixedProgramCost,
    MonthlyTransactions,
    ReturningCustomerUpliftPct,
    CustomerRetentionRatePct,
    NewCustomerAcquisitionPct,
    PointsPerCurrencyUnit,
}

impl InputField {
    pub const ALL: [InputField; 10] = [
        Self::GrossMarginPct,
        Self::RewardBudgetPct,
        Self::AvgTransactionValue,
        Self::RedemptionRatePct,
        Self::FixedProgramCost,
        Self::MonthlyTransactions,
        Self::ReturningCustomerUpliftPct,
        Self::CustomerRetentionRatePct,
        Self::NewCustomerAcquisitionPct,
        Self::PointsPerCurrencyUnit,
    ];

    /// Whether an edit to this field re-runs the earning-rate advisor.
    pub fn drives_earning_rate(&self) -> bool {
        matches!(
            self,
            Self::GrossMarginPct
                | Self::RewardBudgetPct
                | Self::AvgTransactionValue
                | Self::RedemptionRatePct
                | Self::FixedProgramCost
                | Self::MonthlyTransactions
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GrossMarginPct             => "Gross Margin (%)",
            Self::RewardBudgetPct            => "Reward Budget (% of revenue)",
            Self::AvgTransactionValue        => "Average Transaction Value",
            Self::RedemptionRatePct          => "Expected Redemption Rate (%)",
            Self::FixedProgramCost           => "Fixed Program Cost (monthly)",
            Self::MonthlyTransactions        => "Monthly Transactions",
            Self::ReturningCustomerUpliftPct => "Returning Customer Uplift (%)",
            Self::CustomerRetentionRatePct   => "Customer Retention Rate (%)",
            Self::NewCustomerAcquisitionPct  => "New Customer Acquisition (%)",
            Self::PointsPerCurrencyUnit      => "Spend per Point",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One-click input presets. All of them switch auto-adjust off so the
/// preset's earning rate sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPreset {
    /// Thin-margin businesses (around 10%).
    LowMargin,
    /// Paper stamp card: no platform cost.
    PaperCard,
    /// Cheapest digital setup.
    Minimal,
    /// Moderate budget with fixed cost scaled to revenue.
    Balanced,
}

impl ProgramInputs {
    pub fn normalized(&self) -> NormalizedInputs {
        NormalizedInputs {
            gross_margin_pct:              self.gross_margin_pct.value(),
            reward_budget_pct:             self.reward_budget_pct.value(),
            avg_transaction_value:         self.avg_transaction_value.value(),
            redemption_rate_pct:           self.redemption_rate_pct.value(),
            fixed_program_cost:            self.fixed_program_cost.value(),
            monthly_transactions:          self.monthly_transactions.value(),
            returning_customer_uplift_pct: self.returning_customer_uplift_pct.value(),
            customer_retention_rate_pct:   self.customer_retention_rate_pct.value(),
            points_per_currency_unit:      self.points_per_currency_unit.rate_denominator(),
        }
    }

    pub fn get(&self, field: InputField) -> FieldValue {
        match field {
            InputField::GrossMarginPct             => self.gross_margin_pct,
            InputField::RewardBudgetPct            => self.reward_budget_pct,
            InputField::AvgTransactionValue        => self.avg_transaction_value,
            InputField::RedemptionRatePct          => self.redemption_rate_pct,
            InputField::FixedProgramCost           => self.fixed_program_cost,
            InputField::MonthlyTransactions        => self.monthly_transactions,
            InputField::ReturningCustomerUpliftPct => self.returning_customer_uplift_pct,
            InputField::CustomerRetentionRatePct   => self.customer_retention_rate_pct,
            InputField::NewCustomerAcquisitionPct  => self.new_customer_acquisition_pct,
            InputField::PointsPerCurrencyUnit      => self.points_per_currency_unit,
        }
    }

    fn slot(&mut self, field: InputField) -> &mut FieldValue {
        match field {
            InputField::GrossMarginPct             => &mut self.gross_margin_pct,
            InputField::RewardBudgetPct            => &mut self.reward_budget_pct,
            InputField::AvgTransactionValue        => &mut self.avg_transaction_value,
            InputField::RedemptionRatePct          => &mut self.redemption_rate_pct,
            InputField::FixedProgramCost           => &mut self.fixed_program_cost,
            InputField::MonthlyTransactions        => &mut self.monthly_transactions,
            InputField::ReturningCustomerUpliftPct => &mut self.returning_customer_uplift_pct,
            InputField::CustomerRetentionRatePct   => &mut self.customer_retention_rate_pct,
            InputField::NewCustomerAcquisitionPct  => &mut self.new_customer_acquisition_pct,
            InputField::PointsPerCurrencyUnit      => &mut self.points_per_currency_unit,
        }
    }

    /// The rate the advisor would suggest for the current snapshot.
    pub fn suggested_points_per_currency_unit(&self) -> f64 {
        earning_rate::recommend(&EarningRateDrivers::from(&self.normalized()))
    }

    /// Apply one edit, then re-derive the earning rate if auto-adjust is on
    /// and the edited field drives it.
    pub fn set_field(&mut self, field: InputField, value: FieldValue) {
        *self.slot(field) = value;

        if self.auto_adjust_points && field.drives_earning_rate() {
            let suggested = self.suggested_points_per_currency_unit();
            log::debug!("inputs: {field:?} edited, points_per_currency_unit -> {suggested:.1}");
            self.points_per_currency_unit = FieldValue::Value(suggested);
        }
    }

    /// Pure form of `set_field`.
    pub fn with_field(&self, field: InputField, value: FieldValue) -> Self {
        let mut next = self.clone();
        next.set_field(field, value);
        next
    }

    /// Copy the benchmark averages for uplift and retention.
    pub fn with_benchmark(&self, vertical: BusinessVertical) -> Self {
        let b = vertical.benchmark();
        Self {
            returning_customer_uplift_pct: b.returning_customer_uplift.avg.into(),
            customer_retention_rate_pct:   b.customer_retention_rate.avg.into(),
            ..self.clone()
        }
    }

    pub fn with_preset(&self, preset: InputPreset) -> Self {
        let mut next = self.clone();
        match preset {
            InputPreset::LowMargin => {
                next.gross_margin_pct = FieldValue::Value(10.0);
                next.reward_budget_pct = FieldValue::Value(0.5);
                next.redemption_rate_pct = FieldValue::Value(35.0);
                next.points_per_currency_unit = FieldValue::Value(50.0);
                next.fixed_program_cost = FieldValue::Value(3_000.0);
                next.returning_customer_uplift_pct = FieldValue::Value(25.0);
            }
            InputPreset::PaperCard => {
                next.reward_budget_pct = FieldValue::Value(1.5);
                next.fixed_program_cost = FieldValue::Value(0.0);
                next.points_per_currency_unit = FieldValue::Value(50.0);
                next.redemption_rate_pct = FieldValue::Value(30.0);
                next.returning_customer_uplift_pct = FieldValue::Value(15.0);
            }
            InputPreset::Minimal => {
                next.reward_budget_pct = FieldValue::Value(1.0);
                next.fixed_program_cost = FieldValue::Value(500.0);
                next.points_per_currency_unit = FieldValue::Value(50.0);
                next.redemption_rate_pct = FieldValue::Value(40.0);
                next.returning_customer_uplift_pct = FieldValue::Value(20.0);
            }
            InputPreset::Balanced => {
                let revenue = self.normalized().monthly_revenue();
                next.reward_budget_pct = FieldValue::Value(1.5);
                next.fixed_program_cost = (revenue * 0.02).clamp(500.0, 5_000.0).into();
                next.points_per_currency_unit = FieldValue::Value(30.0);
                next.redemption_rate_pct = FieldValue::Value(50.0);
                next.returning_customer_uplift_pct = FieldValue::Value(18.0);
            }
        }
        next.auto_adjust_points = false;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_rate_normalizes_to_one() {
        let inputs = ProgramInputs {
            points_per_currency_unit: FieldValue::Unset,
            ..ProgramInputs::default()
        };
        assert_eq!(inputs.normalized().points_per_currency_unit, 1.0);
        assert!(inputs.points_per_currency_unit.is_unset());
    }

    #[test]
    fn get_reads_back_every_field() {
        let mut inputs = ProgramInputs::default();
        inputs.auto_adjust_points = false;
        for (i, field) in InputField::ALL.into_iter().enumerate() {
            inputs.set_field(field, FieldValue::Value(i as f64 + 1.0));
        }
        for (i, field) in InputField::ALL.into_iter().enumerate() {
            assert_eq!(inputs.get(field), FieldValue::Value(i as f64 + 1.0));
        }
    }
}
