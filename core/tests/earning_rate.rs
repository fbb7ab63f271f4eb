use loyalty_core::{
    earning_rate::{self, EarningRateDrivers, MAX_RATE, MIN_RATE},
    inputs::{InputField, ProgramInputs},
    normalize::FieldValue,
};

fn drivers(margin: f64, budget: f64, redemption: f64, avg: f64, fixed: f64, tx: f64) -> EarningRateDrivers {
    EarningRateDrivers {
        gross_margin_pct:      margin,
        reward_budget_pct:     budget,
        redemption_rate_pct:   redemption,
        avg_transaction_value: avg,
        fixed_program_cost:    fixed,
        monthly_transactions:  tx,
    }
}

#[test]
fn default_inputs_breakdown() {
    let b = earning_rate::breakdown(&drivers(65.0, 3.0, 60.0, 350.0, 15_000.0, 1_000.0));

    assert!((b.base_rate - 9.0).abs() < 1e-9, "base {}", b.base_rate);
    assert!((b.budget_adjustment - 2.0).abs() < 1e-9);
    assert!((b.redemption_adjustment - 1.0).abs() < 1e-9);
    assert!((b.total_cost_pct - 7.2857).abs() < 0.001, "cost pct {}", b.total_cost_pct);
    assert!((b.cost_pressure_adjustment - 1.1429).abs() < 0.001);
    assert_eq!(b.recommended, 13.1);
}

#[test]
fn output_is_always_clamped() {
    let grid = [-50.0, 0.0, 5.0, 15.0, 35.0, 65.0, 100.0, 500.0];
    for &margin in &grid {
        for &budget in &grid {
            for &redemption in &grid {
                for &fixed in &[0.0, 15_000.0, 1e9] {
                    for &tx in &[0.0, 1_000.0] {
                        let r = earning_rate::recommend(&drivers(margin, budget, redemption, 350.0, fixed, tx));
                        assert!(
                            (MIN_RATE..=MAX_RATE).contains(&r),
                            "rate {r} out of range for margin={margin} budget={budget} redemption={redemption}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn no_revenue_means_no_cost_pressure() {
    let b = earning_rate::breakdown(&drivers(65.0, 3.0, 60.0, 350.0, 15_000.0, 0.0));
    assert_eq!(b.total_cost_pct, 0.0);
    assert_eq!(b.cost_pressure_adjustment, 0.0);
    assert_eq!(b.recommended, 12.0);
}

#[test]
fn extremes_hit_the_bounds() {
    assert_eq!(earning_rate::recommend(&drivers(100.0, 0.0, 0.0, 350.0, 0.0, 1_000.0)), MIN_RATE);
    assert_eq!(earning_rate::recommend(&drivers(0.0, 50.0, 100.0, 350.0, 1e9, 1_000.0)), MAX_RATE);
}

// ── Derived on write ──────────────────────────────────────────────────

#[test]
fn editing_a_driver_recomputes_when_auto_adjust_is_on() {
    let inputs = ProgramInputs::default()
        .with_field(InputField::GrossMarginPct, FieldValue::Value(30.0));

    // base 5 + 2 + 1 + 1.14 = 9.14
    assert_eq!(inputs.points_per_currency_unit, FieldValue::Value(9.1));
}

#[test]
fn editing_a_non_driver_leaves_rate_alone() {
    let inputs = ProgramInputs::default()
        .with_field(InputField::ReturningCustomerUpliftPct, FieldValue::Value(25.0));
    assert_eq!(inputs.points_per_currency_unit, FieldValue::Value(3.5));
}

#[test]
fn manual_override_survives() {
    let inputs = ProgramInputs::default()
        .with_field(InputField::GrossMarginPct, FieldValue::Value(65.0))
        .with_field(InputField::PointsPerCurrencyUnit, FieldValue::Value(20.0));
    assert_eq!(inputs.points_per_currency_unit, FieldValue::Value(20.0));
}

#[test]
fn auto_adjust_off_keeps_rate() {
    let inputs = ProgramInputs { auto_adjust_points: false, ..ProgramInputs::default() }
        .with_field(InputField::GrossMarginPct, FieldValue::Value(30.0));
    assert_eq!(inputs.points_per_currency_unit, FieldValue::Value(3.5));
}

#[test]
fn blank_driver_is_treated_as_zero() {
    let inputs = ProgramInputs::default()
        .with_field(InputField::RewardBudgetPct, FieldValue::Unset);

    // base 9, budget -4, redemption +1, cost 15000/350000 = 4.29% -> no pressure.
    assert_eq!(inputs.points_per_currency_unit, FieldValue::Value(6.0));
    assert!(inputs.reward_budget_pct.is_unset());
}
