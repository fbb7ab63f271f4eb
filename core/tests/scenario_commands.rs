use loyalty_core::{
    campaign::{CampaignParam, CampaignType},
    command::{CommandOutcome, ScenarioCommand},
    engine::LoyaltyModel,
    error::ModelError,
    normalize::FieldValue,
    scenario::Scenario,
};

// ── Helpers ───────────────────────────────────────────────────────────

fn model() -> LoyaltyModel {
    let _ = env_logger::builder().is_test(true).try_init();
    LoyaltyModel::default()
}

fn command(json: &str) -> ScenarioCommand {
    serde_json::from_str(json).unwrap()
}

// ── Inputs ────────────────────────────────────────────────────────────

#[test]
fn set_input_from_json_recomputes_rate() {
    let mut s = Scenario::default();
    let outcome = s
        .apply(command(r#"{"cmd":"set_input","field":"gross_margin_pct","value":30}"#), &model())
        .unwrap();

    assert_eq!(outcome, CommandOutcome::Updated);
    assert_eq!(s.inputs.gross_margin_pct, FieldValue::Value(30.0));
    assert_eq!(s.inputs.points_per_currency_unit, FieldValue::Value(9.1));
}

#[test]
fn blank_input_is_kept_unset() {
    let mut s = Scenario::default();
    s.apply(command(r#"{"cmd":"set_input","field":"fixed_program_cost","value":""}"#), &model())
        .unwrap();

    assert!(s.inputs.fixed_program_cost.is_unset());
    let report = s.report(&model());
    assert!((report.program.total_monthly_cost - 10_500.0).abs() < 1e-6);
}

#[test]
fn auto_adjust_can_be_switched_off() {
    let mut s = Scenario::default();
    let m = model();
    s.apply(command(r#"{"cmd":"set_auto_adjust","enabled":false}"#), &m).unwrap();
    s.apply(command(r#"{"cmd":"set_input","field":"gross_margin_pct","value":30}"#), &m).unwrap();

    assert_eq!(s.inputs.points_per_currency_unit, FieldValue::Value(3.5));
}

#[test]
fn benchmark_sets_uplift_and_retention() {
    let mut s = Scenario::default();
    s.apply(command(r#"{"cmd":"apply_benchmark","vertical":"cafe"}"#), &model()).unwrap();

    assert_eq!(s.inputs.returning_customer_uplift_pct, FieldValue::Value(20.0));
    assert_eq!(s.inputs.customer_retention_rate_pct, FieldValue::Value(75.0));
}

#[test]
fn low_margin_preset_disables_auto_adjust() {
    let mut s = Scenario::default();
    s.apply(command(r#"{"cmd":"apply_preset","preset":"low_margin"}"#), &model()).unwrap();

    assert!(!s.inputs.auto_adjust_points);
    assert_eq!(s.inputs.gross_margin_pct, FieldValue::Value(10.0));
    assert_eq!(s.inputs.points_per_currency_unit, FieldValue::Value(50.0));
    assert_eq!(s.inputs.fixed_program_cost, FieldValue::Value(3_000.0));
}

#[test]
fn balanced_preset_caps_fixed_cost() {
    let mut s = Scenario::default();
    s.apply(command(r#"{"cmd":"apply_preset","preset":"balanced"}"#), &model()).unwrap();

    // 2% of 350,000 is 7,000, capped at 5,000.
    assert_eq!(s.inputs.fixed_program_cost, FieldValue::Value(5_000.0));
    assert_eq!(s.inputs.points_per_currency_unit, FieldValue::Value(30.0));
}

// ── Campaigns ─────────────────────────────────────────────────────────

#[test]
fn add_campaign_sizes_from_revenue() {
    let mut s = Scenario::default();
    let outcome = s
        .apply(command(r#"{"cmd":"add_campaign","campaign_type":"referral"}"#), &model())
        .unwrap();

    assert_eq!(outcome, CommandOutcome::CampaignAdded { id: 2 });
    let c = s.campaigns.get(2).unwrap();
    assert_eq!(c.campaign_type(), CampaignType::Referral);
    // 350,000 monthly revenue is a medium business.
    assert_eq!(c.marketing_cost, FieldValue::Value(3_000.0));
}

#[test]
fn add_campaign_with_explicit_size() {
    let mut s = Scenario::default();
    s.apply(
        command(r#"{"cmd":"add_campaign","campaign_type":"referral","style":"aggressive","size":"small"}"#),
        &model(),
    )
    .unwrap();

    let c = s.campaigns.get(2).unwrap();
    assert_eq!(c.marketing_cost, FieldValue::Value(1_500.0));
    assert_eq!(c.get(CampaignParam::ReferrerBonus), Some(FieldValue::Value(300.0)));
}

#[test]
fn set_campaign_param_and_toggle() {
    let mut s = Scenario::default();
    let m = model();
    s.apply(
        command(r#"{"cmd":"set_campaign_param","id":1,"param":"target_participation","value":"50"}"#),
        &m,
    )
    .unwrap();
    let toggled = s.apply(command(r#"{"cmd":"toggle_campaign","id":1}"#), &m).unwrap();

    assert_eq!(toggled, CommandOutcome::CampaignToggled { id: 1, enabled: false });
    let report = s.report(&m);
    assert_eq!(report.campaign(1).map(|m| m.participants), Some(117));
    assert_eq!(report.portfolio.enabled_count, 0);
}

#[test]
fn refused_command_leaves_scenario_untouched() {
    let mut s = Scenario::default();
    let before = s.clone();

    let err = s.apply(command(r#"{"cmd":"delete_campaign","id":1}"#), &model()).unwrap_err();
    assert!(matches!(err, ModelError::LastCampaign { id: 1 }));

    let err = s
        .apply(command(r#"{"cmd":"set_campaign_param","id":1,"param":"daily_hours","value":4}"#), &model())
        .unwrap_err();
    assert!(matches!(err, ModelError::ParamNotApplicable { .. }));

    assert_eq!(s, before);
}

#[test]
fn optimize_commits_and_reports_changes() {
    let mut s = Scenario::default();
    let m = model();
    let outcome = s.apply(command(r#"{"cmd":"optimize_campaign","id":1}"#), &m).unwrap();

    let CommandOutcome::Optimized { id, changes } = outcome else {
        panic!("expected Optimized, got {outcome:?}");
    };
    assert_eq!(id, 1);
    assert_eq!(changes.len(), 2);

    let c = s.campaigns.get(1).unwrap();
    assert_eq!(c.get(CampaignParam::TargetParticipation), Some(FieldValue::Value(40.0)));
    assert_eq!(c.marketing_cost, FieldValue::Value(1_000.0));

    // Now profitable enough; a second request changes nothing.
    let again = s.apply(command(r#"{"cmd":"optimize_campaign","id":1}"#), &m).unwrap();
    assert_eq!(again, CommandOutcome::Optimized { id: 1, changes: vec![] });
}

#[test]
fn rename_and_delete() {
    let mut s = Scenario::default();
    let m = model();
    s.apply(command(r#"{"cmd":"add_campaign","campaign_type":"special_occasion"}"#), &m).unwrap();
    s.apply(command(r#"{"cmd":"rename_campaign","id":2,"name":"Birthday Treat"}"#), &m).unwrap();
    assert_eq!(s.campaigns.get(2).unwrap().name, "Birthday Treat");

    let outcome = s.apply(command(r#"{"cmd":"delete_campaign","id":1}"#), &m).unwrap();
    assert_eq!(outcome, CommandOutcome::CampaignDeleted { id: 1 });
    assert_eq!(s.campaigns.len(), 1);
}

// ── Scenario files ────────────────────────────────────────────────────

#[test]
fn scenario_json_round_trips_with_blank_fields() {
    let json = r#"{
        "inputs": { "gross_margin_pct": "", "monthly_transactions": "800", "auto_adjust_points": false },
        "campaigns": [
            { "id": 4, "name": "Lunch rush", "enabled": true, "type": "time_based",
              "duration": 30, "daily_hours": 2, "point_multiplier": null }
        ]
    }"#;
    let s = Scenario::from_json(json).unwrap();

    assert!(s.inputs.gross_margin_pct.is_unset());
    assert_eq!(s.inputs.monthly_transactions, FieldValue::Value(800.0));
    // Missing keys take defaults.
    assert_eq!(s.inputs.avg_transaction_value, FieldValue::Value(350.0));
    let c = s.campaigns.get(4).unwrap();
    assert_eq!(c.get(CampaignParam::PointMultiplier), Some(FieldValue::Unset));
    assert_eq!(c.marketing_cost, FieldValue::Unset);

    let back = Scenario::from_json(&s.to_json().unwrap()).unwrap();
    assert_eq!(back, s);
}

#[test]
fn malformed_scenario_is_a_serialization_error() {
    let err = Scenario::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ModelError::Serialization(_)));
}
