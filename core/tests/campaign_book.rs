use loyalty_core::{
    campaign::{CampaignParam, CampaignType},
    campaign_book::{CampaignBook, DEFAULT_CAMPAIGN_NAME},
    error::ModelError,
    normalize::FieldValue,
    templates::{self, BusinessSizeTier, TemplateStyle},
};

fn param(t: &templates::CampaignTemplate, p: CampaignParam) -> f64 {
    t.kind.get(p).map(|v| v.value()).unwrap_or(f64::NAN)
}

// ── Templates ─────────────────────────────────────────────────────────

#[test]
fn standard_point_multiplier_matches_reference_values() {
    let t = templates::standard(CampaignType::PointMultiplier);
    assert_eq!(param(&t, CampaignParam::Duration), 7.0);
    assert_eq!(param(&t, CampaignParam::PointMultiplier), 2.0);
    assert_eq!(param(&t, CampaignParam::TargetParticipation), 30.0);
    assert_eq!(param(&t, CampaignParam::AdditionalSpending), 25.0);
    assert_eq!(t.marketing_cost, 2_000.0);
}

#[test]
fn every_template_sets_every_parameter() {
    for t in CampaignType::ALL {
        for style in TemplateStyle::ALL {
            for size in BusinessSizeTier::ALL {
                let c = templates::template(t, style, size).into_campaign(1, "t");
                for &p in t.params() {
                    let v = c.get(p).unwrap();
                    assert!(!v.is_unset(), "{t:?}/{style:?}/{size:?} leaves {p:?} unset");
                }
            }
        }
    }
}

#[test]
fn conservative_scales_rewards_down() {
    let t = templates::template(
        CampaignType::PointMultiplier,
        TemplateStyle::Conservative,
        BusinessSizeTier::Medium,
    );
    assert_eq!(param(&t, CampaignParam::PointMultiplier), 1.6);
    assert_eq!(param(&t, CampaignParam::TargetParticipation), 24.0);
    assert_eq!(param(&t, CampaignParam::Duration), 7.0);
    assert_eq!(t.marketing_cost, 2_000.0);
}

#[test]
fn aggressive_scales_rewards_up() {
    let t = templates::template(
        CampaignType::Referral,
        TemplateStyle::Aggressive,
        BusinessSizeTier::Medium,
    );
    assert_eq!(param(&t, CampaignParam::ReferrerBonus), 300.0);
    assert_eq!(param(&t, CampaignParam::RefereeBonus), 150.0);
    assert_eq!(param(&t, CampaignParam::ExpectedReferrals), 50.0);
}

#[test]
fn size_scales_marketing_and_volume() {
    let small = templates::template(CampaignType::Referral, TemplateStyle::Standard, BusinessSizeTier::Small);
    let large = templates::template(CampaignType::Referral, TemplateStyle::Standard, BusinessSizeTier::Large);

    assert_eq!(small.marketing_cost, 1_500.0);
    assert_eq!(large.marketing_cost, 6_000.0);
    assert_eq!(param(&small, CampaignParam::ExpectedReferrals), 25.0);
    assert_eq!(param(&large, CampaignParam::ExpectedReferrals), 100.0);
    // Reward levels do not depend on size.
    assert_eq!(param(&small, CampaignParam::ReferrerBonus), 200.0);
}

// ── Book ──────────────────────────────────────────────────────────────

#[test]
fn default_book_holds_one_double_points_campaign() {
    let book = CampaignBook::default();
    assert_eq!(book.len(), 1);

    let c = book.get(1).unwrap();
    assert_eq!(c.name, DEFAULT_CAMPAIGN_NAME);
    assert_eq!(c.campaign_type(), CampaignType::PointMultiplier);
    assert!(c.enabled);
    assert_eq!(c.marketing_cost, FieldValue::Value(2_000.0));
}

#[test]
fn added_campaigns_get_next_id_and_default_name() {
    let mut book = CampaignBook::default();
    let id = book.add_from_template(
        CampaignType::TimeBased,
        TemplateStyle::Standard,
        BusinessSizeTier::Medium,
    );

    assert_eq!(id, 2);
    assert_eq!(book.get(2).unwrap().name, "Happy Hour 2");
    assert_eq!(book.next_id(), 3);
}

#[test]
fn ids_are_never_reused_below_the_max() {
    let mut book = CampaignBook::default();
    let a = book.add_from_template(CampaignType::Referral, TemplateStyle::Standard, BusinessSizeTier::Medium);
    let b = book.add_from_template(CampaignType::Referral, TemplateStyle::Standard, BusinessSizeTier::Medium);
    book.delete(a).unwrap();

    let c = book.add_from_template(CampaignType::Referral, TemplateStyle::Standard, BusinessSizeTier::Medium);
    assert_eq!(c, b + 1);
}

#[test]
fn set_param_edits_in_place() {
    let mut book = CampaignBook::default();
    book.set_param(1, CampaignParam::Duration, FieldValue::Value(14.0)).unwrap();
    book.set_param(1, CampaignParam::MarketingCost, FieldValue::Unset).unwrap();

    let c = book.get(1).unwrap();
    assert_eq!(c.get(CampaignParam::Duration), Some(FieldValue::Value(14.0)));
    assert_eq!(c.marketing_cost, FieldValue::Unset);
}

#[test]
fn set_param_rejects_foreign_parameter() {
    let mut book = CampaignBook::default();
    let err = book
        .set_param(1, CampaignParam::DailyHours, FieldValue::Value(3.0))
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::ParamNotApplicable {
            param: CampaignParam::DailyHours,
            campaign_type: CampaignType::PointMultiplier,
        }
    ));
}

#[test]
fn unknown_id_is_reported() {
    let mut book = CampaignBook::default();
    assert!(matches!(book.toggle(42), Err(ModelError::CampaignNotFound { id: 42 })));
    assert!(matches!(book.rename(42, "x"), Err(ModelError::CampaignNotFound { id: 42 })));
    assert!(matches!(book.delete(42), Err(ModelError::CampaignNotFound { id: 42 })));
}

#[test]
fn toggle_and_rename() {
    let mut book = CampaignBook::default();
    assert!(!book.toggle(1).unwrap());
    assert!(book.toggle(1).unwrap());

    book.rename(1, "Weekend Bonus").unwrap();
    assert_eq!(book.get(1).unwrap().name, "Weekend Bonus");
}

#[test]
fn last_campaign_cannot_be_deleted() {
    let mut book = CampaignBook::default();
    let err = book.delete(1).unwrap_err();
    assert!(matches!(err, ModelError::LastCampaign { id: 1 }));
    assert_eq!(book.len(), 1);
}

#[test]
fn book_serializes_as_a_plain_list() {
    let book = CampaignBook::default();
    let json = serde_json::to_value(&book).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["type"], "point_multiplier");
    assert_eq!(json[0]["point_multiplier"], 2.0);

    let back: CampaignBook = serde_json::from_value(json).unwrap();
    assert_eq!(back, book);
}
