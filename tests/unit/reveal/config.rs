use super::*;

#[test]
fn defaults_match_dashboard_values() {
    let cfg = RevealConfig::new(PresetKind::FadeUp, RevealPolicy::Once);
    assert_eq!(cfg.stagger_secs(), 0.1);
    assert_eq!(cfg.base_delay_secs(), 0.0);
    assert_eq!(cfg.duration_secs(), 0.6);
    assert_eq!(cfg.ease(), Ease::EaseOut);
    cfg.validate().unwrap();
}

#[test]
fn non_positive_duration_is_rejected() {
    for d in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let cfg = RevealConfig::new(PresetKind::Scale, RevealPolicy::Once).with_duration(d);
        assert!(matches!(
            cfg.validate(),
            Err(UnveilError::InvalidRevealConfig(_))
        ));
    }
}

#[test]
fn negative_stagger_or_delay_is_rejected() {
    let base = RevealConfig::new(PresetKind::Scale, RevealPolicy::WhileVisible);
    assert!(base.with_stagger(-0.1).validate().is_err());
    assert!(base.with_base_delay(-0.1).validate().is_err());
    base.with_stagger(0.0).with_base_delay(0.0).validate().unwrap();
}

#[test]
fn def_requires_policy_and_parses_preset() {
    let def: RevealConfigDef = serde_json::from_str(
        r#"{ "preset": "slideUp", "policy": "while_visible", "base_delay_secs": 0.2 }"#,
    )
    .unwrap();
    let cfg = RevealConfig::try_from(&def).unwrap();
    assert_eq!(cfg.preset(), PresetKind::SlideUp);
    assert_eq!(cfg.policy(), RevealPolicy::WhileVisible);
    assert_eq!(cfg.base_delay_secs(), 0.2);
    assert_eq!(cfg.stagger_secs(), 0.1);

    assert!(serde_json::from_str::<RevealConfigDef>(r#"{ "preset": "fadeUp" }"#).is_err());
}

#[test]
fn def_surfaces_config_errors() {
    let mut def = RevealConfigDef {
        preset: "bounce".to_owned(),
        policy: RevealPolicy::Once,
        stagger_secs: 0.1,
        base_delay_secs: 0.0,
        duration_secs: 0.6,
        ease: Ease::EaseOut,
    };
    assert!(matches!(
        RevealConfig::try_from(&def),
        Err(UnveilError::UnknownPresetKind(_))
    ));

    def.preset = "fadeUp".to_owned();
    def.duration_secs = 0.0;
    assert!(matches!(
        RevealConfig::try_from(&def),
        Err(UnveilError::InvalidRevealConfig(_))
    ));
}
