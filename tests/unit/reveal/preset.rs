use super::*;

#[test]
fn lookup_is_total_over_named_presets() {
    for kind in PresetKind::ALL {
        let (hidden, visible) = preset_lookup(kind.name()).unwrap();
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(visible, VisualState::SHOWN);
        assert_eq!(kind.name().parse::<PresetKind>().unwrap(), kind);
    }
}

#[test]
fn unknown_names_fail() {
    for bad in ["bounce", "", "FadeUp", "fade_up", " fadeUp"] {
        let err = preset_lookup(bad).unwrap_err();
        assert!(matches!(err, UnveilError::UnknownPresetKind(ref n) if n == bad));
    }
}

#[test]
fn hidden_offsets_match_table() {
    let h = |k: PresetKind| k.states().hidden;
    assert_eq!(h(PresetKind::FadeUp).translate, Vec2::new(0.0, 50.0));
    assert_eq!(h(PresetKind::FadeDown).translate, Vec2::new(0.0, -50.0));
    assert_eq!(h(PresetKind::FadeLeft).translate, Vec2::new(-50.0, 0.0));
    assert_eq!(h(PresetKind::FadeRight).translate, Vec2::new(50.0, 0.0));
    assert_eq!(h(PresetKind::Scale).scale, 0.8);
    let slide = h(PresetKind::SlideUp);
    assert_eq!(slide.translate, Vec2::new(0.0, 100.0));
    assert_eq!(slide.scale, 0.9);
}

#[test]
fn visual_state_lerp_is_componentwise() {
    let s = PresetKind::SlideUp.states();
    let mid = VisualState::lerp(&s.hidden, &s.visible, 0.5);
    assert_eq!(mid.opacity, 0.5);
    assert_eq!(mid.translate, Vec2::new(0.0, 50.0));
    assert!((mid.scale - 0.95).abs() < 1e-12);
}

#[test]
fn serde_and_display_use_config_names() {
    assert_eq!(PresetKind::SlideUp.to_string(), "slideUp");
    assert_eq!(
        serde_json::to_string(&PresetKind::FadeRight).unwrap(),
        "\"fadeRight\""
    );
}
