use super::*;

#[test]
fn endpoints_are_exact_for_every_preset() {
    for name in [
        "linear",
        "ease",
        "easeIn",
        "easeOut",
        "easeInOut",
        "backInOut",
        "bounceOut",
        "circIn",
        "cubicOut",
        "quadInOut",
        "quintIn",
        "sineOut",
    ] {
        let e = Easing::named(name).unwrap();
        assert_eq!(e.calc(0.0), 0.0, "{name}");
        assert_eq!(e.calc(1.0), 1.0, "{name}");
    }
}

#[test]
fn ease_in_is_below_linear_at_midpoint() {
    let e = Easing::named("easeIn").unwrap();
    let mid = e.calc(0.5);
    assert!(mid < 0.5);
    assert!(mid > 0.0);
}

#[test]
fn symmetric_curve_hits_half_at_half() {
    let e = Easing::named("easeInOut").unwrap();
    assert!((e.calc(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn calc_clamps_input() {
    assert_eq!(Easing::Linear.calc(-1.0), 0.0);
    assert_eq!(Easing::Linear.calc(2.0), 1.0);
}

#[test]
fn css_identifier_matches_control_points() {
    assert_eq!(Easing::Linear.css(), "linear");
    assert_eq!(
        Easing::named("easeInOut").unwrap().css(),
        "cubic-bezier(0.42,0,0.58,1)"
    );
}

#[test]
fn presets_may_share_curves() {
    assert_eq!(Easing::named("cubicIn"), Easing::named("quartOut"));
    assert_eq!(Easing::named("nope"), None);
}

#[test]
fn unknown_spec_resolves_to_linear() {
    assert_eq!(EasingSpec::Named("wobble".into()).resolve(), Easing::Linear);
    assert_eq!(
        EasingSpec::Bezier([0.0, 0.0, 1.0, 1.0]).resolve(),
        Easing::cubic_bezier(0.0, 0.0, 1.0, 1.0)
    );
}

#[test]
fn spec_deserializes_from_name_or_points() {
    let named: EasingSpec = serde_json::from_str(r#""easeIn""#).unwrap();
    assert_eq!(named, EasingSpec::Named("easeIn".into()));
    let pts: EasingSpec = serde_json::from_str("[0.1, 0.2, 0.3, 0.4]").unwrap();
    assert_eq!(pts, EasingSpec::Bezier([0.1, 0.2, 0.3, 0.4]));
}

#[test]
fn frames_prewarps_numeric_tokens_by_position() {
    let kfs = vec![
        Keyframe::new().with("opacity", 1.0).with("width", "100px"),
        Keyframe::new().with("opacity", 1.0).with("width", "100px"),
        Keyframe::new().with("opacity", 1.0).with("color", "red"),
    ];
    let out = Easing::Linear.frames(&kfs);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].offset, Some(0.0));
    assert_eq!(out[1].offset, Some(0.5));
    assert_eq!(out[2].offset, Some(1.0));
    assert_eq!(out[0].get("opacity"), Some(&PropertyValue::Number(0.0)));
    assert_eq!(out[1].get("width"), Some(&PropertyValue::from("50px")));
    assert_eq!(out[2].get("color"), Some(&PropertyValue::from("red")));
}

#[test]
fn frames_leaves_hex_colours_alone() {
    let kfs = vec![
        Keyframe::new().with("color", "#112233"),
        Keyframe::new().with("color", "#ff0000"),
        Keyframe::new().with("color", "rgb(200, 100, 0)"),
    ];
    let out = Easing::Linear.frames(&kfs);
    assert_eq!(out[0].get("color"), Some(&PropertyValue::from("#112233")));
    assert_eq!(out[1].get("color"), Some(&PropertyValue::from("#ff0000")));
    assert_eq!(out[2].get("color"), Some(&PropertyValue::from("rgb(200, 100, 0)")));
}
