use super::*;

fn text(s: &str) -> PropertyValue {
    PropertyValue::from(s)
}

fn value(i: Option<Interpolated>) -> PropertyValue {
    match i {
        Some(Interpolated::Value(v)) => v,
        other => panic!("expected plain value, got {other:?}"),
    }
}

#[test]
fn multi_numeric_blends_token_by_token_space_joined() {
    let out = interpolate(
        "margin",
        Some(&text("10px 20px")),
        Some(&text("30px 60px")),
        0.5,
    );
    assert_eq!(value(out), text("20px 40px"));
}

#[test]
fn multi_numeric_preserves_comma_joining() {
    let out = interpolate("points", Some(&text("10,20")), Some(&text("30,60")), 0.5);
    assert_eq!(value(out), text("20,40"));
}

#[test]
fn multi_numeric_pads_missing_tokens_from_source() {
    let out = interpolate("margin", Some(&text("10px 20px 8px")), Some(&text("30px 60px")), 0.5);
    assert_eq!(value(out), text("20px 40px 8px"));
}

#[test]
fn single_numbers_blend_linearly() {
    let n = interpolate(
        "opacity",
        Some(&PropertyValue::Number(0.0)),
        Some(&PropertyValue::Number(1.0)),
        0.25,
    );
    assert_eq!(value(n), PropertyValue::Number(0.25));

    let s = interpolate("width", Some(&text("10px")), Some(&text("20px")), 0.5);
    assert_eq!(value(s), text("15px"));

    let mixed = interpolate("opacity", Some(&text("0.5")), Some(&PropertyValue::Number(1.0)), 0.5);
    assert_eq!(value(mixed), text("0.75"));
}

#[test]
fn opaque_values_snap_instead_of_blending() {
    let out = interpolate("color", Some(&text("red")), Some(&text("blue")), 0.9);
    assert_eq!(value(out), text("red"));
}

#[test]
fn missing_source_adopts_destination() {
    let out = interpolate("color", None, Some(&text("blue")), 0.1);
    assert_eq!(value(out), text("blue"));
    assert_eq!(interpolate("color", None, None, 0.1), None);
}

#[test]
fn mismatched_shapes_hold_source() {
    let out = interpolate("width", Some(&text("auto")), Some(&text("10px")), 0.5);
    assert_eq!(value(out), text("auto"));
}

#[test]
fn transform_keys_become_function_calls() {
    let out = interpolate(
        "x",
        Some(&PropertyValue::Number(10.0)),
        Some(&PropertyValue::Number(30.0)),
        0.5,
    );
    assert_eq!(out, Some(Interpolated::Transform("translateX(20px)".into())));

    let held = interpolate("rotate", Some(&text("90deg")), None, 0.5);
    assert_eq!(held, Some(Interpolated::Transform("rotate(90deg)".into())));
}

#[test]
fn hex_colours_snap_verbatim() {
    for t in [0.0, 0.5, 0.99] {
        let out = interpolate("color", Some(&text("#ff0000")), Some(&text("#0000ff")), t);
        assert_eq!(value(out), text("#ff0000"));
    }
    let out = interpolate("color", Some(&text("#112233")), Some(&text("#445566")), 0.5);
    assert_eq!(value(out), text("#112233"));
}

#[test]
fn functional_colours_still_blend() {
    let out = interpolate(
        "color",
        Some(&text("rgb(255, 0, 0)")),
        Some(&text("rgb(0, 0, 255)")),
        0.5,
    );
    assert_eq!(value(out), text("rgb(127.5, 0, 127.5)"));
}
