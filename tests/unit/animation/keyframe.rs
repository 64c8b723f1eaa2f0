use super::*;

#[test]
fn deserialize_preserves_document_order_and_reserved_keys() {
    let kf: Keyframe = serde_json::from_str(
        r#"{ "rotate": 45, "opacity": "0.5", "scale": 2, "offset": 0.25, "x": null, "color": "red" }"#,
    )
    .unwrap();

    let names: Vec<&str> = kf.props().map(|(k, _)| k).collect();
    assert_eq!(names, ["rotate", "opacity", "color"]);
    assert_eq!(kf.scale, Some(2.0));
    assert_eq!(kf.offset, Some(0.25));
    assert!(!kf.contains("x"));
    assert_eq!(kf.get("rotate"), Some(&PropertyValue::Number(45.0)));
}

#[test]
fn set_replaces_in_place() {
    let mut kf = Keyframe::new().with("a", 1).with("b", "x");
    kf.set("a", 5.0);
    let names: Vec<&str> = kf.props().map(|(k, _)| k).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(kf.get("a").and_then(PropertyValue::as_number), Some(5.0));
    assert_eq!(kf.remove("b"), Some(PropertyValue::from("x")));
    assert_eq!(kf.len(), 1);
}

#[test]
fn serialize_emits_offset_last() {
    let kf = Keyframe::new().with("opacity", 0.5).with_offset(1.0);
    let json = serde_json::to_string(&kf).unwrap();
    assert_eq!(json, r#"{"opacity":0.5,"offset":1.0}"#);
}

#[test]
fn equality_ignores_hooks() {
    let a = Keyframe::new().with("x", 1).on_complete(|| {});
    let b = Keyframe::new().with("x", 1);
    assert_eq!(a, b);
    assert!(format!("{a:?}").contains("on_complete: true"));
}

#[test]
fn non_scalar_values_are_rejected() {
    let err = serde_json::from_str::<Keyframe>(r#"{ "opacity": [1, 2] }"#);
    assert!(err.is_err());
}
