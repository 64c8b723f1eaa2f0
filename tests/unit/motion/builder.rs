use std::cell::RefCell;

use super::*;
use crate::foundation::error::PathglideError;
use crate::motion::cache::KeyframeCache;
use crate::path::geometry::SvgPath;

fn line(d: &str) -> Rc<SvgPath> {
    Rc::new(SvgPath::parse(d).unwrap())
}

fn dedicated_cache() -> SharedKeyframeCache {
    Rc::new(RefCell::new(KeyframeCache::new(8)))
}

fn target() -> Rc<dyn Target> {
    Rc::new(Rect::new(0.0, 0.0, 20.0, 20.0))
}

fn transform_of(kf: &Keyframe) -> &str {
    kf.get(TRANSFORM_KEY).and_then(PropertyValue::as_text).unwrap()
}

#[test]
fn opacity_blends_from_first_to_last() {
    let mp = MotionPath::with_cache(
        target(),
        MotionOptions::new(line("M0 0 L100 0")),
        dedicated_cache(),
    );
    let frames = vec![
        Keyframe::new().with("opacity", 0),
        Keyframe::new().with("opacity", 1),
    ];
    let out = mp.build(&frames, &Easing::Linear).unwrap();

    assert_eq!(out.len(), 11);
    let opacity = |kf: &Keyframe| kf.get("opacity").and_then(PropertyValue::as_number).unwrap();
    assert!(opacity(&out[0]).abs() < 1e-9);
    assert!((opacity(&out[10]) - 1.0).abs() < 1e-9);
    assert!((opacity(&out[5]) - 0.5).abs() < 1e-9);

    let offsets: Vec<f64> = out.iter().map(|k| k.offset.unwrap()).collect();
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(offsets[10], 1.0);
}

#[test]
fn identical_builds_hit_the_cache() {
    let path = line("M0 0 L100 0");
    path.set_view_box(Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    path.set_rendered_box(Rect::new(0.0, 0.0, 100.0, 100.0));
    let cache = dedicated_cache();
    let mp = MotionPath::with_cache(target(), MotionOptions::new(path.clone()), cache.clone());
    let frames = vec![Keyframe::new().with("opacity", 0), Keyframe::new().with("opacity", 1)];

    let first = mp.build(&frames, &Easing::Linear).unwrap();
    let second = mp.build(&frames, &Easing::Linear).unwrap();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(cache.borrow().len(), 1);

    path.set_rendered_box(Rect::new(0.0, 0.0, 200.0, 100.0));
    let resized = mp.build(&frames, &Easing::Linear).unwrap();
    assert!(!Rc::ptr_eq(&first, &resized));
    assert_eq!(cache.borrow().len(), 2);
}

#[test]
fn reconfigure_never_returns_stale_entries() {
    let cache = dedicated_cache();
    let mut mp = MotionPath::with_cache(
        target(),
        MotionOptions::new(line("M0 0 L100 0")),
        cache.clone(),
    );
    let frames = vec![Keyframe::new().with("opacity", 0), Keyframe::new().with("opacity", 1)];
    let before = mp.build(&frames, &Easing::Linear).unwrap();
    let id = mp.instance();

    let options = mp.options().clone().with_step(25.0);
    let after = mp.reconfigure(options, &frames, &Easing::Linear).unwrap();
    assert_ne!(mp.instance(), id);
    assert!(!Rc::ptr_eq(&before, &after));
    assert_eq!(after.len(), 5);
}

#[test]
fn opaque_values_snap_at_the_defining_keyframe() {
    let mp = MotionPath::with_cache(
        target(),
        MotionOptions::new(line("M0 0 L100 0")),
        dedicated_cache(),
    );
    let frames = vec![
        Keyframe::new().with("color", "red"),
        Keyframe::new(),
        Keyframe::new().with("color", "blue"),
    ];
    let out = mp.build(&frames, &Easing::Linear).unwrap();
    let colors: Vec<&str> = out
        .iter()
        .map(|k| k.get("color").and_then(PropertyValue::as_text).unwrap())
        .collect();
    assert!(colors[..10].iter().all(|c| *c == "red"));
    assert_eq!(colors[10], "blue");
}

#[test]
fn opaque_value_without_source_is_adopted_from_ahead() {
    let mp = MotionPath::with_cache(
        target(),
        MotionOptions::new(line("M0 0 L100 0")),
        dedicated_cache(),
    );
    let frames = vec![Keyframe::new(), Keyframe::new().with("display", "block")];
    let out = mp.build(&frames, &Easing::Linear).unwrap();
    assert!(
        out.iter()
            .all(|k| k.get("display") == Some(&PropertyValue::from("block")))
    );
}

#[test]
fn placement_is_anchor_relative() {
    let mp = MotionPath::with_cache(
        target(),
        MotionOptions::new(line("M0 0 L100 0")),
        dedicated_cache(),
    );
    let out = mp.build(&[], &Easing::Linear).unwrap();
    // Point (50, 0), auto anchor (10, 10), settle 0.5.
    assert_eq!(
        transform_of(&out[5]),
        "translateX(40px) translateY(-10px) scale(1.5)"
    );
    assert_eq!(
        transform_of(&out[10]),
        "translateX(90px) translateY(-10px) scale(1)"
    );
}

#[test]
fn view_box_scales_path_units() {
    let path = line("M0 0 L10 0");
    path.set_view_box(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    path.set_rendered_box(Rect::new(100.0, 50.0, 200.0, 150.0));
    let options = MotionOptions::new(path).with_anchor(Anchor::Offset(0.0, 0.0));
    let mp = MotionPath::with_cache(target(), options, dedicated_cache());

    let layout = mp.layout();
    assert_eq!(layout.scale, Vec2::new(10.0, 10.0));

    let out = mp.build(&[Keyframe::new().with_scale(2.0)], &Easing::Linear).unwrap();
    assert_eq!(
        transform_of(out.last().unwrap()),
        "translateX(200px) translateY(50px) scale(2)"
    );
}

#[test]
fn property_fragments_follow_the_placement() {
    let mp = MotionPath::with_cache(
        target(),
        MotionOptions::new(line("M0 0 L100 0")),
        dedicated_cache(),
    );
    let frames = vec![
        Keyframe::new().with("rotate", 0),
        Keyframe::new().with("rotate", 90),
    ];
    let out = mp.build(&frames, &Easing::Linear).unwrap();
    assert!(transform_of(&out[5]).ends_with("scale(1.5) rotate(45deg)"));
    assert!(transform_of(&out[10]).ends_with("scale(1) rotate(90deg)"));
    assert!(out[10].get("rotate").is_none());
}

#[test]
fn heading_follows_a_horizontal_path() {
    let path = line("M0 0 L100 0");
    let points = crate::path::sampler::sample(path.as_ref(), 10.0).unwrap().points;
    for i in 1..points.len() - 1 {
        assert!(heading(&points, i).abs() < 1e-9, "sample {i}");
    }

    let options = MotionOptions::new(path).with_rotate(true);
    let mp = MotionPath::with_cache(target(), options, dedicated_cache());
    let out = mp.build(&[], &Easing::Linear).unwrap();
    assert!(out.iter().all(|k| transform_of(k).contains("rotate(0deg)")));
}

#[test]
fn heading_of_a_vertical_path_is_ninety_degrees() {
    let points = [Point::new(0.0, 0.0), Point::new(0.0, 10.0), Point::new(0.0, 20.0)];
    assert!((heading(&points, 1) - 90.0).abs() < 1e-9);
    assert_eq!(heading(&points, 9), 0.0);
}

#[test]
fn zero_length_path_is_a_path_error() {
    let mp = MotionPath::with_cache(
        target(),
        MotionOptions::new(line("M4 4")),
        dedicated_cache(),
    );
    let err = mp.build(&[], &Easing::Linear).unwrap_err();
    assert!(matches!(err, PathglideError::Path(_)));
}
