use std::{
    borrow::Cow,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    animation::ease::Easing,
    animation::interp::{Interpolated, interpolate},
    animation::keyframe::{Keyframe, PropertyValue, TRANSFORM_KEY},
    foundation::core::{Anchor, Point, Rect, Target, Vec2},
    foundation::error::PathglideResult,
    foundation::math::{clamp01, format_number},
    motion::cache::{SharedKeyframeCache, shared_keyframe_cache},
    motion::fingerprint::fingerprint_build,
    path::geometry::PathGeometry,
    path::sampler::{DEFAULT_STEP, sample},
};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

fn next_instance() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// Path-following configuration for one tween.
#[derive(Clone, Debug)]
pub struct MotionOptions {
    /// Path the target travels along.
    pub path: Rc<dyn PathGeometry>,
    /// Pivot on the target that is placed on the path.
    pub anchor: Anchor,
    /// Rotate the target to follow the path heading.
    pub rotate: bool,
    /// Arc-length distance between samples.
    pub step: f64,
}

impl MotionOptions {
    /// Options for `path` with an automatic anchor, no rotation, and the default step.
    pub fn new(path: Rc<dyn PathGeometry>) -> Self {
        Self {
            path,
            anchor: Anchor::Auto,
            rotate: false,
            step: DEFAULT_STEP,
        }
    }

    /// Builder-style anchor setter.
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Builder-style rotation-follow setter.
    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    /// Builder-style sample step setter.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

/// Snapshot of the boxes a build is placed against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionLayout {
    /// Target box, used to resolve the anchor.
    pub target: Rect,
    /// Screen-space box of the path's container.
    pub container: Rect,
    /// Coordinate system the path points are expressed in.
    pub view: Rect,
    /// Container pixels per path unit on each axis.
    pub scale: Vec2,
}

impl MotionLayout {
    /// Capture the current layout of `target` and `path`.
    ///
    /// Without a view box the path is assumed to be in container pixels with origin `(0, 0)`.
    pub fn resolve(target: Rect, path: &dyn PathGeometry) -> Self {
        let container = path.rendered_box();
        let view = path
            .view_box()
            .unwrap_or_else(|| Rect::from_origin_size(Point::ORIGIN, container.size()));
        let scale = Vec2::new(
            axis_scale(container.width(), view.width()),
            axis_scale(container.height(), view.height()),
        );
        Self {
            target,
            container,
            view,
            scale,
        }
    }

    /// Origin of the path's coordinate system.
    pub fn origin(&self) -> Point {
        self.view.origin()
    }

    /// Translation placing the anchor of the target on path point `p`.
    pub fn place(&self, p: Point, anchor: Vec2) -> Vec2 {
        let origin = self.origin();
        Vec2::new(
            self.container.x0 - anchor.x + (p.x - origin.x) * self.scale.x,
            self.container.y0 - anchor.y + (p.y - origin.y) * self.scale.y,
        )
    }
}

fn axis_scale(rendered: f64, view: f64) -> f64 {
    let s = rendered / view;
    if s.is_finite() && s != 0.0 { s } else { 1.0 }
}

/// Heading at sample `i` in degrees, estimated from its neighbours (clamped at the ends).
pub fn heading(points: &[Point], i: usize) -> f64 {
    let Some(&here) = points.get(i) else {
        return 0.0;
    };
    let prev = points[i.saturating_sub(1)];
    let next = points.get(i + 1).copied().unwrap_or(here);
    (next.y - prev.y).atan2(next.x - prev.x).to_degrees()
}

/// Turns a short keyframe list into one keyframe per path sample.
///
/// Results are memoized in a [`SharedKeyframeCache`] keyed by layout scale, the source
/// keyframes, the easing, and this instance's identity.
#[derive(Debug)]
pub struct MotionPath {
    target: Rc<dyn Target>,
    options: MotionOptions,
    instance: u64,
    cache: SharedKeyframeCache,
}

impl MotionPath {
    /// Create a motion path using the thread's shared keyframe cache.
    pub fn new(target: Rc<dyn Target>, options: MotionOptions) -> Self {
        Self::with_cache(target, options, shared_keyframe_cache())
    }

    /// Create a motion path backed by a dedicated cache.
    pub fn with_cache(
        target: Rc<dyn Target>,
        options: MotionOptions,
        cache: SharedKeyframeCache,
    ) -> Self {
        Self {
            target,
            options,
            instance: next_instance(),
            cache,
        }
    }

    /// Current options.
    pub fn options(&self) -> &MotionOptions {
        &self.options
    }

    /// Identity token participating in cache keys.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Layout the next build would be placed against.
    pub fn layout(&self) -> MotionLayout {
        MotionLayout::resolve(self.target.bounds(), self.options.path.as_ref())
    }

    /// Build (or fetch from the cache) the per-sample keyframe list.
    ///
    /// A cache hit returns the same `Rc` handed out by the build that populated it.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(instance = self.instance, frames = keyframes.len())
    )]
    pub fn build(&self, keyframes: &[Keyframe], easing: &Easing) -> PathglideResult<Rc<[Keyframe]>> {
        let layout = self.layout();
        let key = fingerprint_build(layout.scale, keyframes, easing, self.instance);
        if let Some(hit) = self.cache.borrow_mut().get(&key) {
            tracing::debug!("keyframe cache hit");
            return Ok(hit);
        }

        let sampled = sample(self.options.path.as_ref(), self.options.step)?;
        let built: Rc<[Keyframe]> =
            build_keyframes(&layout, &sampled.points, &self.options, keyframes, easing).into();
        tracing::debug!(samples = built.len(), "keyframe cache miss");
        self.cache.borrow_mut().set(key, Rc::clone(&built));
        Ok(built)
    }

    /// Replace the options wholesale and rebuild.
    ///
    /// The instance identity is renewed, so lists cached for the previous options are never
    /// returned again.
    pub fn reconfigure(
        &mut self,
        options: MotionOptions,
        keyframes: &[Keyframe],
        easing: &Easing,
    ) -> PathglideResult<Rc<[Keyframe]>> {
        self.options = options;
        self.instance = next_instance();
        self.build(keyframes, easing)
    }
}

/// Map `keyframes` onto sampled `points`, producing one keyframe per sample.
///
/// Each output carries the blended plain properties, a composite `transform` (translation,
/// scale, optional rotation, then property-level fragments in key order) and an `offset`.
pub fn build_keyframes(
    layout: &MotionLayout,
    points: &[Point],
    options: &MotionOptions,
    keyframes: &[Keyframe],
    easing: &Easing,
) -> Vec<Keyframe> {
    let frames: Cow<'_, [Keyframe]> = if keyframes.is_empty() {
        Cow::Owned(vec![Keyframe::new()])
    } else {
        Cow::Borrowed(keyframes)
    };
    let k = frames.len();
    let n = points.len();

    let mut keys: Vec<&str> = Vec::new();
    for kf in frames.iter() {
        for (name, _) in kf.props() {
            if !keys.contains(&name) {
                keys.push(name);
            }
        }
    }

    let anchor = options.anchor.resolve(layout.target);
    let mut out = Vec::with_capacity(n);
    for (i, &point) in points.iter().enumerate() {
        let last = i + 1 == n;
        let progress = if n > 1 { i as f64 / (n - 1) as f64 } else { 1.0 };
        let eased = clamp01(easing.calc(progress));
        let u = if last { (k - 1) as f64 } else { eased * (k - 1) as f64 };
        let frame_index = (u.floor() as usize).min(k - 1);

        let mut kf = Keyframe::new();
        let mut fragments: Vec<String> = Vec::new();
        for &name in &keys {
            let a = (0..=frame_index).rev().find(|&j| frames[j].contains(name));
            let b = (frame_index + 1..k).find(|&j| frames[j].contains(name));
            let t = match (a, b) {
                (Some(a), Some(b)) => ((u - a as f64) / (b - a) as f64).clamp(0.0, 1.0),
                _ => 0.0,
            };
            let from = a.and_then(|j| frames[j].get(name));
            let to = b.and_then(|j| frames[j].get(name));
            match interpolate(name, from, to, t) {
                Some(Interpolated::Transform(fragment)) => fragments.push(fragment),
                Some(Interpolated::Value(v)) if name == TRANSFORM_KEY => {
                    fragments.push(v.to_string());
                }
                Some(Interpolated::Value(v)) => kf.set(name, v),
                None => {}
            }
        }

        let settle = easing.calc(1.0 - if last { 1.0 } else { progress });
        let scale = frames[frame_index].scale.unwrap_or(1.0) * (1.0 + settle);
        let translate = layout.place(point, anchor);

        let mut transform = format!(
            "translateX({}px) translateY({}px) scale({})",
            format_number(translate.x),
            format_number(translate.y),
            format_number(scale)
        );
        if options.rotate {
            let rotation = settle * heading(points, i);
            transform.push_str(&format!(" rotate({}deg)", format_number(rotation)));
        }
        for fragment in fragments.iter().filter(|f| !f.trim().is_empty()) {
            transform.push(' ');
            transform.push_str(fragment.trim());
        }
        kf.set(TRANSFORM_KEY, PropertyValue::Text(transform));
        kf.offset = Some(if last { 1.0 } else { eased });
        out.push(kf);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/motion/builder.rs"]
mod tests;
