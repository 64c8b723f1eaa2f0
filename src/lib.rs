//! Pathglide moves a visual target along a 2D path while blending its style properties between
//! keyframes, and sequences such animations on a timeline.
//!
//! The two halves:
//!
//! - [`MotionPath`] samples a [`PathGeometry`] at a fixed arc-length step and turns a short
//!   keyframe list into one keyframe per sample, each carrying a composite `transform`
//!   (translation, scale, optional heading rotation) plus the blended properties. Results are
//!   memoized per layout in a bounded LRU cache.
//! - [`Timeline`] plays [`Tween`]s one after another on top of a [`NativeAnimation`] backend,
//!   with pause/resume, repeat counts, and rebuild-on-resize.
//!
//! Everything is single-threaded and driven explicitly: the host calls [`Timeline::tick`] (or
//! runs a [`FrameLoop`]) once per display frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod motion;
mod path;
mod playback;

pub use crate::animation::ease::{Easing, EasingSpec};
pub use crate::animation::interp::{Interpolated, interpolate};
pub use crate::animation::keyframe::{
    CompletionHook, EASING_KEY, Keyframe, OFFSET_KEY, PropertyValue, SCALE_KEY, TRANSFORM_KEY,
};
pub use crate::animation::normalize::{KeyframeInput, normalize_keyframes};
pub use crate::animation::transform::is_transform_key;
pub use crate::foundation::core::{Anchor, BezPath, Point, Rect, Target, Vec2};
pub use crate::foundation::error::{PathglideError, PathglideResult};
pub use crate::motion::builder::{
    MotionLayout, MotionOptions, MotionPath, build_keyframes, heading,
};
pub use crate::motion::cache::{
    BoundedCache, KEYFRAME_CACHE_CAPACITY, KeyframeCache, SharedKeyframeCache,
    shared_keyframe_cache,
};
pub use crate::motion::fingerprint::BuildFingerprint;
pub use crate::path::geometry::{PathGeometry, SvgPath};
pub use crate::path::sampler::{DEFAULT_STEP, MAX_SAMPLES, SampledPath, sample};
pub use crate::playback::frame::{FrameControl, FrameHandle, FrameLoop};
pub use crate::playback::native::{
    AnimationBackend, ClockAnimation, ClockBackend, Completion, Direction, Fill, Iterations,
    NativeAnimation, PlayState, Timing,
};
pub use crate::playback::timeline::{
    MotionDefaults, Repeat, Timeline, TimelineOptions, TimelineState, drive, timeline,
};
pub use crate::playback::tween::{Tween, TweenKind, TweenOptions, tween};
