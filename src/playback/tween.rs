use std::rc::Rc;

use crate::{
    animation::ease::{Easing, EasingSpec},
    animation::keyframe::Keyframe,
    foundation::core::{Anchor, Target},
    foundation::error::{PathglideError, PathglideResult},
    motion::builder::{MotionOptions, MotionPath},
    path::geometry::PathGeometry,
    path::sampler::DEFAULT_STEP,
    playback::native::{
        AnimationBackend, Completion, Direction, Fill, Iterations, NativeAnimation, PlayState,
        Timing,
    },
};

/// Per-tween configuration. Unset fields fall back to timeline defaults, then built-ins.
#[derive(Clone, Debug, Default)]
pub struct TweenOptions {
    /// Duration of one iteration in milliseconds. Required.
    pub duration_ms: Option<f64>,
    /// Delay before the first iteration.
    pub delay_ms: Option<f64>,
    /// Iteration count.
    pub iterations: Option<Iterations>,
    /// Clock multiplier.
    pub playback_rate: Option<f64>,
    /// Iteration direction.
    pub direction: Option<Direction>,
    /// Fill mode.
    pub fill: Option<Fill>,
    /// Easing applied to the motion.
    pub easing: Option<EasingSpec>,
    /// Pre-warp plain keyframes through the easing instead of easing natively.
    pub prewarp: Option<bool>,
    /// Path to follow; its presence makes the tween path-following.
    pub path: Option<Rc<dyn PathGeometry>>,
    /// Pivot placed on the path.
    pub anchor: Option<Anchor>,
    /// Rotate with the path heading.
    pub rotate: Option<bool>,
    /// Arc-length sample step.
    pub step: Option<f64>,
}

impl TweenOptions {
    /// Options with a duration and nothing else set.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            ..Self::default()
        }
    }

    /// Builder-style delay setter.
    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Builder-style iterations setter.
    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Builder-style easing setter.
    pub fn easing(mut self, easing: impl Into<EasingSpec>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Builder-style path setter.
    pub fn path(mut self, path: Rc<dyn PathGeometry>) -> Self {
        self.path = Some(path);
        self
    }

    /// Builder-style anchor setter.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Builder-style rotation-follow setter.
    pub fn rotate(mut self, rotate: bool) -> Self {
        self.rotate = Some(rotate);
        self
    }

    /// Builder-style sample step setter.
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Builder-style pre-warp setter.
    pub fn prewarp(mut self, prewarp: bool) -> Self {
        self.prewarp = Some(prewarp);
        self
    }

    /// Fill every unset field from `defaults`; fields set here win.
    pub fn merged_over(self, defaults: &TweenOptions) -> TweenOptions {
        TweenOptions {
            duration_ms: self.duration_ms.or(defaults.duration_ms),
            delay_ms: self.delay_ms.or(defaults.delay_ms),
            iterations: self.iterations.or(defaults.iterations),
            playback_rate: self.playback_rate.or(defaults.playback_rate),
            direction: self.direction.or(defaults.direction),
            fill: self.fill.or(defaults.fill),
            easing: self.easing.or_else(|| defaults.easing.clone()),
            prewarp: self.prewarp.or(defaults.prewarp),
            path: self.path.or_else(|| defaults.path.clone()),
            anchor: self.anchor.or(defaults.anchor),
            rotate: self.rotate.or(defaults.rotate),
            step: self.step.or(defaults.step),
        }
    }

    /// Resolved easing, linear when unset.
    pub fn resolved_easing(&self) -> Easing {
        self.easing
            .as_ref()
            .map(EasingSpec::resolve)
            .unwrap_or_default()
    }

    /// Native timing derived from these options.
    pub fn timing(&self) -> PathglideResult<Timing> {
        let duration_ms = self
            .duration_ms
            .ok_or_else(|| PathglideError::config("tween duration is required"))?;
        let defaults = Timing::default();
        let timing = Timing {
            duration_ms,
            delay_ms: self.delay_ms.unwrap_or(defaults.delay_ms),
            iterations: self.iterations.unwrap_or(defaults.iterations),
            playback_rate: self.playback_rate.unwrap_or(defaults.playback_rate),
            direction: self.direction.unwrap_or(defaults.direction),
            fill: self.fill.unwrap_or(defaults.fill),
            easing: self.resolved_easing().css(),
        };
        timing.validate()?;
        Ok(timing)
    }

    /// Path-following configuration, when a path is set.
    pub fn motion(&self) -> Option<MotionOptions> {
        let path = self.path.clone()?;
        Some(MotionOptions {
            path,
            anchor: self.anchor.unwrap_or_default(),
            rotate: self.rotate.unwrap_or(false),
            step: self.step.unwrap_or(DEFAULT_STEP),
        })
    }
}

/// How a tween produces its keyframes, fixed at construction.
#[derive(Debug)]
pub enum TweenKind {
    /// Keyframes are handed to the native animation as given (or pre-warped).
    Plain,
    /// Keyframes are rebuilt along a path for the current layout.
    PathFollowing(MotionPath),
}

/// One target, one keyframe list, one native animation.
#[derive(Debug)]
pub struct Tween<A: NativeAnimation> {
    animation: A,
    kind: TweenKind,
    source: Vec<Keyframe>,
    easing: Easing,
    options: TweenOptions,
    invalidated: bool,
    fired: Vec<bool>,
}

/// Create a tween of `keyframes` on `target`.
pub fn tween<B: AnimationBackend>(
    backend: &mut B,
    target: Rc<dyn Target>,
    keyframes: Vec<Keyframe>,
    options: TweenOptions,
) -> PathglideResult<Tween<B::Animation>> {
    Tween::new(backend, target, keyframes, options)
}

impl<A: NativeAnimation> Tween<A> {
    /// Resolve `options`, build the keyframes, and create the (idle) native animation.
    pub fn new<B: AnimationBackend<Animation = A>>(
        backend: &mut B,
        target: Rc<dyn Target>,
        keyframes: Vec<Keyframe>,
        options: TweenOptions,
    ) -> PathglideResult<Self> {
        let mut timing = options.timing()?;
        let easing = options.resolved_easing();

        let (kind, built) = match options.motion() {
            Some(motion) => {
                let mp = MotionPath::new(Rc::clone(&target), motion);
                let built = mp.build(&keyframes, &easing)?;
                // Sample offsets already carry the easing.
                timing.easing = Easing::Linear.css();
                (TweenKind::PathFollowing(mp), built)
            }
            None if options.prewarp.unwrap_or(false) => {
                timing.easing = Easing::Linear.css();
                (TweenKind::Plain, easing.frames(&keyframes).into())
            }
            None => (TweenKind::Plain, keyframes.clone().into()),
        };

        let animation = backend.create(target, built, &timing);
        let fired = vec![false; keyframes.len()];
        Ok(Self {
            animation,
            kind,
            source: keyframes,
            easing,
            options,
            invalidated: false,
            fired,
        })
    }

    /// Start or resume playback, rebuilding first if a resize happened while not running.
    ///
    /// A failed rebuild still starts playback on the previous keyframes; the tween stays
    /// invalidated and the error is returned.
    pub fn play(&mut self) -> PathglideResult<()> {
        if matches!(
            self.animation.play_state(),
            PlayState::Idle | PlayState::Finished
        ) {
            self.fired.fill(false);
        }
        let rebuilt = if self.invalidated {
            self.rebuild()
        } else {
            Ok(())
        };
        if rebuilt.is_ok() {
            self.invalidated = false;
        }
        self.animation.play();
        rebuilt
    }

    /// Hold the current position.
    pub fn pause(&mut self) {
        self.animation.pause();
    }

    /// Stop playback.
    pub fn cancel(&mut self) {
        self.animation.cancel();
    }

    /// Jump to the end.
    pub fn finish(&mut self) -> PathglideResult<()> {
        self.animation.finish()?;
        self.fire_hooks();
        Ok(())
    }

    /// Outcome of the current play-through.
    pub fn completion(&self) -> Completion {
        self.animation.completion()
    }

    /// Native playback state.
    pub fn play_state(&self) -> PlayState {
        self.animation.play_state()
    }

    /// Local time of the native animation.
    pub fn current_time(&self) -> Option<f64> {
        self.animation.current_time()
    }

    /// Played fraction of the native animation.
    pub fn progress(&self) -> Option<f64> {
        self.animation.progress()
    }

    /// Advance the native animation and fire completion hooks that were passed.
    pub fn tick(&mut self, now: f64) {
        self.animation.tick(now);
        self.fire_hooks();
    }

    /// React to a layout change.
    ///
    /// A running path-following tween rebuilds immediately and swaps keyframes in place; an
    /// idle or paused one is marked invalidated and rebuilds on its next [`Tween::play`].
    /// When the immediate rebuild fails the previous keyframes stay installed and the tween
    /// is marked invalidated.
    pub fn on_resize(&mut self) -> PathglideResult<()> {
        if matches!(self.kind, TweenKind::Plain) {
            return Ok(());
        }
        if self.animation.play_state() != PlayState::Running {
            self.invalidated = true;
            return Ok(());
        }
        let rebuilt = self.rebuild();
        if rebuilt.is_err() {
            self.invalidated = true;
        }
        rebuilt
    }

    /// Return `true` when keyframes are stale and will be rebuilt on play.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Resolved configuration.
    pub fn config(&self) -> &TweenOptions {
        &self.options
    }

    /// Keyframe source kind.
    pub fn kind(&self) -> &TweenKind {
        &self.kind
    }

    /// Keyframes currently installed on the native animation.
    pub fn keyframes(&self) -> Rc<[Keyframe]> {
        Rc::clone(self.animation.keyframes())
    }

    /// Underlying native animation.
    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Mutable access to the underlying native animation.
    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    fn rebuild(&mut self) -> PathglideResult<()> {
        if let TweenKind::PathFollowing(mp) = &self.kind {
            let built = mp.build(&self.source, &self.easing)?;
            self.animation.set_keyframes(built);
        }
        Ok(())
    }

    fn fire_hooks(&mut self) {
        let Some(progress) = self.animation.progress() else {
            return;
        };
        let finished = self.animation.completion() == Completion::Finished;
        let n = self.source.len();
        for (i, kf) in self.source.iter().enumerate() {
            if self.fired[i] {
                continue;
            }
            let Some(hook) = &kf.on_complete else {
                continue;
            };
            let position = kf
                .offset
                .unwrap_or(if n > 1 { i as f64 / (n - 1) as f64 } else { 1.0 });
            if finished || progress >= position {
                self.fired[i] = true;
                hook();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/tween.rs"]
mod tests;
