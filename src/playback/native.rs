//! Contract for the platform animation primitive, plus a deterministic clock-driven
//! implementation.
//!
//! A native animation owns a keyframe list and a [`Timing`], and moves through
//! [`PlayState`]s as it is played, paused, cancelled, or runs to its end. Completion is exposed
//! as a pollable [`Completion`] rather than a future; drivers check it after each `tick`.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{
    animation::keyframe::Keyframe,
    foundation::core::Target,
    foundation::error::{PathglideError, PathglideResult},
};

/// Playback state of a native animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    /// Not started, or cancelled.
    #[default]
    Idle,
    /// Advancing with the clock.
    Running,
    /// Holding its current time.
    Paused,
    /// Reached the end of its active duration.
    Finished,
}

/// Outcome of the current play-through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completion {
    /// Still playing (or not yet played).
    #[default]
    Pending,
    /// Ran to the end.
    Finished,
    /// Cancelled before reaching the end.
    Cancelled,
}

/// Iteration count: a finite, possibly fractional, count or forever.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CountRepr", into = "CountRepr")]
pub enum Iterations {
    /// Play this many iterations.
    Count(f64),
    /// Never finish on its own.
    Infinite,
}

impl Default for Iterations {
    fn default() -> Self {
        Self::Count(1.0)
    }
}

/// JSON form shared by iteration and repeat counts: a number or `"infinite"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum CountRepr {
    Number(f64),
    Word(String),
}

impl TryFrom<CountRepr> for Iterations {
    type Error = PathglideError;

    fn try_from(repr: CountRepr) -> Result<Self, Self::Error> {
        match repr {
            CountRepr::Number(n) if n.is_finite() && n >= 0.0 => Ok(Self::Count(n)),
            CountRepr::Number(n) if n == f64::INFINITY => Ok(Self::Infinite),
            CountRepr::Word(w) if w.eq_ignore_ascii_case("infinite") => Ok(Self::Infinite),
            CountRepr::Number(n) => Err(PathglideError::config(format!(
                "iterations must be non-negative, got {n}"
            ))),
            CountRepr::Word(w) => Err(PathglideError::config(format!(
                "iterations must be a number or \"infinite\", got {w:?}"
            ))),
        }
    }
}

impl From<Iterations> for CountRepr {
    fn from(it: Iterations) -> Self {
        match it {
            Iterations::Count(n) => Self::Number(n),
            Iterations::Infinite => Self::Word("infinite".to_string()),
        }
    }
}

/// Iteration direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Forward every iteration.
    #[default]
    Normal,
    /// Backward every iteration.
    Reverse,
    /// Forward, then backward.
    Alternate,
    /// Backward, then forward.
    AlternateReverse,
}

/// Whether effects apply outside the active interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    /// No effect outside the active interval.
    #[default]
    None,
    /// Keep the final frame after the end.
    Forwards,
    /// Apply the first frame during the delay.
    Backwards,
    /// Both of the above.
    Both,
}

/// Timing of one native animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Duration of one iteration, in milliseconds.
    pub duration_ms: f64,
    /// Delay before the first iteration, in milliseconds.
    pub delay_ms: f64,
    /// Number of iterations.
    pub iterations: Iterations,
    /// Clock multiplier; must be positive.
    pub playback_rate: f64,
    /// Iteration direction.
    pub direction: Direction,
    /// Fill mode.
    pub fill: Fill,
    /// Compositor easing identifier (`"linear"`, `"cubic-bezier(...)"`).
    pub easing: String,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration_ms: 0.0,
            delay_ms: 0.0,
            iterations: Iterations::default(),
            playback_rate: 1.0,
            direction: Direction::default(),
            fill: Fill::default(),
            easing: "linear".to_string(),
        }
    }
}

impl Timing {
    /// Timing with `duration_ms` and defaults elsewhere.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    /// Reject values a native animation cannot run with.
    pub fn validate(&self) -> PathglideResult<()> {
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(PathglideError::config(format!(
                "duration must be a non-negative number of milliseconds, got {}",
                self.duration_ms
            )));
        }
        if !self.delay_ms.is_finite() {
            return Err(PathglideError::config("delay must be finite"));
        }
        if let Iterations::Count(n) = self.iterations
            && (!n.is_finite() || n < 0.0)
        {
            return Err(PathglideError::config(format!(
                "iterations must be non-negative, got {n}"
            )));
        }
        if !self.playback_rate.is_finite() || self.playback_rate <= 0.0 {
            return Err(PathglideError::config(format!(
                "playback rate must be positive, got {}",
                self.playback_rate
            )));
        }
        Ok(())
    }

    /// Duration of all iterations, `f64::INFINITY` when they never end.
    pub fn active_duration(&self) -> f64 {
        match self.iterations {
            Iterations::Count(n) => self.duration_ms * n,
            Iterations::Infinite => f64::INFINITY,
        }
    }

    /// Local time at which the animation finishes.
    pub fn end_time(&self) -> f64 {
        (self.delay_ms + self.active_duration()).max(0.0)
    }
}

/// The platform animation primitive bound to one target.
pub trait NativeAnimation: std::fmt::Debug {
    /// Start or resume. A finished or idle animation restarts from zero.
    fn play(&mut self);

    /// Hold the current time.
    fn pause(&mut self);

    /// Stop and clear effects; a pending completion becomes [`Completion::Cancelled`].
    fn cancel(&mut self);

    /// Jump to the end. Fails for animations that never end.
    fn finish(&mut self) -> PathglideResult<()>;

    /// Replace the keyframes without disturbing the play position.
    fn set_keyframes(&mut self, keyframes: Rc<[Keyframe]>);

    /// Keyframes currently installed.
    fn keyframes(&self) -> &Rc<[Keyframe]>;

    /// Current playback state.
    fn play_state(&self) -> PlayState;

    /// Outcome of the current play-through.
    fn completion(&self) -> Completion;

    /// Local time in milliseconds, `None` while idle.
    fn current_time(&self) -> Option<f64>;

    /// Fraction of the active duration played, in `[0, 1]`.
    ///
    /// For animations that never end this is the progress of the current iteration.
    fn progress(&self) -> Option<f64>;

    /// Advance to driver time `now` (milliseconds). Platforms with their own clock ignore it.
    fn tick(&mut self, _now: f64) {}
}

/// Factory for native animations.
pub trait AnimationBackend {
    /// Animation type produced by this backend.
    type Animation: NativeAnimation;

    /// Create an idle animation of `keyframes` on `target`.
    fn create(
        &mut self,
        target: Rc<dyn Target>,
        keyframes: Rc<[Keyframe]>,
        timing: &Timing,
    ) -> Self::Animation;
}

/// Software animation advanced explicitly through [`NativeAnimation::tick`].
///
/// Its clock anchors on the first tick after `play`, so the first observed frame is local time
/// zero (or the held time when resuming).
#[derive(Debug)]
pub struct ClockAnimation {
    keyframes: Rc<[Keyframe]>,
    timing: Timing,
    state: PlayState,
    completion: Completion,
    hold_time: Option<f64>,
    start_time: Option<f64>,
}

impl ClockAnimation {
    /// Create an idle animation.
    pub fn new(keyframes: Rc<[Keyframe]>, timing: Timing) -> Self {
        Self {
            keyframes,
            timing,
            state: PlayState::Idle,
            completion: Completion::Pending,
            hold_time: None,
            start_time: None,
        }
    }

    /// Timing this animation runs with.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

impl NativeAnimation for ClockAnimation {
    fn play(&mut self) {
        match self.state {
            PlayState::Running => {}
            PlayState::Paused => {
                self.state = PlayState::Running;
                self.start_time = None;
            }
            PlayState::Idle | PlayState::Finished => {
                self.state = PlayState::Running;
                self.completion = Completion::Pending;
                self.hold_time = Some(0.0);
                self.start_time = None;
            }
        }
    }

    fn pause(&mut self) {
        match self.state {
            PlayState::Running | PlayState::Finished => self.state = PlayState::Paused,
            PlayState::Idle => {
                self.state = PlayState::Paused;
                self.completion = Completion::Pending;
                self.hold_time = Some(0.0);
            }
            PlayState::Paused => {}
        }
        self.start_time = None;
    }

    fn cancel(&mut self) {
        if self.completion == Completion::Pending && self.state != PlayState::Idle {
            self.completion = Completion::Cancelled;
        }
        self.state = PlayState::Idle;
        self.hold_time = None;
        self.start_time = None;
    }

    fn finish(&mut self) -> PathglideResult<()> {
        let end = self.timing.end_time();
        if !end.is_finite() {
            return Err(PathglideError::playback(
                "cannot finish an animation with infinite iterations",
            ));
        }
        self.hold_time = Some(end);
        self.start_time = None;
        self.state = PlayState::Finished;
        self.completion = Completion::Finished;
        Ok(())
    }

    fn set_keyframes(&mut self, keyframes: Rc<[Keyframe]>) {
        self.keyframes = keyframes;
    }

    fn keyframes(&self) -> &Rc<[Keyframe]> {
        &self.keyframes
    }

    fn play_state(&self) -> PlayState {
        self.state
    }

    fn completion(&self) -> Completion {
        self.completion
    }

    fn current_time(&self) -> Option<f64> {
        self.hold_time
    }

    fn progress(&self) -> Option<f64> {
        let t = self.hold_time? - self.timing.delay_ms;
        let active = self.timing.active_duration();
        if active.is_finite() {
            if active <= 0.0 {
                return Some(if t >= 0.0 { 1.0 } else { 0.0 });
            }
            return Some((t / active).clamp(0.0, 1.0));
        }
        if self.timing.duration_ms <= 0.0 {
            return Some(0.0);
        }
        Some(t.max(0.0) % self.timing.duration_ms / self.timing.duration_ms)
    }

    fn tick(&mut self, now: f64) {
        if self.state != PlayState::Running {
            return;
        }
        let rate = self.timing.playback_rate;
        let held = self.hold_time.unwrap_or(0.0);
        let start = *self.start_time.get_or_insert(now - held / rate);
        let local = (now - start) * rate;
        let end = self.timing.end_time();
        if local >= end {
            self.hold_time = Some(end);
            self.state = PlayState::Finished;
            self.completion = Completion::Finished;
        } else {
            self.hold_time = Some(local);
        }
    }
}

/// Backend producing [`ClockAnimation`]s.
#[derive(Debug, Default)]
pub struct ClockBackend {
    created: usize,
}

impl ClockBackend {
    /// Create a backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of animations created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl AnimationBackend for ClockBackend {
    type Animation = ClockAnimation;

    fn create(
        &mut self,
        _target: Rc<dyn Target>,
        keyframes: Rc<[Keyframe]>,
        timing: &Timing,
    ) -> ClockAnimation {
        self.created += 1;
        ClockAnimation::new(keyframes, timing.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/native.rs"]
mod tests;
