use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{
    animation::keyframe::Keyframe,
    foundation::core::{Anchor, Target},
    foundation::error::{PathglideError, PathglideResult},
    playback::frame::{FrameControl, FrameHandle, FrameLoop},
    playback::native::{AnimationBackend, Completion, CountRepr, NativeAnimation},
    playback::tween::{Tween, TweenOptions},
};

/// How many times a timeline plays its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CountRepr", into = "CountRepr")]
pub enum Repeat {
    /// Play the sequence this many times; zero plays it once.
    Count(u32),
    /// Loop until killed.
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl Repeat {
    fn passes(self) -> Option<u32> {
        match self {
            Self::Count(n) => Some(n.max(1)),
            Self::Infinite => None,
        }
    }
}

impl TryFrom<CountRepr> for Repeat {
    type Error = PathglideError;

    fn try_from(repr: CountRepr) -> Result<Self, Self::Error> {
        match repr {
            CountRepr::Number(n) if n == f64::INFINITY => Ok(Self::Infinite),
            CountRepr::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => {
                Ok(Self::Count(n as u32))
            }
            CountRepr::Word(w) if w.eq_ignore_ascii_case("infinite") => Ok(Self::Infinite),
            CountRepr::Number(n) => Err(PathglideError::config(format!(
                "repeat must be a whole non-negative number, got {n}"
            ))),
            CountRepr::Word(w) => Err(PathglideError::config(format!(
                "repeat must be a number or \"infinite\", got {w:?}"
            ))),
        }
    }
}

impl From<Repeat> for CountRepr {
    fn from(r: Repeat) -> Self {
        match r {
            Repeat::Count(n) => Self::Number(f64::from(n)),
            Repeat::Infinite => Self::Word("infinite".to_string()),
        }
    }
}

/// Defaults applied only to tweens that follow a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionDefaults {
    /// Default anchor.
    pub anchor: Option<Anchor>,
    /// Default rotation-follow.
    pub rotate: Option<bool>,
    /// Default sample step.
    pub step: Option<f64>,
}

/// Timeline configuration.
#[derive(Clone, Debug, Default)]
pub struct TimelineOptions {
    /// Options every tween inherits unless set at the call site.
    pub defaults: TweenOptions,
    /// Extra defaults for path-following tweens.
    pub motion_path: Option<MotionDefaults>,
    /// Do not start playing when the first tween is added.
    pub paused: bool,
    /// Number of passes over the sequence.
    pub repeat: Repeat,
}

/// Timeline playback state. `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    /// Nothing played yet.
    #[default]
    Idle,
    /// Advancing on every tick.
    Running,
    /// Holding the active tween.
    Paused,
    /// Done; no further playback.
    Finished,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cursor {
    pass: u32,
    index: usize,
    started: bool,
}

/// Plays tweens one after another, at most one at a time.
#[derive(Debug)]
pub struct Timeline<B: AnimationBackend> {
    backend: B,
    options: TimelineOptions,
    tweens: Vec<Tween<B::Animation>>,
    state: TimelineState,
    cursor: Cursor,
    pending_resize: bool,
    start_time: Option<f64>,
    now: Option<f64>,
    end_time: Option<f64>,
}

/// Create a timeline whose tweens are realized by `backend`.
pub fn timeline<B: AnimationBackend>(backend: B, options: TimelineOptions) -> Timeline<B> {
    Timeline::new(backend, options)
}

impl<B: AnimationBackend> Timeline<B> {
    /// Create an idle timeline.
    pub fn new(backend: B, options: TimelineOptions) -> Self {
        Self {
            backend,
            options,
            tweens: Vec::new(),
            state: TimelineState::Idle,
            cursor: Cursor::default(),
            pending_resize: false,
            start_time: None,
            now: None,
            end_time: None,
        }
    }

    /// Append a tween built from the timeline defaults merged under `options`.
    ///
    /// An idle, unpaused timeline starts playing. On error nothing is appended.
    pub fn to(
        &mut self,
        target: Rc<dyn Target>,
        keyframes: Vec<Keyframe>,
        options: TweenOptions,
    ) -> PathglideResult<&mut Self> {
        let options = self.merge(options);
        let tween = Tween::new(&mut self.backend, target, keyframes, options)?;
        self.tweens.push(tween);
        if self.state == TimelineState::Idle && !self.options.paused {
            self.play()?;
        }
        Ok(self)
    }

    fn merge(&self, options: TweenOptions) -> TweenOptions {
        let mut options = options;
        if options.path.is_some()
            && let Some(motion) = self.options.motion_path
        {
            options.anchor = options.anchor.or(motion.anchor);
            options.rotate = options.rotate.or(motion.rotate);
            options.step = options.step.or(motion.step);
        }
        options.merged_over(&self.options.defaults)
    }

    /// Start from the first tween when idle, or resume the held tween when paused.
    pub fn play(&mut self) -> PathglideResult<()> {
        match self.state {
            TimelineState::Running | TimelineState::Finished => Ok(()),
            TimelineState::Paused => {
                self.state = TimelineState::Running;
                if self.cursor.started
                    && let Some(tween) = self.tweens.get_mut(self.cursor.index)
                {
                    play_logged(tween, self.cursor.index);
                }
                Ok(())
            }
            TimelineState::Idle => {
                if self.tweens.is_empty() {
                    return Ok(());
                }
                self.cursor = Cursor::default();
                self.state = TimelineState::Running;
                play_logged(&mut self.tweens[0], 0);
                self.cursor.started = true;
                tracing::debug!(tweens = self.tweens.len(), "timeline started");
                Ok(())
            }
        }
    }

    /// Hold the active tween.
    pub fn pause(&mut self) {
        if self.state != TimelineState::Running {
            return;
        }
        self.state = TimelineState::Paused;
        if self.cursor.started
            && let Some(tween) = self.tweens.get_mut(self.cursor.index)
        {
            tween.pause();
        }
    }

    /// Cancel every tween and finish the timeline.
    pub fn kill(&mut self) {
        for tween in &mut self.tweens {
            tween.cancel();
        }
        self.finish_now();
    }

    /// Schedule a rebuild of every tween on the next tick.
    pub fn notify_resize(&mut self) {
        self.pending_resize = true;
    }

    /// Driver event: advance the timeline to `now` (milliseconds).
    pub fn tick(&mut self, now: f64) -> PathglideResult<()> {
        self.now = Some(now);
        if self.pending_resize {
            self.pending_resize = false;
            for (index, tween) in self.tweens.iter_mut().enumerate() {
                if let Err(err) = tween.on_resize() {
                    tracing::error!(
                        error = %err,
                        tween = index,
                        "rebuild after resize failed, keeping previous keyframes"
                    );
                }
            }
        }
        if self.state != TimelineState::Running {
            return Ok(());
        }
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }

        // One pass at most per tick, so zero-length sequences cannot spin.
        let mut advanced = 0;
        while self.state == TimelineState::Running && advanced < self.tweens.len() {
            let index = self.cursor.index;
            let Some(tween) = self.tweens.get_mut(index) else {
                break;
            };
            if !self.cursor.started {
                play_logged(tween, index);
                self.cursor.started = true;
            }
            tween.tick(now);
            match tween.completion() {
                Completion::Pending => break,
                Completion::Finished => tween.cancel(),
                Completion::Cancelled => {
                    let err = PathglideError::playback(format!(
                        "tween {index} was cancelled before finishing"
                    ));
                    tracing::error!(error = %err, pass = self.cursor.pass, "tween failed");
                }
            }
            advanced += 1;
            self.advance();
        }
        Ok(())
    }

    fn advance(&mut self) {
        self.cursor.index += 1;
        self.cursor.started = false;
        if self.cursor.index < self.tweens.len() {
            return;
        }
        self.cursor.index = 0;
        self.cursor.pass += 1;
        tracing::debug!(pass = self.cursor.pass, "timeline pass complete");
        if let Some(passes) = self.options.repeat.passes()
            && self.cursor.pass >= passes
        {
            self.finish_now();
        }
    }

    fn finish_now(&mut self) {
        self.state = TimelineState::Finished;
        self.end_time = self.now;
    }

    /// Current state.
    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// Milliseconds since playback began, `None` before the first running tick.
    pub fn current_time(&self) -> Option<f64> {
        let start = self.start_time?;
        let now = self.end_time.or(self.now)?;
        Some(now - start)
    }

    /// Fraction of the sequence completed, per pass when repeating forever.
    pub fn progress(&self) -> f64 {
        match self.state {
            TimelineState::Idle => return 0.0,
            TimelineState::Finished => return 1.0,
            TimelineState::Running | TimelineState::Paused => {}
        }
        let len = self.tweens.len();
        if len == 0 {
            return 0.0;
        }
        let active = if self.cursor.started {
            self.tweens[self.cursor.index].progress().unwrap_or(0.0)
        } else {
            0.0
        };
        let within = (self.cursor.index as f64 + active) / len as f64;
        match self.options.repeat.passes() {
            Some(passes) => ((f64::from(self.cursor.pass) + within) / f64::from(passes)).min(1.0),
            None => within,
        }
    }

    /// Completed passes over the sequence.
    pub fn pass(&self) -> u32 {
        self.cursor.pass
    }

    /// Tween currently playing (or held).
    pub fn active_tween(&self) -> Option<&Tween<B::Animation>> {
        match self.state {
            TimelineState::Running | TimelineState::Paused if self.cursor.started => {
                self.tweens.get(self.cursor.index)
            }
            _ => None,
        }
    }

    /// Mutable access to a tween by position.
    pub fn tween_mut(&mut self, index: usize) -> Option<&mut Tween<B::Animation>> {
        self.tweens.get_mut(index)
    }

    /// All tweens in play order.
    pub fn tweens(&self) -> &[Tween<B::Animation>] {
        &self.tweens
    }

    /// Configuration.
    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    /// Backend realizing the tweens.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Start `tween`; a failed rebuild is logged and playback continues on the previous keyframes.
fn play_logged<A: NativeAnimation>(tween: &mut Tween<A>, index: usize) {
    if let Err(err) = tween.play() {
        tracing::error!(
            error = %err,
            tween = index,
            "rebuild on play failed, keeping previous keyframes"
        );
    }
}

/// Tick `timeline` from `frames` until it finishes.
///
/// A tick error stops the task and is logged.
pub fn drive<B: AnimationBackend + 'static>(
    timeline: &Rc<RefCell<Timeline<B>>>,
    frames: &mut FrameLoop,
) -> FrameHandle {
    let timeline = Rc::clone(timeline);
    frames.add(move |now| {
        let mut tl = timeline.borrow_mut();
        if let Err(err) = tl.tick(now) {
            tracing::error!(error = %err, "timeline tick failed");
            return FrameControl::Stop;
        }
        if tl.state() == TimelineState::Finished {
            FrameControl::Stop
        } else {
            FrameControl::Continue
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timeline.rs"]
mod tests;
