use std::fmt;

/// What a frame task wants after running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Run again next frame.
    Continue,
    /// Remove the task.
    Stop,
}

/// Handle to a registered frame task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

type FrameTask = Box<dyn FnMut(f64) -> FrameControl>;

/// Cooperative per-frame callback registry.
///
/// The host calls [`FrameLoop::run_frame`] once per display frame with a millisecond timestamp;
/// every registered task runs in registration order. Timestamps never go backwards: an older
/// timestamp is replaced by the last one seen.
#[derive(Default)]
pub struct FrameLoop {
    next_id: u64,
    tasks: Vec<(FrameHandle, FrameTask)>,
    last_now: Option<f64>,
}

impl FrameLoop {
    /// Create an empty loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `task` to run on every frame until it returns [`FrameControl::Stop`].
    pub fn add(&mut self, task: impl FnMut(f64) -> FrameControl + 'static) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, Box::new(task)));
        handle
    }

    /// Remove a task. Returns `false` if it already stopped or was cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(h, _)| *h != handle);
        self.tasks.len() != before
    }

    /// Return `true` while `handle` is registered.
    pub fn is_active(&self, handle: FrameHandle) -> bool {
        self.tasks.iter().any(|(h, _)| *h == handle)
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Return `true` when no task is registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run one frame at `now` and return how many tasks ran.
    pub fn run_frame(&mut self, now: f64) -> usize {
        let now = match self.last_now {
            Some(last) if now < last => {
                tracing::debug!(now, last, "frame timestamp went backwards, clamping");
                last
            }
            _ => now,
        };
        self.last_now = Some(now);

        let ran = self.tasks.len();
        self.tasks
            .retain_mut(|(_, task)| task(now) == FrameControl::Continue);
        ran
    }
}

impl fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("tasks", &self.tasks.len())
            .field("last_now", &self.last_now)
            .finish()
    }
}
