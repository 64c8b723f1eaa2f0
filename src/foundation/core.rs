use std::cell::Cell;

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// A visual target whose layout box drives anchor resolution.
///
/// Targets are owned by the host; the engine only reads their current bounds, which may change
/// between builds (for example after a viewport resize).
pub trait Target: std::fmt::Debug {
    /// Current screen-space bounding box of the target.
    fn bounds(&self) -> Rect;
}

impl Target for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

impl Target for Cell<Rect> {
    fn bounds(&self) -> Rect {
        self.get()
    }
}

/// Pivot used to re-center path-following placement on the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// The target's visual center.
    #[default]
    Auto,
    /// Explicit offset from the target's top-left corner, in pixels.
    Offset(f64, f64),
}

impl Anchor {
    /// Resolve this anchor against the target's box into a pixel offset.
    pub fn resolve(self, target: Rect) -> Vec2 {
        match self {
            Self::Auto => Vec2::new(target.width() * 0.5, target.height() * 0.5),
            Self::Offset(x, y) => Vec2::new(x, y),
        }
    }
}
