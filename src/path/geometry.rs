use std::cell::Cell;

use kurbo::{ParamCurve, ParamCurveArclen, PathSeg, Shape};

use crate::foundation::{
    core::{BezPath, Point, Rect},
    error::{PathglideError, PathglideResult},
};

/// Accuracy used for arc-length queries, in path units.
const ARCLEN_ACCURACY: f64 = 1e-4;

/// A 2D path that can be walked by arc length.
///
/// Geometry is owned externally (typically shared as `Rc<dyn PathGeometry>`); the sampler and
/// builder only read it. Placement queries reflect the host's current layout, so a rebuild
/// after a resize sees fresh values.
pub trait PathGeometry: std::fmt::Debug {
    /// Total arc length in the path's local units.
    fn total_length(&self) -> f64;

    /// Point at arc length `length`, or `None` when the path cannot answer.
    fn point_at_length(&self, length: f64) -> Option<Point>;

    /// Screen-space box of the container the path is drawn in.
    fn rendered_box(&self) -> Rect;

    /// Local coordinate system when the container is scalable (an SVG `viewBox`).
    ///
    /// `None` means local coordinates are already container pixels.
    fn view_box(&self) -> Option<Rect> {
        None
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    seg: PathSeg,
    start: f64,
    len: f64,
}

/// Path geometry backed by a [`kurbo::BezPath`], usually parsed from SVG path data.
#[derive(Debug)]
pub struct SvgPath {
    path: BezPath,
    segments: Vec<Segment>,
    total: f64,
    rendered: Cell<Rect>,
    view_box: Cell<Option<Rect>>,
}

impl SvgPath {
    /// Parse SVG path data (`"M0 0 L100 0"`).
    pub fn parse(d: &str) -> PathglideResult<Self> {
        let path = BezPath::from_svg(d.trim())
            .map_err(|e| PathglideError::path(format!("invalid svg path data: {e}")))?;
        Ok(Self::from_bez_path(path))
    }

    /// Wrap an existing path. The rendered box defaults to the path's own bounding box.
    pub fn from_bez_path(path: BezPath) -> Self {
        let mut segments = Vec::new();
        let mut total = 0.0;
        for seg in path.segments() {
            let len = seg.arclen(ARCLEN_ACCURACY);
            segments.push(Segment {
                seg,
                start: total,
                len,
            });
            total += len;
        }
        let rendered = path.bounding_box();
        Self {
            path,
            segments,
            total,
            rendered: Cell::new(rendered),
            view_box: Cell::new(None),
        }
    }

    /// Builder-style rendered box setter.
    pub fn with_rendered_box(self, rect: Rect) -> Self {
        self.rendered.set(rect);
        self
    }

    /// Builder-style view box setter.
    pub fn with_view_box(self, rect: Rect) -> Self {
        self.view_box.set(Some(rect));
        self
    }

    /// Update the rendered box, e.g. after the host's layout changed.
    pub fn set_rendered_box(&self, rect: Rect) {
        self.rendered.set(rect);
    }

    /// Update or clear the view box.
    pub fn set_view_box(&self, rect: Option<Rect>) {
        self.view_box.set(rect);
    }

    /// The underlying path.
    pub fn bez_path(&self) -> &BezPath {
        &self.path
    }
}

impl PathGeometry for SvgPath {
    fn total_length(&self) -> f64 {
        self.total
    }

    fn point_at_length(&self, length: f64) -> Option<Point> {
        if self.segments.is_empty() || !length.is_finite() {
            return None;
        }
        let length = length.clamp(0.0, self.total);
        let idx = self
            .segments
            .partition_point(|s| s.start + s.len < length)
            .min(self.segments.len() - 1);
        let s = &self.segments[idx];
        if s.len <= 0.0 {
            return Some(s.seg.eval(0.0));
        }
        let local = (length - s.start).clamp(0.0, s.len);
        let t = s.seg.inv_arclen(local, ARCLEN_ACCURACY);
        Some(s.seg.eval(t))
    }

    fn rendered_box(&self) -> Rect {
        self.rendered.get()
    }

    fn view_box(&self) -> Option<Rect> {
        self.view_box.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/geometry.rs"]
mod tests;
