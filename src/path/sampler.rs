use crate::{
    foundation::core::Point,
    foundation::error::{PathglideError, PathglideResult},
    path::geometry::PathGeometry,
};

/// Default arc-length distance between samples, in path units.
pub const DEFAULT_STEP: f64 = 10.0;

/// Upper bound on the number of samples a single walk may produce.
pub const MAX_SAMPLES: usize = 100_000;

/// Points taken along a path at a fixed arc-length step.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledPath {
    /// Ordered samples; the first is the path start and the last its end point.
    pub points: Vec<Point>,
    /// Arc-length step the samples were taken at.
    pub step: f64,
    /// Total arc length of the sampled path.
    pub length: f64,
}

impl SampledPath {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` when no sample was taken.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Walk `path` from its start in increments of `step` and always finish on its end point.
///
/// A position the geometry cannot answer stops the walk early; the end point is still pushed.
/// A step so small that the walk would exceed [`MAX_SAMPLES`] is a configuration error.
pub fn sample(path: &dyn PathGeometry, step: f64) -> PathglideResult<SampledPath> {
    if !step.is_finite() || step <= 0.0 {
        return Err(PathglideError::config(format!(
            "sample step must be a positive number, got {step}"
        )));
    }
    let total = path.total_length();
    if !total.is_finite() || total <= 0.0 {
        return Err(PathglideError::path(format!(
            "path has no usable length ({total})"
        )));
    }

    let steps = (total / step).floor();
    if !steps.is_finite() || steps >= MAX_SAMPLES as f64 {
        return Err(PathglideError::config(format!(
            "sample step {step} is too small for a path of length {total} (limit {MAX_SAMPLES} samples)"
        )));
    }

    let mut points = Vec::with_capacity(steps as usize + 1);
    let mut i = 0u32;
    loop {
        let length = f64::from(i) * step;
        if length >= total {
            break;
        }
        match path.point_at_length(length) {
            Some(p) => points.push(p),
            None => break,
        }
        i += 1;
    }

    let end = path
        .point_at_length(total)
        .ok_or_else(|| PathglideError::path("path returned no end point"))?;
    points.push(end);

    Ok(SampledPath {
        points,
        step,
        length: total,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/path/sampler.rs"]
mod tests;
