use super::*;
use crate::foundation::core::Rect;
use crate::path::geometry::SvgPath;

#[derive(Debug)]
struct Truncated {
    answer_until: f64,
    end: Option<Point>,
}

impl PathGeometry for Truncated {
    fn total_length(&self) -> f64 {
        100.0
    }

    fn point_at_length(&self, length: f64) -> Option<Point> {
        if length >= 100.0 {
            return self.end;
        }
        (length < self.answer_until).then(|| Point::new(length, 0.0))
    }

    fn rendered_box(&self) -> Rect {
        Rect::new(0.0, 0.0, 100.0, 0.0)
    }
}

#[test]
fn walk_covers_start_and_end() {
    let path = SvgPath::parse("M0 0 L100 0").unwrap();
    let s = sample(&path, 10.0).unwrap();
    assert_eq!(s.len(), 11);
    assert_eq!(s.points[0], path.point_at_length(0.0).unwrap());
    assert_eq!(*s.points.last().unwrap(), path.point_at_length(100.0).unwrap());
    assert!((s.points[3].x - 30.0).abs() < 1e-6);
}

#[test]
fn uneven_step_still_ends_on_the_end_point() {
    let path = SvgPath::parse("M0 0 L25 0").unwrap();
    let s = sample(&path, 10.0).unwrap();
    // 0, 10, 20, then the end point at 25.
    assert_eq!(s.len(), 4);
    assert!((s.points[3].x - 25.0).abs() < 1e-6);
}

#[test]
fn step_larger_than_path_gives_two_points() {
    let path = SvgPath::parse("M0 0 L5 0").unwrap();
    let s = sample(&path, 10.0).unwrap();
    assert_eq!(s.len(), 2);
}

#[test]
fn unanswered_query_stops_the_walk() {
    let path = Truncated {
        answer_until: 35.0,
        end: Some(Point::new(100.0, 0.0)),
    };
    let s = sample(&path, 10.0).unwrap();
    let xs: Vec<f64> = s.points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [0.0, 10.0, 20.0, 30.0, 100.0]);
}

#[test]
fn missing_end_point_is_a_path_error() {
    let path = Truncated {
        answer_until: 100.0,
        end: None,
    };
    assert!(matches!(sample(&path, 10.0), Err(PathglideError::Path(_))));
}

#[test]
fn invalid_inputs_are_rejected() {
    let path = SvgPath::parse("M0 0 L100 0").unwrap();
    assert!(matches!(sample(&path, 0.0), Err(PathglideError::Config(_))));
    assert!(matches!(sample(&path, f64::NAN), Err(PathglideError::Config(_))));

    let empty = SvgPath::parse("M3 3").unwrap();
    assert!(matches!(sample(&empty, 10.0), Err(PathglideError::Path(_))));
}

#[test]
fn tiny_step_is_rejected_instead_of_allocating() {
    let path = SvgPath::parse("M0 0 L100 0").unwrap();
    assert!(matches!(sample(&path, 1e-300), Err(PathglideError::Config(_))));
    assert!(matches!(sample(&path, f64::MIN_POSITIVE), Err(PathglideError::Config(_))));
}

#[test]
fn step_just_inside_the_limit_still_samples() {
    let path = SvgPath::parse("M0 0 L100 0").unwrap();
    let step = 100.0 / (MAX_SAMPLES as f64 - 10.0);
    let s = sample(&path, step).unwrap();
    assert!(s.len() <= MAX_SAMPLES);
    assert_eq!(*s.points.last().unwrap(), path.point_at_length(100.0).unwrap());
}
