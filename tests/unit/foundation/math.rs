use super::*;

#[test]
fn format_number_trims_float_noise() {
    assert_eq!(format_number(0.1 + 0.2), "0.3");
    assert_eq!(format_number(20.0), "20");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(-12.5), "-12.5");
    assert_eq!(format_number(f64::NAN), "0");
}

#[test]
fn clamp01_handles_nan_and_overshoot() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(1.4), 1.0);
    assert_eq!(clamp01(-0.2), 0.0);
    assert_eq!(lerp(10.0, 30.0, 0.5), 20.0);
}
