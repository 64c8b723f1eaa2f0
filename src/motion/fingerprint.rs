use xxhash_rust::xxh3::Xxh3;

use crate::{
    animation::ease::{Easing, EasingSpec},
    animation::keyframe::{Keyframe, PropertyValue},
    foundation::core::Vec2,
};

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Stable 128-bit key identifying one motion-path build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuildFingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

/// Fingerprint the inputs of a motion-path build.
///
/// Scales are hashed as `f32` so sub-precision float noise between layouts maps to the same key.
/// Completion hooks are not part of the key.
pub(crate) fn fingerprint_build(
    scale: Vec2,
    keyframes: &[Keyframe],
    easing: &Easing,
    instance: u64,
) -> BuildFingerprint {
    let mut h = StableHasher::new();
    h.write_f32(scale.x as f32);
    h.write_f32(scale.y as f32);
    h.write_u32(keyframes.len() as u32);
    for kf in keyframes {
        write_keyframe(&mut h, kf);
    }
    write_easing(&mut h, easing);
    h.write_u64(instance);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn write_opt_f64(&mut self, v: Option<f64>) {
        match v {
            Some(v) => {
                self.write_u8(1);
                self.write_f64(v);
            }
            None => self.write_u8(0),
        }
    }

    fn finish(self) -> BuildFingerprint {
        let v = self.inner.digest128();
        BuildFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_keyframe(h: &mut StableHasher, kf: &Keyframe) {
    h.write_u32(kf.len() as u32);
    for (name, value) in kf.props() {
        h.write_str(name);
        match value {
            PropertyValue::Number(v) => {
                h.write_u8(0);
                h.write_f64(*v);
            }
            PropertyValue::Text(s) => {
                h.write_u8(1);
                h.write_str(s);
            }
        }
    }
    h.write_opt_f64(kf.offset);
    h.write_opt_f64(kf.scale);
    match &kf.easing {
        None => h.write_u8(0),
        Some(EasingSpec::Named(name)) => {
            h.write_u8(1);
            h.write_str(name);
        }
        Some(EasingSpec::Bezier(pts)) => {
            h.write_u8(2);
            for v in pts {
                h.write_f64(*v);
            }
        }
    }
}

fn write_easing(h: &mut StableHasher, easing: &Easing) {
    match *easing {
        Easing::Linear => h.write_u8(0),
        Easing::CubicBezier { x1, y1, x2, y2 } => {
            h.write_u8(1);
            for v in [x1, y1, x2, y2] {
                h.write_f64(v);
            }
        }
    }
}
