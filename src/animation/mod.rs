pub(crate) mod ease;
pub(crate) mod interp;
pub(crate) mod keyframe;
pub(crate) mod normalize;
pub(crate) mod tokens;
pub(crate) mod transform;
