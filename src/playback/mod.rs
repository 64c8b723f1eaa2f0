pub(crate) mod frame;
pub(crate) mod native;
pub(crate) mod timeline;
pub(crate) mod tween;
