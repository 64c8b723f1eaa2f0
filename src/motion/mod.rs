pub(crate) mod builder;
pub(crate) mod cache;
pub(crate) mod fingerprint;
