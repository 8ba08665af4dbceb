pub(crate) mod animator;
pub(crate) mod config;
pub(crate) mod preset;
pub(crate) mod schedule;
