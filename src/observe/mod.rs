pub(crate) mod backend;
pub(crate) mod config;
pub(crate) mod geometry;
pub(crate) mod observer;
pub(crate) mod sim;
