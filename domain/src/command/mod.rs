//! Command construction: tool call → argument vector

pub mod argv;
pub mod builder;
