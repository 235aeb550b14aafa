//! Core domain concepts shared across all subdomains.
//!
//! - [`error::BuildError`]: failures while building an argument vector
//! - [`string`]: UTF-8 safe helpers used by parsing and diagnostics

pub mod error;
pub mod string;
