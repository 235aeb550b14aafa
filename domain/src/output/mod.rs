//! Output handling: stdout parsing and result normalization

pub mod normalizer;
pub mod parser;
