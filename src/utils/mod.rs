//! Utility functions.
//!
//! - [`code_generator`] - Short token generation

pub mod code_generator;
