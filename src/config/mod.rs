//! Configuration model for `.test` files.
//!
//! A `.test` file is an ordered list of `KEY` flags and `KEY=VALUE` pairs,
//! where a value may continue across physical lines with a trailing
//! backslash. This module parses that format into a [`Config`], answers the
//! lookups the calibration driver needs, and writes a `Config` back out
//! behind the fixed header.

mod model;
mod operations;
mod parser;
pub mod types;
mod writer;


// Re-export public API
pub use model::{Config, ConfigEntry};
pub use types::{Mode, TestsDir};
pub use parser::{ParseError, ParseErrorKind, parse_config};
pub use writer::{HEADER, render_config};
