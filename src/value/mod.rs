//! Text codec for stored expectation values.
//!
//! Captured output is stored in `.test` files in an escaped,
//! continuation-friendly form:
//!
//! - a space that starts a line is written as `\ `
//! - a line break is written as `\n` followed by a continuation backslash
//!   and a physical line break
//! - backslashes in captured output are already doubled by normalization
//!
//! [`encode`] produces that form, [`decode`] reverses it, and [`Matcher`]
//! turns a stored value into a prefix matcher that accepts one or more
//! spaces wherever a `\ ` escape was written.

mod encode;
mod escape;
mod matcher;


// Re-export public API
pub use encode::{decode, encode};
pub use matcher::{Matcher, build_pattern};
