//! Exit code constants for the calibrate-tests CLI.
//!
//! - 0: Success (including answering "n" at the confirmation prompt)
//! - 1: Startup failure or cancellation

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Fatal error: missing installation root or executable, or the run was stopped.
pub const FAILURE: i32 = 1;
