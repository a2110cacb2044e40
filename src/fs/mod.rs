//! Filesystem utilities for calibrate-tests.
//!
//! Test files are rewritten through a temporary sibling and a rename, so an
//! interrupted run leaves either the old or the new file, never a truncated one.

pub mod atomic;

pub use atomic::atomic_write_file;
