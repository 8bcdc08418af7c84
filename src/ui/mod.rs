//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All command output goes through this module so that quiet mode and
//! the JSON output format are handled in one place.

pub mod output;
