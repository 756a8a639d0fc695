//! CLI-specific utilities for carbon-route
//!
//! Progress display and report rendering, kept apart from the library.

pub mod progress;
pub mod report;

pub use progress::ProgressManager;
