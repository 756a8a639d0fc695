//! CLI-specific progress handling for carbon-route
//!
//! Provides a progress bar over the pairwise routing queries of a matrix build.

use std::sync::Arc;

use carbon_route::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} road queries ({percent}%)";

/// Creates a progress bar for routing queries
pub fn create_progress_bar(total_queries: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_queries);
    let style = ProgressStyle::default_bar()
        .template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Progress bar driven by the optimizer's (completed, total) callback
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    pub fn new(message: &str) -> Self {
        // Length is unknown until the first callback
        let pb = create_progress_bar(0);

        eprintln!("{message}");

        Self { pb }
    }

    /// Callback to hand to the optimizer
    pub fn callback(&self) -> ProgressCallback {
        let pb = self.pb.clone();
        Arc::new(move |completed, total| {
            if pb.length() != Some(total) {
                pb.set_length(total);
            }
            pb.set_position(completed);
        })
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
