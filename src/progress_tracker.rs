use indicatif::{ProgressBar, ProgressStyle};

use crate::events::EventSink;

const PROGRESS_SCALE: u64 = 1000;

/// Terminal frontend: drives an `indicatif` bar from run events.
pub struct ProgressTracker {
    progress_bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new(quiet: bool) -> Self {
        let progress_bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(PROGRESS_SCALE)
        };
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        Self { progress_bar }
    }
}

impl EventSink for ProgressTracker {
    fn on_status(&mut self, text: &str) {
        if text.starts_with("Error") {
            self.progress_bar.println(text);
        } else {
            self.progress_bar.set_message(text.to_string());
        }
    }

    fn on_progress(&mut self, fraction: f64) {
        let position = (fraction.clamp(0.0, 1.0) * PROGRESS_SCALE as f64).round() as u64;
        self.progress_bar.set_position(position);
    }

    fn on_done(&mut self, success: bool) {
        if success {
            self.progress_bar.finish_with_message("All images have been split");
        } else {
            self.progress_bar.abandon();
        }
    }
}
