//! Per-stage progress display for a mosaic run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress bars for the stages of a mosaic run
///
/// Stages may run concurrently, so every bar is hosted by one
/// `MultiProgress`. A disabled manager hands out hidden bars.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager that draws to the terminal
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled: true,
        }
    }

    /// Create a manager whose bars are never drawn
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled: false,
        }
    }

    /// Whether bars are drawn
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a bar for the stage named `label`
    ///
    /// The stage sets its own length once the amount of work is known.
    pub fn stage(&self, label: &'static str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(0);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(label);
        self.multi_progress.add(bar)
    }

    /// Mark a stage bar as done
    pub fn complete_stage(bar: &ProgressBar, elapsed: Duration) {
        bar.finish_with_message(format!("{elapsed:.2?}"));
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
