//! Terminal progress bar backed by indicatif

use indicatif::{ProgressBar, ProgressStyle};

use super::{Phase, Ui};

const BAR_TEMPLATE: &str = "{msg:20} [{bar:40.cyan/blue}] {bytes}/{total_bytes}";

/// Renders load progress as a single byte-based progress bar on stderr
pub struct ProgressUi {
    bar: ProgressBar,
}

impl ProgressUi {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for ProgressUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui for ProgressUi {
    fn set_phase(&mut self, phase: Phase) {
        match phase {
            Phase::Complete => self.bar.finish_with_message(phase.to_string()),
            _ => self.bar.set_message(phase.to_string()),
        }
    }

    fn set_progress(&mut self, current: u64, total: u64) {
        if self.bar.length() != Some(total) {
            self.bar.set_length(total);
        }
        self.bar.set_position(current);
    }

    fn log(&mut self, message: impl Into<String>) {
        self.bar.println(message.into());
    }
}
