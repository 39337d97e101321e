//! Progress reporting for long-running loads
//!
//! The import reports through the [`Ui`] trait:
//! - Current phase (Preparing, Importing, Committing, Complete)
//! - Progress (bytes consumed out of the input size)
//! - Free-form log messages

mod progress;

pub use progress::ProgressUi;

/// Load phases reported to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preparing,
    Importing,
    Committing,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Preparing => write!(f, "Resetting table"),
            Phase::Importing => write!(f, "Importing rows"),
            Phase::Committing => write!(f, "Committing"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Trait for UI implementations - allows both progress bars and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64);
    fn log(&mut self, message: impl Into<String>);
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Debug, Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
