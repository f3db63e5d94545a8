//! Progress reporting for the pipeline stages
//!
//! Stages only talk to a [`ProgressSink`]; whether anything is drawn is up
//! to the sink.

use std::cell::RefCell;

use indicatif::{ProgressBar, ProgressStyle};

/// Receives `(processed, total)` updates from a running stage
pub trait ProgressSink {
    /// A new stage is starting
    fn start(&self, _label: &str, _total: u64) {}

    /// `current` of `total` items have been processed
    fn update(&self, current: u64, total: u64);

    /// The stage is done
    fn finish(&self) {}
}

/// Sink that discards all updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _current: u64, _total: u64) {}
}

impl<F> ProgressSink for F
where
    F: Fn(u64, u64),
{
    fn update(&self, current: u64, total: u64) {
        self(current, total)
    }
}

/// Terminal progress bar drawn on stderr, one bar per stage
pub struct BarProgress {
    bar: RefCell<ProgressBar>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(ProgressBar::hidden()),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgress {
    fn start(&self, label: &str, total: u64) {
        let bar = ProgressBar::new(total).with_style(Self::style());
        bar.set_message(label.to_string());
        *self.bar.borrow_mut() = bar;
    }

    fn update(&self, current: u64, total: u64) {
        let bar = self.bar.borrow();
        bar.set_length(total);
        bar.set_position(current);
    }

    fn finish(&self) {
        self.bar.borrow().finish_and_clear();
    }
}
