//! Stage progress bars for batch runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::LazyLock;

// Shared by every stage bar and by the log writer so log lines are printed
// between redraws
static TERMINAL: LazyLock<MultiProgress> = LazyLock::new(MultiProgress::new);

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates one progress bar per batch stage
///
/// Bars are safe to advance from worker threads.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stage_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: TERMINAL.clone(),
            stage_bars: Vec::new(),
        }
    }

    /// Add a bar for a stage processing `item_count` items
    pub fn start_stage(&mut self, stage: &'static str, item_count: usize) {
        let bar = ProgressBar::new(item_count as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(stage);
        self.stage_bars.push(self.multi_progress.add(bar));
    }

    /// Advance the current stage by one item, showing `label`
    pub fn advance(&self, label: &str) {
        if let Some(bar) = self.stage_bars.last() {
            bar.set_message(label.to_string());
            bar.inc(1);
        }
    }

    /// Mark the current stage as finished
    pub fn finish_stage(&self) {
        if let Some(bar) = self.stage_bars.last() {
            bar.finish_with_message("done");
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}

/// Stderr writer that hides active progress bars while a log line is written
///
/// Installed as the `env_logger` target so logging does not tear the bars.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWriter;

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        TERMINAL.suspend(|| io::stderr().lock().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        TERMINAL.suspend(|| io::stderr().lock().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
