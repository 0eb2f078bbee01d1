use std::sync::{Mutex, MutexGuard};

use ferry::transfer::TransferProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Interactive progress reporter using indicatif.
///
/// One bar per run, advanced once per requested issue whether it was placed
/// or skipped. Placed issues are printed above the bar.
pub struct InteractiveReporter {
    bar: Mutex<Option<ProgressBar>>,
    draw_target: fn() -> ProgressDrawTarget,
}

impl InteractiveReporter {
    /// Create a new interactive reporter drawing to stderr.
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            draw_target: ProgressDrawTarget::stderr,
        }
    }

    /// A reporter that tracks state without drawing anything.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            draw_target: ProgressDrawTarget::hidden,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Handle a progress event.
    pub fn handle(&self, event: TransferProgress) {
        let mut bar = self.lock();

        match event {
            TransferProgress::Starting {
                source,
                destination,
                count,
            } => {
                let pb = ProgressBar::with_draw_target(Some(count as u64), (self.draw_target)());
                pb.set_style(Self::bar_style());
                pb.set_prefix(format!("{source} → {destination}"));
                pb.set_message("starting...");
                *bar = Some(pb);
            }

            TransferProgress::FetchingIssue { number } => {
                if let Some(pb) = bar.as_ref() {
                    pb.set_message(format!("#{number}"));
                }
            }

            TransferProgress::Skipped {
                number, duplicate, ..
            } => {
                if let Some(pb) = bar.as_ref() {
                    pb.println(format!("  skipped #{number} (already at #{duplicate})"));
                    pb.inc(1);
                }
            }

            TransferProgress::Transferred {
                source_number,
                destination_number,
                mode,
                ..
            } => {
                if let Some(pb) = bar.as_ref() {
                    pb.println(format!("  {mode} #{source_number} → #{destination_number}"));
                    pb.inc(1);
                }
            }

            TransferProgress::Complete {
                transferred,
                copied,
                skipped,
            } => {
                if let Some(pb) = bar.as_ref() {
                    pb.finish_with_message(format!(
                        "{transferred} transferred, {copied} copied, {skipped} skipped"
                    ));
                }
            }

            _ => {}
        }
    }

    /// Current bar position, if a run has started.
    #[cfg(test)]
    pub fn position(&self) -> Option<u64> {
        self.lock().as_ref().map(ProgressBar::position)
    }

    /// Abandon the bar if the run stopped before completing.
    pub fn finish(&self) {
        if let Some(pb) = self.lock().as_ref()
            && !pb.is_finished()
        {
            pb.abandon();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("=> ")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
