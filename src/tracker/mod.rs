mod watched_set;

pub use watched_set::WatchedSet;

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::backend::ProgressReporter;
use crate::config::TrackerConfig;
use crate::models::{Interval, ProgressReport, SessionId, WatchArgs};

/// Reports are throttled to every 5% of progress, plus a guaranteed report
/// once the completion threshold is reached.
const REPORT_STEP: u8 = 5;

/// Visible progress state the surrounding view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicator {
    pub percent: u8,
    pub completed: bool,
}

impl Indicator {
    pub fn label(&self) -> &'static str {
        if self.completed { "Done:" } else { "Progress:" }
    }
}

/// Reporting state carried across position signals.
#[derive(Debug, Clone, Copy)]
struct ProgressState {
    last_reported: u8,
    completion_threshold: u8,
}

/// Interval-coverage progress tracker for one player instance.
///
/// Methods are synchronous and must be driven from a single task; report
/// sends are spawned fire-and-forget and never awaited.
pub struct ProgressTracker {
    session_id: SessionId,
    watched: WatchedSet,
    state: ProgressState,
    lookback_window: f64,
    reporter: Arc<dyn ProgressReporter>,
    indicator: watch::Sender<Indicator>,
}

impl ProgressTracker {
    pub fn new(
        args: &WatchArgs,
        config: &TrackerConfig,
        reporter: Arc<dyn ProgressReporter>,
        session_id: SessionId,
    ) -> Self {
        let watched = WatchedSet::from_raw_ranges(&args.watched_ranges, config.merge_tolerance);

        let completion_threshold = if args.completion_percentage == 0 {
            config.completion_threshold
        } else {
            args.completion_percentage.min(100)
        };
        let last_reported = args.progress.min(100);

        debug!(
            "Tracker for session {} starting at {}% with {} prior spans",
            session_id,
            last_reported,
            watched.len()
        );

        let (indicator, _) = watch::channel(Indicator {
            percent: last_reported,
            completed: last_reported >= completion_threshold,
        });

        Self {
            session_id,
            watched,
            state: ProgressState {
                last_reported,
                completion_threshold,
            },
            lookback_window: config.lookback_window,
            reporter,
            indicator,
        }
    }

    /// Subscribe to indicator updates.
    pub fn indicator(&self) -> watch::Receiver<Indicator> {
        self.indicator.subscribe()
    }

    pub fn watched(&self) -> &WatchedSet {
        &self.watched
    }

    pub fn last_reported(&self) -> u8 {
        self.state.last_reported
    }

    /// Handle a playback position signal.
    pub fn on_position_update(&mut self, current_time: f64, duration: f64) {
        // Unready media reports zero, NaN or infinite durations; tolerate
        // silently rather than interrupting playback.
        if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() || current_time < 0.0
        {
            trace!(
                "Session {} ignoring position signal (time {}, duration {})",
                self.session_id, current_time, duration
            );
            return;
        }

        // Credit a fixed look-back window per sample; approximates the time
        // since the previous sample without measuring it.
        let start = (current_time - self.lookback_window).max(0.0);
        self.watched.insert(Interval::new(start, current_time));

        let percentage = coverage_percentage(self.watched.total_watched(), duration);
        self.publish(percentage);

        if percentage > self.state.last_reported
            && (percentage % REPORT_STEP == 0 || percentage >= self.state.completion_threshold)
        {
            // Optimistic: bumped at dispatch time, never rolled back.
            self.state.last_reported = percentage;
            self.dispatch_report(percentage);
        }
    }

    /// Handle the end-of-stream signal. Always reports 100, bypassing the
    /// throttling gate.
    pub fn on_ended(&mut self) {
        debug!("Session {} playback ended", self.session_id);
        self.publish(100);
        self.dispatch_report(100);
    }

    fn publish(&self, percent: u8) {
        // "completed" is sticky once reached
        let completed =
            percent >= self.state.completion_threshold || self.indicator.borrow().completed;
        self.indicator.send_replace(Indicator { percent, completed });
    }

    fn dispatch_report(&self, percentage: u8) {
        let report = ProgressReport {
            progress: percentage,
            watched_ranges: self.watched.spans().to_vec(),
        };
        let reporter = Arc::clone(&self.reporter);
        let session_id = self.session_id.clone();

        tokio::spawn(async move {
            debug!("Session {} reporting progress {}%", session_id, percentage);
            if let Err(e) = reporter.report(report).await {
                warn!("Session {} progress report failed: {}", session_id, e);
            }
        });
    }
}

fn coverage_percentage(total_watched: f64, duration: f64) -> u8 {
    let percentage = (total_watched / duration * 100.0).floor();
    // Overlap-accounting float error can push the sum past the duration
    percentage.clamp(0.0, 100.0) as u8
}
