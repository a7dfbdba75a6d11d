use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::ProgressReporter;
use crate::config::Config;
use crate::models::{SessionId, WatchArgs};
use crate::player::{PlaybackSource, PlayerEvent};
use crate::tracker::{Indicator, ProgressTracker};

/// One playback session: a playback source feeding one tracker on a single
/// task, so tracker methods are never invoked concurrently.
pub struct WatchSession {
    session_id: SessionId,
    indicator: watch::Receiver<Indicator>,
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

impl WatchSession {
    /// Wire a playback source to a fresh tracker and start consuming events.
    pub fn start<S>(
        mut args: WatchArgs,
        config: &Config,
        mut source: S,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self
    where
        S: PlaybackSource + 'static,
    {
        // Stored progress belongs to the URL it was recorded against; a
        // swapped media URL starts over from zero.
        if !args.last_watched_url.is_empty() && args.last_watched_url != args.media_url {
            info!(
                "Media URL changed since progress was recorded, resetting ({} -> {})",
                args.last_watched_url, args.media_url
            );
            args.progress = 0;
            args.watched_ranges.clear();
        }

        let session_id = SessionId::new();
        let mut tracker =
            ProgressTracker::new(&args, &config.tracker, reporter, session_id.clone());
        let indicator = tracker.indicator();
        let cancel = CancellationToken::new();

        let worker = tokio::spawn({
            let cancel = cancel.clone();
            let session_id = session_id.clone();
            async move {
                debug!("Watch session {} started", session_id);
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        event = source.next_event() => match event {
                            Some(PlayerEvent::PositionChanged { position, duration }) => {
                                tracker.on_position_update(position, duration);
                            }
                            Some(PlayerEvent::Ended) => tracker.on_ended(),
                            None => {
                                debug!("Playback source for session {} closed", session_id);
                                break;
                            }
                        },
                    }
                }
                debug!("Watch session {} stopped", session_id);
            }
        });

        Self {
            session_id,
            indicator,
            cancel,
            worker,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Subscribe to the visible progress indicator.
    pub fn indicator(&self) -> watch::Receiver<Indicator> {
        self.indicator.clone()
    }

    /// Stop consuming playback events. In-flight progress reports are not
    /// cancelled; they finish (or fail) on their own.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.worker.await {
            warn!("Watch session {} worker failed: {}", self.session_id, e);
        }
    }
}
