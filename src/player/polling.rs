use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{Interval, MissedTickBehavior, interval};

use super::traits::{PlaybackPosition, PlaybackSource, PlayerEvent};

/// Playback coordinates a host updates from its own player loop.
pub type SharedPosition = Arc<RwLock<PlaybackPosition>>;

/// Pull-driven fallback for hosts that only expose the current position.
/// Samples the shared coordinates on a fixed interval and synthesizes
/// position/ended signals from them.
pub struct PollingSource {
    shared: SharedPosition,
    ticker: Interval,
    ended_seen: bool,
}

impl PollingSource {
    pub fn new(shared: SharedPosition, poll_interval: Duration) -> Self {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            shared,
            ticker,
            ended_seen: false,
        }
    }
}

#[async_trait]
impl PlaybackSource for PollingSource {
    async fn next_event(&mut self) -> Option<PlayerEvent> {
        loop {
            self.ticker.tick().await;
            let snapshot = *self.shared.read().await;

            if snapshot.ended {
                if self.ended_seen {
                    // Already delivered; keep sampling in case the host
                    // rewinds for a replay
                    continue;
                }
                self.ended_seen = true;
                return Some(PlayerEvent::Ended);
            }

            self.ended_seen = false;
            return Some(PlayerEvent::PositionChanged {
                position: snapshot.position,
                duration: snapshot.duration,
            });
        }
    }

    async fn position(&self) -> Option<PlaybackPosition> {
        Some(*self.shared.read().await)
    }
}
