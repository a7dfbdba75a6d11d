use async_trait::async_trait;
use tokio::sync::mpsc;

use super::traits::{PlaybackPosition, PlaybackSource, PlayerEvent};

/// Push-driven source for hosts whose player emits its own callbacks.
pub struct ChannelSource {
    events: mpsc::UnboundedReceiver<PlayerEvent>,
    last: PlaybackPosition,
}

/// Cloneable handle the host wires into its player callbacks. Dropping every
/// handle closes the source.
#[derive(Clone)]
pub struct ChannelSourceHandle {
    events: mpsc::UnboundedSender<PlayerEvent>,
}

impl ChannelSource {
    pub fn new() -> (Self, ChannelSourceHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                events: rx,
                last: PlaybackPosition::default(),
            },
            ChannelSourceHandle { events: tx },
        )
    }
}

impl ChannelSourceHandle {
    /// Forward a time-position callback from the player.
    pub fn position_changed(&self, position: f64, duration: f64) {
        let _ = self
            .events
            .send(PlayerEvent::PositionChanged { position, duration });
    }

    /// Forward the end-of-stream callback.
    pub fn ended(&self) {
        let _ = self.events.send(PlayerEvent::Ended);
    }
}

#[async_trait]
impl PlaybackSource for ChannelSource {
    async fn next_event(&mut self) -> Option<PlayerEvent> {
        let event = self.events.recv().await?;
        match event {
            PlayerEvent::PositionChanged { position, duration } => {
                self.last = PlaybackPosition {
                    position,
                    duration,
                    ended: false,
                };
            }
            PlayerEvent::Ended => self.last.ended = true,
        }
        Some(event)
    }

    async fn position(&self) -> Option<PlaybackPosition> {
        Some(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forwards_events_in_order_and_tracks_position() {
        let (mut source, handle) = ChannelSource::new();

        handle.position_changed(3.0, 60.0);
        handle.ended();

        assert_eq!(
            source.next_event().await,
            Some(PlayerEvent::PositionChanged {
                position: 3.0,
                duration: 60.0
            })
        );
        let position = source.position().await.unwrap();
        assert_eq!(position.position, 3.0);
        assert_eq!(position.duration, 60.0);

        assert_eq!(source.next_event().await, Some(PlayerEvent::Ended));
        assert!(source.position().await.unwrap().ended);
    }

    #[tokio::test]
    async fn closes_when_all_handles_drop() {
        let (mut source, handle) = ChannelSource::new();
        let second = handle.clone();
        drop(handle);
        drop(second);

        assert_eq!(source.next_event().await, None);
    }
}
