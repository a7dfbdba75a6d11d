use async_trait::async_trait;

/// Playback signals a source emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// The playback position moved.
    PositionChanged { position: f64, duration: f64 },
    /// Natural end of stream.
    Ended,
}

/// Current playback coordinates of the underlying player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackPosition {
    pub position: f64,
    pub duration: f64,
    pub ended: bool,
}

/// Minimal capability surface the tracker needs from a player. Hosts with an
/// event-emitting player wire up `ChannelSource`; hosts that only expose the
/// current position fall back to `PollingSource`.
#[async_trait]
pub trait PlaybackSource: Send {
    /// Next playback signal, or `None` once the player is gone.
    async fn next_event(&mut self) -> Option<PlayerEvent>;

    /// Current position snapshot, if the player can provide one.
    async fn position(&self) -> Option<PlaybackPosition>;
}
