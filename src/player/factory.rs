use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::channel::{ChannelSource, ChannelSourceHandle};
use super::polling::{PollingSource, SharedPosition};
use super::traits::{PlaybackPosition, PlaybackSource, PlayerEvent};
use crate::config::Config;

pub enum SourceKind {
    Events,
    Polling,
}

impl From<&str> for SourceKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "polling" => SourceKind::Polling,
            _ => SourceKind::Events, // Default to the event-driven adapter
        }
    }
}

pub enum Source {
    Events(ChannelSource),
    Polling(PollingSource),
}

impl Source {
    /// Create the source variant configured for this host. The handle is
    /// returned for the event-driven variant only; the polling variant reads
    /// the shared coordinates instead.
    pub fn new(config: &Config, shared: SharedPosition) -> (Self, Option<ChannelSourceHandle>) {
        match SourceKind::from(config.tracker.source.as_str()) {
            SourceKind::Events => {
                info!("Creating event-driven playback source");
                let (source, handle) = ChannelSource::new();
                (Source::Events(source), Some(handle))
            }
            SourceKind::Polling => {
                info!("Creating polling playback source");
                let source = PollingSource::new(
                    shared,
                    Duration::from_millis(config.tracker.poll_interval_ms),
                );
                (Source::Polling(source), None)
            }
        }
    }
}

#[async_trait]
impl PlaybackSource for Source {
    async fn next_event(&mut self) -> Option<PlayerEvent> {
        match self {
            Source::Events(s) => s.next_event().await,
            Source::Polling(s) => s.next_event().await,
        }
    }

    async fn position(&self) -> Option<PlaybackPosition> {
        match self {
            Source::Events(s) => s.position().await,
            Source::Polling(s) => s.position().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[tokio::test]
    async fn config_selects_the_source_variant() {
        let shared: SharedPosition = Arc::new(RwLock::new(PlaybackPosition::default()));

        let mut config = Config::default();
        let (source, handle) = Source::new(&config, shared.clone());
        assert!(matches!(source, Source::Events(_)));
        assert!(handle.is_some());

        config.tracker.source = "polling".to_string();
        let (source, handle) = Source::new(&config, shared);
        assert!(matches!(source, Source::Polling(_)));
        assert!(handle.is_none());
    }
}
