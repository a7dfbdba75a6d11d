//! Interval-coverage watch-progress tracking for MediaCMS video playback.
//!
//! The tracker core accumulates watched time intervals, merges them into a
//! minimal cover, derives a watched percentage, and reports progress to a
//! backend once meaningful thresholds are crossed. Playback and transport
//! are trait seams so hosts can plug in their own player and endpoint.

mod backend;
mod config;
mod models;
mod player;
mod session;
mod tracker;

pub use backend::{ApiError, MediaCmsApi, ProgressReporter};
pub use config::{Config, NetworkConfig, TrackerConfig};
pub use models::{
    EncodingInfo, HlsInfo, Interval, MediaInfo, ProgressReport, RawRange, SessionId, StreamInfo,
    WatchArgs,
};
pub use player::{
    ChannelSource, ChannelSourceHandle, PlaybackPosition, PlaybackSource, PlayerEvent,
    PollingSource, SharedPosition, Source, SourceKind,
};
pub use session::WatchSession;
pub use tracker::{Indicator, ProgressTracker, WatchedSet};
