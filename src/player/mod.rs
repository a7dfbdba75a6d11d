mod channel;
mod factory;
mod polling;
mod traits;

pub use channel::{ChannelSource, ChannelSourceHandle};
pub use factory::{Source, SourceKind};
pub use polling::{PollingSource, SharedPosition};
pub use traits::{PlaybackPosition, PlaybackSource, PlayerEvent};
