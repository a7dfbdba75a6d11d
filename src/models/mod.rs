mod interval;
mod media;
mod report;

pub use interval::{Interval, RawRange};
pub use media::{EncodingInfo, HlsInfo, MediaInfo, StreamInfo};
pub use report::{ProgressReport, SessionId};

use serde::Deserialize;

/// Construction data handed over by the host runtime when a player mounts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchArgs {
    /// Prior watched ranges, possibly in legacy shapes
    #[serde(default)]
    pub watched_ranges: Vec<RawRange>,

    /// Prior reported progress percentage
    #[serde(default)]
    pub progress: u8,

    /// Percentage at which the media counts as done; 0 means "use default"
    #[serde(default)]
    pub completion_percentage: u8,

    /// Watch-page URL of the media being played
    #[serde(default, alias = "mediacms_url")]
    pub media_url: String,

    /// Watch-page URL the stored progress was recorded against
    #[serde(default)]
    pub last_watched_url: String,
}
