use serde::Deserialize;
use std::collections::HashMap;

/// Subset of the MediaCMS `api/v1/media/{token}` response needed for
/// playback setup. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfo {
    pub title: Option<String>,
    pub duration: Option<f64>,
    pub hls_info: Option<HlsInfo>,
    /// Resolution -> codec -> encoding details
    #[serde(default)]
    pub encodings_info: HashMap<String, HashMap<String, EncodingInfo>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HlsInfo {
    pub master_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncodingInfo {
    pub url: Option<String>,
}

/// A playable source resolved from `MediaInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub url: String,
    pub mime_type: String,
}
