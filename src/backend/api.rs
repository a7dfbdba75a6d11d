use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::errors::ApiError;
use crate::models::{MediaInfo, ProgressReport, StreamInfo};

/// Transport seam for progress reports. The tracker spawns sends through
/// this without awaiting them.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    async fn report(&self, report: ProgressReport) -> Result<(), ApiError>;
}

/// Client for one MediaCMS instance, bound to a single media token.
pub struct MediaCmsApi {
    client: Client,
    base_url: Url,
    token: String,
    report_url: Option<Url>,
}

impl MediaCmsApi {
    /// Build a client from a watch-page URL such as
    /// `https://host/view?m=TOKEN` or `https://host/w/TOKEN`.
    pub fn new(watch_url: &str, connection_timeout: Duration) -> Result<Self, ApiError> {
        let url = Url::parse(watch_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", watch_url, e)))?;
        let token =
            extract_token(&url).ok_or_else(|| ApiError::MissingToken(watch_url.to_string()))?;

        let mut base_url = url.clone();
        base_url.set_path("");
        base_url.set_query(None);
        base_url.set_fragment(None);

        let client = Client::builder().timeout(connection_timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token,
            report_url: None,
        })
    }

    /// Attach the host-provided progress report endpoint.
    pub fn with_report_endpoint(mut self, endpoint: Url) -> Self {
        self.report_url = Some(endpoint);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch media details from `api/v1/media/{token}`.
    pub async fn fetch_media_info(&self) -> Result<MediaInfo, ApiError> {
        let url = self
            .base_url
            .join(&format!("api/v1/media/{}", self.token))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        debug!("Fetching media info from {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<MediaInfo>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Pick the best playable source: the HLS master playlist when present,
    /// otherwise the highest-resolution h264 encoding.
    pub fn select_stream(&self, info: &MediaInfo) -> Result<StreamInfo, ApiError> {
        if let Some(master) = info.hls_info.as_ref().and_then(|h| h.master_file.as_deref()) {
            return Ok(StreamInfo {
                url: self.absolutize(master),
                mime_type: "application/x-mpegURL".to_string(),
            });
        }

        let mut resolutions: Vec<&String> = info.encodings_info.keys().collect();
        resolutions.sort_by_key(|r| std::cmp::Reverse(r.parse::<u32>().unwrap_or(0)));

        for resolution in resolutions {
            let encoding = info
                .encodings_info
                .get(resolution)
                .and_then(|codecs| codecs.get("h264"));
            if let Some(url) = encoding.and_then(|e| e.url.as_deref()) {
                debug!("Selected {}p h264 encoding for {}", resolution, self.token);
                return Ok(StreamInfo {
                    url: self.absolutize(url),
                    mime_type: "video/mp4".to_string(),
                });
            }
        }

        Err(ApiError::NoPlayableSource(self.token.clone()))
    }

    fn absolutize(&self, src: &str) -> String {
        if src.starts_with("http") {
            src.to_string()
        } else {
            format!("{}{}", self.base_url.as_str().trim_end_matches('/'), src)
        }
    }

    /// POST the progress payload to the host-provided endpoint.
    pub async fn report_progress(&self, report: &ProgressReport) -> Result<(), ApiError> {
        let Some(endpoint) = self.report_url.as_ref() else {
            debug!("No report endpoint configured, dropping progress report");
            return Ok(());
        };

        debug!("Posting progress {}% to {}", report.progress, endpoint);

        let response = self.client.post(endpoint.clone()).json(report).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ProgressReporter for MediaCmsApi {
    async fn report(&self, report: ProgressReport) -> Result<(), ApiError> {
        self.report_progress(&report).await
    }
}

/// Extract the media token from the supported watch-page URL shapes:
/// `?v=TOKEN`, `?m=TOKEN`, `/w/TOKEN`, `/v/TOKEN`, `/media/TOKEN`.
fn extract_token(url: &Url) -> Option<String> {
    for (key, value) in url.query_pairs() {
        if (key == "v" || key == "m") && !value.is_empty() {
            return Some(value.into_owned());
        }
    }

    let mut segments = url.path_segments()?;
    while let Some(segment) = segments.next() {
        if matches!(segment, "w" | "v" | "media") {
            if let Some(next) = segments.next() {
                let token: String = next
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                    .collect();
                if !token.is_empty() {
                    return Some(token);
                }
            }
        }
    }

    None
}
