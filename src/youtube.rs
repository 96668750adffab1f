use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::error::RefreshError;

pub static YOUTUBE_VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|live/)|youtu\.be/)([A-Za-z0-9_-]{11})").unwrap()
});

static BARE_VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

// Public web player client, same one the watch page identifies itself as
const INNERTUBE_CLIENT_NAME: &str = "WEB";
const INNERTUBE_CLIENT_VERSION: &str = "2.20240726.00.00";

/// Player metadata response, trimmed down to the fields a refresh run needs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: PlayabilityStatus,
    #[serde(default)]
    pub streaming_data: Option<StreamingData>,
    #[serde(default)]
    pub video_details: Option<VideoDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayabilityStatus {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingData {
    #[serde(default)]
    pub hls_manifest_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub is_live: bool,
}

/// A successfully resolved live broadcast: the rotating manifest URL plus the
/// channel metadata used for the program guide
#[derive(Debug, Clone)]
pub struct LiveManifest {
    pub url: String,
    pub video_id: String,
    pub title: String,
    pub author: String,
}

/// Accepts a watch / live / short-form URL or a bare 11-character video ID
pub fn parse_stream_reference(reference: &str) -> Option<String> {
    if let Some(captures) = YOUTUBE_VIDEO_ID_REGEX.captures(reference) {
        return Some(captures.get(1).unwrap().as_str().to_string());
    }
    if BARE_VIDEO_ID_REGEX.is_match(reference) {
        return Some(reference.to_string());
    }
    None
}

/// Queries the Innertube `player` endpoint for the video's current metadata
///
/// # Errors
/// Errors when the request fails or the response is not valid player JSON
#[instrument(skip(client))]
pub async fn get_player_response(
    client: &reqwest::Client,
    video_id: &str,
) -> Result<PlayerResponse, RefreshError> {
    let req = client
        .post("https://www.youtube.com/youtubei/v1/player")
        .json(&json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                    "hl": "en"
                }
            },
            "videoId": video_id,
            "contentCheckOk": true,
            "racyCheckOk": true
        }))
        .send()
        .await?;

    let response = req.json::<PlayerResponse>().await?;
    debug!(status = %response.playability_status.status, "player response");

    Ok(response)
}

/// Pulls the live HLS manifest URL out of a player response
///
/// # Errors
/// Errors with [`RefreshError::Resolution`] when the video is not playable
/// (offline, private, removed) or playable but not a live HLS broadcast
pub fn extract_live_manifest(response: PlayerResponse) -> Result<LiveManifest, RefreshError> {
    if response.playability_status.status != "OK" {
        let reason = response
            .playability_status
            .reason
            .unwrap_or(response.playability_status.status);
        return Err(RefreshError::Resolution(reason));
    }

    let url = response
        .streaming_data
        .and_then(|d| d.hls_manifest_url)
        .ok_or_else(|| {
            RefreshError::Resolution("video is playable but has no live HLS manifest".to_string())
        })?;

    let details = response.video_details;
    Ok(LiveManifest {
        url,
        video_id: details
            .as_ref()
            .map_or_else(String::new, |d| d.video_id.clone()),
        title: details
            .as_ref()
            .map_or_else(String::new, |d| d.title.clone()),
        author: details.map_or_else(String::new, |d| d.author),
    })
}

/// Resolves the currently active live manifest URL for a video ID
///
/// # Errors
/// See [`get_player_response`] and [`extract_live_manifest`]
#[instrument(skip(client))]
pub async fn resolve_live_manifest(
    client: &reqwest::Client,
    video_id: &str,
) -> Result<LiveManifest, RefreshError> {
    let response = get_player_response(client, video_id).await?;
    extract_live_manifest(response)
}
