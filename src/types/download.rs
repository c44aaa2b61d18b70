//! Download request and plan types handed to the ingestion step.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A request to resolve torrent pages into magnets for one destination.
///
/// ```rust
/// # use anifetch::DownloadRequest;
/// let request: DownloadRequest = serde_json::from_str(r#"{
///     "urls": ["https://nyaa.si/view/1"],
///     "destination": "/media/anime/Mushishi",
///     "smartSelect": {"enabled": true, "missingEpisodeNumbers": [3, 4], "absoluteOffset": 0},
///     "media": {"id": 457}
/// }"#).unwrap();
/// assert!(request.smart_select.enabled);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    /// Torrent page URLs, in the order results should be reported.
    pub urls: Vec<String>,
    pub destination: String,
    #[serde(default)]
    pub smart_select: SmartSelect,
    #[serde(default)]
    pub media: Option<MediaDescriptor>,
}

/// Parameters for picking a subset of files out of resolved torrents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartSelect {
    #[serde(default)]
    pub enabled: bool,
    /// Episode numbers the library is missing.
    #[serde(default)]
    pub missing_episode_numbers: Vec<i32>,
    /// Offset between absolute and per-season episode numbering.
    #[serde(default)]
    pub absolute_offset: i32,
}

/// The media entry a download belongs to.
///
/// Only the catalog id is interpreted; everything else is carried through
/// untouched for the ingestion step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Resolved magnets plus everything the ingestion step needs to act on them.
///
/// `magnets[i]` is the magnet resolved from `DownloadRequest::urls[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPlan {
    pub magnets: Vec<String>,
    pub destination: PathBuf,
    /// Present only when smart selection was enabled.
    pub smart_select: Option<SmartSelect>,
    pub media: Option<MediaDescriptor>,
}
