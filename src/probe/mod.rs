//! Probe results and the adapter that produces them.
//!
//! A [`ProbeResult`] mirrors the subset of `ffprobe -show_streams -show_format`
//! JSON the remux decision needs, and serializes back into that same shape so it
//! can travel between host stages as a shared payload.

pub mod adapter;

pub use adapter::{MediaProber, ProbeAdapter, SharedInfo, FFPROBE_KEY};

use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Kind of elementary stream, as reported by ffprobe's `codec_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
    Other(String),
}

impl StreamType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Subtitle => "subtitle",
            Self::Data => "data",
            Self::Attachment => "attachment",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for StreamType {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "video" => Self::Video,
            "audio" => Self::Audio,
            "subtitle" => Self::Subtitle,
            "data" => Self::Data,
            "attachment" => Self::Attachment,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for StreamType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<StreamType> for String {
    fn from(value: StreamType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stream entry of a probed container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_name: Option<String>,
    #[serde(rename = "codec_type")]
    pub stream_type: StreamType,
}

impl StreamRecord {
    pub fn new(index: u32, stream_type: StreamType, codec_name: Option<&str>) -> Self {
        Self {
            index,
            codec_name: codec_name.map(str::to_string),
            stream_type,
        }
    }

    /// Lower-cased codec name; missing metadata reads as the empty string.
    pub fn codec_key(&self) -> String {
        self.codec_name
            .as_deref()
            .map(|name| name.trim().to_lowercase())
            .unwrap_or_default()
    }
}

/// Container level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Immutable snapshot of one file's streams at probe time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    #[serde(default)]
    pub streams: Vec<StreamRecord>,
    #[serde(default)]
    pub format: FormatInfo,
}

impl ProbeResult {
    pub fn new(streams: Vec<StreamRecord>, format: FormatInfo) -> Self {
        Self { streams, format }
    }

    /// Parses raw ffprobe JSON output.
    pub fn from_ffprobe_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::parse(format!("Failed to parse ffprobe output: {}", e)))
    }

    /// Rebuilds a probe from a payload handed over by an earlier stage.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(payload.clone())
            .map_err(|e| Error::probe(format!("Shared probe payload is malformed: {}", e)))
    }

    pub fn to_payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn duration(&self) -> Option<f64> {
        self.format
            .duration
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d >= 0.0)
    }

    /// False when the probe names a different file than `path`.
    pub fn describes(&self, path: &Path) -> bool {
        self.format
            .filename
            .as_deref()
            .map_or(true, |name| Path::new(name) == path)
    }

    pub fn count_of(&self, stream_type: &StreamType) -> usize {
        self.streams
            .iter()
            .filter(|s| &s.stream_type == stream_type)
            .count()
    }
}
