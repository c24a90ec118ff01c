//! On-disk cassette format: a YAML file of recorded port interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording was made.
    pub recorded_at: DateTime<Utc>,
    /// Git commit hash at recording time, or `"unknown"`.
    pub commit: String,
    /// Recorded interactions in call order.
    pub interactions: Vec<Interaction>,
}

/// A single recorded port call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Zero-based sequence number within the cassette.
    pub seq: u64,
    /// Port name (e.g., `"image_editor"`).
    pub port: String,
    /// Method name (e.g., `"edit"`).
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// Serialized result, wrapped in the `{"Ok": ...}` / `{"Err": ...}`
    /// convention.
    pub output: serde_json::Value,
}
