//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions, serialized as YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the session was recorded at, or `"unknown"`.
    pub commit: String,
    /// The recorded interactions, in call order.
    pub interactions: Vec<Interaction>,
}

/// One recorded port call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// Port name (`"story_generator"` or `"image_generator"`).
    pub port: String,
    /// Method name on the port.
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// Serialized result, `{"Ok": ...}` or `{"Err": "message"}`.
    pub output: serde_json::Value,
}
