//! Shared wire-protocol DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror server payloads so serde round-trips stay lossless.
//! Broadcast payload parsing is tolerant (alternate key names, number
//! widening) because the server schema is owned elsewhere and evolves
//! independently of this client.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Error returned by the envelope codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The message text is not a valid envelope (bad JSON or missing fields).
    #[error("failed to decode envelope: {0}")]
    Decode(#[source] serde_json::Error),
    /// The envelope could not be serialized to JSON text.
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A single WebSocket message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Client-generated correlation id, present on requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Namespaced event name (e.g. `"tile:placed"`).
    pub event: String,
    /// Open-ended event payload.
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Build an outbound request with a fresh correlation id.
    #[must_use]
    pub fn request(event: &str, data: Value) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            event: event.to_owned(),
            data,
        }
    }

    /// Serialize to JSON text for the socket.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(CodecError::Encode)
    }

    /// Parse an incoming socket message.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] for non-JSON input or an envelope
    /// without an `event` field.
    pub fn decode(text: &str) -> Result<Self, CodecError> {
        serde_json::from_str(text).map_err(CodecError::Decode)
    }
}

/// A canvas summary as returned by the metadata endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasListItem {
    /// Unique canvas identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Drawable width in world units (one unit per tile).
    pub width: f64,
    /// Drawable height in world units.
    pub height: f64,
    /// Total tiles placed on this canvas.
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub tile_count: i64,
}

impl CanvasListItem {
    /// The drawable extent, for viewport clamping and fit.
    #[must_use]
    pub fn extent(&self) -> viewport::camera::CanvasExtent {
        viewport::camera::CanvasExtent::new(self.width, self.height)
    }
}

/// A `tile:placed` broadcast, decoded tolerantly from its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TilePlaced {
    /// Tile column in world units.
    pub x: f64,
    /// Tile row in world units.
    pub y: f64,
    /// Tile color (hex).
    pub color: String,
    /// User who placed the tile (UUID string).
    pub user_id: String,
    /// Display name of that user, if the server included it.
    pub user_name: Option<String>,
}

/// Parse a `tile:placed` payload. Returns `None` when required fields are
/// absent rather than failing the dispatch loop.
#[must_use]
pub fn parse_tile_placed(data: &Value) -> Option<TilePlaced> {
    Some(TilePlaced {
        x: pick_number(data, &["x", "tile_x"])?,
        y: pick_number(data, &["y", "tile_y"])?,
        color: pick_str(data, &["color", "colour"])?.to_owned(),
        user_id: pick_str(data, &["user_id", "userId"])?.to_owned(),
        user_name: pick_str(data, &["user_name", "userName"]).map(str::to_owned),
    })
}

/// Parse the canvas array out of a list payload, skipping malformed rows.
#[must_use]
pub fn parse_canvas_list(data: &Value) -> Vec<CanvasListItem> {
    data.get("canvases")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| serde_json::from_value(row.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// A `canvas:welcome` payload: canvas metadata sent when a socket joins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasWelcome {
    /// Display name of the canvas.
    pub name: Option<String>,
    /// Drawable extent, when the server included valid dimensions.
    pub extent: Option<viewport::camera::CanvasExtent>,
    /// Total tiles placed so far.
    pub tile_count: i64,
    /// Tiles placed per user id so far.
    pub user_tile_counts: std::collections::HashMap<String, i64>,
}

/// Parse a `canvas:welcome` payload. Every field degrades independently so
/// a partial welcome still improves session state.
#[must_use]
pub fn parse_canvas_welcome(data: &Value) -> CanvasWelcome {
    let extent = match (pick_number(data, &["width"]), pick_number(data, &["height"])) {
        (Some(width), Some(height)) if width > 0.0 && height > 0.0 => {
            Some(viewport::camera::CanvasExtent::new(width, height))
        }
        _ => None,
    };
    let user_tile_counts = data
        .get("user_tile_counts")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(user_id, count)| count.as_i64().map(|c| (user_id.clone(), c)))
                .collect()
        })
        .unwrap_or_default();
    CanvasWelcome {
        name: pick_str(data, &["name"]).map(str::to_owned),
        extent,
        tile_count: pick_int(data, &["tile_count", "tileCount"]).unwrap_or(0),
        user_tile_counts,
    }
}

/// First number found under any of `keys`.
fn pick_number(payload: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| payload.get(key).and_then(Value::as_f64))
}

/// First string found under any of `keys`.
fn pick_str<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| payload.get(key).and_then(Value::as_str))
}

/// First integer found under any of `keys`.
fn pick_int(payload: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| payload.get(key).and_then(Value::as_i64))
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
