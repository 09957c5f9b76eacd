//! shields.io "endpoint badge" payload.
//!
//! The consumer renders this JSON straight into an image, so the error badge
//! has the same shape as the success badge.

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u8 = 1;
pub const LABEL: &str = "profile views";

const COLOR_OK: &str = "brightgreen";
const COLOR_ERROR: &str = "red";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub schema_version: u8,
    pub label: String,
    pub message: String,
    pub color: String,
}

impl Badge {
    fn new(message: String, color: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            label: LABEL.to_string(),
            message,
            color: color.to_string(),
        }
    }

    /// Badge showing the current view count.
    pub fn count(n: i64) -> Self {
        Self::new(n.to_string(), COLOR_OK)
    }

    /// Fixed badge served on any failure.
    pub fn error() -> Self {
        Self::new("error".to_string(), COLOR_ERROR)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn count_badge_wire_shape() {
        let v = serde_json::to_value(Badge::count(42)).unwrap();
        assert_eq!(
            v,
            json!({
                "schemaVersion": 1,
                "label": "profile views",
                "message": "42",
                "color": "brightgreen"
            })
        );
    }

    #[test]
    fn error_badge_wire_shape() {
        let v = serde_json::to_value(Badge::error()).unwrap();
        assert_eq!(
            v,
            json!({
                "schemaVersion": 1,
                "label": "profile views",
                "message": "error",
                "color": "red"
            })
        );
    }
}
