//! Gesture trace files
//!
//! A trace is a JSON document holding the surface metrics, optional
//! settings and the recorded pointer events:
//!
//! ```json
//! {
//!   "metrics": { "width": 1920, "height": 1080 },
//!   "settings": { "gesture_custom_zone": "scrub" },
//!   "events": [
//!     { "action": "down", "x": 1500, "y": 540, "time_ms": 0 },
//!     { "action": "move", "x": 1560, "y": 540, "time_ms": 16 },
//!     { "action": "up", "x": 1560, "y": 540, "time_ms": 32 }
//!   ]
//! }
//! ```

use anyhow::Context;
use kino_touch::{PointerEvent, ScreenMetrics};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub metrics: ScreenMetrics,
    #[serde(default)]
    pub settings: serde_json::Value,
    pub events: Vec<PointerEvent>,
}

impl Trace {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid trace document")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Load a settings object from a JSON file
pub fn load_settings(path: &Path) -> anyhow::Result<serde_json::Value> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&json)
        .with_context(|| format!("Invalid settings JSON in {}", path.display()))?;
    if !value.is_object() {
        anyhow::bail!("Settings file {} must contain a JSON object", path.display());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kino_touch::PointerAction;

    #[test]
    fn test_parse_trace() {
        let trace = Trace::from_json(
            r#"{
                "metrics": { "width": 1920, "height": 1080 },
                "events": [
                    { "action": "down", "x": 960, "y": 540, "time_ms": 0 },
                    { "action": "up", "x": 960, "y": 540, "time_ms": 50 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(trace.metrics.width, 1920.0);
        assert!(trace.settings.is_null());
        assert_eq!(trace.events.len(), 2);
        assert_eq!(trace.events[1].action, PointerAction::Up);
    }

    #[test]
    fn test_load_demo_traces() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let seek = Trace::load(&demos.join("seek_drag.json")).unwrap();
        assert_eq!(seek.events.first().unwrap().action, PointerAction::Down);
        let scrub = Trace::load(&demos.join("frame_scrub.json")).unwrap();
        assert_eq!(scrub.settings["gesture_custom_zone"], "scrub");
        assert!(Trace::load(&demos.join("missing.json")).is_err());
    }

    #[test]
    fn test_reject_unknown_action() {
        let result = Trace::from_json(
            r#"{
                "metrics": { "width": 100, "height": 100 },
                "events": [{ "action": "pinch", "x": 1, "y": 1, "time_ms": 0 }]
            }"#,
        );
        assert!(result.is_err());
    }
}
