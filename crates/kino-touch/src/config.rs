//! Gesture settings resolution
//!
//! Settings arrive as string key/value pairs from whatever store the host
//! uses. Every recognized key has a default; values that do not resolve
//! leave the axis or zone unbound instead of failing.

use crate::zone::CustomBand;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tracing::debug;

/// Maximum time between contact and release for a tap
pub const TAP_DURATION_MS: u64 = 300;

/// Full-screen drag maxima per mode
pub const CONTROL_SEEK_MAX: f32 = 150.0;
pub const CONTROL_VOLUME_MAX: f32 = 1.5;
pub const CONTROL_BRIGHT_MAX: f32 = 1.5;
pub const CONTROL_CUSTOM_AREA_MAX: f32 = 100.0;

/// Pixels per discrete step at sensitivity 1.0
pub const FRAME_STEP_PIXELS: f32 = 12.0;
pub const TIME_SCRUB_PIXELS: f32 = 24.0;

/// Accepted scrub sensitivity range
pub const SCRUB_SENSITIVITY_MIN: f32 = 0.1;
pub const SCRUB_SENSITIVITY_MAX: f32 = 10.0;

/// Recognized setting keys
pub mod keys {
    pub const GESTURE_HORIZ: &str = "gesture_horiz";
    pub const GESTURE_VERT_LEFT: &str = "gesture_vert_left";
    pub const GESTURE_VERT_RIGHT: &str = "gesture_vert_right";
    pub const GESTURE_TAP_LEFT: &str = "gesture_tap_left";
    pub const GESTURE_TAP_CENTER: &str = "gesture_tap_center";
    pub const GESTURE_TAP_RIGHT: &str = "gesture_tap_right";
    pub const GESTURE_TAP_MODE: &str = "gesture_tap_mode";
    pub const GESTURE_CUSTOM_ZONE: &str = "gesture_custom_zone";
    pub const GESTURE_CUSTOM_ZONE_TOP: &str = "gesture_custom_zone_top";
    pub const GESTURE_CUSTOM_ZONE_BOTTOM: &str = "gesture_custom_zone_bottom";
    pub const GESTURE_SCRUB_SENSITIVITY: &str = "gesture_scrub_sensitivity";
    pub const GESTURE_SCRUB_DELAY: &str = "gesture_scrub_delay";
    pub const GESTURE_FRAME_SCRUB: &str = "gesture_frame_scrub";
}

/// Default string for each recognized key
pub fn default_setting(key: &str) -> Option<&'static str> {
    let value = match key {
        keys::GESTURE_HORIZ => "seek",
        keys::GESTURE_VERT_LEFT => "bright",
        keys::GESTURE_VERT_RIGHT => "volume",
        keys::GESTURE_TAP_LEFT => "seek",
        keys::GESTURE_TAP_CENTER => "playpause",
        keys::GESTURE_TAP_RIGHT => "seek",
        keys::GESTURE_TAP_MODE => "single",
        keys::GESTURE_CUSTOM_ZONE => "off",
        keys::GESTURE_CUSTOM_ZONE_TOP => "5",
        keys::GESTURE_CUSTOM_ZONE_BOTTOM => "75",
        keys::GESTURE_SCRUB_SENSITIVITY => "1.0",
        keys::GESTURE_SCRUB_DELAY => "0",
        keys::GESTURE_FRAME_SCRUB => "true",
        _ => return None,
    };
    Some(value)
}

/// Key/value configuration store
pub trait SettingsSource {
    /// Raw value for `key`, if present
    fn get(&self, key: &str) -> Option<String>;
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl SettingsSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl SettingsSource for serde_json::Value {
    fn get(&self, key: &str) -> Option<String> {
        match self.as_object()?.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Continuous control bound to a drag axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    Seek,
    Volume,
    Bright,
}

impl FromStr for DragMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "seek" => Ok(DragMode::Seek),
            "volume" => Ok(DragMode::Volume),
            "bright" => Ok(DragMode::Bright),
            other => Err(Error::setting("drag mode", other)),
        }
    }
}

/// Action bound to a tap column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapAction {
    SeekFixed,
    PlayPause,
    Custom,
}

impl FromStr for TapAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "seek" => Ok(TapAction::SeekFixed),
            "playpause" => Ok(TapAction::PlayPause),
            "custom" => Ok(TapAction::Custom),
            other => Err(Error::setting("tap action", other)),
        }
    }
}

/// When a bound tap action fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapMode {
    /// Every tap fires; double taps are still tracked
    #[default]
    Single,
    /// The first tap opens the window, the second one fires
    Double,
}

impl FromStr for TapMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(TapMode::Single),
            "double" => Ok(TapMode::Double),
            other => Err(Error::setting(keys::GESTURE_TAP_MODE, other)),
        }
    }
}

/// What happens when a gesture starts inside the custom band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomZoneBehavior {
    /// The band has no meaning; ordinary drag/tap handling everywhere
    #[default]
    Disabled,
    /// Any drag in the band becomes a continuous custom-area drag
    Area,
    /// Side columns scrub: horizontal steps frames, vertical steps time
    Scrub,
}

impl FromStr for CustomZoneBehavior {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(CustomZoneBehavior::Disabled),
            "area" => Ok(CustomZoneBehavior::Area),
            "scrub" => Ok(CustomZoneBehavior::Scrub),
            other => Err(Error::setting(keys::GESTURE_CUSTOM_ZONE, other)),
        }
    }
}

/// Resolved gesture configuration
///
/// Immutable once built. The engine snapshots it at every `Down`, so a
/// rebuild mid-gesture only affects the next gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Mode committed by a horizontal drag
    pub horizontal: Option<DragMode>,
    /// Mode committed by a vertical drag on the left half
    pub vertical_left: Option<DragMode>,
    /// Mode committed by a vertical drag on the right half
    pub vertical_right: Option<DragMode>,
    pub tap_left: Option<TapAction>,
    pub tap_center: Option<TapAction>,
    pub tap_right: Option<TapAction>,
    pub tap_mode: TapMode,
    pub tap_duration_ms: u64,
    pub custom_zone: CustomZoneBehavior,
    pub custom_band: CustomBand,
    /// Multiplier on steps per pixel for frame and time scrubbing
    pub scrub_sensitivity: f32,
    /// Minimum press time before a scrub mode may commit
    pub scrub_delay_ms: u64,
    /// Whether horizontal drags in the custom band step frames
    pub frame_scrub: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::from_source(&BTreeMap::new())
    }
}

impl GestureConfig {
    /// Resolve a configuration from a settings source
    pub fn from_source<S: SettingsSource + ?Sized>(source: &S) -> Self {
        let get = |key: &str| -> String {
            match source.get(key) {
                Some(v) if !v.trim().is_empty() => v.trim().to_string(),
                _ => default_setting(key).unwrap_or_default().to_string(),
            }
        };

        let custom_band = CustomBand::new(
            percent(keys::GESTURE_CUSTOM_ZONE_TOP, &get(keys::GESTURE_CUSTOM_ZONE_TOP)),
            percent(
                keys::GESTURE_CUSTOM_ZONE_BOTTOM,
                &get(keys::GESTURE_CUSTOM_ZONE_BOTTOM),
            ),
        );

        Self {
            horizontal: binding(keys::GESTURE_HORIZ, &get(keys::GESTURE_HORIZ)),
            vertical_left: binding(keys::GESTURE_VERT_LEFT, &get(keys::GESTURE_VERT_LEFT)),
            vertical_right: binding(keys::GESTURE_VERT_RIGHT, &get(keys::GESTURE_VERT_RIGHT)),
            tap_left: binding(keys::GESTURE_TAP_LEFT, &get(keys::GESTURE_TAP_LEFT)),
            tap_center: binding(keys::GESTURE_TAP_CENTER, &get(keys::GESTURE_TAP_CENTER)),
            tap_right: binding(keys::GESTURE_TAP_RIGHT, &get(keys::GESTURE_TAP_RIGHT)),
            tap_mode: binding(keys::GESTURE_TAP_MODE, &get(keys::GESTURE_TAP_MODE))
                .unwrap_or_default(),
            tap_duration_ms: TAP_DURATION_MS,
            custom_zone: binding(keys::GESTURE_CUSTOM_ZONE, &get(keys::GESTURE_CUSTOM_ZONE))
                .unwrap_or_default(),
            custom_band,
            scrub_sensitivity: sensitivity(&get(keys::GESTURE_SCRUB_SENSITIVITY)),
            scrub_delay_ms: get(keys::GESTURE_SCRUB_DELAY).parse().unwrap_or_else(|_| {
                debug!(key = keys::GESTURE_SCRUB_DELAY, "Unresolved setting, using 0");
                0
            }),
            frame_scrub: flag(&get(keys::GESTURE_FRAME_SCRUB)),
        }
    }

    /// Pixels of travel per emitted frame step
    pub fn frame_step_pixels(&self) -> f32 {
        FRAME_STEP_PIXELS / self.scrub_sensitivity
    }

    /// Pixels of travel per emitted time-scrub step
    pub fn time_scrub_pixels(&self) -> f32 {
        TIME_SCRUB_PIXELS / self.scrub_sensitivity
    }
}

fn binding<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(key, value, "Unresolved setting, leaving unbound");
            None
        }
    }
}

fn percent(key: &str, value: &str) -> f32 {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() && (0.0..=100.0).contains(&v) => v / 100.0,
        _ => {
            debug!(key, value, "Unresolved setting, using default band");
            let fallback = default_setting(key).unwrap_or("0");
            fallback.parse::<f32>().unwrap_or(0.0) / 100.0
        }
    }
}

fn sensitivity(value: &str) -> f32 {
    match value.parse::<f32>() {
        Ok(v) if (SCRUB_SENSITIVITY_MIN..=SCRUB_SENSITIVITY_MAX).contains(&v) => v,
        _ => {
            debug!(
                key = keys::GESTURE_SCRUB_SENSITIVITY,
                value, "Unresolved setting, using 1.0"
            );
            1.0
        }
    }
}

fn flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = GestureConfig::default();
        assert_eq!(config.horizontal, Some(DragMode::Seek));
        assert_eq!(config.vertical_left, Some(DragMode::Bright));
        assert_eq!(config.vertical_right, Some(DragMode::Volume));
        assert_eq!(config.tap_left, Some(TapAction::SeekFixed));
        assert_eq!(config.tap_center, Some(TapAction::PlayPause));
        assert_eq!(config.tap_right, Some(TapAction::SeekFixed));
        assert_eq!(config.tap_mode, TapMode::Single);
        assert_eq!(config.tap_duration_ms, 300);
        assert_eq!(config.custom_zone, CustomZoneBehavior::Disabled);
        assert_eq!(config.custom_band, CustomBand::new(0.05, 0.75));
        assert_eq!(config.scrub_sensitivity, 1.0);
        assert_eq!(config.scrub_delay_ms, 0);
        assert!(config.frame_scrub);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = GestureConfig::from_source(&source(&[
            (keys::GESTURE_HORIZ, ""),
            (keys::GESTURE_TAP_CENTER, "  "),
        ]));
        assert_eq!(config.horizontal, Some(DragMode::Seek));
        assert_eq!(config.tap_center, Some(TapAction::PlayPause));
    }

    #[test]
    fn test_unrecognized_values_are_unbound() {
        let config = GestureConfig::from_source(&source(&[
            (keys::GESTURE_HORIZ, "sideways"),
            (keys::GESTURE_VERT_LEFT, "none"),
            (keys::GESTURE_TAP_RIGHT, "explode"),
            (keys::GESTURE_CUSTOM_ZONE, "maybe"),
            (keys::GESTURE_FRAME_SCRUB, "perhaps"),
        ]));
        assert_eq!(config.horizontal, None);
        assert_eq!(config.vertical_left, None);
        assert_eq!(config.vertical_right, Some(DragMode::Volume));
        assert_eq!(config.tap_right, None);
        assert_eq!(config.custom_zone, CustomZoneBehavior::Disabled);
        assert!(!config.frame_scrub);
    }

    #[test]
    fn test_scrub_settings() {
        let config = GestureConfig::from_source(&source(&[
            (keys::GESTURE_CUSTOM_ZONE, "scrub"),
            (keys::GESTURE_SCRUB_SENSITIVITY, "2"),
            (keys::GESTURE_SCRUB_DELAY, "120"),
            (keys::GESTURE_FRAME_SCRUB, "false"),
            (keys::GESTURE_CUSTOM_ZONE_TOP, "10"),
            (keys::GESTURE_CUSTOM_ZONE_BOTTOM, "90"),
        ]));
        assert_eq!(config.custom_zone, CustomZoneBehavior::Scrub);
        assert_eq!(config.frame_step_pixels(), 6.0);
        assert_eq!(config.time_scrub_pixels(), 12.0);
        assert_eq!(config.scrub_delay_ms, 120);
        assert!(!config.frame_scrub);
        assert_eq!(config.custom_band, CustomBand::new(0.1, 0.9));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = GestureConfig::from_source(&source(&[
            (keys::GESTURE_SCRUB_SENSITIVITY, "-3"),
            (keys::GESTURE_SCRUB_DELAY, "soon"),
            (keys::GESTURE_CUSTOM_ZONE_TOP, "140"),
        ]));
        assert_eq!(config.scrub_sensitivity, 1.0);
        assert_eq!(config.scrub_delay_ms, 0);
        assert_eq!(config.custom_band.top, 0.05);
    }

    #[test]
    fn test_sensitivity_out_of_range_falls_back() {
        for value in ["1e38", "0.01", "11", "inf", "NaN"] {
            let config =
                GestureConfig::from_source(&source(&[(keys::GESTURE_SCRUB_SENSITIVITY, value)]));
            assert_eq!(config.scrub_sensitivity, 1.0, "sensitivity {}", value);
            assert_eq!(config.frame_step_pixels(), FRAME_STEP_PIXELS);
        }

        let config =
            GestureConfig::from_source(&source(&[(keys::GESTURE_SCRUB_SENSITIVITY, "10")]));
        assert_eq!(config.scrub_sensitivity, SCRUB_SENSITIVITY_MAX);
        assert_eq!(config.frame_step_pixels(), 1.2);
    }

    #[test]
    fn test_json_source() {
        let json = serde_json::json!({
            "gesture_horiz": "volume",
            "gesture_scrub_sensitivity": 0.5,
            "gesture_frame_scrub": false,
            "gesture_tap_left": null,
        });
        let config = GestureConfig::from_source(&json);
        assert_eq!(config.horizontal, Some(DragMode::Volume));
        assert_eq!(config.scrub_sensitivity, 0.5);
        assert!(!config.frame_scrub);
        assert_eq!(config.tap_left, Some(TapAction::SeekFixed));
    }

    #[test]
    fn test_strict_parse_errors() {
        let err = "sideways".parse::<DragMode>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTING");
        assert_eq!("custom".parse::<TapAction>().unwrap(), TapAction::Custom);
        assert_eq!(
            "area".parse::<CustomZoneBehavior>().unwrap(),
            CustomZoneBehavior::Area
        );
    }
}
