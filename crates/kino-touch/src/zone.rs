//! Screen zone classification
//!
//! Pure functions of geometry: nothing here holds state.

use serde::{Deserialize, Serialize};

/// Top and bottom exclusion margin, percent of height
///
/// Keeps contacts near the status bar and navigation bar for the system.
pub const DEADZONE_PERCENT: f32 = 5.0;

/// Default custom band bounds, as fractions of height
pub const DEFAULT_BAND_TOP: f32 = 0.05;
pub const DEFAULT_BAND_BOTTOM: f32 = 0.75;

/// Custom band classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Left,
    Center,
    Right,
    /// Outside the custom band
    None,
}

impl Zone {
    pub fn is_custom(&self) -> bool {
        !matches!(self, Zone::None)
    }
}

/// Column used for tap dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TapColumn {
    LeftTap,
    CenterTap,
    RightTap,
}

impl TapColumn {
    /// Classify a horizontal position into screen thirds
    pub fn classify(x: f32, width: f32) -> TapColumn {
        match third(x, width) {
            0 => TapColumn::LeftTap,
            1 => TapColumn::CenterTap,
            _ => TapColumn::RightTap,
        }
    }

    /// Direction sign carried by the tap notification
    pub fn direction(&self) -> f32 {
        match self {
            TapColumn::LeftTap => -1.0,
            TapColumn::CenterTap => 0.0,
            TapColumn::RightTap => 1.0,
        }
    }
}

/// Vertical band of the screen with its own left/center/right semantics
///
/// `top` and `bottom` are fractions of the surface height, both inclusive.
/// A band with `top > bottom` is empty and classifies every point as
/// `Zone::None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomBand {
    pub top: f32,
    pub bottom: f32,
}

impl Default for CustomBand {
    fn default() -> Self {
        Self {
            top: DEFAULT_BAND_TOP,
            bottom: DEFAULT_BAND_BOTTOM,
        }
    }
}

impl CustomBand {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// True if the vertical position lies inside the band (inclusive)
    pub fn contains(&self, y: f32, height: f32) -> bool {
        let ratio = y / height;
        ratio >= self.top && ratio <= self.bottom
    }

    /// Classify a point against this band
    pub fn classify(&self, x: f32, y: f32, width: f32, height: f32) -> Zone {
        if !self.contains(y, height) {
            return Zone::None;
        }
        match third(x, width) {
            0 => Zone::Left,
            1 => Zone::Center,
            _ => Zone::Right,
        }
    }
}

/// True if `y` falls in the top or bottom exclusion margin
pub fn in_deadzone(y: f32, height: f32) -> bool {
    y < height * DEADZONE_PERCENT / 100.0 || y > height * (100.0 - DEADZONE_PERCENT) / 100.0
}

/// Index of the horizontal third containing `x`, clamped to 0..=2
fn third(x: f32, width: f32) -> u8 {
    if x < width / 3.0 {
        0
    } else if x < width * 2.0 / 3.0 {
        1
    } else {
        2
    }
}
