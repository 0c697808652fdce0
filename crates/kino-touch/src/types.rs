//! Core types for Kino Touch

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ratio between the screen's shorter side and the trigger distance
pub const TRIGGER_RATE: f32 = 30.0;

/// A single pointer position in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    /// Create a sample, rejecting NaN and infinite coordinates
    pub fn new(x: f32, y: f32) -> Result<Self> {
        let sample = Self { x, y };
        if sample.is_finite() {
            Ok(sample)
        } else {
            Err(Error::InvalidSample { x, y })
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another sample
    pub fn distance_to(&self, other: PointerSample) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pointer action delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    Down,
    Move,
    Up,
}

impl std::fmt::Display for PointerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerAction::Down => write!(f, "down"),
            PointerAction::Move => write!(f, "move"),
            PointerAction::Up => write!(f, "up"),
        }
    }
}

/// One pointer event as delivered by the hosting surface
///
/// `time_ms` is read from a monotonic clock (e.g. uptime in milliseconds).
/// Coordinates are not validated on construction so that hosts can forward
/// raw input; `GestureEngine::handle` rejects non-finite positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(action: PointerAction, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            action,
            x,
            y,
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Down, x, y, time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Move, x, y, time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Up, x, y, time_ms)
    }

    /// The validated position of this event
    pub fn sample(&self) -> Result<PointerSample> {
        PointerSample::new(self.x, self.y)
    }
}

/// Surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
}

impl ScreenMetrics {
    /// Validate dimensions; both must be finite and strictly positive
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(Error::InvalidMetrics { width, height })
        }
    }

    /// Minimum displacement before a drag commits to a control mode
    pub fn trigger_distance(&self) -> f32 {
        self.width.min(self.height) / TRIGGER_RATE
    }
}

impl std::fmt::Display for ScreenMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Gesture state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GestureState {
    /// No pointer down
    #[default]
    Idle,
    /// Pointer down, no control mode committed yet
    Pressed,
    SeekDrag,
    VolumeDrag,
    BrightnessDrag,
    /// Discrete frame stepping (custom zone)
    FrameStep,
    /// Discrete time scrubbing (custom zone)
    TimeScrub,
    /// Continuous custom-area drag
    CustomZoneDrag,
}

impl GestureState {
    /// True once the gesture has committed to a control mode
    pub fn is_committed(&self) -> bool {
        !matches!(self, GestureState::Idle | GestureState::Pressed)
    }
}

impl std::fmt::Display for GestureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureState::Idle => write!(f, "idle"),
            GestureState::Pressed => write!(f, "pressed"),
            GestureState::SeekDrag => write!(f, "seek_drag"),
            GestureState::VolumeDrag => write!(f, "volume_drag"),
            GestureState::BrightnessDrag => write!(f, "brightness_drag"),
            GestureState::FrameStep => write!(f, "frame_step"),
            GestureState::TimeScrub => write!(f, "time_scrub"),
            GestureState::CustomZoneDrag => write!(f, "custom_zone_drag"),
        }
    }
}

/// Property change notifications sent to the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyChange {
    /// A continuous mode was committed; snapshot baseline state
    Init,
    Seek,
    Volume,
    Bright,
    /// A continuous mode ended
    Finalize,

    /* Tap gestures */
    SeekFixed,
    PlayPause,
    Custom,

    /* Custom area gesture */
    CustomArea,

    /* Frame-accurate scrubbing */
    FrameScrubStart,
    FrameScrub,
    FrameScrubFinalize,
    TimeSeek,
    Pause,
    Resume,
}

impl std::fmt::Display for PropertyChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PropertyChange::Init => "init",
            PropertyChange::Seek => "seek",
            PropertyChange::Volume => "volume",
            PropertyChange::Bright => "bright",
            PropertyChange::Finalize => "finalize",
            PropertyChange::SeekFixed => "seek_fixed",
            PropertyChange::PlayPause => "play_pause",
            PropertyChange::Custom => "custom",
            PropertyChange::CustomArea => "custom_area",
            PropertyChange::FrameScrubStart => "frame_scrub_start",
            PropertyChange::FrameScrub => "frame_scrub",
            PropertyChange::FrameScrubFinalize => "frame_scrub_finalize",
            PropertyChange::TimeSeek => "time_seek",
            PropertyChange::Pause => "pause",
            PropertyChange::Resume => "resume",
        };
        f.write_str(name)
    }
}

/// A recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: PropertyChange,
    pub value: f32,
}

impl Notification {
    pub fn new(kind: PropertyChange, value: f32) -> Self {
        Self { kind, value }
    }
}
