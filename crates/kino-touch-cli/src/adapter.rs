//! Translation of gesture notifications into mpv-style player commands
//!
//! This is the collaborator side of the engine: the engine reports what
//! changed, the adapter decides which command that means.

use kino_touch::{GestureObserver, PropertyChange};
use serde::Serialize;

/// Seconds jumped by a fixed-seek tap
pub const FIXED_SEEK_SECONDS: f32 = 10.0;

/// A player command as mpv would receive it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlayerCommand {
    SeekRelative { seconds: f32 },
    CyclePause,
    SetPause { paused: bool },
    AddVolume { percent: f32 },
    AddBrightness { amount: f32 },
    FrameStep,
    FrameBackStep,
    ScriptMessage { name: String, arg: String },
}

impl std::fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerCommand::SeekRelative { seconds } => write!(f, "seek {:.2} relative", seconds),
            PlayerCommand::CyclePause => write!(f, "cycle pause"),
            PlayerCommand::SetPause { paused } => {
                write!(f, "set pause {}", if *paused { "yes" } else { "no" })
            }
            PlayerCommand::AddVolume { percent } => write!(f, "add volume {:.0}", percent),
            PlayerCommand::AddBrightness { amount } => write!(f, "add brightness {:.0}", amount),
            PlayerCommand::FrameStep => write!(f, "frame-step"),
            PlayerCommand::FrameBackStep => write!(f, "frame-back-step"),
            PlayerCommand::ScriptMessage { name, arg } => {
                write!(f, "script-message {} {}", name, arg)
            }
        }
    }
}

/// Stateful translator from notifications to commands
///
/// Continuous notifications carry the total change since the gesture was
/// committed, so the adapter keeps the last value seen and issues the
/// difference.
#[derive(Debug, Clone, Default)]
pub struct MpvAdapter {
    last_seek: f32,
    last_volume: f32,
    last_bright: f32,
}

impl MpvAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for one notification
    pub fn translate(&mut self, change: PropertyChange, value: f32) -> Vec<PlayerCommand> {
        match change {
            PropertyChange::Init => {
                *self = Self::default();
                Vec::new()
            }
            PropertyChange::Seek => {
                let delta = value - std::mem::replace(&mut self.last_seek, value);
                non_zero(delta, |seconds| PlayerCommand::SeekRelative { seconds })
            }
            PropertyChange::Volume => {
                let delta = value - std::mem::replace(&mut self.last_volume, value);
                non_zero(delta * 100.0, |percent| PlayerCommand::AddVolume { percent })
            }
            PropertyChange::Bright => {
                let delta = value - std::mem::replace(&mut self.last_bright, value);
                non_zero(delta * 100.0, |amount| PlayerCommand::AddBrightness { amount })
            }
            PropertyChange::SeekFixed => vec![PlayerCommand::SeekRelative {
                seconds: FIXED_SEEK_SECONDS * value,
            }],
            PropertyChange::PlayPause => vec![PlayerCommand::CyclePause],
            PropertyChange::Custom => vec![PlayerCommand::ScriptMessage {
                name: "kino-custom-tap".to_string(),
                arg: side(value).to_string(),
            }],
            PropertyChange::CustomArea => vec![PlayerCommand::ScriptMessage {
                name: "kino-custom-area".to_string(),
                arg: format!("{:.2}", value),
            }],
            PropertyChange::FrameScrub => {
                let step = if value > 0.0 {
                    PlayerCommand::FrameStep
                } else {
                    PlayerCommand::FrameBackStep
                };
                vec![step; value.abs() as usize]
            }
            PropertyChange::TimeSeek => vec![PlayerCommand::SeekRelative { seconds: value }],
            PropertyChange::Pause => vec![PlayerCommand::SetPause { paused: true }],
            PropertyChange::Resume => vec![PlayerCommand::SetPause { paused: false }],
            PropertyChange::Finalize
            | PropertyChange::FrameScrubStart
            | PropertyChange::FrameScrubFinalize => Vec::new(),
        }
    }
}

fn non_zero(amount: f32, command: impl FnOnce(f32) -> PlayerCommand) -> Vec<PlayerCommand> {
    if amount == 0.0 {
        Vec::new()
    } else {
        vec![command(amount)]
    }
}

fn side(direction: f32) -> &'static str {
    if direction < 0.0 {
        "left"
    } else if direction > 0.0 {
        "right"
    } else {
        "center"
    }
}

/// One notification observed during a replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayRecord {
    /// Index of the pointer event that caused it
    pub event: usize,
    pub change: PropertyChange,
    pub value: f32,
    pub commands: Vec<PlayerCommand>,
}

/// Observer used by `replay`: records notifications and their commands
#[derive(Debug, Default)]
pub struct ReplayObserver {
    pub current_event: usize,
    adapter: MpvAdapter,
    records: Vec<ReplayRecord>,
}

impl ReplayObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ReplayRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ReplayRecord> {
        self.records
    }
}

impl GestureObserver for ReplayObserver {
    fn on_property_change(&mut self, change: PropertyChange, value: f32) {
        let commands = self.adapter.translate(change, value);
        self.records.push(ReplayRecord {
            event: self.current_event,
            change,
            value,
            commands,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_issues_differences() {
        let mut adapter = MpvAdapter::new();
        assert!(adapter.translate(PropertyChange::Init, 0.0).is_empty());
        assert_eq!(
            adapter.translate(PropertyChange::Seek, 5.0),
            vec![PlayerCommand::SeekRelative { seconds: 5.0 }]
        );
        assert_eq!(
            adapter.translate(PropertyChange::Seek, 3.0),
            vec![PlayerCommand::SeekRelative { seconds: -2.0 }]
        );
        assert!(adapter.translate(PropertyChange::Seek, 3.0).is_empty());
        // Init starts a new baseline
        adapter.translate(PropertyChange::Init, 0.0);
        assert_eq!(
            adapter.translate(PropertyChange::Seek, 1.0),
            vec![PlayerCommand::SeekRelative { seconds: 1.0 }]
        );
    }

    #[test]
    fn test_frame_steps_expand() {
        let mut adapter = MpvAdapter::new();
        assert_eq!(
            adapter.translate(PropertyChange::FrameScrub, 3.0),
            vec![PlayerCommand::FrameStep; 3]
        );
        assert_eq!(
            adapter.translate(PropertyChange::FrameScrub, -2.0),
            vec![PlayerCommand::FrameBackStep; 2]
        );
    }

    #[test]
    fn test_tap_commands() {
        let mut adapter = MpvAdapter::new();
        assert_eq!(
            adapter.translate(PropertyChange::PlayPause, 0.0)[0].to_string(),
            "cycle pause"
        );
        assert_eq!(
            adapter.translate(PropertyChange::SeekFixed, -1.0)[0].to_string(),
            "seek -10.00 relative"
        );
        assert_eq!(
            adapter.translate(PropertyChange::Custom, 1.0)[0].to_string(),
            "script-message kino-custom-tap right"
        );
    }

    #[test]
    fn test_pause_resume() {
        let mut adapter = MpvAdapter::new();
        assert_eq!(
            adapter.translate(PropertyChange::Pause, 0.0)[0].to_string(),
            "set pause yes"
        );
        assert_eq!(
            adapter.translate(PropertyChange::Resume, 0.0)[0].to_string(),
            "set pause no"
        );
        assert!(adapter.translate(PropertyChange::FrameScrubFinalize, 0.0).is_empty());
    }

    #[test]
    fn test_replay_observer_tags_events() {
        let mut observer = ReplayObserver::new();
        observer.current_event = 4;
        observer.on_property_change(PropertyChange::PlayPause, 0.0);
        let record = &observer.records()[0];
        assert_eq!(record.event, 4);
        assert_eq!(record.commands, vec![PlayerCommand::CyclePause]);
    }
}
