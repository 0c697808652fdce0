//! Kino Touch - Touch Gesture Engine for Kino
//!
//! This crate turns raw single-pointer input on a full-screen video surface
//! into player control intents:
//! - Zone classification (custom band, tap columns, deadzones)
//! - Tap and double-tap disambiguation
//! - Direction-locked drags for seek, volume and brightness
//! - Frame stepping and time scrubbing with drift-free step accumulation
//! - Settings resolution from any key/value store
//!
//! The engine never issues player commands. It reports typed property
//! changes to a [`GestureObserver`], and the host decides what they mean.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Kino Touch                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │     Zone     │  │  Throttle /  │  │   Settings   │          │
//! │  │  Classifier  │  │  Tap Tracker │  │  Resolution  │          │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘          │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │   Gesture   │                              │
//! │                    │   Engine    │                              │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │  Observer   │                              │
//! │                    └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use kino_touch::{GestureEngine, NotificationLog, PointerEvent, PropertyChange};
//!
//! let mut engine = GestureEngine::new(NotificationLog::new());
//! engine.set_metrics(1920.0, 1080.0).unwrap();
//!
//! engine.handle(&PointerEvent::down(960.0, 540.0, 0));
//! engine.handle(&PointerEvent::up(960.0, 540.0, 80));
//!
//! assert_eq!(engine.observer().kinds(), vec![PropertyChange::PlayPause]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod scrub;
pub mod tap;
pub mod throttle;
pub mod types;
pub mod zone;

pub use config::{
    CustomZoneBehavior, DragMode, GestureConfig, SettingsSource, TapAction, TapMode,
};
pub use engine::GestureEngine;
pub use error::{Error, Result};
pub use observer::{GestureObserver, NotificationLog};
pub use scrub::StepAccumulator;
pub use tap::{TapKind, TapTracker};
pub use types::*;
pub use zone::{CustomBand, TapColumn, Zone};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library initialization
pub fn init() {
    tracing::info!(version = VERSION, "Kino Touch initialized");
}
