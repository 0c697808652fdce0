//! Gesture Engine - single-pointer state machine
//!
//! Turns `Down`/`Move`/`Up` events into property change notifications:
//! - Zone resolution at contact
//! - Tap and double-tap detection
//! - Direction-locked continuous drags (seek, volume, brightness)
//! - Custom band behaviors (custom-area drag, frame stepping, time scrubbing)

use crate::{
    config::{
        CustomZoneBehavior, DragMode, GestureConfig, SettingsSource, TapAction, TapMode,
        CONTROL_BRIGHT_MAX, CONTROL_CUSTOM_AREA_MAX, CONTROL_SEEK_MAX, CONTROL_VOLUME_MAX,
    },
    observer::GestureObserver,
    scrub::StepAccumulator,
    tap::{TapKind, TapTracker},
    throttle::MotionThrottle,
    types::*,
    zone::{in_deadzone, TapColumn, Zone},
    Result,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// Tap drift, in trigger distances, that invalidates a pending double tap
const TAP_DRIFT_TRIGGERS: f32 = 3.0;

/// Axis a continuous drag is locked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Data fixed at contact for the duration of one gesture
#[derive(Debug, Clone)]
struct Gesture {
    config: Arc<GestureConfig>,
    metrics: ScreenMetrics,
    initial: PointerSample,
    down_time_ms: u64,
    zone: Zone,
}

impl Gesture {
    fn trigger(&self) -> f32 {
        self.metrics.trigger_distance()
    }
}

/// Touch gesture engine
///
/// Every entry point takes `&mut self`; events must be fed in delivery
/// order.
pub struct GestureEngine<O: GestureObserver> {
    /// Notification sink
    observer: O,
    /// Latest synced configuration, picked up at the next contact
    config: Arc<GestureConfig>,
    /// Current screen metrics; `None` disables processing
    metrics: Option<ScreenMetrics>,
    /// Current state
    state: GestureState,
    /// Active gesture, `None` while idle
    gesture: Option<Gesture>,
    /// Axis of the committed continuous drag
    axis: Axis,
    /// Step accumulator for frame stepping and time scrubbing
    steps: StepAccumulator,
    /// Last processed position, kept across gestures
    throttle: MotionThrottle,
    taps: TapTracker,
    last_tap: Option<TapKind>,
}

impl<O: GestureObserver> GestureEngine<O> {
    /// Create an engine with default configuration and no metrics
    pub fn new(observer: O) -> Self {
        Self::with_config(observer, GestureConfig::default())
    }

    pub fn with_config(observer: O, config: GestureConfig) -> Self {
        Self {
            observer,
            config: Arc::new(config),
            metrics: None,
            state: GestureState::Idle,
            gesture: None,
            axis: Axis::default(),
            steps: StepAccumulator::new(1.0),
            throttle: MotionThrottle::default(),
            taps: TapTracker::new(),
            last_tap: None,
        }
    }

    /// Set screen metrics
    ///
    /// Invalid metrics disable processing until valid ones are set; the
    /// error is returned for logging only.
    pub fn set_metrics(&mut self, width: f32, height: f32) -> Result<()> {
        match ScreenMetrics::new(width, height) {
            Ok(metrics) => {
                debug!(%metrics, trigger = metrics.trigger_distance(), "Metrics set");
                self.metrics = Some(metrics);
                Ok(())
            }
            Err(e) => {
                warn!(width, height, "Invalid metrics, gestures disabled");
                self.metrics = None;
                Err(e)
            }
        }
    }

    /// Rebuild configuration from a settings source
    ///
    /// Takes effect at the next `Down`; a gesture in progress keeps the
    /// configuration it started with.
    #[instrument(skip(self, source))]
    pub fn sync_settings<S: SettingsSource + ?Sized>(&mut self, source: &S) {
        self.set_config(GestureConfig::from_source(source));
    }

    /// Replace configuration directly
    pub fn set_config(&mut self, config: GestureConfig) {
        info!(
            horizontal = ?config.horizontal,
            vertical_left = ?config.vertical_left,
            vertical_right = ?config.vertical_right,
            custom_zone = ?config.custom_zone,
            "Gesture settings synced"
        );
        self.config = Arc::new(config);
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn metrics(&self) -> Option<ScreenMetrics> {
        self.metrics
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Zone resolved for the active gesture
    pub fn zone(&self) -> Option<Zone> {
        self.gesture.as_ref().map(|g| g.zone)
    }

    /// Classification of the most recent tap
    pub fn last_tap(&self) -> Option<TapKind> {
        self.last_tap
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Handle one pointer event; returns whether it was consumed
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        let Some(metrics) = self.metrics else {
            warn!("Width or height not set, ignoring {}", event.action);
            return false;
        };
        let point = match event.sample() {
            Ok(point) => point,
            Err(e) => {
                warn!(error = %e, "Ignoring invalid point");
                return false;
            }
        };

        match event.action {
            PointerAction::Down => self.on_down(point, event.time_ms, metrics),
            PointerAction::Move => self.on_move(point, event.time_ms),
            PointerAction::Up => self.on_up(point, event.time_ms),
        }
    }

    fn on_down(&mut self, point: PointerSample, time_ms: u64, metrics: ScreenMetrics) -> bool {
        let config = Arc::clone(&self.config);
        let band_enabled = config.custom_zone != CustomZoneBehavior::Disabled;
        let in_band = band_enabled && config.custom_band.contains(point.y, metrics.height);

        // Status bar and navigation bar, unless the custom band reaches into them
        if in_deadzone(point.y, metrics.height) && !in_band {
            debug!(y = point.y, "Contact in deadzone, ignored");
            return false;
        }

        if self.state.is_committed() {
            debug!(state = %self.state, "Discarding unfinished gesture");
        }

        let zone = if band_enabled {
            config
                .custom_band
                .classify(point.x, point.y, metrics.width, metrics.height)
        } else {
            Zone::None
        };

        let drift = point.distance_to(self.throttle.last());
        if drift > metrics.trigger_distance() * TAP_DRIFT_TRIGGERS {
            if let Some(pending) = self.taps.pending_tap() {
                debug!(drift, pending, "Contact drifted, double tap cancelled");
            }
            self.taps.invalidate();
        }
        self.taps.press(time_ms);
        self.throttle.reset(point);

        self.gesture = Some(Gesture {
            config,
            metrics,
            initial: point,
            down_time_ms: time_ms,
            zone,
        });
        self.axis = Axis::default();
        self.steps = StepAccumulator::new(1.0);
        self.set_state(GestureState::Pressed);
        true
    }

    fn on_move(&mut self, point: PointerSample, time_ms: u64) -> bool {
        let Some(gesture) = self.gesture.clone() else {
            return false;
        };
        if !self.throttle.accept(point, gesture.trigger()) {
            return false;
        }

        let dx = point.x - gesture.initial.x;
        let dy = point.y - gesture.initial.y;

        match self.state {
            GestureState::Idle => return false,
            GestureState::Pressed => {
                self.commit(&gesture, dx, dy, time_ms);
                // Discrete modes count the committing move too
                if matches!(self.state, GestureState::FrameStep | GestureState::TimeScrub) {
                    self.step(dx, dy);
                }
            }
            GestureState::FrameStep | GestureState::TimeScrub => self.step(dx, dy),
            continuous => {
                let ratio = match self.axis {
                    Axis::Horizontal => dx / gesture.metrics.width,
                    Axis::Vertical => -dy / gesture.metrics.height,
                };
                let (kind, max) = match continuous {
                    GestureState::SeekDrag => (PropertyChange::Seek, CONTROL_SEEK_MAX),
                    GestureState::VolumeDrag => (PropertyChange::Volume, CONTROL_VOLUME_MAX),
                    GestureState::BrightnessDrag => (PropertyChange::Bright, CONTROL_BRIGHT_MAX),
                    _ => (PropertyChange::CustomArea, CONTROL_CUSTOM_AREA_MAX),
                };
                self.emit(kind, max * ratio);
            }
        }

        self.state.is_committed()
    }

    fn on_up(&mut self, point: PointerSample, time_ms: u64) -> bool {
        let Some(gesture) = self.gesture.clone() else {
            return false;
        };

        let moved = self.on_move(point, time_ms);
        // Scrub modes count the release point even below the throttle distance
        self.step(point.x - gesture.initial.x, point.y - gesture.initial.y);
        let handled = if self.state == GestureState::Pressed {
            self.release_tap(&gesture, point, time_ms)
        } else {
            self.finalize();
            true
        };

        self.gesture = None;
        self.set_state(GestureState::Idle);
        moved || handled
    }

    /// Try to leave `Pressed` for a control mode
    fn commit(&mut self, gesture: &Gesture, dx: f32, dy: f32, time_ms: u64) {
        // Outside the band every gesture is an ordinary drag
        let behavior = match gesture.zone {
            Zone::None => CustomZoneBehavior::Disabled,
            _ => gesture.config.custom_zone,
        };
        let trigger = gesture.trigger();
        let horizontal = dx.abs() > trigger;
        let vertical = dy.abs() > trigger;

        match behavior {
            CustomZoneBehavior::Disabled => self.commit_drag(gesture, dx, dy),
            _ if !horizontal && !vertical => {}
            CustomZoneBehavior::Area => {
                let axis = if horizontal {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                };
                self.enter(GestureState::CustomZoneDrag, axis, gesture);
            }
            CustomZoneBehavior::Scrub => {
                // Center column stays armed for taps only
                if gesture.zone == Zone::Center {
                    return;
                }
                // A flick before the activation delay is an ordinary drag
                let held_ms = time_ms.saturating_sub(gesture.down_time_ms);
                if held_ms < gesture.config.scrub_delay_ms {
                    self.commit_drag(gesture, dx, dy);
                } else if horizontal {
                    if gesture.config.frame_scrub {
                        self.enter(GestureState::FrameStep, Axis::Horizontal, gesture);
                    } else {
                        self.commit_drag(gesture, dx, dy);
                    }
                } else {
                    self.enter(GestureState::TimeScrub, Axis::Vertical, gesture);
                }
            }
        }
    }

    /// Direction lock for ordinary drags
    fn commit_drag(&mut self, gesture: &Gesture, dx: f32, dy: f32) {
        let trigger = gesture.trigger();
        let config = &gesture.config;

        let (binding, axis) = if dx.abs() > trigger {
            (config.horizontal, Axis::Horizontal)
        } else if dy.abs() > trigger {
            let binding = if gesture.initial.x > gesture.metrics.width / 2.0 {
                config.vertical_right
            } else {
                config.vertical_left
            };
            (binding, Axis::Vertical)
        } else {
            return;
        };

        // An unbound axis keeps the gesture pressed
        if let Some(mode) = binding {
            let state = match mode {
                DragMode::Seek => GestureState::SeekDrag,
                DragMode::Volume => GestureState::VolumeDrag,
                DragMode::Bright => GestureState::BrightnessDrag,
            };
            self.enter(state, axis, gesture);
        }
    }

    fn enter(&mut self, state: GestureState, axis: Axis, gesture: &Gesture) {
        self.axis = axis;
        self.set_state(state);

        match state {
            GestureState::FrameStep => {
                self.steps = StepAccumulator::new(gesture.config.frame_step_pixels());
                self.emit(PropertyChange::Pause, 0.0);
                self.emit(PropertyChange::FrameScrubStart, 0.0);
            }
            GestureState::TimeScrub => {
                self.steps = StepAccumulator::new(gesture.config.time_scrub_pixels());
                self.emit(PropertyChange::Init, 0.0);
            }
            _ => self.emit(PropertyChange::Init, 0.0),
        }
    }

    /// Emit pending discrete steps for the current scrub mode
    fn step(&mut self, dx: f32, dy: f32) {
        let (kind, displacement) = match self.state {
            GestureState::FrameStep => (PropertyChange::FrameScrub, dx),
            GestureState::TimeScrub => (PropertyChange::TimeSeek, -dy),
            _ => return,
        };
        let steps = self.steps.advance(displacement);
        if steps != 0 {
            self.emit(kind, steps as f32);
        }
    }

    fn finalize(&mut self) {
        match self.state {
            GestureState::FrameStep => {
                debug!(
                    frames = self.steps.emitted(),
                    remainder = self.steps.remainder(),
                    "Frame scrub finished"
                );
                self.emit(PropertyChange::FrameScrubFinalize, 0.0);
                self.emit(PropertyChange::Resume, 0.0);
            }
            GestureState::TimeScrub => {
                debug!(
                    seconds = self.steps.emitted(),
                    remainder = self.steps.remainder(),
                    "Time scrub finished"
                );
                self.emit(PropertyChange::Finalize, 0.0);
            }
            _ => self.emit(PropertyChange::Finalize, 0.0),
        }
    }

    /// Evaluate a release that never committed to a drag
    fn release_tap(&mut self, gesture: &Gesture, point: PointerSample, time_ms: u64) -> bool {
        let window = gesture.config.tap_duration_ms;
        let Some(kind) = self.taps.release(time_ms, window) else {
            self.last_tap = None;
            return false;
        };
        self.last_tap = Some(kind);

        if gesture.config.tap_mode == TapMode::Double && kind == TapKind::Single {
            return false;
        }

        let column = TapColumn::classify(point.x, gesture.metrics.width);
        let binding = match column {
            TapColumn::LeftTap => gesture.config.tap_left,
            TapColumn::CenterTap => gesture.config.tap_center,
            TapColumn::RightTap => gesture.config.tap_right,
        };
        let Some(action) = binding else {
            self.taps.invalidate();
            return false;
        };

        debug!(?column, ?kind, ?action, "Tap");
        let change = match action {
            TapAction::SeekFixed => PropertyChange::SeekFixed,
            TapAction::PlayPause => PropertyChange::PlayPause,
            TapAction::Custom => PropertyChange::Custom,
        };
        self.emit(change, column.direction());
        true
    }

    fn set_state(&mut self, state: GestureState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, "Gesture state transition");
            self.state = state;
        }
    }

    fn emit(&mut self, change: PropertyChange, value: f32) {
        trace!(%change, value, "Property change");
        self.observer.on_property_change(change, value);
    }
}
