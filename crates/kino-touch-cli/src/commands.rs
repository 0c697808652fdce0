//! CLI command implementations

use crate::adapter::{ReplayObserver, ReplayRecord};
use crate::output::{to_json, to_table, OutputFormat};
use crate::trace::{load_settings, Trace};
use anyhow::Context;
use kino_touch::zone::in_deadzone;
use kino_touch::{
    CustomZoneBehavior, GestureConfig, GestureEngine, ScreenMetrics, TapColumn, Zone,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::Tabled;
use tracing::{debug, info};

/// Result of replaying a trace
#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub handled: usize,
    pub notifications: Vec<ReplayRecord>,
}

#[derive(Tabled)]
struct ReplayRow {
    event: usize,
    change: String,
    value: String,
    commands: String,
}

/// Drive the engine with every event of a trace
pub fn run_trace(trace: &Trace, settings: &serde_json::Value) -> anyhow::Result<ReplaySummary> {
    let mut engine = GestureEngine::new(ReplayObserver::new());
    engine
        .set_metrics(trace.metrics.width, trace.metrics.height)
        .context("Trace metrics rejected")?;
    engine.sync_settings(settings);

    let mut handled = 0;
    for (index, event) in trace.events.iter().enumerate() {
        engine.observer_mut().current_event = index;
        let consumed = engine.handle(event);
        debug!(index, action = %event.action, consumed, state = %engine.state(), "Event replayed");
        if consumed {
            handled += 1;
        }
    }

    Ok(ReplaySummary {
        events: trace.events.len(),
        handled,
        notifications: engine.into_observer().into_records(),
    })
}

/// Replay a recorded gesture trace
pub fn replay(path: &Path, settings: Option<PathBuf>, format: &str) -> anyhow::Result<()> {
    let trace = Trace::load(path)?;
    let settings = match settings {
        Some(settings_path) => load_settings(&settings_path)?,
        None => trace.settings.clone(),
    };
    info!(events = trace.events.len(), metrics = %trace.metrics, "Replaying trace");

    let summary = run_trace(&trace, &settings)?;

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&summary)?),
        OutputFormat::Table => {
            let rows = summary.notifications.iter().map(|r| ReplayRow {
                event: r.event,
                change: r.change.to_string(),
                value: format!("{:.3}", r.value),
                commands: join_commands(r),
            });
            println!("{}", to_table(rows));
        }
        OutputFormat::Text => {
            println!("Replaying: {}", path.display());
            println!("  Metrics: {}", trace.metrics);
            println!("  Events: {} ({} handled)", summary.events, summary.handled);
            println!("\nNotifications:");
            for record in &summary.notifications {
                println!(
                    "  #{:<4} {:<20} {:>9.3}  {}",
                    record.event,
                    record.change.to_string(),
                    record.value,
                    join_commands(record)
                );
            }
        }
    }

    Ok(())
}

fn join_commands(record: &ReplayRecord) -> String {
    record
        .commands
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn resolve_config(settings: Option<PathBuf>) -> anyhow::Result<GestureConfig> {
    Ok(match settings {
        Some(path) => GestureConfig::from_source(&load_settings(&path)?),
        None => GestureConfig::default(),
    })
}

#[derive(Tabled)]
struct SettingRow {
    setting: String,
    value: String,
}

/// Show the resolved gesture configuration
pub fn config(settings: Option<PathBuf>, format: &str) -> anyhow::Result<()> {
    let config = resolve_config(settings)?;

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&config)?),
        OutputFormat::Table | OutputFormat::Text => {
            let value = serde_json::to_value(&config)?;
            let rows = value
                .as_object()
                .into_iter()
                .flatten()
                .map(|(k, v)| SettingRow {
                    setting: k.clone(),
                    value: v.to_string(),
                })
                .collect::<Vec<_>>();

            if OutputFormat::from(format) == OutputFormat::Table {
                println!("{}", to_table(rows));
            } else {
                println!("Resolved gesture configuration:");
                for row in rows {
                    println!("  {:<16} {}", row.setting, row.value);
                }
                println!("  frame step:      {:.2}px", config.frame_step_pixels());
                println!("  time scrub step: {:.2}px", config.time_scrub_pixels());
            }
        }
    }

    Ok(())
}

/// One probed point of the zone map
#[derive(Debug, Serialize, Tabled)]
pub struct ZoneSample {
    pub x: f32,
    pub y: f32,
    #[tabled(display_with = "debug_display")]
    pub zone: Zone,
    #[tabled(display_with = "debug_display")]
    pub column: TapColumn,
    pub deadzone: bool,
}

fn debug_display<T: std::fmt::Debug>(value: &T) -> String {
    format!("{:?}", value)
}

/// Classify a grid of points the way the engine would at contact
pub fn zone_map(metrics: ScreenMetrics, config: &GestureConfig, step: f32) -> Vec<ZoneSample> {
    let band_enabled = config.custom_zone != CustomZoneBehavior::Disabled;
    let mut samples = Vec::new();

    let mut y = step / 2.0;
    while y < metrics.height {
        let mut x = step / 2.0;
        while x < metrics.width {
            let zone = if band_enabled {
                config
                    .custom_band
                    .classify(x, y, metrics.width, metrics.height)
            } else {
                Zone::None
            };
            samples.push(ZoneSample {
                x,
                y,
                zone,
                column: TapColumn::classify(x, metrics.width),
                deadzone: in_deadzone(y, metrics.height) && !zone.is_custom(),
            });
            x += step;
        }
        y += step;
    }
    samples
}

/// Print the zone map for a surface size
pub fn zones(
    width: f32,
    height: f32,
    settings: Option<PathBuf>,
    step: f32,
    format: &str,
) -> anyhow::Result<()> {
    let metrics = ScreenMetrics::new(width, height)?;
    if !(step.is_finite() && step > 0.0) {
        anyhow::bail!("Grid step must be positive, got {}", step);
    }
    let config = resolve_config(settings)?;
    let samples = zone_map(metrics, &config, step);

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&samples)?),
        OutputFormat::Table => println!("{}", to_table(samples)),
        OutputFormat::Text => {
            println!(
                "Zone map {} (custom zone: {:?}, trigger {:.1}px)",
                metrics,
                config.custom_zone,
                metrics.trigger_distance()
            );
            let columns = samples
                .first()
                .map(|first| samples.iter().filter(|s| s.y == first.y).count())
                .unwrap_or(1);
            for row in samples.chunks(columns) {
                let line: String = row.iter().map(zone_char).collect();
                println!("  {}", line);
            }
            println!("\n  # deadzone   L/C/R custom band   l/c/r tap columns");
        }
    }

    Ok(())
}

fn zone_char(sample: &ZoneSample) -> char {
    if sample.deadzone {
        return '#';
    }
    match (sample.zone, sample.column) {
        (Zone::Left, _) => 'L',
        (Zone::Center, _) => 'C',
        (Zone::Right, _) => 'R',
        (Zone::None, TapColumn::LeftTap) => 'l',
        (Zone::None, TapColumn::CenterTap) => 'c',
        (Zone::None, TapColumn::RightTap) => 'r',
    }
}
