//! Swipe navigation configuration
//!
//! Settings for transition timing, gesture thresholds, playback and the
//! navigator's decoration, loaded from `swipe.toml` with environment
//! variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default configuration file, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "swipe.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SwipeConfig {
    /// Commit animation settings
    pub transition: TransitionConfig,
    /// Edge-pan thresholds
    pub gesture: GestureConfig,
    /// Cancel/finish playback
    pub playback: PlaybackConfig,
    /// Side indicator geometry and color
    pub indicator: IndicatorConfig,
    /// Background tint
    pub background: BackgroundConfig,
}

/// Which strategy animates page changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStyle {
    /// Plain slide-over.
    Overlap,
    /// Slide-over plus background tint and indicator.
    #[default]
    Navigation,
}

impl TransitionStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "overlap" => Some(Self::Overlap),
            "navigation" => Some(Self::Navigation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Commit animation length in seconds
    pub duration_secs: f64,
    /// Easing curve name (linear, ease, ease_in, ease_out, ease_in_out)
    pub easing: String,
    pub style: TransitionStyle,
    /// Animate programmatic page changes
    pub animated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Release speed (points/s) in the swipe direction that forces completion
    pub velocity_for_complete: f32,
    /// Fraction past which a release completes
    pub completion_threshold: f32,
    /// Upper bound on the scrubbed fraction
    pub max_fraction: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Display link frame interval in seconds
    pub frame_interval_secs: f64,
    /// Playback rate for cancel/finish
    pub completion_speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Inset from the trailing edge
    pub x_shift: f32,
    pub width: f32,
    pub height: f32,
    /// RGBA, 0..1
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    /// RGBA, 0..1
    pub tint: [f32; 4],
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 0.33,
            easing: "ease_out".to_string(),
            style: TransitionStyle::Navigation,
            animated: true,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            velocity_for_complete: 200.0,
            completion_threshold: 0.5,
            max_fraction: 0.99,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval_secs: 1.0 / 60.0,
            completion_speed: 1.0,
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            x_shift: 20.0,
            width: 4.0,
            height: 50.0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            tint: [180.0 / 255.0, 100.0 / 255.0, 250.0 / 255.0, 0.5],
        }
    }
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl SwipeConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `swipe.toml` from the current directory, or defaults if it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Environment variables take precedence over file values. Values that
    /// do not parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Transition settings
        if let Ok(val) = std::env::var("SWIPE_DURATION") {
            if let Ok(secs) = val.parse::<f64>() {
                self.transition.duration_secs = secs.max(0.0);
            }
        }
        if let Ok(easing) = std::env::var("SWIPE_EASING") {
            self.transition.easing = easing;
        }
        if let Ok(val) = std::env::var("SWIPE_STYLE") {
            if let Some(style) = TransitionStyle::from_name(&val) {
                self.transition.style = style;
            }
        }
        if let Ok(val) = std::env::var("SWIPE_ANIMATED") {
            self.transition.animated = parse_bool(&val);
        }

        // Gesture settings
        if let Ok(val) = std::env::var("SWIPE_VELOCITY_FOR_COMPLETE") {
            if let Ok(v) = val.parse::<f32>() {
                self.gesture.velocity_for_complete = v;
            }
        }

        // Playback settings
        if let Ok(val) = std::env::var("SWIPE_COMPLETION_SPEED") {
            if let Ok(speed) = val.parse::<f64>() {
                self.playback.completion_speed = speed;
            }
        }
        if let Ok(val) = std::env::var("SWIPE_FRAME_INTERVAL") {
            if let Ok(interval) = val.parse::<f64>() {
                self.playback.frame_interval_secs = interval;
            }
        }
    }

    /// Load from `swipe.toml` (or defaults), then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
