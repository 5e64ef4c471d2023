//! Game settings and tuning
//!
//! Loaded from a JSON file (any missing field keeps its default). Defaults
//! reproduce the classic constants in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Plane;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{name}`: {reason}")]
    Invalid {
        name: &'static str,
        reason: &'static str,
    },
}

/// Gameplay balance knobs, owned by every round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Wraparound play field
    pub plane: Plane,

    // === Ship ===
    pub ship_radius: f64,
    /// Thrust acceleration (pixels/s²)
    pub ship_accel: f64,
    /// Turn rate (degrees/s)
    pub ship_turn_rate_deg: f64,
    /// Speed cap (pixels/s)
    pub ship_top_speed: f64,

    // === Projectiles ===
    pub projectile_radius: f64,
    pub projectile_speed: f64,
    /// Outstanding projectile cap per ship
    pub max_projectiles: usize,
    /// Lifetime in seconds; `None` keeps projectiles until they hit something
    pub projectile_ttl: Option<f64>,

    // === Asteroids ===
    pub asteroid_min_speed: f64,
    pub asteroid_speed_range: f64,
    /// Fragment speed as a multiple of the parent's speed
    pub fragment_speed_factor: f64,

    /// Freeze-and-dim period between scenes (seconds)
    pub fade_duration: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            plane: Plane::default(),

            ship_radius: SHIP_RADIUS,
            ship_accel: SHIP_ACCEL,
            ship_turn_rate_deg: SHIP_TURN_RATE_DEG,
            ship_top_speed: SHIP_TOP_SPEED,

            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            max_projectiles: MAX_PROJECTILES,
            projectile_ttl: None,

            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_speed_range: ASTEROID_SPEED_RANGE,
            fragment_speed_factor: FRAGMENT_SPEED_FACTOR,

            fade_duration: FADE_DURATION,
        }
    }
}

impl Tuning {
    /// Ship turn rate in radians/s
    pub fn ship_turn_rate(&self) -> f64 {
        self.ship_turn_rate_deg.to_radians()
    }
}

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Show the title scene at start and after the ship is lost
    pub title_screen: bool,
    /// Longest frame delta fed to the simulation (stall guard)
    pub max_frame_dt: f64,
    /// Longest single simulation sub-step
    pub max_step_dt: f64,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            title_screen: true,
            max_frame_dt: MAX_FRAME_DT,
            max_step_dt: MAX_STEP_DT,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.tuning;
        if !(t.plane.width > 0.0 && t.plane.height > 0.0) {
            return Err(SettingsError::Invalid {
                name: "tuning.plane",
                reason: "width and height must be positive",
            });
        }
        if !(self.max_step_dt > 0.0) {
            return Err(SettingsError::Invalid {
                name: "max_step_dt",
                reason: "must be positive",
            });
        }
        if !(self.max_frame_dt >= self.max_step_dt) {
            return Err(SettingsError::Invalid {
                name: "max_frame_dt",
                reason: "must be at least max_step_dt",
            });
        }
        if self.max_frame_dt / self.max_step_dt > f64::from(MAX_SUBSTEPS) {
            return Err(SettingsError::Invalid {
                name: "max_frame_dt",
                reason: "needs too many sub-steps per frame",
            });
        }
        if t.max_projectiles == 0 {
            return Err(SettingsError::Invalid {
                name: "tuning.max_projectiles",
                reason: "must be at least 1",
            });
        }
        if !(t.fade_duration > 0.0) {
            return Err(SettingsError::Invalid {
                name: "tuning.fade_duration",
                reason: "must be positive",
            });
        }
        if matches!(t.projectile_ttl, Some(ttl) if !(ttl > 0.0)) {
            return Err(SettingsError::Invalid {
                name: "tuning.projectile_ttl",
                reason: "must be positive when set",
            });
        }
        Ok(())
    }

    /// Tuning with a single knob changed, for quick experiments
    pub fn with_tuning(mut self, f: impl FnOnce(&mut Tuning)) -> Self {
        f(&mut self.tuning);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tuning.max_projectiles, 5);
        assert_eq!(settings.tuning.plane.width, 640.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "seed": 7, "tuning": { "projectile_speed": 300.0 } }"#)
                .unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.tuning.projectile_speed, 300.0);
        assert_eq!(settings.tuning.ship_top_speed, SHIP_TOP_SPEED);
        assert!(settings.title_screen);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "max_projectiles": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { name: "tuning.max_projectiles", .. }));

        let err = Settings::from_json(r#"{ "max_step_dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { name: "max_step_dt", .. }));
    }

    #[test]
    fn test_substep_count_is_bounded() {
        let err = Settings::from_json(r#"{ "max_frame_dt": 1e9 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { name: "max_frame_dt", .. }));

        let settings = Settings::from_json(r#"{ "max_frame_dt": 0.25 }"#).unwrap();
        assert_eq!(settings.max_frame_dt, 0.25);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/space-triangle.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io { .. })));
        let settings = Settings::load_or_default(Some(path));
        assert_eq!(settings.seed, Settings::default().seed);
    }

    #[test]
    fn test_roundtrip_json() {
        let settings = Settings::default().with_tuning(|t| t.projectile_ttl = Some(1.5));
        let json = serde_json::to_string(&settings).unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.tuning, settings.tuning);
    }
}
