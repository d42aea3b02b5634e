//! Data-driven game balance
//!
//! Every physics and geometry constant the simulation reads lives here so a
//! driver can override them (JSON, tests, a different canvas size) without
//! touching the step function. Values are per tick, not per second.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning set cannot be used
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// The JSON document could not be parsed. String describes the error.
    Parse(String),
    /// A parameter that must be strictly positive was zero or negative
    NonPositive(&'static str),
    /// A parameter was NaN or infinite
    NotFinite(&'static str),
    /// The gap, minimum obstacle height and ground cannot fit in the playfield
    ImpossibleGeometry {
        playfield_height: f32,
        required: f32,
    },
    /// The entity does not fit inside the playfield at its start position
    EntityOutOfBounds,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "bad tuning document: {}", msg),
            Self::NonPositive(name) => write!(f, "{} must be greater than zero", name),
            Self::NotFinite(name) => write!(f, "{} must be a finite number", name),
            Self::ImpossibleGeometry {
                playfield_height,
                required,
            } => write!(
                f,
                "obstacles need {} px of height but the playfield is only {} px",
                required, playfield_height
            ),
            Self::EntityOutOfBounds => write!(f, "entity does not fit inside the playfield"),
        }
    }
}

impl Error for TuningError {}

/// Named, overridable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration added to velocity every tick
    pub gravity: f32,
    /// Velocity set by a flap (negative = upward)
    pub lift: f32,
    /// Distance every obstacle moves left per tick
    pub scroll_speed: f32,

    // === Obstacles ===
    /// Ticks between obstacle pair spawns
    pub spawn_interval: u64,
    /// Vertical opening between the top and bottom halves
    pub gap_height: f32,
    /// Smallest height a bottom half may be drawn with
    pub min_obstacle_height: f32,
    pub obstacle_width: f32,

    // === Entity ===
    /// Fixed horizontal centre of the entity
    pub entity_x: f32,
    pub entity_width: f32,
    pub entity_height: f32,
    /// Circle radius used when no sprite is available
    pub entity_radius: f32,

    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Height of the ground strip at the bottom of the playfield
    pub ground_height: f32,

    /// Simulation steps per second the constants above were tuned for
    pub tick_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            lift: LIFT,
            scroll_speed: SCROLL_SPEED,

            spawn_interval: SPAWN_INTERVAL,
            gap_height: GAP_HEIGHT,
            min_obstacle_height: MIN_OBSTACLE_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,

            entity_x: ENTITY_X,
            entity_width: ENTITY_WIDTH,
            entity_height: ENTITY_HEIGHT,
            entity_radius: ENTITY_RADIUS,

            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            tick_rate: TICK_RATE,
        }
    }
}

impl Tuning {
    /// Default tuning resized to a given playfield
    pub fn for_playfield(width: f32, height: f32) -> Self {
        Self {
            playfield_width: width,
            playfield_height: height,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active tuning)
    pub fn to_json(&self) -> String {
        // Plain struct of numbers, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Highest bottom-half height that still leaves the gap above the ground
    pub fn max_obstacle_height(&self) -> f32 {
        self.playfield_height - self.ground_height - self.gap_height
    }

    /// Heights a bottom half may be drawn from, or `None` if nothing fits
    ///
    /// Holds for any tuning, validated or not: both halves of a pair drawn
    /// from this range have non-negative height and lie inside the playfield.
    pub fn bottom_height_range(&self) -> Option<(f32, f32)> {
        if !self.playfield_height.is_finite() || !self.gap_height.is_finite() {
            return None;
        }
        let min_h = self.min_obstacle_height.max(0.0);
        let max_h = self
            .max_obstacle_height()
            .min(self.playfield_height - self.gap_height.max(0.0));
        if !min_h.is_finite() || !max_h.is_finite() || max_h < min_h {
            return None;
        }
        Some((min_h, max_h))
    }

    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Check the parameters describe a playable world
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("gravity", self.gravity),
            ("lift", self.lift),
            ("scroll_speed", self.scroll_speed),
            ("gap_height", self.gap_height),
            ("min_obstacle_height", self.min_obstacle_height),
            ("obstacle_width", self.obstacle_width),
            ("entity_x", self.entity_x),
            ("entity_width", self.entity_width),
            ("entity_height", self.entity_height),
            ("entity_radius", self.entity_radius),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("ground_height", self.ground_height),
            ("tick_rate", self.tick_rate),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NotFinite(name));
            }
        }

        let positives = [
            ("scroll_speed", self.scroll_speed),
            ("gap_height", self.gap_height),
            ("obstacle_width", self.obstacle_width),
            ("entity_width", self.entity_width),
            ("entity_height", self.entity_height),
            ("entity_radius", self.entity_radius),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("tick_rate", self.tick_rate),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(TuningError::NonPositive(name));
            }
        }
        if self.spawn_interval == 0 {
            return Err(TuningError::NonPositive("spawn_interval"));
        }
        if self.min_obstacle_height < 0.0 || self.ground_height < 0.0 {
            return Err(TuningError::NonPositive("min_obstacle_height/ground_height"));
        }

        let required = self.min_obstacle_height + self.gap_height + self.ground_height;
        if required > self.playfield_height {
            return Err(TuningError::ImpossibleGeometry {
                playfield_height: self.playfield_height,
                required,
            });
        }

        let half_h = self.entity_height / 2.0;
        if self.entity_x < 0.0
            || self.entity_x > self.playfield_width
            || self.playfield_height / 2.0 + half_h >= self.ground_y()
        {
            return Err(TuningError::EntityOutOfBounds);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.max_obstacle_height(), 350.0);
        assert_eq!(tuning.ground_y(), 500.0);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "spawn_interval": 90 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.spawn_interval, 90);
        // Untouched fields keep their defaults
        assert_eq!(tuning.lift, LIFT);
        assert_eq!(tuning.playfield_height, PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_json_parse_error() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_impossible_geometry_rejected() {
        let tuning = Tuning {
            playfield_height: 300.0,
            ..Tuning::default()
        };
        // 100 min + 150 gap + 100 ground = 350 > 300
        assert_eq!(
            tuning.validate(),
            Err(TuningError::ImpossibleGeometry {
                playfield_height: 300.0,
                required: 350.0,
            })
        );
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let tuning = Tuning {
            spawn_interval: 0,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonPositive("spawn_interval"))
        );
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning {
            scroll_speed: f32::NAN,
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::NotFinite("scroll_speed")));
    }

    #[test]
    fn test_non_finite_physics_rejected() {
        let nan_gravity = Tuning {
            gravity: f32::NAN,
            ..Tuning::default()
        };
        assert_eq!(nan_gravity.validate(), Err(TuningError::NotFinite("gravity")));

        let infinite_lift = Tuning {
            lift: f32::NEG_INFINITY,
            ..Tuning::default()
        };
        assert_eq!(infinite_lift.validate(), Err(TuningError::NotFinite("lift")));

        let nan_x = Tuning {
            entity_x: f32::NAN,
            ..Tuning::default()
        };
        assert_eq!(nan_x.validate(), Err(TuningError::NotFinite("entity_x")));
    }

    #[test]
    fn test_height_range_bounded_by_playfield() {
        let tuning = Tuning {
            ground_height: -200.0,
            ..Tuning::default()
        };
        // Ground no longer limits the draw, the playfield does
        assert_eq!(tuning.bottom_height_range(), Some((100.0, 450.0)));

        let too_short = Tuning {
            playfield_height: 300.0,
            ..Tuning::default()
        };
        assert_eq!(too_short.bottom_height_range(), None);
        assert_eq!(Tuning::default().bottom_height_range(), Some((100.0, 350.0)));
    }

    #[test]
    fn test_json_roundtrip_of_resized_playfield() {
        let tuning = Tuning::for_playfield(800.0, 900.0);
        let back = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(back, tuning);
    }

    #[test]
    fn test_error_messages() {
        let err = TuningError::NonPositive("gap_height");
        assert_eq!(err.to_string(), "gap_height must be greater than zero");
    }
}
