//! Data-driven game balance
//!
//! Every gameplay constant lives here. Defaults reproduce the shipped feel of the
//! game; a JSON file can override any subset of fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating tuning data
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Immutable playfield geometry shared by every spawner/controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Walkable surface level (screen y grows downward)
    pub ground_y: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ground_y: 350.0,
        }
    }
}

/// Half-open height range `[min, max)` for randomly sized obstacles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl HeightRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Fixed horizontal position of the player's left edge
    pub x: f32,
    pub width: f32,
    pub standing_height: f32,
    pub ducking_height: f32,
    pub gravity: f32,
    /// Upward impulse (negative)
    pub jump_impulse: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            x: 250.0,
            width: 30.0,
            standing_height: 50.0,
            ducking_height: 30.0,
            gravity: 0.8,
            jump_impulse: -20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Ticks between spawns at the start of a run
    pub base_interval: u32,
    /// Spawn interval never drops below this
    pub min_interval: u32,
    /// Interval shrinks by `speed / speed_divisor` ticks
    pub speed_divisor: u32,
    /// Chance that a spawn is a flying obstacle
    pub flying_chance: f64,
    /// Chance that a ground obstacle is tall
    pub tall_chance: f64,

    // === Ground obstacles ===
    pub ground_width: f32,
    pub normal_height: HeightRange,
    pub tall_height: HeightRange,
    /// Height of one building floor (render hint only)
    pub floor_height: f32,

    // === Flying obstacles ===
    pub flying_width: f32,
    pub flying_height: f32,
    /// Distance from the ground line to the top of a flying obstacle
    pub flying_altitude: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            base_interval: 120,
            min_interval: 60,
            speed_divisor: 2,
            flying_chance: 0.3,
            tall_chance: 0.3,
            ground_width: 40.0,
            normal_height: HeightRange::new(30.0, 60.0),
            tall_height: HeightRange::new(60.0, 80.0),
            floor_height: 15.0,
            flying_width: 60.0,
            flying_height: 20.0,
            flying_altitude: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub base_width: f32,
    pub base_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Obstacles closer than this (and ahead) are considered for a jump
    pub jump_trigger_distance: f32,
    /// Only obstacles strictly taller than this are jumped
    pub jump_height_threshold: f32,
    /// Ticks before the enemy may jump again
    pub jump_cooldown: u32,
    /// Hits needed to send the enemy into hiding
    pub hit_threshold: u32,
    /// Ticks spent hidden (10 seconds at 60 Hz)
    pub hide_duration: u32,
    pub anchor_x: f32,
    /// Leftward shift of the anchor on every respawn
    pub anchor_step: f32,
    pub min_anchor_x: f32,
    /// Growth added to the size multiplier on every escalation
    pub size_step: f32,
    pub max_size_multiplier: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            base_width: 40.0,
            base_height: 50.0,
            gravity: 0.8,
            jump_impulse: -15.0,
            jump_trigger_distance: 80.0,
            jump_height_threshold: 30.0,
            jump_cooldown: 30,
            hit_threshold: 10,
            hide_duration: 600,
            anchor_x: 50.0,
            anchor_step: 20.0,
            min_anchor_x: 10.0,
            size_step: 0.2,
            max_size_multiplier: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    /// Scroll speed (pixels per tick) at score zero
    pub base_speed: u32,
    pub score_per_tick: u64,
    /// Speed rises by one every `speed_step_score` points
    pub speed_step_score: u64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            base_speed: 5,
            score_per_tick: 1,
            speed_step_score: 500,
        }
    }
}

/// Complete tuning set for a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield: Playfield,
    pub player: PlayerTuning,
    pub obstacles: ObstacleTuning,
    pub enemy: EnemyTuning,
    pub scoring: ScoringTuning,
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        let pf = &self.playfield;
        if pf.width <= 0.0 || pf.height <= 0.0 {
            return invalid("playfield", "dimensions must be positive");
        }
        if pf.ground_y <= 0.0 || pf.ground_y > pf.height {
            return invalid("playfield.ground_y", "must lie inside the playfield");
        }

        let p = &self.player;
        if p.gravity <= 0.0 {
            return invalid("player.gravity", "must be positive");
        }
        if p.jump_impulse >= 0.0 {
            return invalid("player.jump_impulse", "must point upward (negative)");
        }
        if p.ducking_height <= 0.0 || p.ducking_height >= p.standing_height {
            return invalid("player.ducking_height", "must be positive and below standing height");
        }

        let o = &self.obstacles;
        if o.min_interval == 0 || o.min_interval > o.base_interval {
            return invalid("obstacles.min_interval", "must be in 1..=base_interval");
        }
        if o.speed_divisor == 0 {
            return invalid("obstacles.speed_divisor", "must be non-zero");
        }
        if !(0.0..=1.0).contains(&o.flying_chance) || !(0.0..=1.0).contains(&o.tall_chance) {
            return invalid("obstacles", "chances must be within [0, 1]");
        }
        for (field, range) in [
            ("obstacles.normal_height", o.normal_height),
            ("obstacles.tall_height", o.tall_height),
        ] {
            if range.min <= 0.0 || range.min >= range.max {
                return invalid(field, "range must be non-empty and positive");
            }
        }
        if o.floor_height <= 0.0 {
            return invalid("obstacles.floor_height", "must be positive");
        }

        let e = &self.enemy;
        if e.gravity <= 0.0 {
            return invalid("enemy.gravity", "must be positive");
        }
        if e.jump_impulse >= 0.0 {
            return invalid("enemy.jump_impulse", "must point upward (negative)");
        }
        if e.hit_threshold == 0 {
            return invalid("enemy.hit_threshold", "must be non-zero");
        }
        if e.hide_duration == 0 {
            return invalid("enemy.hide_duration", "must be non-zero");
        }
        if e.min_anchor_x > e.anchor_x {
            return invalid("enemy.min_anchor_x", "must not exceed anchor_x");
        }
        if e.max_size_multiplier < 1.0 {
            return invalid("enemy.max_size_multiplier", "must be at least 1.0");
        }

        if self.scoring.speed_step_score == 0 {
            return invalid("scoring.speed_step_score", "must be non-zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy": { "hit_threshold": 3 } }"#).unwrap();
        assert_eq!(tuning.enemy.hit_threshold, 3);
        assert_eq!(tuning.enemy.hide_duration, 600);
        assert_eq!(tuning.obstacles.base_interval, 120);
        assert_eq!(tuning.playfield, Playfield::default());
    }

    #[test]
    fn test_rejects_inverted_spawn_intervals() {
        let err = Tuning::from_json(r#"{ "obstacles": { "base_interval": 50, "min_interval": 60 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "obstacles.min_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = Tuning::from_json(r#"{ "player": { "jump_impulse": 4.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "player.jump_impulse", .. }));
    }

    fn rejected_field(json: &str) -> &'static str {
        match Tuning::from_json(json) {
            Err(TuningError::Invalid { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_chances_outside_unit_interval() {
        assert_eq!(rejected_field(r#"{ "obstacles": { "flying_chance": 1.5 } }"#), "obstacles");
        assert_eq!(rejected_field(r#"{ "obstacles": { "tall_chance": -0.1 } }"#), "obstacles");
        assert!(Tuning::from_json(r#"{ "obstacles": { "flying_chance": 1.0 } }"#).is_ok());
    }

    #[test]
    fn test_rejects_empty_height_ranges() {
        assert_eq!(
            rejected_field(r#"{ "obstacles": { "normal_height": { "min": 40.0, "max": 40.0 } } }"#),
            "obstacles.normal_height"
        );
        assert_eq!(
            rejected_field(r#"{ "obstacles": { "tall_height": { "min": 80.0, "max": 60.0 } } }"#),
            "obstacles.tall_height"
        );
    }

    #[test]
    fn test_rejects_zero_divisors() {
        assert_eq!(
            rejected_field(r#"{ "obstacles": { "speed_divisor": 0 } }"#),
            "obstacles.speed_divisor"
        );
        assert_eq!(
            rejected_field(r#"{ "scoring": { "speed_step_score": 0 } }"#),
            "scoring.speed_step_score"
        );
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        match err {
            TuningError::Io { path, .. } => assert!(path.ends_with("here.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
