//! Data-driven game balance
//!
//! Numbers a designer tweaks between builds. Fixed physics lives in
//! [`crate::consts`]. Every field has a default, so a JSON file only needs
//! the keys it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    InvalidRange { field: &'static str, reason: String },
}

/// Procedural level generator ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorTuning {
    pub gap_min: f32,
    pub gap_max: f32,
    /// Signed vertical offset from the previous platform
    pub y_var_min: f32,
    pub y_var_max: f32,
    pub width_min: f32,
    pub width_max: f32,
    /// Highest allowed platform top
    pub band_top: f32,
    /// Lowest allowed platform top, measured up from the screen bottom
    pub band_bottom_margin: f32,
    pub spawn_chance_base: f32,
    /// Added per difficulty level above 1
    pub spawn_chance_per_level: f32,
    pub spawn_chance_cap: f32,
    /// Platforms must be strictly wider than this to host an enemy
    pub min_host_width: f32,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            gap_min: 40.0,
            gap_max: 80.0,
            y_var_min: -40.0,
            y_var_max: 40.0,
            width_min: 150.0,
            width_max: 280.0,
            band_top: 250.0,
            band_bottom_margin: 40.0,
            spawn_chance_base: 0.7,
            spawn_chance_per_level: 0.05,
            spawn_chance_cap: 0.95,
            min_host_width: 180.0,
        }
    }
}

/// Full balance sheet for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub generator: GeneratorTuning,
    /// Score needed per difficulty level
    pub score_per_difficulty: u64,
    /// One point of score per this many units walked
    pub walk_bin_width: f32,
    pub kill_reward: u64,
    pub kill_heal: u32,
    /// Damage for falling off the bottom of the screen
    pub fall_damage: u32,
    /// Ticks a melee skeleton waits between swings
    pub melee_attack_cooldown: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            generator: GeneratorTuning::default(),
            score_per_difficulty: 750,
            walk_bin_width: 80.0,
            kill_reward: 100,
            kill_heal: 1,
            fall_damage: 50,
            melee_attack_cooldown: 60,
        }
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min > max {
        return Err(TuningError::InvalidRange {
            field,
            reason: format!("min {min} is greater than max {max}"),
        });
    }
    Ok(())
}

fn check_probability(field: &'static str, p: f32) -> Result<(), TuningError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(TuningError::InvalidRange {
            field,
            reason: format!("{p} is not a probability"),
        });
    }
    Ok(())
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON balance sheet
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::debug!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let g = &self.generator;
        check_range("generator.gap", g.gap_min, g.gap_max)?;
        check_range("generator.y_var", g.y_var_min, g.y_var_max)?;
        check_range("generator.width", g.width_min, g.width_max)?;
        if g.width_min <= 0.0 {
            return Err(TuningError::InvalidRange {
                field: "generator.width_min",
                reason: "platforms need a positive width".to_string(),
            });
        }
        check_probability("generator.spawn_chance_base", g.spawn_chance_base)?;
        check_probability("generator.spawn_chance_cap", g.spawn_chance_cap)?;
        if g.spawn_chance_per_level < 0.0 {
            return Err(TuningError::InvalidRange {
                field: "generator.spawn_chance_per_level",
                reason: "spawn chance must not fall with difficulty".to_string(),
            });
        }
        if self.score_per_difficulty == 0 {
            return Err(TuningError::InvalidRange {
                field: "score_per_difficulty",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.walk_bin_width <= 0.0 {
            return Err(TuningError::InvalidRange {
                field: "walk_bin_width",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
