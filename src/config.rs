/// Tunable game constants.
///
/// Defaults reproduce the classic arcade feel; a JSON file may override any
/// subset of fields (missing fields keep their default).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::EnemyKind;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Frames between two spawn decisions.
    pub spawn_interval: u64,
    /// Every this many spawn decisions a pickup replaces the enemy.
    pub pickup_period: u64,
    /// Every this many spawn decisions the pickup is a bomb.
    pub bomb_pickup_period: u64,
    /// Downward speed of enemies and pickups, in canvas units per frame.
    pub base_speed: f32,
    pub boosted_speed: f32,
    /// Chance that a small or middle enemy spawns with `boosted_speed`.
    pub boost_chance: f64,
    /// Upward speed of player bullets.
    pub bullet_speed: f32,
    /// Frames between two volleys of the aircraft.
    pub fire_interval: u64,
    /// Volleys fired as a blue pair after a bullet pickup.
    pub double_shot_volleys: u32,
    pub explosion_frames: u64,
    /// Longest press that still counts as a tap, in milliseconds.
    pub single_click_ms: u64,
    /// Window between two tap releases that makes a double tap.
    pub double_click_ms: u64,
    pub small_enemy_value: u64,
    pub middle_enemy_value: u64,
    pub big_enemy_value: u64,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            spawn_interval: 30,
            pickup_period: 25,
            bomb_pickup_period: 50,
            base_speed: 2.0,
            boosted_speed: 4.0,
            boost_chance: 1.0 / 3.0,
            bullet_speed: 10.0,
            fire_interval: 7,
            double_shot_volleys: 140,
            explosion_frames: 14,
            single_click_ms: 200,
            double_click_ms: 300,
            small_enemy_value: 1000,
            middle_enemy_value: 6000,
            big_enemy_value: 30000,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The effective configuration, every field spelled out.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("spawn_interval", self.spawn_interval),
            ("pickup_period", self.pickup_period),
            ("bomb_pickup_period", self.bomb_pickup_period),
            ("fire_interval", self.fire_interval),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be > 0")));
            }
        }
        if !(0.0..=1.0).contains(&self.boost_chance) {
            return Err(ConfigError::Invalid(format!(
                "boost_chance must be in [0, 1], got {}",
                self.boost_chance
            )));
        }
        if self.bullet_speed <= 0.0 {
            return Err(ConfigError::Invalid("bullet_speed must be > 0".to_string()));
        }
        Ok(())
    }

    /// Score awarded per enemy destroyed.
    pub fn score_for(&self, kind: EnemyKind) -> u64 {
        match kind {
            EnemyKind::Small => self.small_enemy_value,
            EnemyKind::Middle => self.middle_enemy_value,
            EnemyKind::Big => self.big_enemy_value,
        }
    }
}
