//! Tuning constants for a game session.
//!
//! `GameConfig::default()` is the shipped balance. With the `serde_json`
//! feature a page can override any subset of fields by passing JSON to
//! `start_game_with_config`; missing fields fall back to the defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{min_field}` ({min}) must not exceed `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("`{field}` must be a probability in [0, 1], got {value}")]
    NotProbability { field: &'static str, value: f64 },
    #[cfg(feature = "serde_json")]
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    // World
    pub width: f64,
    pub height: f64,
    pub gravity: f64,
    // Player movement (px/s)
    pub player_speed: f64,
    pub jump_velocity: f64,
    pub double_jump_velocity: f64,
    pub descend_velocity: f64,
    // Player health / damage
    pub player_max_health: i32,
    pub contact_damage: i32,
    pub knockback: f64,
    pub invincibility_ms: f64,
    // Stomping
    pub stomp_damage: i32,
    pub stomp_bounce: f64,
    pub hit_score: u32,
    pub defeat_score: u32,
    // Boss (scaled by stage number)
    pub boss_base_health: i32,
    pub boss_base_speed: f64,
    pub boss_turn_min_ms: f64,
    pub boss_turn_max_ms: f64,
    pub boss_jump_chance: f64,
    pub boss_jump_min: f64,
    pub boss_jump_max: f64,
    pub arena_left: f64,
    pub arena_right: f64,
    // Stage flow
    pub banner_ms: f64,
    // Audio
    pub music_volume: f64,
    pub jump_volume: f64,
    /// Prefix for locally hosted assets (`boss-2.png`, audio tracks, ...).
    pub asset_base: String,
    /// Draw physics bodies and log at debug level.
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            gravity: 300.0,
            player_speed: 480.0,
            jump_velocity: 330.0,
            double_jump_velocity: 300.0,
            descend_velocity: 450.0,
            player_max_health: 100,
            contact_damage: 10,
            knockback: 200.0,
            invincibility_ms: 500.0,
            stomp_damage: 50,
            stomp_bounce: 200.0,
            hit_score: 100,
            defeat_score: 1000,
            boss_base_health: 150,
            boss_base_speed: 200.0,
            boss_turn_min_ms: 2000.0,
            boss_turn_max_ms: 4000.0,
            boss_jump_chance: 0.3,
            boss_jump_min: 300.0,
            boss_jump_max: 400.0,
            arena_left: 50.0,
            arena_right: 750.0,
            banner_ms: 2000.0,
            music_volume: 0.3,
            jump_volume: 0.3,
            asset_base: "assets/".to_string(),
            debug: false,
        }
    }
}

impl GameConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the game loop can't run with, such as an empty random
    /// range or a non-positive size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("width", self.width),
            ("height", self.height),
            ("gravity", self.gravity),
            ("player_max_health", self.player_max_health as f64),
            ("boss_base_health", self.boss_base_health as f64),
            ("boss_base_speed", self.boss_base_speed),
            ("invincibility_ms", self.invincibility_ms),
            ("banner_ms", self.banner_ms),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        let ranges = [
            (
                "boss_turn_min_ms",
                "boss_turn_max_ms",
                self.boss_turn_min_ms,
                self.boss_turn_max_ms,
            ),
            (
                "boss_jump_min",
                "boss_jump_max",
                self.boss_jump_min,
                self.boss_jump_max,
            ),
            ("arena_left", "arena_right", self.arena_left, self.arena_right),
        ];
        for (min_field, max_field, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvertedRange {
                    min_field,
                    max_field,
                    min,
                    max,
                });
            }
        }
        for (field, value) in [
            ("boss_jump_chance", self.boss_jump_chance),
            ("music_volume", self.music_volume),
            ("jump_volume", self.jump_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotProbability { field, value });
            }
        }
        Ok(())
    }

    /// Resolve a locally hosted asset file name against `asset_base`.
    pub fn asset_url(&self, file: &str) -> String {
        if file.starts_with("http://") || file.starts_with("https://") {
            return file.to_string();
        }
        let base = self.asset_base.trim_end_matches('/');
        if base.is_empty() {
            file.to_string()
        } else {
            format!("{base}/{file}")
        }
    }
}
