//! HUD layout. A pure function of `GameState`; `render` paints it.

use crate::config::GameConfig;

use super::{GameState, Outcome};

pub const BAR_MAX_WIDTH: f64 = 200.0;
pub const BAR_HEIGHT: f64 = 20.0;
pub const PLAYER_BAR_ORIGIN: (f64, f64) = (16.0, 16.0);
pub const BOSS_BAR_ORIGIN: (f64, f64) = (584.0, 16.0);
pub const PLAYER_BAR_COLOR: &str = "#0000ff";
pub const BOSS_BAR_COLOR: &str = "#ff0000";
pub const NEXT_STAGE_BANNER: &str = "Next Stage";

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EndScreen {
    pub outcome: Outcome,
    pub message: &'static str,
    pub final_score: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub player_bar: Bar,
    pub boss_bar: Bar,
    pub stage_label: String,
    pub score_label: String,
    pub banner: Option<&'static str>,
    pub end: Option<EndScreen>,
}

/// Fraction of the 200 px bar, clamped so a negative health never draws.
pub fn bar_width(health: i32, max_health: i32) -> f64 {
    if max_health <= 0 {
        return 0.0;
    }
    (f64::from(health) / f64::from(max_health) * BAR_MAX_WIDTH).clamp(0.0, BAR_MAX_WIDTH)
}

pub fn layout(state: &GameState, cfg: &GameConfig) -> Hud {
    let boss_health = state.boss.as_ref().map_or(0, |b| b.health);
    Hud {
        player_bar: Bar {
            x: PLAYER_BAR_ORIGIN.0,
            y: PLAYER_BAR_ORIGIN.1,
            width: bar_width(state.player.health, cfg.player_max_health),
            color: PLAYER_BAR_COLOR,
        },
        boss_bar: Bar {
            x: BOSS_BAR_ORIGIN.0,
            y: BOSS_BAR_ORIGIN.1,
            width: bar_width(boss_health, state.stage.boss_max_health(cfg)),
            color: BOSS_BAR_COLOR,
        },
        stage_label: format!("Stage: {}", state.stage.number()),
        score_label: format!("Score: {}", state.score),
        banner: state.banner_visible.then_some(NEXT_STAGE_BANNER),
        end: state.outcome.map(|outcome| EndScreen {
            outcome,
            message: outcome.message(),
            final_score: format!("Final Score: {}", state.score),
        }),
    }
}
