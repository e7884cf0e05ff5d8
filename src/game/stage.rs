//! Stage definitions and the stage director.
//!
//! Progression is `Stage1 → Stage2 → Stage3 → Victory`, with `Defeat`
//! reachable from anywhere once the player's health runs out.

use crate::audio::{AudioSink, MusicTrack, Sfx};
use crate::config::GameConfig;

use super::{BossState, GameState, Outcome, Phase, TimerAction};

/// Static per-stage boss description.
#[derive(Clone, Copy, Debug)]
pub struct StageDesc {
    pub sprite: &'static str,
    /// Unscaled sprite size in pixels. The body is `size * scale` and the
    /// sprite is stretched over it, so boss images should be authored 64×64.
    pub size: (f64, f64),
    pub scale: f64,
    pub spawn_y: f64,
    pub music: MusicTrack,
}

const STAGE_COUNT: u8 = 3;

static STAGES: [StageDesc; STAGE_COUNT as usize] = [
    StageDesc {
        sprite: "boss1",
        size: (64.0, 64.0),
        scale: 1.0,
        spawn_y: 450.0,
        music: MusicTrack::Stage1,
    },
    StageDesc {
        sprite: "boss2",
        size: (64.0, 64.0),
        scale: 1.5,
        spawn_y: 400.0,
        music: MusicTrack::Stage2,
    },
    StageDesc {
        sprite: "boss3",
        size: (64.0, 64.0),
        scale: 1.5,
        spawn_y: 400.0,
        music: MusicTrack::Stage3,
    },
];

/// Boss encounter tier, always within `1..=LAST`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stage(u8);

impl Stage {
    pub const FIRST: Stage = Stage(1);
    pub const LAST: Stage = Stage(STAGE_COUNT);

    pub fn new(number: u8) -> Option<Stage> {
        (1..=Self::LAST.0).contains(&number).then_some(Stage(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Option<Stage> {
        Stage::new(self.0 + 1)
    }

    pub fn desc(self) -> &'static StageDesc {
        &STAGES[self.0 as usize - 1]
    }

    pub fn boss_max_health(self, cfg: &GameConfig) -> i32 {
        cfg.boss_base_health * i32::from(self.0)
    }

    pub fn boss_speed(self, cfg: &GameConfig) -> f64 {
        cfg.boss_base_speed * f64::from(self.0)
    }

    pub fn music(self) -> MusicTrack {
        self.desc().music
    }
}

/// Called when a stomp takes the boss to zero health.
pub fn on_boss_defeated(state: &mut GameState, now: f64, cfg: &GameConfig, audio: &mut dyn AudioSink) {
    match state.stage.next() {
        None => end_game(state, Outcome::Victory, audio),
        Some(next) => {
            log::info!("stage {} cleared, score {}", state.stage.number(), state.score);
            state.stage = next;
            state.phase = Phase::Intermission;
            state.banner_visible = true;
            state
                .timers
                .schedule(now, cfg.banner_ms, TimerAction::RevealNextStage);
        }
    }
}

/// Banner timer expiry: hide the banner and start the new stage's fight.
pub fn reveal_next_stage(state: &mut GameState, cfg: &GameConfig, audio: &mut dyn AudioSink) {
    if state.is_over() {
        return;
    }
    state.banner_visible = false;
    state.phase = Phase::Fighting;
    let boss = BossState::spawn(state.stage, cfg);
    log::debug!(
        "spawned {} with {} hp at speed {}",
        boss.sprite,
        boss.health,
        boss.speed
    );
    state.boss = Some(boss);
    audio.play_music(state.stage.music());
    audio.play(Sfx::Fight);
}

pub fn end_game(state: &mut GameState, outcome: Outcome, audio: &mut dyn AudioSink) {
    if state.is_over() {
        return;
    }
    state.outcome = Some(outcome);
    state.physics_paused = true;
    audio.stop_music();
    match outcome {
        Outcome::Victory => audio.play(Sfx::Win),
        Outcome::Defeat => audio.play(Sfx::GameOver),
    }
    let verdict = match outcome {
        Outcome::Victory => "Victory!",
        Outcome::Defeat => "Defeat.",
    };
    log::info!("Game Over. {verdict} Final Score: {}", state.score);
}
