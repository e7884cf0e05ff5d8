//! Boss-fight rules.
//!
//! `GameState` owns everything a running fight mutates: the player, the
//! current boss, stage, score, pending timers and the end outcome. The
//! submodules are the per-frame systems that operate on it:
//!
//! - `input`: arrow keys → player velocity and jump bookkeeping
//! - `boss_ai`: random wandering and hopping
//! - `physics`: gravity, platform and player/boss contacts
//! - `combat`: stomps and contact damage
//! - `stage`: boss progression, victory and defeat
//! - `hud`: the overlay model drawn each frame
//!
//! Nothing in here touches the DOM, so the whole fight runs under
//! `cargo test` on the host.

use rand::Rng;

use crate::audio::AudioSink;
use crate::config::GameConfig;

pub mod boss_ai;
pub mod combat;
pub mod hud;
pub mod input;
pub mod physics;
pub mod stage;
pub mod timers;

pub use input::{KeyState, PlayerAnim};
pub use physics::{Body, Contact, Rect, StepReport, World};
pub use stage::Stage;
pub use timers::{TimerAction, TimerId, Timers};

pub const PLAYER_SPAWN: (f64, f64) = (100.0, 450.0);
pub const PLAYER_SIZE: (f64, f64) = (32.0, 48.0);
pub const BOSS_SPAWN_X: f64 = 700.0;
/// Ground platform: the 400×32 platform sprite at scale 2.
pub const GROUND: Rect = Rect {
    x: 0.0,
    y: 536.0,
    w: 800.0,
    h: 64.0,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Victory => "Game Clear! Victory!",
            Outcome::Defeat => "Game Over",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Fighting,
    /// Boss beaten, "Next Stage" banner up, next boss not yet spawned.
    Intermission,
}

#[derive(Clone, Debug)]
pub struct PlayerState {
    pub body: Body,
    pub health: i32,
    pub anim: PlayerAnim,
    pub invincible: bool,
    pub tinted: bool,
    pub invincibility_timer: Option<TimerId>,
    pub can_double_jump: bool,
    pub has_double_jumped: bool,
    pub jump_key_released: bool,
    pub can_force_descend: bool,
}

impl PlayerState {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            body: Body::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1, PLAYER_SIZE.0, PLAYER_SIZE.1),
            health: cfg.player_max_health,
            anim: PlayerAnim::Turn,
            invincible: false,
            tinted: false,
            invincibility_timer: None,
            can_double_jump: false,
            has_double_jumped: false,
            jump_key_released: true,
            can_force_descend: true,
        }
    }

    pub fn grounded(&self) -> bool {
        self.body.touching.down
    }
}

#[derive(Clone, Debug)]
pub struct BossState {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub speed: f64,
    pub scale: f64,
    pub sprite: &'static str,
    /// -1 = left, 1 = right.
    pub direction: i8,
    /// Timestamp (ms) after which the AI picks a new direction.
    pub next_change_at: f64,
}

impl BossState {
    pub fn spawn(stage: Stage, cfg: &GameConfig) -> Self {
        let desc = stage.desc();
        let (w, h) = (desc.size.0 * desc.scale, desc.size.1 * desc.scale);
        Self {
            body: Body::new(BOSS_SPAWN_X, desc.spawn_y, w, h),
            health: stage.boss_max_health(cfg),
            max_health: stage.boss_max_health(cfg),
            speed: stage.boss_speed(cfg),
            scale: desc.scale,
            sprite: desc.sprite,
            direction: 1,
            next_change_at: 0.0,
        }
    }

    pub fn grounded(&self) -> bool {
        self.body.touching.down
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub world: World,
    pub player: PlayerState,
    pub boss: Option<BossState>,
    pub stage: Stage,
    pub score: u32,
    pub phase: Phase,
    pub banner_visible: bool,
    pub outcome: Option<Outcome>,
    pub physics_paused: bool,
    pub timers: Timers,
}

impl GameState {
    pub fn new(cfg: &GameConfig) -> Self {
        let mut world = World::new(cfg.width, cfg.height, cfg.gravity);
        world.add_platform(GROUND);
        Self {
            world,
            player: PlayerState::new(cfg),
            boss: Some(BossState::spawn(Stage::FIRST, cfg)),
            stage: Stage::FIRST,
            score: 0,
            phase: Phase::Fighting,
            banner_visible: false,
            outcome: None,
            physics_paused: false,
            timers: Timers::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Everything one frame needs from the outside.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frame {
    pub keys: KeyState,
    /// Milliseconds since page load (the rAF timestamp).
    pub now: f64,
    /// Seconds since the previous frame.
    pub dt: f64,
}

/// Advance the fight by one frame.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    frame: Frame,
    cfg: &GameConfig,
    audio: &mut dyn AudioSink,
    rng: &mut R,
) {
    fire_timers(state, frame.now, cfg, audio);

    if !state.is_over() {
        input::poll(&mut state.player, frame.keys, cfg, audio);
        if let Some(boss) = state.boss.as_mut() {
            boss_ai::steer(boss, frame.now, cfg, rng);
        }
    }

    if state.physics_paused {
        return;
    }
    let report = state
        .world
        .step(&mut state.player.body, state.boss.as_mut().map(|b| &mut b.body), frame.dt);
    if report.player_on_platform {
        input::land(&mut state.player);
    }
    if let Some(contact) = report.player_boss {
        combat::resolve(state, contact, frame.now, cfg, audio);
    }
}

/// Run every timer due at `now`. Also used by the ended screen, where the
/// fight is frozen but an invincibility expiry may still be pending.
pub fn fire_timers(state: &mut GameState, now: f64, cfg: &GameConfig, audio: &mut dyn AudioSink) {
    for (id, action) in state.timers.drain_due(now) {
        match action {
            TimerAction::EndInvincibility => {
                if state.player.invincibility_timer == Some(id) {
                    state.player.invincibility_timer = None;
                    state.player.invincible = false;
                    state.player.tinted = false;
                }
            }
            TimerAction::RevealNextStage => stage::reveal_next_stage(state, cfg, audio),
        }
    }
}
