// Integration tests (native) for the fight rules of the `boss-battle` crate.
// Everything here drives `game::*` directly with a recording audio sink and a
// seeded RNG, so it runs under `cargo test` on the host without a browser.

use boss_battle::game::{self, BossState, Contact, Frame, GameState, KeyState, Phase, Stage, TimerAction, combat};
use boss_battle::{AudioSink, GameConfig, MusicTrack, Outcome, Sfx};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Sound {
    Effect(Sfx),
    Music(MusicTrack),
    Stop,
}

#[derive(Default)]
struct Recorder {
    log: Vec<Sound>,
}

impl Recorder {
    fn played(&self, sfx: Sfx) -> usize {
        self.log.iter().filter(|s| **s == Sound::Effect(sfx)).count()
    }
}

impl AudioSink for Recorder {
    fn play(&mut self, sfx: Sfx) {
        self.log.push(Sound::Effect(sfx));
    }
    fn play_music(&mut self, track: MusicTrack) {
        self.log.push(Sound::Music(track));
    }
    fn stop_music(&mut self) {
        self.log.push(Sound::Stop);
    }
}

const STOMP: Contact = Contact {
    player_touching_down: true,
    boss_touching_up: true,
};

const SIDE: Contact = Contact {
    player_touching_down: false,
    boss_touching_up: false,
};

fn boss_health(state: &GameState) -> Option<i32> {
    state.boss.as_ref().map(|b| b.health)
}

// A single stomp costs the boss 50 and bounces the player up.
#[test]
fn stomp_damages_boss_and_scores() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    let mut audio = Recorder::default();
    combat::resolve(&mut state, STOMP, 0.0, &cfg, &mut audio);
    assert_eq!(boss_health(&state), Some(100));
    assert_eq!(state.score, 100);
    assert_eq!(state.player.body.vy, -200.0);
    assert_eq!(audio.log, vec![Sound::Effect(Sfx::Punch)]);
}

// Three stomps clear stage 1; the next boss appears when the banner expires.
#[test]
fn clearing_stage_one_reveals_stage_two_after_banner() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    let mut audio = Recorder::default();
    for t in [0.0, 100.0, 200.0] {
        combat::resolve(&mut state, STOMP, t, &cfg, &mut audio);
    }
    assert!(state.boss.is_none());
    assert_eq!(state.score, 1300);
    assert_eq!(state.stage.number(), 2);
    assert_eq!(state.phase, Phase::Intermission);
    assert!(state.banner_visible);
    assert_eq!(audio.played(Sfx::Win), 1);

    // Contacts need a boss; nothing happens during the intermission.
    combat::resolve(&mut state, SIDE, 300.0, &cfg, &mut audio);
    assert_eq!(state.player.health, 100);

    game::fire_timers(&mut state, 2199.0, &cfg, &mut audio);
    assert!(state.boss.is_none());
    audio.log.clear();
    game::fire_timers(&mut state, 2200.0, &cfg, &mut audio);
    assert!(!state.banner_visible);
    assert_eq!(state.phase, Phase::Fighting);
    let boss = state.boss.as_ref().expect("stage 2 boss");
    assert_eq!((boss.health, boss.max_health), (300, 300));
    assert_eq!(boss.speed, 400.0);
    assert_eq!(boss.scale, 1.5);
    assert_eq!((boss.body.x, boss.body.y), (700.0, 400.0));
    assert_eq!(
        audio.log,
        vec![Sound::Music(MusicTrack::Stage2), Sound::Effect(Sfx::Fight)]
    );
}

// Side contact hurts once; the invincibility window blocks the follow-up.
#[test]
fn side_contact_hurts_once_per_window() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    let mut audio = Recorder::default();
    combat::resolve(&mut state, SIDE, 0.0, &cfg, &mut audio);
    assert_eq!(state.player.health, 90);
    assert!(state.player.invincible && state.player.tinted);
    assert_eq!(state.player.body.vx, -200.0);

    combat::resolve(&mut state, SIDE, 200.0, &cfg, &mut audio);
    assert_eq!(state.player.health, 90);

    // The blocked contact doesn't lengthen the window: it still ends at 500 ms.
    game::fire_timers(&mut state, 499.0, &cfg, &mut audio);
    assert!(state.player.invincible);
    game::fire_timers(&mut state, 500.0, &cfg, &mut audio);
    assert!(!state.player.invincible && !state.player.tinted);

    combat::resolve(&mut state, SIDE, 600.0, &cfg, &mut audio);
    assert_eq!(state.player.health, 80);
}

// Contact reported every frame still costs 10 health per 500 ms window.
#[test]
fn constant_contact_cannot_keep_the_player_immune() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    let mut audio = Recorder::default();
    let mut now = 0.0;
    while now < 3500.0 {
        game::fire_timers(&mut state, now, &cfg, &mut audio);
        combat::resolve(&mut state, SIDE, now, &cfg, &mut audio);
        now += 100.0;
    }
    assert_eq!(state.player.health, 30);
    assert_eq!(state.timers.drain_due(f64::MAX).len(), 1);
}

// Ten unblocked hits end the run in defeat.
#[test]
fn player_defeat_freezes_the_fight() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    let mut audio = Recorder::default();
    let mut now = 0.0;
    while !state.is_over() {
        combat::resolve(&mut state, SIDE, now, &cfg, &mut audio);
        now += cfg.invincibility_ms;
        game::fire_timers(&mut state, now, &cfg, &mut audio);
    }
    assert_eq!(state.player.health, 0);
    assert_eq!(state.outcome, Some(Outcome::Defeat));
    assert!(state.physics_paused);
    assert_eq!(audio.played(Sfx::GameOver), 1);
    assert!(audio.log.contains(&Sound::Stop));
    assert_eq!(state.score, 0);
}

// Clearing stage 3 wins the game; there is no stage 4 and no banner.
#[test]
fn final_boss_defeat_is_victory() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    state.stage = Stage::LAST;
    state.boss = Some(BossState::spawn(Stage::LAST, &cfg));
    let mut audio = Recorder::default();
    for i in 0..9 {
        combat::resolve(&mut state, STOMP, i as f64 * 50.0, &cfg, &mut audio);
    }
    assert!(state.boss.is_none());
    assert_eq!(state.outcome, Some(Outcome::Victory));
    assert_eq!(state.stage.number(), 3);
    assert_eq!(state.score, 9 * 100 + 1000);
    assert!(!state.banner_visible);
    assert!(state.physics_paused);
    assert!(
        state
            .timers
            .drain_due(f64::MAX)
            .iter()
            .all(|(_, a)| *a != TimerAction::RevealNextStage)
    );
}

// Score only ever goes up, whatever mix of contacts happens.
#[test]
fn score_never_decreases() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    let mut audio = Recorder::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut last = 0;
    for i in 0..400 {
        let now = i as f64 * 120.0;
        let contact = if rng.gen_bool(0.5) { STOMP } else { SIDE };
        combat::resolve(&mut state, contact, now, &cfg, &mut audio);
        game::fire_timers(&mut state, now, &cfg, &mut audio);
        assert!(state.score >= last);
        last = state.score;
    }
}

// A player dropped onto a stationary boss lands a stomp through the physics step.
#[test]
fn falling_onto_the_boss_is_a_stomp() {
    let cfg = GameConfig {
        boss_jump_chance: 0.0,
        ..GameConfig::default()
    };
    let mut state = GameState::new(&cfg);
    if let Some(boss) = state.boss.as_mut() {
        boss.speed = 0.0;
    }
    state.player.body.x = 700.0;
    state.player.body.y = 300.0;
    let mut audio = Recorder::default();
    let mut rng = StdRng::seed_from_u64(1);
    for i in 0..300 {
        let frame = Frame {
            keys: KeyState::default(),
            now: i as f64 * 16.0,
            dt: 0.016,
        };
        game::tick(&mut state, frame, &cfg, &mut audio, &mut rng);
        if state.score > 0 {
            break;
        }
    }
    assert_eq!(boss_health(&state), Some(100));
    assert_eq!(state.score, 100);
    assert_eq!(state.player.health, 100);
    assert_eq!(audio.played(Sfx::Punch), 1);
}

// Holding right runs the player into the arena wall, never through it.
#[test]
fn player_stays_inside_the_world() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    state.boss = None;
    let mut audio = Recorder::default();
    let mut rng = StdRng::seed_from_u64(3);
    let keys = KeyState {
        right: true,
        ..KeyState::default()
    };
    for i in 0..200 {
        let frame = Frame {
            keys,
            now: i as f64 * 16.0,
            dt: 0.016,
        };
        game::tick(&mut state, frame, &cfg, &mut audio, &mut rng);
    }
    assert_eq!(state.player.body.x, 800.0 - 16.0);
    assert!(state.player.grounded());
}
