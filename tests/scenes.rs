// Integration tests (native) for the screen flow of the `boss-battle` crate:
// title → fight → end screen → restart. Pointer input is fed as queued
// `UiEvent`s, the same way the browser listeners deliver it.

use boss_battle::game::{Contact, GameState, KeyState, Stage, combat};
use boss_battle::scene::{PlayingScene, Scene, SceneContext};
use boss_battle::{AudioSink, GameConfig, MusicTrack, Outcome, Phase, SceneKind, SceneMachine, Sfx, UiEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
struct Recorder {
    effects: Vec<Sfx>,
    music: Vec<MusicTrack>,
    stops: usize,
}

impl AudioSink for Recorder {
    fn play(&mut self, sfx: Sfx) {
        self.effects.push(sfx);
    }
    fn play_music(&mut self, track: MusicTrack) {
        self.music.push(track);
    }
    fn stop_music(&mut self) {
        self.stops += 1;
    }
}

fn context<'a>(config: &'a GameConfig, audio: &'a mut Recorder, rng: &'a mut StdRng, now: f64) -> SceneContext<'a> {
    SceneContext {
        config,
        audio,
        rng,
        keys: KeyState::default(),
        now,
        dt: 0.016,
    }
}

// Clicking "Game Start" begins stage 1 with its music and the fight cue.
#[test]
fn game_start_button_begins_the_fight() {
    let config = GameConfig::default();
    let mut audio = Recorder::default();
    let mut rng = StdRng::seed_from_u64(0);
    let mut machine = SceneMachine::new();
    {
        let mut ctx = context(&config, &mut audio, &mut rng, 0.0);
        machine.dispatch(
            [
                UiEvent::PointerMove { x: 400.0, y: 300.0 },
                UiEvent::PointerDown { x: 400.0, y: 300.0 },
            ],
            &mut ctx,
        );
    }
    assert_eq!(machine.kind(), SceneKind::Playing);
    assert_eq!(audio.music, vec![MusicTrack::Stage1]);
    assert_eq!(audio.effects, vec![Sfx::Fight]);
}

// A finished fight moves to the end screen; "Restart" starts a fresh run.
#[test]
fn defeat_then_restart() {
    let config = GameConfig::default();
    let mut audio = Recorder::default();
    let mut rng = StdRng::seed_from_u64(5);

    // Lose on stage 2 with points banked and a tint timer still pending.
    let mut state = GameState::new(&config);
    state.stage = Stage::new(2).expect("stage 2");
    state.score = 1700;
    state.player.health = 10;
    let side = Contact {
        player_touching_down: false,
        boss_touching_up: false,
    };
    combat::resolve(&mut state, side, 0.0, &config, &mut audio);
    assert_eq!(state.outcome, Some(Outcome::Defeat));
    assert_eq!(audio.effects, vec![Sfx::GameOver]);
    assert_eq!(audio.stops, 1);

    let mut machine = SceneMachine::with_scene(Box::new(PlayingScene::from_state(state)));
    {
        let mut ctx = context(&config, &mut audio, &mut rng, 16.0);
        machine.update(&mut ctx);
    }
    assert_eq!(machine.kind(), SceneKind::Ended);
    let ended = machine.current().fight().expect("ended screen keeps the fight");
    assert_eq!(ended.score, 1700);
    assert!(ended.physics_paused);

    // Clicks elsewhere and further frames leave the end screen alone.
    {
        let mut ctx = context(&config, &mut audio, &mut rng, 32.0);
        machine.dispatch([UiEvent::PointerDown { x: 50.0, y: 50.0 }], &mut ctx);
        machine.update(&mut ctx);
    }
    assert_eq!(machine.kind(), SceneKind::Ended);

    audio.effects.clear();
    {
        let mut ctx = context(&config, &mut audio, &mut rng, 48.0);
        machine.dispatch([UiEvent::PointerDown { x: 400.0, y: 400.0 }], &mut ctx);
    }
    assert_eq!(machine.kind(), SceneKind::Playing);
    assert_eq!(audio.music, vec![MusicTrack::Stage1]);
    assert_eq!(audio.effects, vec![Sfx::Fight]);

    let fresh = machine.current().fight().expect("new fight");
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.stage.number(), 1);
    assert_eq!(fresh.phase, Phase::Fighting);
    assert_eq!(fresh.outcome, None);
    assert!(!fresh.physics_paused && !fresh.banner_visible);
    assert_eq!(fresh.player.health, 100);
    assert!(!fresh.player.invincible && !fresh.player.tinted);
    assert_eq!(fresh.player.invincibility_timer, None);
    let boss = fresh.boss.as_ref().expect("stage 1 boss");
    assert_eq!((boss.health, boss.max_health), (150, 150));
    assert!(fresh.timers.clone().drain_due(f64::MAX).is_empty());
}

// Events queued behind the start click land on the new fight, not the title.
#[test]
fn queued_events_follow_the_active_scene() {
    let config = GameConfig::default();
    let mut audio = Recorder::default();
    let mut rng = StdRng::seed_from_u64(9);
    let mut machine = SceneMachine::new();
    let mut ctx = context(&config, &mut audio, &mut rng, 0.0);
    machine.dispatch(
        [
            UiEvent::PointerDown { x: 400.0, y: 300.0 },
            UiEvent::PointerDown { x: 400.0, y: 300.0 },
            UiEvent::PointerLeave,
        ],
        &mut ctx,
    );
    machine.update(&mut ctx);
    assert_eq!(machine.kind(), SceneKind::Playing);
}
