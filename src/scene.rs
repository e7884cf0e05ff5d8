//! Screen state machine: Start → Playing → Ended → (Restart) Playing.
//!
//! DOM listeners only queue [`UiEvent`]s; the frame loop hands them to the
//! active scene, which may answer with a [`Transition`]. Scene changes run
//! `on_exit` on the old scene and `on_enter` on the new one.

use rand::rngs::StdRng;

use crate::assets::{Assets, ImageKey};
use crate::audio::{AudioSink, Sfx};
use crate::config::GameConfig;
use crate::game::{self, Frame, GameState, KeyState, Rect};
use crate::render::{self, Gfx, TextStyle};

const IDLE_COLOR: &str = "#0f0";
const HOVER_COLOR: &str = "#ff0";

/// Pointer input in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiEvent {
    PointerMove { x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerLeave,
}

pub enum Transition {
    StartGame,
    /// The fight ended; carries the final state for the ended screen.
    Finish(Box<GameState>),
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Start,
    Playing,
    Ended,
}

/// Per-frame services handed to scenes.
pub struct SceneContext<'a> {
    pub config: &'a GameConfig,
    pub audio: &'a mut dyn AudioSink,
    pub rng: &'a mut StdRng,
    pub keys: KeyState,
    pub now: f64,
    pub dt: f64,
}

pub trait Scene {
    fn kind(&self) -> SceneKind;

    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {}

    fn on_update(&mut self, ctx: &mut SceneContext<'_>) -> Option<Transition>;

    fn on_event(&mut self, _event: UiEvent, _ctx: &mut SceneContext<'_>) -> Option<Transition> {
        None
    }

    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// The fight this scene shows, if any.
    fn fight(&self) -> Option<&GameState> {
        None
    }

    fn draw(&self, gfx: &Gfx, assets: &Assets, config: &GameConfig, now: f64);
}

/// Clickable text button with hover styling.
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub label: &'static str,
    /// Centre in canvas pixels.
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub padding: (f64, f64),
    pub background: &'static str,
    pub outline: Option<f64>,
    pub hovered: bool,
}

impl Button {
    pub fn bounds(&self) -> Rect {
        // Monospace glyphs are ~0.6em wide.
        let text_w = self.label.chars().count() as f64 * self.font_size * 0.6;
        Rect::centered(
            self.x,
            self.y,
            text_w + self.padding.0 * 2.0,
            self.font_size + self.padding.1 * 2.0,
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let r = self.bounds();
        x >= r.x && x <= r.x + r.w && y >= r.y && y <= r.y + r.h
    }

    pub fn label_color(&self) -> &'static str {
        if self.hovered { HOVER_COLOR } else { IDLE_COLOR }
    }

    /// Update hover state; returns true when the event presses the button.
    pub fn handle(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::PointerMove { x, y } => {
                self.hovered = self.contains(x, y);
                false
            }
            UiEvent::PointerDown { x, y } => self.contains(x, y),
            UiEvent::PointerLeave => {
                self.hovered = false;
                false
            }
        }
    }
}

pub struct StartScene {
    start: Button,
}

impl StartScene {
    pub fn new() -> Self {
        Self {
            start: Button {
                label: "Game Start",
                x: 400.0,
                y: 300.0,
                font_size: 32.0,
                padding: (15.0, 10.0),
                background: "#333",
                outline: Some(4.0),
                hovered: false,
            },
        }
    }
}

impl Default for StartScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for StartScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Start
    }

    fn on_update(&mut self, _ctx: &mut SceneContext<'_>) -> Option<Transition> {
        None
    }

    fn on_event(&mut self, event: UiEvent, _ctx: &mut SceneContext<'_>) -> Option<Transition> {
        self.start.handle(event).then_some(Transition::StartGame)
    }

    fn draw(&self, gfx: &Gfx, assets: &Assets, _config: &GameConfig, _now: f64) {
        gfx.clear("#000");
        gfx.image(
            assets.image(ImageKey::Title),
            400.0,
            350.0,
            1.0,
            "#1a1a2e",
            (gfx.width(), gfx.height()),
        );
        gfx.text(
            "BOSS BATTLE GAME",
            400.0,
            200.0,
            TextStyle::outlined(48.0, 6.0).centered(),
        );
        gfx.button(&self.start);
    }
}

pub struct PlayingScene {
    state: GameState,
}

impl PlayingScene {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: GameState::new(config),
        }
    }

    /// Resume a fight from an existing state. Lets host-side tests start a
    /// scene mid-fight; the browser always begins with [`PlayingScene::new`].
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }
}

impl Scene for PlayingScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Playing
    }

    fn fight(&self) -> Option<&GameState> {
        Some(&self.state)
    }

    fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        ctx.audio.play_music(self.state.stage.music());
        ctx.audio.play(Sfx::Fight);
    }

    fn on_update(&mut self, ctx: &mut SceneContext<'_>) -> Option<Transition> {
        let frame = Frame {
            keys: ctx.keys,
            now: ctx.now,
            dt: ctx.dt,
        };
        game::tick(&mut self.state, frame, ctx.config, &mut *ctx.audio, &mut *ctx.rng);
        self.state
            .is_over()
            .then(|| Transition::Finish(Box::new(self.state.clone())))
    }

    fn draw(&self, gfx: &Gfx, assets: &Assets, config: &GameConfig, now: f64) {
        render::draw_fight(gfx, assets, &self.state, config, now);
    }
}

pub struct EndedScene {
    state: Box<GameState>,
    restart: Button,
}

impl EndedScene {
    pub fn new(state: Box<GameState>) -> Self {
        Self {
            state,
            restart: Button {
                label: "Restart",
                x: 400.0,
                y: 400.0,
                font_size: 32.0,
                padding: (15.0, 10.0),
                background: "#000",
                outline: None,
                hovered: false,
            },
        }
    }

}

impl Scene for EndedScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Ended
    }

    fn fight(&self) -> Option<&GameState> {
        Some(&self.state)
    }

    fn on_update(&mut self, ctx: &mut SceneContext<'_>) -> Option<Transition> {
        // Physics is paused, but a pending tint expiry still fires.
        game::fire_timers(&mut self.state, ctx.now, ctx.config, &mut *ctx.audio);
        None
    }

    fn on_event(&mut self, event: UiEvent, _ctx: &mut SceneContext<'_>) -> Option<Transition> {
        self.restart.handle(event).then_some(Transition::Restart)
    }

    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {
        log::info!("Game Restarted");
    }

    fn draw(&self, gfx: &Gfx, assets: &Assets, config: &GameConfig, now: f64) {
        render::draw_fight(gfx, assets, &self.state, config, now);
        gfx.button(&self.restart);
    }
}

pub struct SceneMachine {
    current: Box<dyn Scene>,
}

impl SceneMachine {
    pub fn new() -> Self {
        Self {
            current: Box::new(StartScene::new()),
        }
    }

    /// Start from `scene` instead of the title screen; `on_enter` is not run.
    /// Test-support entry point; the browser runtime uses [`SceneMachine::new`].
    pub fn with_scene(scene: Box<dyn Scene>) -> Self {
        Self { current: scene }
    }

    pub fn kind(&self) -> SceneKind {
        self.current.kind()
    }

    pub fn current(&self) -> &dyn Scene {
        self.current.as_ref()
    }

    pub fn update(&mut self, ctx: &mut SceneContext<'_>) {
        if let Some(t) = self.current.on_update(ctx) {
            self.apply(t, ctx);
        }
    }

    /// Dispatch queued pointer events in arrival order.
    pub fn dispatch(&mut self, events: impl IntoIterator<Item = UiEvent>, ctx: &mut SceneContext<'_>) {
        for event in events {
            if let Some(t) = self.current.on_event(event, ctx) {
                self.apply(t, ctx);
            }
        }
    }

    fn apply(&mut self, transition: Transition, ctx: &mut SceneContext<'_>) {
        let next: Box<dyn Scene> = match transition {
            Transition::StartGame | Transition::Restart => Box::new(PlayingScene::new(ctx.config)),
            Transition::Finish(state) => Box::new(EndedScene::new(state)),
        };
        log::debug!("scene {:?} -> {:?}", self.current.kind(), next.kind());
        self.current.on_exit(ctx);
        self.current = next;
        self.current.on_enter(ctx);
    }
}

impl Default for SceneMachine {
    fn default() -> Self {
        Self::new()
    }
}
