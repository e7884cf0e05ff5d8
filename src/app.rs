//! Browser runtime: canvas setup, DOM listeners and the animation loop.
//!
//! The running app lives in a thread-local cell. Listeners only record key
//! state and queue pointer events; all game and scene logic runs inside
//! the `requestAnimationFrame` callback.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

use crate::assets::Assets;
use crate::audio::WebAudio;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::KeyState;
use crate::render::Gfx;
use crate::scene::{SceneContext, SceneMachine, UiEvent};

const CANVAS_ID: &str = "boss-battle-canvas";
/// Longest simulated frame; longer gaps (tab switches) are clamped.
const MAX_FRAME_SECS: f64 = 0.05;

struct App {
    config: GameConfig,
    gfx: Gfx,
    assets: Assets,
    audio: WebAudio,
    rng: StdRng,
    scenes: SceneMachine,
    keys: KeyState,
    events: VecDeque<UiEvent>,
    last_ts: Option<f64>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn start(config: GameConfig) -> Result<(), GameError> {
    config.validate()?;
    let already_running = APP.with(|cell| cell.borrow().is_some());

    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;
    let canvas = ensure_canvas(&doc, &config)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let app = App {
        gfx: Gfx::new(canvas.clone(), ctx),
        assets: Assets::load(&config)?,
        audio: WebAudio::load(&config),
        rng: StdRng::from_entropy(),
        scenes: SceneMachine::new(),
        keys: KeyState::default(),
        events: VecDeque::new(),
        last_ts: None,
        config,
    };
    log::info!("boss battle ready ({}x{})", canvas.width(), canvas.height());
    APP.with(|cell| cell.replace(Some(app)));

    // A second start only swaps in fresh state; listeners and the loop
    // from the first call keep driving it.
    if !already_running {
        install_listeners(&doc, &canvas)?;
        start_loop();
    }
    Ok(())
}

fn ensure_canvas(doc: &Document, config: &GameConfig) -> Result<HtmlCanvasElement, GameError> {
    if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        return el.dyn_into().map_err(|_| GameError::Dom(format!("#{CANVAS_ID} is not a canvas")));
    }
    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| GameError::Dom("created element is not a canvas".into()))?;
    canvas.set_id(CANVAS_ID);
    canvas.set_width(config.width as u32);
    canvas.set_height(config.height as u32);
    canvas.set_attribute("style", "display:block; margin:0 auto; background:#000; border:2px solid #222; border-radius:6px;").ok();
    doc.body().ok_or(GameError::NoBody)?.append_child(&canvas)?;
    Ok(canvas)
}

fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            f(app);
        }
    });
}

fn install_listeners(doc: &Document, canvas: &HtmlCanvasElement) -> Result<(), GameError> {
    // Arrow keys (held state is polled each frame)
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            with_app(|app| {
                if app.keys.set(&evt.key(), pressed) {
                    evt.prevent_default();
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer events for buttons, in canvas pixel coordinates
    let pointer_events: [(&str, fn(&web_sys::MouseEvent) -> UiEvent); 3] = [
        ("mousemove", |evt| UiEvent::PointerMove {
            x: evt.offset_x() as f64,
            y: evt.offset_y() as f64,
        }),
        ("mousedown", |evt| UiEvent::PointerDown {
            x: evt.offset_x() as f64,
            y: evt.offset_y() as f64,
        }),
        ("mouseleave", |_| UiEvent::PointerLeave),
    ];
    for (event, to_ui) in pointer_events {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            with_app(|app| app.events.push_back(to_ui(&evt)));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_app(|app| frame(app, ts));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(app: &mut App, ts: f64) {
    let dt = app
        .last_ts
        .map_or(0.0, |last| ((ts - last) / 1000.0).clamp(0.0, MAX_FRAME_SECS));
    app.last_ts = Some(ts);

    let events: Vec<UiEvent> = app.events.drain(..).collect();
    let mut ctx = SceneContext {
        config: &app.config,
        audio: &mut app.audio,
        rng: &mut app.rng,
        keys: app.keys,
        now: ts,
        dt,
    };
    app.scenes.dispatch(events, &mut ctx);
    app.scenes.update(&mut ctx);
    app.scenes
        .current()
        .draw(&app.gfx, &app.assets, &app.config, ts);
}
