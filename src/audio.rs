//! Sound effects and background music.
//!
//! Game rules talk to an [`AudioSink`]; the browser build plugs in
//! [`WebAudio`], which wraps `HtmlAudioElement`s. Every audio failure is
//! logged and then ignored so a missing file never stops the fight.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, HtmlAudioElement};

use crate::config::GameConfig;
use crate::error::{AudioError, describe_js};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sfx {
    Fight,
    Win,
    Jump,
    Punch,
    GameOver,
}

impl Sfx {
    pub const ALL: [Sfx; 5] = [Sfx::Fight, Sfx::Win, Sfx::Jump, Sfx::Punch, Sfx::GameOver];

    pub fn key(self) -> &'static str {
        match self {
            Sfx::Fight => "fight",
            Sfx::Win => "win",
            Sfx::Jump => "jump",
            Sfx::Punch => "punch",
            Sfx::GameOver => "gameOver",
        }
    }

    pub fn file(self) -> &'static str {
        match self {
            Sfx::Fight => "fight.mp3",
            Sfx::Win => "win.mp3",
            Sfx::Jump => "jump.mp3",
            Sfx::Punch => "punch.mp3",
            Sfx::GameOver => "game-over.mp3",
        }
    }
}

/// Looping background track, one per stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Stage1,
    Stage2,
    Stage3,
}

impl MusicTrack {
    pub fn key(self) -> &'static str {
        match self {
            MusicTrack::Stage1 => "bg1",
            MusicTrack::Stage2 => "bg2",
            MusicTrack::Stage3 => "bg3",
        }
    }

    pub fn file(self) -> &'static str {
        match self {
            MusicTrack::Stage1 => "bg-1.mp3",
            MusicTrack::Stage2 => "bg-2.mp3",
            MusicTrack::Stage3 => "bg-3.mp3",
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, sfx: Sfx);
    /// Stop the current track (if any) and loop `track`.
    fn play_music(&mut self, track: MusicTrack);
    fn stop_music(&mut self);
}

/// Sink that discards everything (headless runs, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _sfx: Sfx) {}
    fn play_music(&mut self, _track: MusicTrack) {}
    fn stop_music(&mut self) {}
}

pub struct WebAudio {
    effects: HashMap<Sfx, Clip>,
    music: Option<Clip>,
    cfg: GameConfig,
}

impl WebAudio {
    /// Preload every effect. Effects that fail to load are skipped.
    pub fn load(cfg: &GameConfig) -> Self {
        let mut effects = HashMap::new();
        for sfx in Sfx::ALL {
            match Clip::load(sfx.key(), &cfg.asset_url(sfx.file())) {
                Ok(clip) => {
                    if sfx == Sfx::Jump {
                        clip.el.set_volume(cfg.jump_volume);
                    }
                    effects.insert(sfx, clip);
                }
                Err(e) => log::error!("Failed to load or play audio: {e}"),
            }
        }
        Self {
            effects,
            music: None,
            cfg: cfg.clone(),
        }
    }

    fn start_music(&mut self, track: MusicTrack) -> Result<(), AudioError> {
        let clip = Clip::load(track.key(), &self.cfg.asset_url(track.file()))?;
        clip.el.set_loop(true);
        clip.el.set_volume(self.cfg.music_volume);
        clip.play()?;
        self.music = Some(clip);
        Ok(())
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, sfx: Sfx) {
        let Some(clip) = self.effects.get(&sfx) else {
            return;
        };
        clip.el.set_current_time(0.0);
        if let Err(e) = clip.play() {
            log::error!("{e}");
        }
    }

    fn play_music(&mut self, track: MusicTrack) {
        self.stop_music();
        if let Err(e) = self.start_music(track) {
            log::error!("Failed to change background music: {e}");
        }
    }

    fn stop_music(&mut self) {
        if let Some(clip) = self.music.take() {
            if let Err(e) = clip.el.pause() {
                log::warn!("failed to stop music: {}", describe_js(&e));
            }
        }
    }
}

/// An audio element plus the listener that reports fetch/decode failures,
/// which the browser delivers as an `error` event rather than a return value.
struct Clip {
    key: &'static str,
    el: HtmlAudioElement,
    on_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl Clip {
    fn load(key: &'static str, url: &str) -> Result<Self, AudioError> {
        let el = HtmlAudioElement::new_with_src(url).map_err(|e| AudioError::Load {
            key,
            reason: describe_js(&e),
        })?;
        el.set_preload("auto");

        let src = url.to_string();
        let on_error = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let err = AudioError::Load {
                key,
                reason: format!("{src} could not be fetched or decoded"),
            };
            log::error!("Failed to load or play audio: {err}");
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .map_err(|e| AudioError::Load {
                key,
                reason: describe_js(&e),
            })?;
        Ok(Self { key, el, on_error })
    }

    /// Start playback. Synchronous failures are returned; a rejected play
    /// promise (autoplay blocked, unsupported source) is logged when it settles.
    fn play(&self) -> Result<(), AudioError> {
        let key = self.key;
        let promise = self.el.play().map_err(|e| AudioError::Playback {
            key,
            reason: describe_js(&e),
        })?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let name = e.dyn_ref::<DomException>().map(DomException::name);
                if let Some(err) = playback_failure(key, name.as_deref(), describe_js(&e)) {
                    log::error!("Failed to load or play audio: {err}");
                }
            }
        });
        Ok(())
    }
}

impl Drop for Clip {
    fn drop(&mut self) {
        let _ = self
            .el
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
    }
}

/// Classify a rejected play promise. `AbortError` only means a later
/// `pause()` or restart interrupted the request.
fn playback_failure(key: &'static str, name: Option<&str>, reason: String) -> Option<AudioError> {
    match name {
        Some("AbortError") => None,
        _ => Some(AudioError::Playback { key, reason }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn asset_keys_and_files_are_unique() {
        let keys: HashSet<&str> = Sfx::ALL.iter().map(|s| s.key()).collect();
        let files: HashSet<&str> = Sfx::ALL.iter().map(|s| s.file()).collect();
        assert_eq!(keys.len(), Sfx::ALL.len());
        assert_eq!(files.len(), Sfx::ALL.len());
    }

    #[test]
    fn interrupted_playback_is_not_an_error() {
        assert!(playback_failure("bg1", Some("AbortError"), "paused".into()).is_none());
    }

    #[test]
    fn blocked_or_missing_playback_is_reported() {
        let blocked = playback_failure("punch", Some("NotAllowedError"), "autoplay".into());
        assert_eq!(
            blocked.map(|e| e.to_string()).as_deref(),
            Some("failed to play audio 'punch': autoplay")
        );
        assert!(playback_failure("win", None, "no source".into()).is_some());
    }

    #[test]
    fn music_tracks_follow_stage_numbering() {
        assert_eq!(MusicTrack::Stage1.file(), "bg-1.mp3");
        assert_eq!(MusicTrack::Stage3.key(), "bg3");
    }
}
