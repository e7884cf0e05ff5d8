//! Error types for the browser-facing layer.
//!
//! Game rules never fail; only DOM setup, config parsing and audio can.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("canvas 2d context unavailable")]
    NoContext,
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(describe_js(&value))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Audio failures are logged and swallowed; gameplay carries on silently.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to load audio '{key}': {reason}")]
    Load { key: &'static str, reason: String },
    #[error("failed to play audio '{key}': {reason}")]
    Playback { key: &'static str, reason: String },
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
