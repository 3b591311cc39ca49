//! Error types. A wrong click is a game state, not an error; these cover the
//! browser plumbing and configuration only.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("javascript error: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be greater than zero")]
    ZeroPeriod { field: &'static str },
    #[error("`{field}` must allow at least one target")]
    ZeroLimit { field: &'static str },
    #[cfg(feature = "serde_json")]
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
