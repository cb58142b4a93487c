use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("arena width {0} is outside 4..=256")]
    Width(usize),
    #[error("arena height {0} is outside 1..=256")]
    Height(usize),
    #[error("drop interval must be positive, got {0}")]
    DropInterval(f64),
    #[error("cell scale must be positive, got {0}")]
    CellScale(f64),
}

/// Failures while mounting the game into the page.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no document body")]
    NoBody,
    #[error("canvas has no 2d context")]
    NoContext,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
