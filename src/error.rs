use thiserror::Error;

/// Reasons a canvas could not be mounted
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id '{0}'")]
    MissingCanvas(String),
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),
    #[error("2d context unavailable")]
    NoContext,
    #[error("js error: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for MountError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        Self::Js(v.as_string().unwrap_or_else(|| format!("{v:?}")))
    }
}
