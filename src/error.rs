use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("no window available")]
    NoWindow,
    #[error("no document available")]
    NoDocument,
    #[error("container has no step items")]
    NoSteps,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        WidgetError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
