use std::fmt;

use wasm_bindgen::JsValue;

/// Shader stage reported alongside a compile failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors raised while setting up or driving an effect.
///
/// None of these cross the public lifecycle operations: they are logged and
/// the effect is left idle.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// No WebGL2 context could be obtained for the overlay canvas.
    #[error("WebGL2 context unavailable")]
    ContextUnavailable,

    /// A shader stage failed to compile.
    #[error("cannot compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    /// The program failed to link.
    #[error("could not link shader program: {0}")]
    ShaderLink(String),

    /// The effect image failed to load or decode.
    ///
    /// Recovered locally with a placeholder bitmap.
    #[error("image load failed: {0}")]
    ImageLoad(String),

    /// A per-frame hook returned an error. The render loop keeps running.
    #[error("frame hook failed: {0}")]
    FrameHook(String),

    /// Window, document or element lookup failed.
    #[error("DOM unavailable: {0}")]
    Dom(String),

    /// JS value error.
    #[error("JS value error: {0:?}")]
    JsValue(JsValue),
}

/// Convert [`JsValue`] to [`FxError`].
impl From<JsValue> for FxError {
    fn from(value: JsValue) -> Self {
        Self::JsValue(value)
    }
}
