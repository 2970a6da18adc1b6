use crate::core::SoundCue;
use crate::error::FxError;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Page-provided sound object exposing `stop()` and `play()`.
pub struct JsSound {
    target: JsValue,
}

impl JsSound {
    /// Wraps `target`; `null`/`undefined` means no sound.
    pub fn new(target: JsValue) -> Option<Self> {
        if target.is_null() || target.is_undefined() {
            None
        } else {
            Some(Self { target })
        }
    }

    fn call(this: &JsValue, method: &str) -> Result<JsValue, FxError> {
        let func = Reflect::get(this, &JsValue::from_str(method))?.dyn_into::<Function>()?;
        Ok(func.call0(this)?)
    }
}

impl SoundCue for JsSound {
    fn replay(&self) {
        // `stop()` returns the sound itself on chaining implementations
        let stopped = match Self::call(&self.target, "stop") {
            Ok(value) if value.is_object() => value,
            Ok(_) => self.target.clone(),
            Err(e) => {
                log::warn!("sound stop failed: {}", e);
                self.target.clone()
            }
        };
        if let Err(e) = Self::call(&stopped, "play") {
            log::warn!("sound play failed: {}", e);
        }
    }
}
