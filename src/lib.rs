//! Short-lived full-screen WebGL2 shader effects.
//!
//! An [`Effect`] renders a fragment shader into a square overlay canvas,
//! drives the shader's time uniform from a progress value over a fixed
//! duration, and tears everything down when done. The platform-independent
//! runtime lives in [`core`]; the browser half is only built for `wasm32`.

pub mod constants;
pub mod core;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod effect;
#[cfg(target_arch = "wasm32")]
pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod image;
#[cfg(target_arch = "wasm32")]
pub mod overlay;
#[cfg(target_arch = "wasm32")]
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod session;

#[cfg(target_arch = "wasm32")]
pub use effect::Effect;
pub use error::{FxError, ShaderStage};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Installs the panic hook and console logger.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("shader-fx ready");
    Ok(())
}
