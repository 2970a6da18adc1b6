use crate::core::{surface_size, z_order_at, EffectSettings};
use crate::dom;
use crate::error::FxError;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Square overlay canvas centered over the page.
///
/// The canvas never intercepts pointer input. It is detached from the DOM on
/// drop.
#[derive(Debug)]
pub struct Overlay {
    canvas: web::HtmlCanvasElement,
    min_size: u32,
    max_size: u32,
    z_order: i32,
}

impl Overlay {
    /// Creates the canvas and attaches it to the configured host element.
    ///
    /// Without an explicit `z_order`, one is derived from the wall clock.
    pub fn create(settings: &EffectSettings, z_order: Option<i32>) -> Result<Self, FxError> {
        let document = dom::document()?;
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| FxError::Dom("created element is not a canvas".into()))?;
        let z_order = z_order.unwrap_or_else(|| z_order_at(dom::now_ms()));

        let style = canvas.style();
        style.set_property("position", "absolute")?;
        style.set_property("top", "50%")?;
        style.set_property("left", "50%")?;
        style.set_property("transform", "translate(-50%, -50%)")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("display", "block")?;
        style.set_property("z-index", &z_order.to_string())?;

        let overlay = Self {
            canvas,
            min_size: settings.min_size,
            max_size: settings.max_size,
            z_order,
        };
        overlay.resize()?;

        let host = dom::host_element(&document, settings.host_id.as_deref())?;
        host.append_child(&overlay.canvas)?;
        log::debug!(
            "overlay created: {}px z={}",
            overlay.canvas.width(),
            overlay.z_order
        );
        Ok(overlay)
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Pixel size of the drawing buffer.
    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Re-applies the viewport-relative size to the existing canvas.
    pub fn resize(&self) -> Result<u32, FxError> {
        let (width, height) = dom::viewport_size();
        let side = surface_size(width, height, self.min_size, self.max_size);
        self.canvas.set_width(side);
        self.canvas.set_height(side);
        let style = self.canvas.style();
        style.set_property("width", &format!("{side}px"))?;
        style.set_property("height", &format!("{side}px"))?;
        Ok(side)
    }

    pub fn hide(&self) {
        if let Err(e) = self.canvas.style().set_property("display", "none") {
            log::warn!("cannot hide overlay: {:?}", e);
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.canvas
            .style()
            .get_property_value("display")
            .map(|d| d == "none")
            .unwrap_or(false)
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}
