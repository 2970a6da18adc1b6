use crate::constants::FALLBACK_VIEWPORT;
use crate::error::FxError;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn document() -> Result<web::Document, FxError> {
    window_document().ok_or_else(|| FxError::Dom("no document".into()))
}

/// Inner size of the browser window in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
    web::window()
        .and_then(|w| {
            let width = w.inner_width().ok()?.as_f64()?;
            let height = w.inner_height().ok()?.as_f64()?;
            Some((width, height))
        })
        .unwrap_or(FALLBACK_VIEWPORT)
}

/// Element with the given id, or `<body>` when the id is absent or missing.
pub fn host_element(document: &web::Document, id: Option<&str>) -> Result<web::Element, FxError> {
    if let Some(el) = id.and_then(|id| document.get_element_by_id(id)) {
        return Ok(el);
    }
    document
        .body()
        .map(Into::into)
        .ok_or_else(|| FxError::Dom("no body".into()))
}

/// Wall-clock milliseconds since the epoch.
#[inline]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
