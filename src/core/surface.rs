use crate::constants::{VIEWPORT_FILL, Z_ORDER_BAND, Z_ORDER_BASE, Z_ORDER_TICK_MS};

/// Side length of the square overlay for a viewport of `width` x `height`.
///
/// The overlay covers [`VIEWPORT_FILL`] of the smaller viewport side, clamped
/// to `[min_size, max_size]`. A viewport that cannot be measured (non-finite
/// or negative) yields `min_size`.
pub fn surface_size(width: f64, height: f64, min_size: u32, max_size: u32) -> u32 {
    let side = width.min(height);
    // f64::min drops a NaN operand, so both sides are checked
    if !(width.is_finite() && height.is_finite()) || side < 0.0 {
        return min_size;
    }
    let scaled = side * VIEWPORT_FILL;
    // canvas dimensions truncate like the DOM does
    scaled.clamp(f64::from(min_size), f64::from(max_size.max(min_size))) as u32
}

/// Stacking order for an overlay created at wall-clock time `now_ms`.
///
/// Varies every [`Z_ORDER_TICK_MS`] inside a fixed band above
/// [`Z_ORDER_BASE`] so overlays started at different times rarely collide.
pub fn z_order_at(now_ms: f64) -> i32 {
    let ticks = (now_ms.max(0.0) / Z_ORDER_TICK_MS).floor() as i64;
    Z_ORDER_BASE + (ticks % Z_ORDER_BAND) as i32
}
