//! Platform-independent effect runtime: sizing, phase mapping, progress
//! driving, resource caching and the effect lifecycle state machine.
//!
//! Nothing in here touches the DOM or WebGL, so it builds and is tested on the
//! host as well as on `wasm32`.

pub mod effects;
pub mod lifecycle;
pub mod phase;
pub mod progress;
pub mod resources;
pub mod surface;
pub mod uniforms;

pub use effects::*;
pub use lifecycle::*;
pub use phase::PhaseMapping;
pub use progress::{linear, Easing, Progress, ProgressDriver};
pub use resources::{checker_pixels, ImageCache, ImageLookup, TextureSlot};
pub use surface::{surface_size, z_order_at};
pub use uniforms::{resolve_time_uniform, resolve_uniform};

// Shaders bundled as string constants
pub static QUAD_VERT: &str = include_str!("../../shaders/quad.vert");
pub static CLAY_FRAG: &str = include_str!("../../shaders/clay.frag");
pub static MOON_FRAG: &str = include_str!("../../shaders/moon.frag");
pub static RIPPLE_FRAG: &str = include_str!("../../shaders/ripple.frag");
