/// Overlay sizing, timing and shader-binding constants.
///
/// These constants express intended behavior (size clamps, durations, phase
/// bounds) and keep magic numbers out of the lifecycle and render code.
use std::f32::consts::{FRAC_PI_4, PI, TAU};

// Surface sizing (pixels)
pub const MIN_SURFACE_SIZE: u32 = 200;
pub const MAX_SURFACE_SIZE: u32 = 1000;
pub const VIEWPORT_FILL: f64 = 0.9; // share of the smaller viewport side the overlay covers

// Used when the window cannot report its inner size
pub const FALLBACK_VIEWPORT: (f64, f64) = (1000.0, 1000.0);

// Stacking band for overlays without an explicit z-order
pub const Z_ORDER_BASE: i32 = 1000;
pub const Z_ORDER_BAND: i64 = 10_000;
pub const Z_ORDER_TICK_MS: f64 = 10.0;

// Host element the overlay is attached to (falls back to <body>)
pub const DEFAULT_HOST_ID: &str = "content";

// Effect timing
pub const DEFAULT_DURATION_MS: f64 = 2000.0;
pub const PROGRESS_FRACTION: f64 = 0.8; // life reaches 1 after this share of the duration

// Sweep mapping: start and end past the visible unit circle
pub const PHASE_OVERSHOOT: f32 = FRAC_PI_4;
pub const PHASE_START: f32 = PI + PHASE_OVERSHOOT;
pub const PHASE_END: f32 = -PHASE_OVERSHOOT;
pub const PHASE_FULL_TURN: f32 = TAU;

// Shader interface
pub const POSITION_ATTRIBUTE: &str = "aPos";
pub const TIME_UNIFORM_NAMES: [&str; 2] = ["u_time", "uTime"];
pub const IMAGE_UNIFORM: &str = "u_image";
pub const IMAGE_TEXTURE_UNIT: i32 = 0;

// Full-screen quad: 6 vertices, 3 floats each
pub const QUAD_VERTEX_COUNT: i32 = 6;
pub const QUAD_COMPONENTS: i32 = 3;

// 2x2 checker used when an image cannot be loaded (RGBA)
pub const CHECKER_DARK: [u8; 4] = [0x44, 0x44, 0x44, 0xff];
pub const CHECKER_LIGHT: [u8; 4] = [0x88, 0x88, 0x88, 0xff];

// Two triangles covering clip space [-1, 1]^2
pub const QUAD_VERTICES: [glam::Vec3; 6] = [
    glam::Vec3::new(-1.0, 1.0, 0.0),
    glam::Vec3::new(1.0, 1.0, 0.0),
    glam::Vec3::new(-1.0, -1.0, 0.0),
    glam::Vec3::new(1.0, -1.0, 0.0),
    glam::Vec3::new(-1.0, -1.0, 0.0),
    glam::Vec3::new(1.0, 1.0, 0.0),
];
