use super::phase::PhaseMapping;
use super::{CLAY_FRAG, MOON_FRAG, QUAD_VERT, RIPPLE_FRAG};
use crate::constants::{
    DEFAULT_DURATION_MS, DEFAULT_HOST_ID, MAX_SURFACE_SIZE, MIN_SURFACE_SIZE, PROGRESS_FRACTION,
};

/// Static description of one visual effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDef {
    /// Unique trigger key.
    pub hash: &'static str,
    pub name: &'static str,
    pub vertex_shader: &'static str,
    pub fragment_shader: &'static str,
    pub phase: PhaseMapping,
    /// Image bound to `u_image`, for texture effects.
    pub image_src: Option<&'static str>,
}

impl EffectDef {
    pub fn needs_image(&self) -> bool {
        self.image_src.is_some()
    }
}

/// Dotted diffuse sphere swept by a moving light.
pub static CLAY: EffectDef = EffectDef {
    hash: "0,1",
    name: "clay",
    vertex_shader: QUAD_VERT,
    fragment_shader: CLAY_FRAG,
    phase: PhaseMapping::SWEEP,
    image_src: None,
};

/// Opaque sphere lit by a light sweeping across it.
pub static MOON: EffectDef = EffectDef {
    hash: "0,2",
    name: "moon",
    vertex_shader: QUAD_VERT,
    fragment_shader: MOON_FRAG,
    phase: PhaseMapping::SWEEP,
    image_src: None,
};

/// Radial ripple distorting an image.
pub static RIPPLE: EffectDef = EffectDef {
    hash: "0,3",
    name: "piston-1",
    vertex_shader: QUAD_VERT,
    fragment_shader: RIPPLE_FRAG,
    phase: PhaseMapping::Turn,
    image_src: Some("./src/shaders/img.png"),
};

static BUILTINS: [&EffectDef; 3] = [&CLAY, &MOON, &RIPPLE];

pub fn builtins() -> impl Iterator<Item = &'static EffectDef> {
    BUILTINS.iter().copied()
}

/// Looks up a built-in effect by its trigger key.
pub fn builtin(hash: &str) -> Option<&'static EffectDef> {
    builtins().find(|def| def.hash == hash)
}

/// Per-effect runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSettings {
    /// Nominal effect duration; life reaches 1 after [`PROGRESS_FRACTION`] of it.
    pub duration_ms: f64,
    /// Element the overlay is attached to; `<body>` when missing.
    pub host_id: Option<String>,
    pub min_size: u32,
    pub max_size: u32,
    /// Replaces the definition's image location for texture effects.
    pub image_src: Option<String>,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            host_id: Some(DEFAULT_HOST_ID.to_string()),
            min_size: MIN_SURFACE_SIZE,
            max_size: MAX_SURFACE_SIZE,
            image_src: None,
        }
    }
}

impl EffectSettings {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn host_id(mut self, id: Option<&str>) -> Self {
        self.host_id = id.map(str::to_string);
        self
    }

    pub fn size_bounds(mut self, min_size: u32, max_size: u32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size.max(min_size);
        self
    }

    pub fn image_src(mut self, src: &str) -> Self {
        self.image_src = Some(src.to_string());
        self
    }

    /// Image location for `def`: the override if set, else the built-in path.
    ///
    /// Always `None` for effects that do not sample an image.
    pub fn image_src_for<'a>(&'a self, def: &'a EffectDef) -> Option<&'a str> {
        let builtin = def.image_src?;
        Some(self.image_src.as_deref().unwrap_or(builtin))
    }

    /// Time the progress driver takes to go from 0 to 1.
    pub fn progress_duration_ms(&self) -> f64 {
        self.duration_ms * PROGRESS_FRACTION
    }
}
