use crate::core::{EffectDef, EffectSettings, Session, TextureSlot};
use crate::error::FxError;
use crate::frame::RenderLoop;
use crate::image::{self, Bitmap};
use crate::overlay::Overlay;
use crate::render::{self, Program};
use web_sys::{WebGl2RenderingContext as GL, WebGlTexture, WebGlUniformLocation};

/// Overlay, program and render loop of one playing effect instance.
pub struct WebSession {
    overlay: Overlay,
    gl: GL,
    program: Program,
    time_uniform: Option<WebGlUniformLocation>,
    texture: TextureSlot<WebGlTexture>,
    render_loop: Option<RenderLoop>,
}

impl WebSession {
    /// Creates the overlay, builds the program, binds `bitmap` (texture
    /// effects) and starts the render loop.
    ///
    /// On error the overlay is detached again; nothing stays half-built.
    pub fn open(
        def: &EffectDef,
        settings: &EffectSettings,
        z_order: Option<i32>,
        bitmap: Option<&Bitmap>,
    ) -> Result<Self, FxError> {
        let overlay = Overlay::create(settings, z_order)?;
        let gl = render::webgl2_context(overlay.canvas())?;
        let program = render::build_program(&gl, def.vertex_shader, def.fragment_shader)?;
        let time_uniform = program.time_uniform(&gl);
        if time_uniform.is_none() {
            log::warn!("[{}] no time uniform; phase will not reach the shader", def.name);
        }

        let mut session = Self {
            overlay,
            gl,
            program,
            time_uniform,
            texture: TextureSlot::new(),
            render_loop: None,
        };
        if let Some(bitmap) = bitmap {
            image::bind_image(&session.gl, &session.program, &mut session.texture, bitmap)?;
        }
        session.run()?;
        Ok(session)
    }

    /// (Re)starts the render loop, stopping any loop already driving this surface.
    fn run(&mut self) -> Result<(), FxError> {
        if let Some(previous) = self.render_loop.take() {
            previous.stop();
        }
        let render_loop = RenderLoop::start(
            self.gl.clone(),
            self.overlay.canvas().clone(),
            self.time_uniform.clone(),
        )?;
        self.render_loop = Some(render_loop);
        Ok(())
    }

    pub fn set_hook(&self, hook: impl FnMut(f64) -> Result<(), FxError> + 'static) {
        if let Some(render_loop) = &self.render_loop {
            render_loop.set_hook(hook);
        }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn gl(&self) -> &GL {
        &self.gl
    }

    /// Texture bound to `u_image`, for texture effects.
    pub fn texture(&self) -> Option<&WebGlTexture> {
        self.texture.get()
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.as_ref().is_some_and(RenderLoop::is_running)
    }
}

impl Session for WebSession {
    fn write_phase(&self, phase: f32) {
        if let Some(loc) = &self.time_uniform {
            self.gl.uniform1f(Some(loc), phase);
        }
    }

    fn resize(&mut self) {
        match self.overlay.resize() {
            Ok(side) => self.gl.viewport(0, 0, side as i32, side as i32),
            Err(e) => log::warn!("overlay resize failed: {}", e),
        }
    }

    fn detach_hook(&mut self) {
        if let Some(render_loop) = &self.render_loop {
            render_loop.clear_hook();
        }
    }

    fn hide(&mut self) {
        self.overlay.hide();
    }

    fn stop(&mut self) {
        if let Some(render_loop) = &self.render_loop {
            render_loop.stop();
        }
    }
}
