use crate::constants::QUAD_VERTEX_COUNT;
use crate::error::FxError;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use web_sys::{WebGl2RenderingContext as GL, WebGlUniformLocation};

/// Per-frame extension hook; receives the loop clock in seconds.
pub type FrameHook = dyn FnMut(f64) -> Result<(), FxError>;

struct LoopState {
    gl: GL,
    canvas: web::HtmlCanvasElement,
    time_uniform: Option<WebGlUniformLocation>,
    hook: RefCell<Option<Rc<RefCell<Box<FrameHook>>>>>,
    pending: Cell<Option<i32>>,
    running: Cell<bool>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// `requestAnimationFrame` loop drawing the full-screen quad on one canvas.
///
/// Each frame uploads the clock to the time uniform, runs the hook, re-applies
/// the viewport and draws. Stopping only cancels the next frame.
#[derive(Clone)]
pub struct RenderLoop {
    state: Rc<LoopState>,
}

impl RenderLoop {
    /// Presents one frame immediately, then schedules the loop.
    pub fn start(
        gl: GL,
        canvas: web::HtmlCanvasElement,
        time_uniform: Option<WebGlUniformLocation>,
    ) -> Result<Self, FxError> {
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        let state = Rc::new(LoopState {
            gl,
            canvas,
            time_uniform,
            hook: RefCell::new(None),
            pending: Cell::new(None),
            running: Cell::new(true),
            tick: RefCell::new(None),
        });
        state.draw();

        let weak: Weak<LoopState> = Rc::downgrade(&state);
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(state) = weak.upgrade() {
                state.frame(timestamp);
            }
        }) as Box<dyn FnMut(f64)>));
        state.schedule()?;
        Ok(Self { state })
    }

    /// Installs `hook`, replacing any previous one.
    pub fn set_hook(&self, hook: impl FnMut(f64) -> Result<(), FxError> + 'static) {
        let hook: Box<FrameHook> = Box::new(hook);
        *self.state.hook.borrow_mut() = Some(Rc::new(RefCell::new(hook)));
    }

    pub fn clear_hook(&self) {
        self.state.hook.borrow_mut().take();
    }

    pub fn has_hook(&self) -> bool {
        self.state.hook.borrow().is_some()
    }

    /// Cancels the next scheduled frame. Idempotent.
    pub fn stop(&self) {
        self.state.running.set(false);
        self.state.cancel_pending();
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub fn gl(&self) -> &GL {
        &self.state.gl
    }
}

impl LoopState {
    fn frame(&self, timestamp: f64) {
        self.pending.set(None);
        if !self.running.get() {
            return;
        }

        let seconds = timestamp / 1000.0;
        if let Some(loc) = &self.time_uniform {
            self.gl.uniform1f(Some(loc), seconds as f32);
        }

        // Clone out so the hook may replace or remove itself
        let hook = self.hook.borrow().clone();
        if let Some(hook) = hook {
            let result = match hook.try_borrow_mut() {
                Ok(mut f) => (&mut **f)(seconds),
                Err(_) => Err(FxError::FrameHook("hook re-entered".into())),
            };
            if let Err(e) = result {
                log::warn!("{}", e);
            }
        }

        self.draw();

        if self.running.get() {
            if let Err(e) = self.schedule() {
                log::error!("render loop stopped: {}", e);
                self.running.set(false);
            }
        }
    }

    fn draw(&self) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.draw_arrays(GL::TRIANGLES, 0, QUAD_VERTEX_COUNT);
    }

    fn schedule(&self) -> Result<(), FxError> {
        let window = web::window().ok_or_else(|| FxError::Dom("no window".into()))?;
        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return Ok(());
        };
        // never two pending frames on one canvas
        self.cancel_pending();
        let id = window.request_animation_frame(tick.as_ref().unchecked_ref())?;
        self.pending.set(Some(id));
        Ok(())
    }

    fn cancel_pending(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web::window() {
                _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for LoopState {
    fn drop(&mut self) {
        self.running.set(false);
        self.cancel_pending();
    }
}
