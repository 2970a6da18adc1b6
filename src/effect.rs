use crate::audio::JsSound;
use crate::core::{self, EffectDef, EffectSettings, ImageCache, Lifecycle, Ticket};
use crate::error::FxError;
use crate::image::{self, SharedImages};
use crate::session::WebSession;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

type SharedLifecycle = Rc<RefCell<Lifecycle<WebSession>>>;

/// One effect definition with at most one playing instance.
///
/// Exposes the `start` / `update` / `clear` / `resize` / `playing` contract to
/// the page; the page's registry keys it by [`hash`](Effect::hash).
#[wasm_bindgen]
pub struct Effect {
    def: &'static EffectDef,
    lifecycle: SharedLifecycle,
    images: Option<SharedImages>,
}

#[wasm_bindgen]
impl Effect {
    /// Built-in effect for a trigger key, if any.
    pub fn builtin(hash: &str) -> Option<Effect> {
        core::builtin(hash).map(|def| Effect::new(def, EffectSettings::default()))
    }

    pub fn clay() -> Effect {
        Effect::new(&core::CLAY, EffectSettings::default())
    }

    pub fn moon() -> Effect {
        Effect::new(&core::MOON, EffectSettings::default())
    }

    pub fn ripple() -> Effect {
        Effect::new(&core::RIPPLE, EffectSettings::default())
    }

    /// Ripple over the image at `src` instead of the bundled path.
    #[wasm_bindgen(js_name = rippleWithImage)]
    pub fn ripple_with_image(src: &str) -> Effect {
        Effect::new(&core::RIPPLE, EffectSettings::new().image_src(src))
    }

    #[wasm_bindgen(getter)]
    pub fn hash(&self) -> String {
        self.def.hash.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.def.name.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn playing(&self) -> bool {
        self.lifecycle.borrow().playing()
    }

    /// Sound object (`stop()` / `play()`) played on non-silent starts.
    #[wasm_bindgen(js_name = setSound)]
    pub fn set_sound(&self, sound: JsValue) {
        let cue = JsSound::new(sound).map(|s| Box::new(s) as Box<dyn core::SoundCue>);
        self.lifecycle.borrow_mut().set_sound(cue);
    }

    /// Starts the effect, replacing an instance that is still playing.
    pub fn start(&self, silent: bool, z_order: Option<i32>) {
        match &self.images {
            None => self.start_now(silent, z_order),
            Some(images) => self.start_after_image(images.clone(), silent, z_order),
        }
    }

    pub fn update(&self) {
        self.lifecycle.borrow_mut().update();
    }

    pub fn clear(&self) {
        self.lifecycle.borrow_mut().clear();
    }

    pub fn resize(&self) {
        self.lifecycle.borrow_mut().resize();
    }
}

impl Effect {
    pub fn new(def: &'static EffectDef, settings: EffectSettings) -> Self {
        let images = settings
            .image_src_for(def)
            .map(|src| Rc::new(RefCell::new(ImageCache::new(src))));
        Self {
            def,
            lifecycle: Rc::new(RefCell::new(Lifecycle::new(def, settings))),
            images,
        }
    }

    pub fn def(&self) -> &'static EffectDef {
        self.def
    }

    pub fn lifecycle(&self) -> &SharedLifecycle {
        &self.lifecycle
    }

    fn start_now(&self, silent: bool, z_order: Option<i32>) {
        let def = self.def;
        let weak = Rc::downgrade(&self.lifecycle);
        self.lifecycle.borrow_mut().start_with(silent, |settings| {
            let session = WebSession::open(def, settings, z_order, None)?;
            session.set_hook(frame_hook(weak));
            Ok(session)
        });
    }

    fn start_after_image(&self, images: SharedImages, silent: bool, z_order: Option<i32>) {
        let def = self.def;
        let lifecycle = self.lifecycle.clone();
        let ticket = lifecycle.borrow_mut().begin_start(silent);
        spawn_local(async move {
            let result = match image::load(&images).await {
                Ok(bitmap) => {
                    if !lifecycle.borrow().is_current(ticket) {
                        return;
                    }
                    let settings = lifecycle.borrow().settings().clone();
                    WebSession::open(def, &settings, z_order, Some(&bitmap))
                }
                Err(e) => Err(e),
            };
            adopt(&lifecycle, ticket, result);
        });
    }
}

fn adopt(lifecycle: &SharedLifecycle, ticket: Ticket, result: Result<WebSession, FxError>) {
    let mut guard = lifecycle.borrow_mut();
    match result {
        Ok(session) => {
            session.set_hook(frame_hook(Rc::downgrade(lifecycle)));
            guard.finish_start(ticket, session);
        }
        Err(e) => guard.fail_start(ticket, &e),
    }
}

/// Hook advancing the lifecycle from the render loop clock.
fn frame_hook(
    lifecycle: Weak<RefCell<Lifecycle<WebSession>>>,
) -> impl FnMut(f64) -> Result<(), FxError> {
    move |seconds| {
        let Some(lifecycle) = lifecycle.upgrade() else {
            return Ok(());
        };
        let mut guard = lifecycle
            .try_borrow_mut()
            .map_err(|_| FxError::FrameHook("effect state busy".into()))?;
        guard.on_frame(seconds);
        Ok(())
    }
}
