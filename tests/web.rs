#![cfg(target_arch = "wasm32")]

use js_sys::Promise;
use shader_fx::core::{EffectSettings, CLAY, MOON, QUAD_VERT, RIPPLE};
use shader_fx::frame::RenderLoop;
use shader_fx::overlay::Overlay;
use shader_fx::{render, Effect, FxError, ShaderStage};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::WebGl2RenderingContext as GL;

wasm_bindgen_test_configure!(run_in_browser);

const MISSING_IMAGE: &str = "./no-such-effect-image.png";

fn settings() -> EffectSettings {
    EffectSettings::new().host_id(None)
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

async fn wait_until(cond: impl Fn() -> bool) -> bool {
    for _ in 0..150 {
        if cond() {
            return true;
        }
        sleep(20).await;
    }
    cond()
}

/// Empty host element with a unique id; overlays of `settings` attach to it.
fn host(id: &str) -> (web_sys::Element, EffectSettings) {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("div").unwrap();
    el.set_id(id);
    document.body().unwrap().append_child(&el).unwrap();
    let settings = EffectSettings::new()
        .host_id(Some(id))
        .duration_ms(60_000.0)
        .image_src(MISSING_IMAGE);
    (el, settings)
}

#[wasm_bindgen_test]
fn overlay_is_square_and_ignores_pointer() {
    let overlay = Overlay::create(&settings(), Some(42)).unwrap();
    let (w, h) = overlay.size();
    assert_eq!(w, h);
    assert!((200..=1000).contains(&w));
    assert_eq!(overlay.z_order(), 42);

    let style = overlay.canvas().style();
    assert_eq!(style.get_property_value("pointer-events").unwrap(), "none");
    assert_eq!(style.get_property_value("z-index").unwrap(), "42");
    assert!(overlay.canvas().is_connected());

    assert_eq!(overlay.resize().unwrap(), w);
    overlay.hide();
    assert!(overlay.is_hidden());

    let canvas = overlay.canvas().clone();
    drop(overlay);
    assert!(!canvas.is_connected());
}

#[wasm_bindgen_test]
fn broken_fragment_shader_reports_its_stage() {
    let overlay = Overlay::create(&settings(), None).unwrap();
    let gl = render::webgl2_context(overlay.canvas()).unwrap();
    let err = render::build_program(&gl, QUAD_VERT, "#version 300 es\nvoid main( {").unwrap_err();
    match err {
        FxError::ShaderCompile { stage, log } => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(!log.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
    let current = gl.get_parameter(web_sys::WebGl2RenderingContext::CURRENT_PROGRAM).unwrap();
    assert!(current.is_null());
}

#[wasm_bindgen_test]
fn builtin_programs_link() {
    let overlay = Overlay::create(&settings(), None).unwrap();
    let gl = render::webgl2_context(overlay.canvas()).unwrap();
    for def in [&CLAY, &MOON] {
        let program = render::build_program(&gl, def.vertex_shader, def.fragment_shader).unwrap();
        assert!(program.time_uniform(&gl).is_some());
    }
}

#[wasm_bindgen_test]
fn render_loop_stop_is_idempotent() {
    let overlay = Overlay::create(&settings(), None).unwrap();
    let gl = render::webgl2_context(overlay.canvas()).unwrap();
    let program = render::build_program(&gl, CLAY.vertex_shader, CLAY.fragment_shader).unwrap();
    let render_loop =
        RenderLoop::start(gl.clone(), overlay.canvas().clone(), program.time_uniform(&gl)).unwrap();
    assert!(render_loop.is_running());
    render_loop.set_hook(|_| Ok(()));
    assert!(render_loop.has_hook());

    render_loop.stop();
    render_loop.stop();
    render_loop.clear_hook();
    assert!(!render_loop.is_running());
    assert!(!render_loop.has_hook());
}

#[wasm_bindgen_test]
fn effect_start_and_clear() {
    let effect = Effect::new(&CLAY, settings());
    assert!(!effect.playing());
    effect.clear();

    effect.start(true, None);
    assert!(effect.playing());
    effect.resize();
    effect.start(true, Some(7));
    assert!(effect.playing());

    effect.clear();
    assert!(!effect.playing());
    assert_eq!(effect.hash(), "0,1");
    assert!(Effect::builtin("0,2").is_some());
    assert!(Effect::builtin("nope").is_none());
}

#[wasm_bindgen_test]
async fn texture_effect_waits_for_image_then_binds_placeholder() {
    let (host, settings) = host("fx-ripple-single");
    let effect = Effect::new(&RIPPLE, settings);

    effect.start(true, None);
    assert!(!effect.playing());
    assert_eq!(host.child_element_count(), 0);

    assert!(wait_until(|| effect.playing()).await);
    assert_eq!(host.child_element_count(), 1);

    let lifecycle = effect.lifecycle().borrow();
    let session = lifecycle.session().unwrap();
    assert!(session.texture().is_some());
    let gl = session.gl();
    let unit = gl.get_parameter(GL::ACTIVE_TEXTURE).unwrap();
    assert_eq!(unit.as_f64(), Some(GL::TEXTURE0 as f64));
    let bound = gl.get_parameter(GL::TEXTURE_BINDING_2D).unwrap();
    assert!(!bound.is_null());
    drop(lifecycle);

    effect.clear();
    assert!(!effect.playing());
}

#[wasm_bindgen_test]
async fn restart_during_image_load_builds_one_overlay() {
    let (host, settings) = host("fx-ripple-double");
    let effect = Effect::new(&RIPPLE, settings);

    effect.start(true, None);
    effect.start(true, None);
    assert!(!effect.playing());

    assert!(wait_until(|| effect.playing()).await);
    // let the superseded start resume and bail out
    sleep(100).await;
    assert!(effect.playing());
    assert_eq!(host.child_element_count(), 1);
    effect.clear();
}

#[wasm_bindgen_test]
async fn clear_during_image_load_cancels_start() {
    let (host, settings) = host("fx-ripple-cleared");
    let effect = Effect::new(&RIPPLE, settings);

    effect.start(true, None);
    effect.clear();
    sleep(300).await;
    assert!(!effect.playing());
    assert_eq!(host.child_element_count(), 0);

    // the cached placeholder makes the next start immediate after one tick
    effect.start(true, None);
    assert!(wait_until(|| effect.playing()).await);
    assert_eq!(host.child_element_count(), 1);
    effect.clear();
}
