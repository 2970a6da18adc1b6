use crate::constants::{IMAGE_TEXTURE_UNIT, IMAGE_UNIFORM};
use crate::core::{checker_pixels, ImageCache, ImageLookup, TextureSlot};
use crate::error::FxError;
use crate::render::Program;
use anyhow::{anyhow, Context};
use js_sys::{Function, Promise};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;
use web_sys::{WebGl2RenderingContext as GL, WebGlTexture};

/// Decoded pixels ready for `texImage2D`.
#[derive(Debug, Clone)]
pub enum Bitmap {
    Image(web::HtmlImageElement),
    Pixels(web::ImageData),
}

pub type SharedImages = Rc<RefCell<ImageCache<Bitmap, Promise>>>;

/// Returns the effect image, starting at most one load for all callers.
///
/// A failed load is replaced by the checker placeholder, which is then cached.
pub async fn load(images: &SharedImages) -> Result<Bitmap, FxError> {
    let lookup = images.borrow_mut().request(begin_load);
    let promise = match lookup {
        ImageLookup::Ready(bitmap) => return Ok(bitmap),
        ImageLookup::Pending(promise) => promise,
    };
    let src = images.borrow().src().to_string();

    let bitmap = match wait_for_image(promise)
        .await
        .with_context(|| format!("loading {src}"))
    {
        Ok(image) => Bitmap::Image(image),
        Err(e) => {
            if let Some(bitmap) = images.borrow().ready() {
                return Ok(bitmap.clone());
            }
            log::warn!("{}; using placeholder", FxError::ImageLoad(format!("{e:#}")));
            fallback_bitmap()?
        }
    };
    images.borrow_mut().resolve(bitmap.clone());
    Ok(bitmap)
}

fn begin_load(src: &str) -> Promise {
    log::debug!("loading image {src}");
    Promise::new(&mut |resolve: Function, reject: Function| {
        let image = match web::HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                _ = reject.call1(&JsValue::NULL, &e);
                return;
            }
        };
        image.set_cross_origin(Some("anonymous"));
        let loaded = image.clone();
        let onload = Closure::once_into_js(move || {
            _ = resolve.call1(&JsValue::NULL, &loaded);
        });
        let onerror = Closure::once_into_js(move |e: JsValue| {
            _ = reject.call1(&JsValue::NULL, &e);
        });
        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
        image.set_src(src);
    })
}

async fn wait_for_image(promise: Promise) -> anyhow::Result<web::HtmlImageElement> {
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("{:?}", e))?;
    value
        .dyn_into::<web::HtmlImageElement>()
        .map_err(|_| anyhow!("load resolved to a non-image value"))
}

/// 2x2 checker used when the image cannot be loaded.
pub fn fallback_bitmap() -> Result<Bitmap, FxError> {
    let pixels = checker_pixels();
    let data = web::ImageData::new_with_u8_clamped_array(Clamped(&pixels[..]), 2)?;
    Ok(Bitmap::Pixels(data))
}

/// Binds the effect texture to unit 0 and points `u_image` at it.
///
/// The texture is created once per slot.
pub fn bind_image(
    gl: &GL,
    program: &Program,
    slot: &mut TextureSlot<WebGlTexture>,
    bitmap: &Bitmap,
) -> Result<(), FxError> {
    let texture = slot.ensure_with(|| upload_texture(gl, bitmap))?;
    gl.active_texture(GL::TEXTURE0 + IMAGE_TEXTURE_UNIT as u32);
    gl.bind_texture(GL::TEXTURE_2D, Some(texture));
    if let Some(loc) = program.uniform(gl, IMAGE_UNIFORM) {
        gl.uniform1i(Some(&loc), IMAGE_TEXTURE_UNIT);
    }
    Ok(())
}

fn upload_texture(gl: &GL, bitmap: &Bitmap) -> Result<WebGlTexture, FxError> {
    let texture = gl.create_texture().ok_or(FxError::ContextUnavailable)?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    match bitmap {
        Bitmap::Image(image) => gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            image,
        )?,
        Bitmap::Pixels(data) => gl.tex_image_2d_with_u32_and_u32_and_image_data(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            data,
        )?,
    }
    Ok(texture)
}
