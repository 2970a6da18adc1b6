use crate::constants::{CHECKER_DARK, CHECKER_LIGHT};

/// Outcome of [`ImageCache::request`].
#[derive(Debug, Clone, PartialEq)]
pub enum ImageLookup<B, H> {
    /// The bitmap is available.
    Ready(B),
    /// A load is in flight; await this handle.
    Pending(H),
}

#[derive(Debug)]
enum ImageState<B, H> {
    Empty,
    Pending(H),
    Ready(B),
}

/// Caches one decoded image and shares a single in-flight load.
///
/// `B` is the decoded bitmap, `H` a cloneable handle on the pending load
/// (a JS promise in the browser).
#[derive(Debug)]
pub struct ImageCache<B, H> {
    src: String,
    state: ImageState<B, H>,
}

impl<B: Clone, H: Clone> ImageCache<B, H> {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            state: ImageState::Empty,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Returns the cached bitmap, the pending load, or starts one with `begin`.
    ///
    /// `begin` only runs when nothing is cached or in flight.
    pub fn request(&mut self, begin: impl FnOnce(&str) -> H) -> ImageLookup<B, H> {
        match &self.state {
            ImageState::Ready(bitmap) => ImageLookup::Ready(bitmap.clone()),
            ImageState::Pending(handle) => ImageLookup::Pending(handle.clone()),
            ImageState::Empty => {
                let handle = begin(&self.src);
                self.state = ImageState::Pending(handle.clone());
                ImageLookup::Pending(handle)
            }
        }
    }

    /// Stores the bitmap (decoded or placeholder) for every later request.
    pub fn resolve(&mut self, bitmap: B) {
        self.state = ImageState::Ready(bitmap);
    }

    pub fn ready(&self) -> Option<&B> {
        match &self.state {
            ImageState::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ImageState::Pending(_))
    }
}

/// Holds at most one texture for the current rendering context.
#[derive(Debug)]
pub struct TextureSlot<T> {
    texture: Option<T>,
}

impl<T> Default for TextureSlot<T> {
    fn default() -> Self {
        Self { texture: None }
    }
}

impl<T> TextureSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing texture, creating it with `create` if the slot is empty.
    pub fn ensure_with<E>(&mut self, create: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        let texture = match self.texture.take() {
            Some(texture) => texture,
            None => create()?,
        };
        Ok(self.texture.insert(texture))
    }

    pub fn get(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    /// Forgets the texture; the next [`ensure_with`](Self::ensure_with) rebuilds it.
    pub fn invalidate(&mut self) -> Option<T> {
        self.texture.take()
    }
}

/// RGBA pixels of the 2x2 placeholder: light on the diagonal, dark elsewhere.
pub fn checker_pixels() -> [u8; 16] {
    let mut pixels = [0u8; 16];
    for (i, px) in pixels.chunks_exact_mut(4).enumerate() {
        let (x, y) = (i % 2, i / 2);
        let color = if x == y { CHECKER_LIGHT } else { CHECKER_DARK };
        px.copy_from_slice(&color);
    }
    pixels
}
