// Host-side tests for image caching, texture slots, uniform lookup and the
// built-in effect table.

use shader_fx::constants::*;
use shader_fx::core::*;
use std::cell::Cell;

#[test]
fn concurrent_requests_share_one_load() {
    let mut cache: ImageCache<&str, u32> = ImageCache::new("./img.png");
    let begun = Cell::new(0);
    let begin = |src: &str| {
        assert_eq!(src, "./img.png");
        begun.set(begun.get() + 1);
        7
    };

    assert_eq!(cache.request(begin), ImageLookup::Pending(7));
    assert!(cache.is_pending());
    assert_eq!(cache.request(|_| unreachable!()), ImageLookup::Pending(7));
    assert_eq!(begun.get(), 1);
    assert!(cache.ready().is_none());
}

#[test]
fn resolved_image_is_reused() {
    let mut cache: ImageCache<&str, u32> = ImageCache::new("./img.png");
    cache.request(|_| 1);
    cache.resolve("decoded");
    assert!(!cache.is_pending());
    assert_eq!(cache.ready(), Some(&"decoded"));
    assert_eq!(cache.request(|_| unreachable!()), ImageLookup::Ready("decoded"));
}

#[test]
fn placeholder_resolution_is_cached_too() {
    let mut cache: ImageCache<Vec<u8>, ()> = ImageCache::new("missing.png");
    cache.request(|_| ());
    cache.resolve(checker_pixels().to_vec());
    match cache.request(|_| unreachable!()) {
        ImageLookup::Ready(pixels) => assert_eq!(pixels.len(), 16),
        ImageLookup::Pending(_) => panic!("expected cached placeholder"),
    }
}

#[test]
fn texture_slot_creates_once() {
    let mut slot: TextureSlot<u32> = TextureSlot::new();
    let created = Cell::new(0);
    let mut make = || -> Result<u32, ()> {
        created.set(created.get() + 1);
        Ok(created.get())
    };

    assert_eq!(slot.ensure_with(&mut make), Ok(&1));
    assert_eq!(slot.ensure_with(&mut make), Ok(&1));
    assert_eq!(created.get(), 1);

    assert_eq!(slot.invalidate(), Some(1));
    assert!(slot.get().is_none());
    assert_eq!(slot.ensure_with(&mut make), Ok(&2));
    assert_eq!(created.get(), 2);
}

#[test]
fn failed_texture_creation_leaves_slot_empty() {
    let mut slot: TextureSlot<u32> = TextureSlot::default();
    assert_eq!(slot.ensure_with(|| Err("context lost")), Err("context lost"));
    assert!(slot.get().is_none());
    assert_eq!(slot.ensure_with(|| Ok::<_, &str>(3)), Ok(&3));
}

#[test]
fn checker_is_light_on_the_diagonal() {
    let pixels = checker_pixels();
    assert_eq!(&pixels[0..4], &CHECKER_LIGHT);
    assert_eq!(&pixels[4..8], &CHECKER_DARK);
    assert_eq!(&pixels[8..12], &CHECKER_DARK);
    assert_eq!(&pixels[12..16], &CHECKER_LIGHT);
}

#[test]
fn time_uniform_prefers_snake_case() {
    let both = resolve_time_uniform(|name| match name {
        "u_time" => Some(1),
        "uTime" => Some(2),
        _ => None,
    });
    assert_eq!(both, Some(1));

    let camel = resolve_time_uniform(|name| (name == "uTime").then_some(2));
    assert_eq!(camel, Some(2));

    let none: Option<u8> = resolve_time_uniform(|_| None);
    assert_eq!(none, None);
}

#[test]
fn uniform_lookup_stops_at_first_hit() {
    let mut asked = Vec::new();
    let found = resolve_uniform(&["a", "b", "c"], |name| {
        asked.push(name.to_string());
        (name == "b").then_some(name.len())
    });
    assert_eq!(found, Some(1));
    assert_eq!(asked, ["a", "b"]);
}

#[test]
fn builtins_have_unique_hashes() {
    let hashes: Vec<_> = builtins().map(|def| def.hash).collect();
    assert_eq!(hashes, ["0,1", "0,2", "0,3"]);
    for def in builtins() {
        assert_eq!(builtin(def.hash), Some(def));
    }
    assert!(builtin("9,9").is_none());
}

#[test]
fn only_ripple_needs_an_image() {
    assert!(!CLAY.needs_image());
    assert!(!MOON.needs_image());
    assert!(RIPPLE.needs_image());
    assert_eq!(RIPPLE.phase, PhaseMapping::Turn);
    assert_eq!(CLAY.phase, PhaseMapping::SWEEP);
}

#[test]
fn shaders_use_the_shared_interface() {
    for def in builtins() {
        assert!(def.vertex_shader.contains(POSITION_ATTRIBUTE));
        assert!(TIME_UNIFORM_NAMES
            .iter()
            .any(|name| def.fragment_shader.contains(name)));
    }
    assert!(RIPPLE.fragment_shader.contains(IMAGE_UNIFORM));
}

#[test]
fn settings_scale_progress_duration() {
    let settings = EffectSettings::new().duration_ms(1000.0);
    assert_eq!(settings.progress_duration_ms(), 800.0);
    assert_eq!(
        EffectSettings::default().progress_duration_ms(),
        DEFAULT_DURATION_MS * PROGRESS_FRACTION
    );
}

#[test]
fn settings_builders() {
    let settings = EffectSettings::new().host_id(None).size_bounds(300, 100);
    assert_eq!(settings.host_id, None);
    assert_eq!((settings.min_size, settings.max_size), (300, 300));
    assert_eq!(
        EffectSettings::default().host_id.as_deref(),
        Some(DEFAULT_HOST_ID)
    );
}

#[test]
fn image_location_can_be_overridden() {
    let defaults = EffectSettings::default();
    assert_eq!(defaults.image_src_for(&RIPPLE), RIPPLE.image_src);

    let custom = EffectSettings::new().image_src("/assets/ripple.png");
    assert_eq!(custom.image_src_for(&RIPPLE), Some("/assets/ripple.png"));
    // effects without a sampler never load an image
    assert_eq!(custom.image_src_for(&CLAY), None);
}
