// Host-side tests for life -> phase mapping.

use shader_fx::core::PhaseMapping;
use std::f32::consts::{FRAC_PI_4, PI, TAU};

#[test]
fn sweep_starts_and_ends_off_the_unit_circle() {
    let sweep = PhaseMapping::SWEEP;
    assert_eq!(sweep.phase(0.0), PI + FRAC_PI_4);
    assert_eq!(sweep.phase(1.0), -FRAC_PI_4);
}

#[test]
fn sweep_is_linear_in_life() {
    let sweep = PhaseMapping::SWEEP;
    let start = PI + FRAC_PI_4;
    let end = -FRAC_PI_4;
    for i in 0..=20 {
        let life = i as f32 / 20.0;
        let expected = start + life * (end - start);
        assert!((sweep.phase(life) - expected).abs() < 1e-5, "life={life}");
    }
}

#[test]
fn turn_maps_to_full_circle() {
    let turn = PhaseMapping::Turn;
    assert_eq!(turn.phase(0.0), 0.0);
    assert_eq!(turn.phase(0.5), PI);
    assert_eq!(turn.phase(1.0), TAU);
}

#[test]
fn life_outside_unit_range_is_clamped() {
    assert_eq!(PhaseMapping::Turn.phase(1.5), TAU);
    assert_eq!(PhaseMapping::Turn.phase(-0.5), 0.0);
    assert_eq!(PhaseMapping::SWEEP.phase(2.0), -FRAC_PI_4);
}
