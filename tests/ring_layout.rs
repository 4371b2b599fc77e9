use eframe::egui::{pos2, vec2, Rect};
use neon_launcher::layout::ring::{hit_test, radial_layout, RingParams};
use neon_launcher::nav::{navigate, starting_index, Direction};
use std::f32::consts::TAU;

fn client() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(1100.0, 700.0))
}

fn ring_angles(count: usize, ring: usize) -> Vec<f32> {
    radial_layout(count, client(), &RingParams::default())
        .into_iter()
        .filter(|s| s.ring == ring)
        .map(|s| s.angle)
        .collect()
}

#[test]
fn single_ring_spacing_covers_a_full_turn() {
    let angles = ring_angles(6, 0);
    assert_eq!(angles.len(), 6);
    let step = TAU / 6.0;
    let total: f32 = angles.windows(2).map(|w| w[1] - w[0]).sum::<f32>() + step;
    assert!((total - TAU).abs() < 1e-4);
    for w in angles.windows(2) {
        assert!((w[1] - w[0] - step).abs() < 1e-4);
    }
}

#[test]
fn overflow_splits_into_two_rings() {
    let n = 40;
    let slots = radial_layout(n, client(), &RingParams::default());
    assert_eq!(slots.len(), n);
    let outer = slots.iter().filter(|s| s.ring == 0).count();
    let inner = slots.iter().filter(|s| s.ring == 1).count();
    assert!(inner > 0);
    assert_eq!(outer + inner, n);
    assert!(slots[..outer].iter().all(|s| s.ring == 0));
}

#[test]
fn every_slot_hits_itself() {
    let slots = radial_layout(9, client(), &RingParams::default());
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(hit_test(&slots, slot.center), Some(i));
    }
    assert_eq!(hit_test(&slots, client().center()), None);
}

#[test]
fn arrows_walk_the_ring() {
    let slots = radial_layout(4, client(), &RingParams::default());
    let centers: Vec<_> = slots.iter().map(|s| s.center).collect();
    // Clockwise from the top: top, right, bottom, left
    let start = starting_index(None, None);
    assert_eq!(navigate(&centers, start, Direction::Right), Some(1));
    // Nothing further right or above: step to the neighbour index
    assert_eq!(navigate(&centers, 1, Direction::Right), Some(2));
    assert_eq!(navigate(&centers, start, Direction::Up), Some(3));
    assert_eq!(navigate(&[], 0, Direction::Left), None);
}
