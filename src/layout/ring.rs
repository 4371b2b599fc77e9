use eframe::egui::{pos2, vec2, Pos2, Rect};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Sizing knobs for [`radial_layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParams {
    pub icon_box: f32,
    pub gap: f32,
    /// Pulls the rings towards the centre (1.0 = as far out as fits).
    pub radius_scale: f32,
    /// Extra spacing between the outer and inner ring.
    pub ring_spacing: f32,
    /// Counts up to this always fit on one ring.
    pub single_ring_max: usize,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            icon_box: 112.0,
            gap: 36.0,
            radius_scale: 0.4,
            ring_spacing: 42.0,
            single_ring_max: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSlot {
    /// 0 = outer (or only) ring, 1 = inner ring.
    pub ring: usize,
    /// Radians, 0 pointing right, growing clockwise on screen.
    pub angle: f32,
    pub radius: f32,
    pub center: Pos2,
    pub rect: Rect,
}

/// Place `count` icon boxes on one or two concentric rings around the centre
/// of `client`. Slots come back in item order.
pub fn radial_layout(count: usize, client: Rect, params: &RingParams) -> Vec<RingSlot> {
    if count == 0 {
        return Vec::new();
    }

    let icon_box = params.icon_box.max(1.0);
    let center = client.center();
    let w = client.width();
    let h = client.height();

    let max_r = (w.min(h) * 0.5 - icon_box * 0.7).max(icon_box);
    let needed_r = count as f32 * (icon_box + params.gap) / TAU;

    let mut slots = Vec::with_capacity(count);
    if needed_r <= max_r || count <= params.single_ring_max {
        let r = needed_r.max(max_r * params.radius_scale);
        place_ring(&mut slots, 0, count, r, -FRAC_PI_2, center, icon_box);
    } else {
        let outer = count.div_ceil(2);
        let inner = count - outer;

        let r_outer = max_r * params.radius_scale;
        let r_inner = (r_outer - (icon_box + params.gap + params.ring_spacing) * params.radius_scale)
            .max(icon_box);

        place_ring(&mut slots, 0, outer, r_outer, -FRAC_PI_2, center, icon_box);
        // Inner ring sits half a step off so icons interleave
        let a1 = -FRAC_PI_2 + PI / outer as f32;
        place_ring(&mut slots, 1, inner, r_inner, a1, center, icon_box);
    }
    slots
}

fn place_ring(
    slots: &mut Vec<RingSlot>,
    ring: usize,
    count: usize,
    radius: f32,
    start: f32,
    center: Pos2,
    icon_box: f32,
) {
    for i in 0..count {
        let angle = start + TAU * i as f32 / count as f32;
        let c = pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin());
        let rect = Rect::from_center_size(c, vec2(icon_box, icon_box));
        slots.push(RingSlot {
            ring,
            angle,
            radius,
            center: c,
            rect,
        });
    }
}

/// Index of the slot under `pos`, if any.
pub fn hit_test(slots: &[RingSlot], pos: Pos2) -> Option<usize> {
    slots.iter().position(|s| s.rect.contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(1100.0, 700.0))
    }

    fn ring_spacing_sum(slots: &[RingSlot], ring: usize) -> f32 {
        let angles: Vec<f32> = slots.iter().filter(|s| s.ring == ring).map(|s| s.angle).collect();
        let n = angles.len();
        (0..n)
            .map(|i| {
                let next = if i + 1 < n { angles[i + 1] } else { angles[0] + TAU };
                next - angles[i]
            })
            .sum()
    }

    #[test]
    fn empty_layout_has_no_slots() {
        assert!(radial_layout(0, client(), &RingParams::default()).is_empty());
    }

    #[test]
    fn single_ring_spacing_is_equal_and_covers_full_turn() {
        let slots = radial_layout(7, client(), &RingParams::default());
        assert_eq!(slots.len(), 7);
        assert!(slots.iter().all(|s| s.ring == 0));

        let step = TAU / 7.0;
        for pair in slots.windows(2) {
            assert!((pair[1].angle - pair[0].angle - step).abs() < 1e-4);
        }
        assert!((ring_spacing_sum(&slots, 0).to_degrees() - 360.0).abs() < 1e-2);
        // First icon sits at the top
        assert!((slots[0].angle + FRAC_PI_2).abs() < 1e-6);
        assert!(slots[0].center.y < client().center().y);
    }

    #[test]
    fn large_counts_split_into_two_rings() {
        let count = 41;
        let slots = radial_layout(count, client(), &RingParams::default());
        let outer = slots.iter().filter(|s| s.ring == 0).count();
        let inner = slots.iter().filter(|s| s.ring == 1).count();
        assert_eq!(outer + inner, count);
        assert_eq!(outer, 21);
        assert_eq!(inner, 20);
        assert!((ring_spacing_sum(&slots, 0).to_degrees() - 360.0).abs() < 1e-2);
        assert!((ring_spacing_sum(&slots, 1).to_degrees() - 360.0).abs() < 1e-2);

        // Inner ring never collapses below one icon box
        assert!(slots[outer].radius >= RingParams::default().icon_box);
    }

    #[test]
    fn small_counts_stay_on_one_ring_even_when_crowded() {
        let tiny = Rect::from_min_size(Pos2::ZERO, vec2(200.0, 200.0));
        let slots = radial_layout(10, tiny, &RingParams::default());
        assert!(slots.iter().all(|s| s.ring == 0));
    }

    #[test]
    fn hit_test_finds_the_icon_box() {
        let slots = radial_layout(4, client(), &RingParams::default());
        assert_eq!(hit_test(&slots, slots[2].center), Some(2));
        assert_eq!(hit_test(&slots, client().center()), None);
    }
}
