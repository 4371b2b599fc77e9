pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

pub fn ease_in_out_quart(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u * u / 2.0
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - clamp01(t);
    1.0 - u * u * u
}

/// Cheap deterministic noise in `[0, 1)`.
pub fn fhash(x: f32) -> f32 {
    let v = (x * 12.9898).sin() * 43758.5453;
    v - v.floor()
}

/// Symmetric fade for a short-lived overlay: ramps up over the first and down
/// over the last `edge` fraction of its life.
pub fn edge_fade(elapsed: f32, duration: f32, edge: f32) -> f32 {
    if duration <= 0.0 || elapsed < 0.0 || elapsed > duration {
        return 0.0;
    }
    let p = elapsed / duration;
    let e = edge.max(f32::EPSILON);
    if p < e {
        p / e
    } else if p > 1.0 - e {
        (1.0 - p) / e
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_curves_hit_their_endpoints() {
        for f in [ease_in_out_quart, ease_out_cubic] {
            assert!(f(0.0).abs() < 1e-6);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
            assert!(f(-3.0).abs() < 1e-6);
            assert!((f(7.0) - 1.0).abs() < 1e-6);
        }
        assert!((ease_in_out_quart(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fhash_is_deterministic_and_in_range() {
        for i in 0..500 {
            let x = i as f32 * 0.37 - 40.0;
            let h = fhash(x);
            assert!((0.0..1.0).contains(&h), "fhash({x}) = {h}");
            assert_eq!(h, fhash(x));
        }
    }

    #[test]
    fn edge_fade_ramps_in_and_out() {
        assert_eq!(edge_fade(0.5, 1.0, 0.15), 1.0);
        assert!((edge_fade(0.075, 1.0, 0.15) - 0.5).abs() < 1e-5);
        assert!((edge_fade(0.925, 1.0, 0.15) - 0.5).abs() < 1e-4);
        assert_eq!(edge_fade(1.5, 1.0, 0.15), 0.0);
    }
}
