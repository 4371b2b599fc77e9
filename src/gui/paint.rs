//! Gradient meshes and small geometry helpers shared by the launchers.

use eframe::egui::{self, pos2, Color32, Mesh, Pos2, Rect, Shape, Stroke};
use std::f32::consts::TAU;

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    a.lerp_to_gamma(b, t.clamp(0.0, 1.0))
}

/// Fill `rect` with a gradient running from `from` to `to` (window space).
/// The colour varies along that axis only.
pub fn linear_gradient(
    painter: &egui::Painter,
    rect: Rect,
    from: Pos2,
    to: Pos2,
    c0: Color32,
    c1: Color32,
) {
    let axis = to - from;
    let len2 = axis.length_sq().max(f32::EPSILON);
    let t_at = |p: Pos2| ((p - from).dot(axis) / len2).clamp(0.0, 1.0);

    let mut mesh = Mesh::default();
    for corner in [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ] {
        mesh.colored_vertex(corner, lerp_color(c0, c1, t_at(corner)));
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));
}

pub fn vertical_gradient(painter: &egui::Painter, rect: Rect, top: Color32, bottom: Color32) {
    linear_gradient(painter, rect, rect.center_top(), rect.center_bottom(), top, bottom);
}

/// Disc fading from `inner` at the centre to `outer` at `radius`.
pub fn radial_glow(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    inner: Color32,
    outer: Color32,
) {
    if radius <= 0.0 {
        return;
    }
    let segments = ((radius * 0.5) as usize).clamp(24, 96);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, inner);
    for i in 0..segments {
        let a = TAU * i as f32 / segments as f32;
        mesh.colored_vertex(center + radius * egui::vec2(a.cos(), a.sin()), outer);
    }
    for i in 0..segments as u32 {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % segments as u32);
    }
    painter.add(Shape::mesh(mesh));
}

/// Fan from the rect centre to its perimeter: `center` colour in the middle,
/// `edge` colour along the border.
pub fn rect_vignette(painter: &egui::Painter, rect: Rect, center: Color32, edge: Color32) {
    let per_side = 8;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.center(), center);
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    for side in 0..4 {
        let a = corners[side];
        let b = corners[(side + 1) % 4];
        for k in 0..per_side {
            mesh.colored_vertex(a.lerp(b, k as f32 / per_side as f32), edge);
        }
    }
    let ring = (4 * per_side) as u32;
    for i in 0..ring {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % ring);
    }
    painter.add(Shape::mesh(mesh));
}

/// Points along a circular arc. Angles in degrees, clockwise on screen,
/// 0 pointing right.
pub fn arc_points(center: Pos2, radius: f32, start_deg: f32, sweep_deg: f32, steps: usize) -> Vec<Pos2> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let a = (start_deg + sweep_deg * i as f32 / steps as f32).to_radians();
            pos2(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

pub fn stroke_arc(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start_deg: f32,
    sweep_deg: f32,
    stroke: Stroke,
) {
    let steps = (sweep_deg.abs() / 4.0).ceil() as usize;
    painter.add(Shape::line(
        arc_points(center, radius, start_deg, sweep_deg, steps),
        stroke,
    ));
}

/// Arc inscribed in `rect` (an ellipse when the rect is not square).
pub fn stroke_ellipse_arc(
    painter: &egui::Painter,
    rect: Rect,
    start_deg: f32,
    sweep_deg: f32,
    stroke: Stroke,
) {
    let steps = (sweep_deg.abs() / 3.0).ceil().max(2.0) as usize;
    let c = rect.center();
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
    let points = (0..=steps)
        .map(|i| {
            let a = (start_deg + sweep_deg * i as f32 / steps as f32).to_radians();
            pos2(c.x + rx * a.cos(), c.y + ry * a.sin())
        })
        .collect();
    painter.add(Shape::line(points, stroke));
}

pub fn rotate_about(p: Pos2, pivot: Pos2, angle: f32) -> Pos2 {
    let (s, c) = angle.sin_cos();
    let d = p - pivot;
    pos2(pivot.x + c * d.x - s * d.y, pivot.y + s * d.x + c * d.y)
}

/// Scale `p` about `pivot`.
pub fn scale_about(p: Pos2, pivot: Pos2, s: f32) -> Pos2 {
    pivot + (p - pivot) * s
}

/// Sutherland–Hodgman clip of `subject` against a convex polygon. Clip
/// vertices may wind either way.
pub fn clip_convex(subject: &[Pos2], clip: &[Pos2]) -> Vec<Pos2> {
    if clip.len() < 3 {
        return Vec::new();
    }
    let orientation = signed_area(clip).signum();
    let inside = |a: Pos2, b: Pos2, p: Pos2| {
        let cross = (b - a).x * (p - a).y - (b - a).y * (p - a).x;
        cross * orientation >= 0.0
    };
    let intersect = |a: Pos2, b: Pos2, p: Pos2, q: Pos2| {
        let r = b - a;
        let s = q - p;
        let denom = r.x * s.y - r.y * s.x;
        if denom.abs() < f32::EPSILON {
            return p;
        }
        let t = (r.x * (a - p).y - r.y * (a - p).x) / denom;
        p + s * t
    };

    let mut output = subject.to_vec();
    for i in 0..clip.len() {
        let a = clip[i];
        let b = clip[(i + 1) % clip.len()];
        let input = std::mem::take(&mut output);
        if input.is_empty() {
            break;
        }
        for j in 0..input.len() {
            let cur = input[j];
            let prev = input[(j + input.len() - 1) % input.len()];
            match (inside(a, b, cur), inside(a, b, prev)) {
                (true, true) => output.push(cur),
                (true, false) => {
                    output.push(intersect(a, b, prev, cur));
                    output.push(cur);
                }
                (false, true) => output.push(intersect(a, b, prev, cur)),
                (false, false) => {}
            }
        }
    }
    output
}

pub fn signed_area(poly: &[Pos2]) -> f32 {
    let n = poly.len();
    (0..n)
        .map(|i| {
            let (p, q) = (poly[i], poly[(i + 1) % n]);
            p.x * q.y - q.x * p.y
        })
        .sum::<f32>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Pos2> {
        vec![pos2(x0, y0), pos2(x1, y0), pos2(x1, y1), pos2(x0, y1)]
    }

    #[test]
    fn clipping_overlapping_squares_keeps_the_overlap() {
        let out = clip_convex(&square(0.0, 0.0, 10.0, 10.0), &square(5.0, 5.0, 15.0, 15.0));
        assert!((signed_area(&out).abs() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn clip_winding_does_not_matter() {
        let mut clip = square(5.0, 5.0, 15.0, 15.0);
        clip.reverse();
        let out = clip_convex(&square(0.0, 0.0, 10.0, 10.0), &clip);
        assert!((signed_area(&out).abs() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn disjoint_polygons_clip_to_nothing() {
        let out = clip_convex(&square(0.0, 0.0, 1.0, 1.0), &square(5.0, 5.0, 6.0, 6.0));
        assert!(out.len() < 3 || signed_area(&out).abs() < 1e-6);
    }

    #[test]
    fn bar_inside_triangle() {
        let tri = vec![pos2(0.0, -10.0), pos2(-10.0, 10.0), pos2(10.0, 10.0)];
        let bar = square(-20.0, -1.0, 20.0, 1.0);
        let out = clip_convex(&bar, &tri);
        assert!(out.iter().all(|p| p.x.abs() <= 6.0 && p.y.abs() <= 1.0 + 1e-4));
        assert!(signed_area(&out).abs() > 0.0);
    }

    #[test]
    fn arc_and_rotation_helpers() {
        let pts = arc_points(Pos2::ZERO, 10.0, 0.0, 90.0, 2);
        assert_eq!(pts.len(), 3);
        assert!((pts[2].y - 10.0).abs() < 1e-4 && pts[2].x.abs() < 1e-4);
        let r = rotate_about(pos2(1.0, 0.0), Pos2::ZERO, std::f32::consts::FRAC_PI_2);
        assert!((r.y - 1.0).abs() < 1e-6);
    }
}
