//! Painting for the neon loader. Sizes are logical points.

use crate::anim::color::{argb, fade};
use crate::anim::{fhash, lerp, Rgb};
use crate::gui::paint::{clip_convex, rect_vignette, rotate_about, scale_about, stroke_ellipse_arc};
use crate::settings::{AnimMode, Theme};
use eframe::egui::{
    self, pos2, vec2, Align2, Color32, FontId, Mesh, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2,
};
use std::f32::consts::TAU;

pub const SPIN_A: Rgb = Rgb::hex(0xFF4081);
pub const SPIN_B: Rgb = Rgb::hex(0x7C4DFF);
/// Thickness knob for every decorative stroke.
pub const BORDER_SCALE: f32 = 2.0;
const FRAME_LAYERS: usize = 3;
const NOISE_STEP: f32 = 8.0;
const NOISE_THRESHOLD: f32 = 0.88;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color32,
    pub vignette: Color32,
    pub text: Color32,
    pub shadow: Color32,
    pub bubble: Color32,
    pub glow: Color32,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: argb(0xFF0B0F1A),
            vignette: argb(0xCC000000),
            text: argb(0xFFF9FAFB),
            shadow: argb(0x66000000),
            bubble: argb(0xCC181E2A),
            glow: argb(0x55B721FF),
        },
        Theme::Light => Palette {
            bg: argb(0xFFF6F7FB),
            vignette: argb(0x99000000),
            text: argb(0xFF121418),
            shadow: argb(0x55000000),
            bubble: argb(0xCCFFFFFF),
            glow: argb(0x3321B4FD),
        },
    }
}

/// Lattice points lit by the background noise.
pub fn noise_dots(size: Vec2) -> Vec<Pos2> {
    let mut dots = Vec::new();
    let mut y = 0.0;
    while y < size.y {
        let mut x = 0.0;
        while x < size.x {
            if fhash(x * 0.173 + y * 0.7) > NOISE_THRESHOLD {
                dots.push(pos2(x, y));
            }
            x += NOISE_STEP;
        }
        y += NOISE_STEP;
    }
    dots
}

pub fn background(painter: &egui::Painter, rect: Rect, pal: &Palette, dots: &[Pos2]) {
    painter.rect_filled(rect, 0.0, pal.bg);
    rect_vignette(painter, rect, fade(pal.bg, 0.05), pal.vignette);

    let dot = fade(pal.text, 0.06);
    let mut mesh = Mesh::default();
    for p in dots {
        mesh.add_colored_rect(Rect::from_min_size(rect.min + p.to_vec2(), vec2(1.0, 1.0)), dot);
    }
    painter.add(Shape::mesh(mesh));
}

/// Nested rounded frames, one per layer, stepping inwards.
pub fn frame_layers(size: Vec2) -> Vec<(Rect, f32, f32, Color32)> {
    let base_stroke = 1.6 * BORDER_SCALE;
    let mut rect = Rect::from_min_size(pos2(14.0, 12.0), vec2(size.x - 28.0, size.y - 24.0));
    let mut layers = Vec::new();
    for i in 0..FRAME_LAYERS {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            break;
        }
        let k = i as f32 / (FRAME_LAYERS - 1).max(1) as f32;
        let color = SPIN_A.lerp(SPIN_B, k).with_opacity(0.35 * (1.0 - 0.15 * i as f32));
        let radius = (16.0 - 3.0 * i as f32).max(6.0);
        layers.push((rect, radius, base_stroke + 0.5 * i as f32, color));
        rect = rect.shrink(8.0);
    }
    layers
}

pub fn overlay(painter: &egui::Painter, size: Vec2) {
    for (rect, radius, width, color) in frame_layers(size) {
        painter.rect_stroke(rect, radius, Stroke::new(width, color), StrokeKind::Middle);
    }

    let glow = Stroke::new(1.8 * BORDER_SCALE, SPIN_B.with_opacity(0.12));
    let arc_rect = Rect::from_min_size(pos2(18.0, 16.0), vec2(size.x - 36.0, size.y - 32.0));
    stroke_ellipse_arc(painter, arc_rect, 10.0, 80.0, glow);
    stroke_ellipse_arc(painter, arc_rect, 200.0, 60.0, glow);

    let line = Stroke::new(BORDER_SCALE, SPIN_A.with_opacity(0.10));
    painter.line_segment([pos2(30.0, 60.0), pos2(size.x - 60.0, 30.0)], line);
    painter.line_segment([pos2(40.0, size.y - 50.0), pos2(size.x - 30.0, size.y - 20.0)], line);
}

/// Scale about the mode centre, for the cross-fade zoom.
#[derive(Debug, Clone, Copy)]
struct Zoom {
    c: Pos2,
    s: f32,
}

impl Zoom {
    fn p(self, p: Pos2) -> Pos2 {
        scale_about(p, self.c, self.s)
    }

    fn len(self, v: f32) -> f32 {
        v * self.s
    }

    fn rect(self, r: Rect) -> Rect {
        Rect::from_min_max(self.p(r.min), self.p(r.max))
    }
}

/// Draw `mode` around `c` at opacity `ga` and zoom `scale`.
pub fn draw_mode(
    painter: &egui::Painter,
    pal: &Palette,
    mode: AnimMode,
    c: Pos2,
    t: f32,
    ga: f32,
    scale: f32,
) {
    let z = Zoom { c, s: scale };
    match mode {
        AnimMode::Orbital => orbital(painter, z, t, ga),
        AnimMode::Energy => energy(painter, pal, z, t, ga),
        AnimMode::Triangle => triangle(painter, z, t, ga),
    }
}

fn orbital(painter: &egui::Painter, z: Zoom, t: f32, ga: f32) {
    const RINGS: usize = 3;
    const PER_RING: usize = 8;
    let c = z.c;
    for r in 0..RINGS {
        let rf = r as f32;
        let radius = (70.0 + 32.0 * rf) * (1.0 + 0.07 * (t * 2.2 + rf).sin());
        for i in 0..PER_RING {
            let w = i as f32 / PER_RING as f32;
            let ang = t * (1.3 + 0.25 * rf) + w * TAU;
            let mix = 0.5 + 0.5 * (t * 0.9 + w * TAU + rf).sin();
            let color = SPIN_A.lerp(SPIN_B, mix);
            // Ghost trail, tail first
            for k in (0..=4).rev() {
                let kf = k as f32;
                let a = ang - 0.022 * kf * 4.5;
                let rr = radius * (1.0 - 0.03 * kf);
                let size = 6.0
                    + if r == 0 { 2.0 } else { 0.0 }
                    + if k == 0 { 1.5 } else { 0.0 };
                let p = pos2(c.x + rr * a.cos(), c.y + rr * a.sin());
                painter.circle_filled(
                    z.p(p),
                    z.len(size / 2.0),
                    color.with_opacity(ga * (0.18 + 0.16 * (4.0 - kf))),
                );
            }
        }
    }

    let pulse = 0.25 + 0.75 * (t * 1.4).sin().abs();
    let edge = SPIN_B.lerp(SPIN_A, pulse * 0.5);
    painter.circle_stroke(
        c,
        z.len(30.0),
        Stroke::new(z.len(2.0 * BORDER_SCALE), edge.with_opacity(ga * 0.35)),
    );
}

/// Normalised height of energy column `i` at time `t`.
pub fn energy_level(i: usize, cols: usize, t: f32) -> f32 {
    let u = i as f32 / (cols.max(2) - 1) as f32;
    0.55 + 0.45 * (0.6 * (t * 1.9 + u * 6.3).sin() + 0.4 * (t * 3.3 + u * 13.0 + 1.234).sin())
}

fn energy(painter: &egui::Painter, pal: &Palette, z: Zoom, t: f32, ga: f32) {
    const W: f32 = 420.0;
    const H: f32 = 38.0;
    const COLS: usize = 64;
    let bx = Rect::from_center_size(z.c, vec2(W, H));

    painter.rect_filled(z.rect(bx), 0.0, fade(pal.bubble, ga * 0.85));
    painter.rect_stroke(
        z.rect(bx),
        0.0,
        Stroke::new(z.len(1.5 * BORDER_SCALE), SPIN_B.with_opacity(ga * 0.6)),
        StrokeKind::Middle,
    );

    let col_w = W / COLS as f32;
    for i in 0..COLS {
        let n = energy_level(i, COLS, t);
        let h = (H - 8.0) * (0.15 + 0.85 * n);
        let min = pos2(bx.min.x + i as f32 * col_w + 1.0, bx.max.y - h - 3.0);
        let bar = Rect::from_min_size(min, vec2(col_w - 2.0, h));
        let mix = 0.35 + 0.65 * n;
        let bottom = SPIN_A.lerp(SPIN_B, mix * 0.6).with_opacity(ga * (0.28 + 0.30 * n));
        let top = SPIN_A.lerp(SPIN_B, mix).with_opacity(ga * (0.40 + 0.35 * n));
        painter.rect_filled(z.rect(bar), 0.0, bottom);
        let inner = Rect::from_min_max(pos2(bar.min.x, bar.min.y + 4.0), bar.max);
        if inner.height() > 0.0 {
            painter.rect_filled(z.rect(inner), 0.0, top);
        }
    }

    let hl = Stroke::new(z.len(BORDER_SCALE), Color32::WHITE.gamma_multiply(ga * 0.35));
    painter.line_segment(
        [
            z.p(pos2(bx.min.x + 6.0, bx.min.y + 8.0)),
            z.p(pos2(bx.max.x - 6.0, bx.min.y + 8.0)),
        ],
        hl,
    );
}

/// Vertices of the rotated triangle around `c`: apex, left, right.
pub fn triangle_points(c: Pos2) -> [Pos2; 3] {
    const S: f32 = 160.0;
    let rot = 15f32.to_radians();
    [
        pos2(c.x, c.y - S * 0.8),
        pos2(c.x - S * 0.9, c.y + S * 0.7),
        pos2(c.x + S * 0.9, c.y + S * 0.7),
    ]
    .map(|p| rotate_about(p, c, rot))
}

fn triangle(painter: &egui::Painter, z: Zoom, t: f32, ga: f32) {
    let [a, b, c] = triangle_points(z.c);

    let pulse = 0.25 + 0.75 * (t * 1.7).sin().abs();
    let edge = SPIN_B.lerp(SPIN_A, pulse);
    let outline: Vec<Pos2> = [a, b, c].iter().map(|p| z.p(*p)).collect();
    painter.add(Shape::closed_line(
        outline.clone(),
        Stroke::new(
            z.len(3.0 * BORDER_SCALE),
            edge.with_opacity(ga * (0.35 + 0.45 * pulse)),
        ),
    ));

    // Sweeping bars, clipped to the triangle
    for i in 0..3 {
        let fi = i as f32;
        let k = (t * (0.6 + fi * 0.12)).rem_euclid(1.0);
        let yy = lerp(b.y, a.y, k);
        let bar = Rect::from_min_size(pos2(b.x + 8.0, yy - 4.0), vec2(c.x - b.x - 16.0, 8.0));
        let quad: Vec<Pos2> = [bar.left_top(), bar.right_top(), bar.right_bottom(), bar.left_bottom()]
            .iter()
            .map(|p| z.p(*p))
            .collect();
        let clipped = clip_convex(&quad, &outline);
        if clipped.len() >= 3 {
            let color = SPIN_A.lerp(SPIN_B, 0.25 + 0.25 * fi).with_opacity(ga * (0.18 + 0.15 * fi));
            painter.add(Shape::convex_polygon(clipped, color, Stroke::NONE));
        }
    }
}

pub fn phrase_bubble(painter: &egui::Painter, pal: &Palette, size: Vec2, text: &str, alpha: f32, t: f32) {
    if alpha <= 0.0 {
        return;
    }
    const PAD: Vec2 = vec2(18.0, 12.0);
    const RADIUS: f32 = 14.0;
    let max_w = (size.x - 120.0).min(820.0).max(40.0);

    let galley = painter.layout(
        text.to_owned(),
        FontId::proportional(20.0),
        fade(pal.text, alpha),
        max_w,
    );
    let text_size = galley.size();
    let wobble = (t * 2.2).sin() * 2.0;
    let origin = pos2((size.x - text_size.x) / 2.0, 28.0 + wobble);
    let bx = Rect::from_min_size(origin - PAD, text_size + PAD * 2.0);

    painter.rect_filled(bx.translate(vec2(2.0, 2.0)), RADIUS, fade(pal.shadow, alpha));
    painter.rect(
        bx,
        RADIUS,
        fade(pal.bubble, alpha),
        Stroke::new(2.0 * BORDER_SCALE, SPIN_B.with_opacity(alpha * 0.55)),
        StrokeKind::Middle,
    );
    painter.galley(origin, galley, pal.text);
}

pub fn toast(painter: &egui::Painter, pal: &Palette, size: Vec2, text: &str, a: f32) {
    if a <= 0.0 {
        return;
    }
    let layout = Rect::from_min_size(pos2(size.x - 320.0, 16.0), vec2(300.0, 36.0));
    let bx = layout.expand2(vec2(10.0, 6.0));
    painter.rect(
        bx,
        10.0,
        fade(pal.bubble, a * 0.92),
        Stroke::new(1.5 * BORDER_SCALE, SPIN_A.with_opacity(a * 0.6)),
        StrokeKind::Middle,
    );
    painter.text(
        layout.left_center(),
        Align2::LEFT_CENTER,
        text,
        FontId::proportional(13.0),
        fade(pal.text, a),
    );
}

pub fn hud(painter: &egui::Painter, pal: &Palette, line: &str) {
    painter.text(
        pos2(14.0, 12.0),
        Align2::LEFT_TOP,
        line,
        FontId::monospace(11.0),
        fade(pal.text, 0.85),
    );
}
