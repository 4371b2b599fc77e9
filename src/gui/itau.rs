//! Fullscreen loader that builds and unbuilds a word out of square blocks.

use super::paint::vertical_gradient;
use super::{TickClock, FRAME};
use crate::anim::timeline::BlockTimeline;
use crate::anim::Rgb;
use crate::layout::blocks::{build_block_layout, BlockGridParams, BlockLayout, Mask};
use ab_glyph::FontArc;
use anyhow::Context;
use eframe::egui::{self, pos2, vec2, Color32, Mesh, Rect, Shape, Stroke, StrokeKind};

pub const DEFAULT_TITLE: &str = "Itaú";
const BG_TOP: Rgb = Rgb::hex(0x0A2D74);
const BG_BOTTOM: Rgb = Rgb::hex(0x061E53);
const BORDER: Rgb = Rgb::hex(0x113985);
const BLOCK: Rgb = Rgb::hex(0xFFC20E);
const BADGE_RADIUS: f32 = 42.0;
const BADGE_STROKE: f32 = 6.0;
const PADDING: f32 = 36.0;

/// Heavy system faces first, the bundled font otherwise.
#[cfg(windows)]
const FONT_CANDIDATES: &[&str] = &[
    r"C:\Windows\Fonts\seguibl.ttf",
    r"C:\Windows\Fonts\segoeuib.ttf",
];
#[cfg(not(windows))]
const FONT_CANDIDATES: &[&str] = &[];

pub fn load_title_font() -> anyhow::Result<FontArc> {
    for path in FONT_CANDIDATES {
        match std::fs::read(path).map_err(anyhow::Error::from).and_then(|bytes| {
            FontArc::try_from_vec(bytes).map_err(anyhow::Error::from)
        }) {
            Ok(font) => {
                log::debug!("Title font {}", path);
                return Ok(font);
            }
            Err(e) => log::debug!("Font {} unavailable: {}", path, e),
        }
    }
    FontArc::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT)
        .context("Bundled font failed to parse")
}

/// Badge rectangle for a window of `size`.
pub fn badge_rect(size: egui::Vec2) -> Rect {
    Rect::from_min_size(egui::Pos2::ZERO, size).shrink(PADDING)
}

/// Badge grown or shrunk about its centre by `scale`.
pub fn breathing_badge(badge: Rect, scale: f32) -> Rect {
    Rect::from_center_size(badge.center(), badge.size() * scale)
}

/// One-pixel boundary of the mask, as a single mesh.
fn mask_frame(mask: &Mask, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    let (ox, oy) = mask.origin;
    let border = |x: i64, y: i64| {
        x < 0
            || y < 0
            || x >= mask.width as i64
            || y >= mask.height as i64
            || !mask.get(x as usize, y as usize)
    };
    for y in 0..mask.height {
        for x in 0..mask.width {
            if !mask.get(x, y) {
                continue;
            }
            let (xi, yi) = (x as i64, y as i64);
            if border(xi - 1, yi) || border(xi + 1, yi) || border(xi, yi - 1) || border(xi, yi + 1) {
                let min = pos2((ox + x as i32) as f32, (oy + y as i32) as f32);
                mesh.add_colored_rect(Rect::from_min_size(min, vec2(1.0, 1.0)), color);
            }
        }
    }
    mesh
}

struct Prepared {
    size: egui::Vec2,
    badge: Rect,
    layout: BlockLayout,
    frame: Shape,
}

pub struct ItauApp {
    font: FontArc,
    title: String,
    params: BlockGridParams,
    prepared: Option<Prepared>,
    timeline: BlockTimeline,
    clock: TickClock,
}

impl ItauApp {
    pub fn new(title: String) -> anyhow::Result<Self> {
        Ok(Self {
            font: load_title_font()?,
            title,
            params: BlockGridParams::default(),
            prepared: None,
            timeline: BlockTimeline::new(0),
            clock: TickClock::new(),
        })
    }

    fn rebuild(&mut self, size: egui::Vec2) {
        let badge = badge_rect(size);
        let layout = build_block_layout(&self.font, &self.title, badge, &self.params);
        log::info!(
            "Layout {}x{}: {} blocks",
            size.x as i32,
            size.y as i32,
            layout.cells.len()
        );
        self.timeline = BlockTimeline::new(layout.cells.len());
        let frame = Shape::mesh(mask_frame(&layout.mask, Color32::BLACK));
        self.prepared = Some(Prepared {
            size,
            badge,
            layout,
            frame,
        });
    }

    fn paint(&self, painter: &egui::Painter, rect: Rect) {
        vertical_gradient(painter, rect, BG_TOP.into(), BG_BOTTOM.into());
        let Some(p) = &self.prepared else {
            return;
        };

        painter.rect_stroke(
            breathing_badge(p.badge, self.timeline.breath_scale()),
            BADGE_RADIUS / 2.0,
            Stroke::new(BADGE_STROKE, BORDER),
            StrokeKind::Middle,
        );

        let active = self.timeline.active_count();
        for cell in p.layout.cells.iter().take(active) {
            painter.rect_filled(*cell, 0.0, BLOCK);
        }
        painter.add(p.frame.clone());
    }
}

impl eframe::App for ItauApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let rect = ctx.input(|i| i.viewport_rect());
        let size = rect.size();
        if size.x > 0.0
            && size.y > 0.0
            && self.prepared.as_ref().is_none_or(|p| p.size != size)
        {
            self.rebuild(size);
        }

        for _ in 0..self.clock.ticks() {
            self.timeline.advance(FRAME);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.paint(ui.painter(), rect));

        ctx.request_repaint_after(FRAME);
    }
}

pub fn run(title: String) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Itaú Loader")
            .with_fullscreen(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_icon(super::window::app_icon()),
        ..Default::default()
    };
    eframe::run_native(
        "itau-loader",
        options,
        Box::new(|_cc| Ok(Box::new(ItauApp::new(title)?))),
    )
}
