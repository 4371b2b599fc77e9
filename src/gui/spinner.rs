//! Small translucent splash with a gradient arc spinner.

use super::paint::stroke_arc;
use super::{TickClock, FRAME};
use crate::anim::Rgb;
use crate::launch::Companion;
use crate::lifecycle::{LifecycleConfig, SplashLifecycle};
use crate::ready::ReadySignal;
use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Stroke};
use std::path::PathBuf;
use std::time::Duration;

pub const WINDOW_SIZE: f32 = 400.0;
pub const CORNER_RADIUS: f32 = 26.0;
const BG: Rgb = Rgb(10, 10, 14);
const BG_ALPHA: u8 = 220;
const TEXT: Color32 = Color32::from_rgb(230, 230, 240);
const ARC_FROM: Rgb = Rgb::hex(0xFF4081);
const ARC_TO: Rgb = Rgb::hex(0x7C4DFF);
const ARC_SEGMENTS: usize = 64;
const ARC_SWEEP_DEG: f32 = 320.0;
const SPINNER_SIZE: f32 = 96.0;
const SPINNER_THICK: f32 = 6.0;
const ICON_SIZE: f32 = 64.0;
const PAD: f32 = 14.0;
const DEG_PER_TICK: u32 = 6;

pub struct SpinnerOptions {
    pub companion: String,
    pub event: String,
    pub timeout: Duration,
    pub launch_delay: Duration,
    pub title: String,
    pub base_dir: PathBuf,
}

/// Rotation counter, one step per frame tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpinnerState {
    angle: u32,
}

impl SpinnerState {
    pub fn advance(&mut self) {
        self.angle = (self.angle + DEG_PER_TICK) % 360;
    }

    pub fn angle(&self) -> u32 {
        self.angle
    }
}

pub struct SpinnerApp {
    state: SpinnerState,
    lifecycle: SplashLifecycle,
    ready: ReadySignal,
    companion: Companion,
    clock: TickClock,
    title: String,
    icon_path: PathBuf,
    icon: Option<egui::TextureHandle>,
    icon_loaded: bool,
    started: bool,
}

impl SpinnerApp {
    pub fn new(opts: SpinnerOptions) -> Self {
        let companion = Companion::new(&opts.base_dir, &opts.companion, "");
        log::info!(
            "Splash up, companion {}, timeout {}s",
            companion.path().display(),
            opts.timeout.as_secs()
        );
        Self {
            state: SpinnerState::default(),
            lifecycle: SplashLifecycle::new(LifecycleConfig {
                launch_delay: opts.launch_delay,
                probe_interval: Duration::ZERO,
                timeout: opts.timeout,
                launch: true,
            }),
            ready: ReadySignal::open_local(&opts.event),
            companion,
            clock: TickClock::new(),
            title: opts.title,
            icon_path: opts.base_dir.join("resources").join("app.ico"),
            icon: None,
            icon_loaded: false,
            started: false,
        }
    }

    fn load_icon(&mut self, ctx: &egui::Context) {
        if self.icon_loaded {
            return;
        }
        self.icon_loaded = true;
        if !self.icon_path.exists() {
            return;
        }
        match std::fs::read(&self.icon_path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| crate::icons::decode(&bytes))
        {
            Ok(img) => {
                self.icon = Some(ctx.load_texture("splash-icon", img.image, egui::TextureOptions::LINEAR));
            }
            Err(e) => log::error!("Failed to load {}: {:#}", self.icon_path.display(), e),
        }
    }

    fn paint(&self, ui: &egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        painter.rect_filled(rect, CORNER_RADIUS, BG.with_alpha(BG_ALPHA));

        let origin = rect.min + vec2(PAD, PAD);
        if let Some(icon) = &self.icon {
            painter.image(
                icon.id(),
                egui::Rect::from_min_size(origin, vec2(ICON_SIZE, ICON_SIZE)),
                egui::Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.text(
            origin + vec2(ICON_SIZE, ICON_SIZE / 3.0),
            Align2::LEFT_TOP,
            &self.title,
            FontId::proportional(36.0),
            TEXT,
        );

        let center = rect.center() + vec2(0.0, 10.0);
        let radius = SPINNER_SIZE / 2.0;
        let start = -(self.state.angle() as f32);
        let seg = ARC_SWEEP_DEG / ARC_SEGMENTS as f32;
        for i in 0..ARC_SEGMENTS {
            let t = i as f32 / (ARC_SEGMENTS - 1) as f32;
            let color: Color32 = ARC_FROM.lerp(ARC_TO, t).into();
            let a0 = start + seg * i as f32;
            stroke_arc(painter, center, radius, a0, seg * 0.92, Stroke::new(SPINNER_THICK, color));
            // Round caps
            for a in [a0, a0 + seg * 0.92] {
                let r = a.to_radians();
                painter.circle_filled(
                    center + radius * vec2(r.cos(), r.sin()),
                    SPINNER_THICK / 2.0,
                    color,
                );
            }
        }
    }
}

impl eframe::App for SpinnerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.load_icon(ctx);

        // Frame zero launches the companion before the first full tick
        let mut steps = vec![Duration::ZERO; usize::from(!self.started)];
        self.started = true;
        steps.extend((0..self.clock.ticks()).map(|_| FRAME));
        for dt in steps {
            let outcome = self.lifecycle.drive(dt, &mut self.ready, || self.companion.launch());
            if outcome.should_close() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
            if !dt.is_zero() {
                self.state.advance();
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.paint(ui));

        ctx.request_repaint_after(FRAME);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}

pub fn run(opts: SpinnerOptions) -> eframe::Result {
    let size = vec2(WINDOW_SIZE, WINDOW_SIZE);
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(size)
        .with_resizable(false)
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top()
        .with_active(false)
        .with_title("Iniciando...")
        .with_icon(super::window::app_icon());
    if let Some(area) = super::window::primary_work_area() {
        viewport = viewport.with_position(super::window::centered_in(area, size));
    }

    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };
    eframe::run_native(
        "spinner-splash",
        options,
        Box::new(|_cc| Ok(Box::new(SpinnerApp::new(opts)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_wraps_at_a_full_turn() {
        let mut s = SpinnerState::default();
        for _ in 0..60 {
            s.advance();
        }
        assert_eq!(s.angle(), 0);
        s.advance();
        assert_eq!(s.angle(), 6);
    }
}
