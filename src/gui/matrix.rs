//! Radial app launcher over a digital-rain background.

use super::paint::{linear_gradient, radial_glow};
use super::{TickClock, FRAME};
use crate::anim::{lerp, Rgb};
use crate::config::{self, LoadedConfig};
use crate::gamepad::{Gamepad, PadEvent};
use crate::icons::IconCache;
use crate::launch::{launch_entry, show_launch_failure};
use crate::layout::ring::{hit_test, radial_layout, RingParams, RingSlot};
use crate::models::AppEntry;
use crate::nav::{self, Direction};
use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Key, Pos2, Rect, Stroke};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::path::PathBuf;
use std::time::Instant;

pub const WINDOW_SIZE: egui::Vec2 = vec2(1100.0, 700.0);
pub const LOG_FILE_NAME: &str = "MatrixLauncher.log";

const BG_FROM: Color32 = Color32::from_rgb(5, 8, 10);
const BG_TO: Color32 = Color32::from_rgb(3, 16, 12);
const PLACEHOLDER: Color32 = Color32::from_rgb(40, 60, 60);
const IDLE_PULSE_HZ: f32 = 0.2;
const HOVER_EASE: f32 = 0.2;

const RAIN_FONT_PX: f32 = 16.0;
/// Line height of the rain font; columns are as wide as a glyph is tall.
const RAIN_GLYPH_H: f32 = 19.0;
const MAX_RAIN_COLS: usize = 256;
const MAX_DROPS_PER_COL: usize = 2;
const HEX_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

#[derive(Debug, Clone, PartialEq)]
struct RainDrop {
    y: f32,
    /// Pixels per tick.
    speed: f32,
    length: usize,
}

impl RainDrop {
    fn spawn(rng: &mut impl Rng, height: f32) -> Self {
        let h = height.max(1.0) as u32;
        Self {
            y: -(rng.gen_range(0..h) as f32),
            speed: (60 + rng.gen_range(0..120)) as f32 / 60.0,
            length: 6 + rng.gen_range(0..14),
        }
    }
}

#[derive(Debug, Clone)]
struct Column {
    x: f32,
    drops: Vec<RainDrop>,
}

/// Falling hex glyph columns.
pub struct Rain {
    columns: Vec<Column>,
    glyph_h: f32,
    height: f32,
    rng: StdRng,
}

impl Rain {
    pub fn new(size: egui::Vec2, glyph_h: f32, mut rng: StdRng) -> Self {
        let col_w = glyph_h.max(1.0);
        let count = ((size.x / col_w) as usize).min(MAX_RAIN_COLS);
        let columns = (0..count)
            .map(|i| {
                let drops = (0..rng.gen_range(1..=MAX_DROPS_PER_COL))
                    .map(|_| RainDrop::spawn(&mut rng, size.y))
                    .collect();
                Column {
                    x: i as f32 * col_w + col_w / 4.0,
                    drops,
                }
            })
            .collect();
        Self {
            columns,
            glyph_h: col_w,
            height: size.y,
            rng,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Move every drop one tick down, respawning those fully below the window.
    pub fn step(&mut self) {
        let (h, gh) = (self.height, self.glyph_h);
        for col in &mut self.columns {
            for drop in &mut col.drops {
                drop.y += drop.speed;
                if drop.y - drop.length as f32 * gh > h + gh {
                    *drop = RainDrop::spawn(&mut self.rng, h);
                }
            }
        }
    }

    /// Trail glyphs get dimmer towards the tail.
    fn brightness(j: usize) -> u8 {
        90u8.saturating_sub(5 * j.min(18) as u8).max(20)
    }

    fn paint(&mut self, painter: &egui::Painter) {
        let font = FontId::monospace(RAIN_FONT_PX);
        let (h, gh) = (self.height, self.glyph_h);
        for col in &self.columns {
            for drop in &col.drops {
                for j in 0..drop.length {
                    let y = drop.y - j as f32 * gh;
                    if y < -gh || y > h + gh {
                        continue;
                    }
                    let ch = HEX_CHARS[self.rng.gen_range(0..HEX_CHARS.len())];
                    let green = (140 + Self::brightness(j) as u16).min(255) as u8;
                    painter.text(
                        pos2(col.x, y),
                        Align2::LEFT_TOP,
                        ch,
                        font.clone(),
                        Color32::from_rgb(0, green, 0),
                    );
                }
            }
        }
    }
}

/// Persistent selection, mouse/pad hover and per-icon hover easing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixState {
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    hover_t: Vec<f32>,
}

impl MatrixState {
    pub fn new(count: usize) -> Self {
        Self {
            selected: None,
            hovered: None,
            hover_t: vec![0.0; count],
        }
    }

    pub fn hover_t(&self, i: usize) -> f32 {
        self.hover_t.get(i).copied().unwrap_or(0.0)
    }

    /// One easing step of every icon towards its hover target.
    pub fn ease(&mut self) {
        let hovered = self.hovered;
        for (i, t) in self.hover_t.iter_mut().enumerate() {
            let target = if hovered == Some(i) { 1.0 } else { 0.0 };
            *t = lerp(*t, target, HOVER_EASE);
        }
    }

    /// Arrow/D-pad move; selection and hover both follow.
    pub fn navigate(&mut self, centers: &[Pos2], dir: Direction) {
        let current = nav::starting_index(self.selected, self.hovered);
        if let Some(next) = nav::navigate(centers, current, dir) {
            if next != current || self.selected.is_none() {
                self.selected = Some(next);
                self.hovered = Some(next);
            }
        }
    }

    /// Item that Enter/Space/A act on.
    pub fn activation_target(&self) -> Option<usize> {
        self.hovered.or(self.selected)
    }
}

pub fn idle_pulse(t: f32) -> f32 {
    (TAU * IDLE_PULSE_HZ * t).sin()
}

/// Light breathing plus the hover zoom.
pub fn icon_scale(pulse: f32, hover_t: f32) -> f32 {
    (1.0 + 0.03 * pulse) * (1.0 + 0.12 * hover_t)
}

/// Glow centre opacity: faint and pulsing when idle, full when hovered.
pub fn glow_strength(hovered: bool, pulse: f32) -> f32 {
    if hovered {
        1.0
    } else {
        0.30 + 0.20 * (0.5 * (pulse + 1.0))
    }
}

fn double_ring(painter: &egui::Painter, rect: Rect, neon: Rgb, thickness: f32, expand: f32) {
    let c = rect.center();
    let m = rect.width().max(rect.height());
    painter.circle_stroke(c, m * (0.52 + expand), Stroke::new(thickness, neon.with_alpha(220)));
    painter.circle_stroke(
        c,
        m * (0.40 + expand * 0.6),
        Stroke::new(thickness * 0.8, neon.with_alpha(160)),
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Activate(Option<usize>),
    Navigate(Direction),
}

pub struct MatrixApp {
    entries: Vec<AppEntry>,
    params: RingParams,
    slots: Vec<RingSlot>,
    size: egui::Vec2,
    state: MatrixState,
    icons: IconCache,
    rain: Option<Rain>,
    gamepad: Gamepad,
    clock: TickClock,
    started: Instant,
}

impl MatrixApp {
    pub fn new(entries: Vec<AppEntry>) -> Self {
        let n = entries.len();
        Self {
            entries,
            params: RingParams::default(),
            slots: Vec::new(),
            size: egui::Vec2::ZERO,
            state: MatrixState::new(n),
            icons: IconCache::new(n),
            rain: None,
            gamepad: Gamepad::new(),
            clock: TickClock::new(),
            started: Instant::now(),
        }
    }

    fn relayout(&mut self, size: egui::Vec2) {
        self.size = size;
        let client = Rect::from_min_size(Pos2::ZERO, size);
        self.slots = radial_layout(self.entries.len(), client, &self.params);
        self.rain = Some(Rain::new(size, RAIN_GLYPH_H, StdRng::from_entropy()));
        log::debug!("Layout {}x{}, {} slots", size.x, size.y, self.slots.len());
    }

    fn centers(&self) -> Vec<Pos2> {
        self.slots.iter().map(|s| s.center).collect()
    }

    fn launch(&self, index: usize) {
        let Some(entry) = self.entries.get(index) else {
            return;
        };
        log::info!("Launching: {} {}", entry.exe.display(), entry.args);
        if let Err(e) = launch_entry(entry) {
            show_launch_failure(&e);
        }
    }

    fn keyboard_commands(&self, ctx: &egui::Context) -> Vec<Command> {
        ctx.input(|i| {
            let mut cmds = Vec::new();
            if i.key_pressed(Key::Escape) {
                cmds.push(Command::Quit);
            }
            if i.key_pressed(Key::Enter) || i.key_pressed(Key::Space) {
                cmds.push(Command::Activate(None));
            }
            for (key, dir) in [
                (Key::ArrowLeft, Direction::Left),
                (Key::ArrowRight, Direction::Right),
                (Key::ArrowUp, Direction::Up),
                (Key::ArrowDown, Direction::Down),
            ] {
                if i.key_pressed(key) {
                    cmds.push(Command::Navigate(dir));
                }
            }
            cmds
        })
    }

    fn pointer(&mut self, ctx: &egui::Context) -> Option<Command> {
        let (pos, moved, released) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.delta() != egui::Vec2::ZERO,
                i.pointer.primary_released(),
            )
        });
        let pos = pos?;
        let hit = hit_test(&self.slots, pos);
        // Keep keyboard hover until the mouse actually moves
        if moved {
            self.state.hovered = hit;
        }
        match (released, hit) {
            (true, Some(i)) => {
                self.state.selected = Some(i);
                Some(Command::Activate(Some(i)))
            }
            _ => None,
        }
    }

    fn apply(&mut self, ctx: &egui::Context, cmd: Command) {
        match cmd {
            Command::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Command::Activate(target) => {
                if let Some(i) = target.or(self.state.activation_target()) {
                    self.launch(i);
                }
            }
            Command::Navigate(dir) => {
                let centers = self.centers();
                self.state.navigate(&centers, dir);
            }
        }
    }

    fn paint_icon(&self, painter: &egui::Painter, i: usize, pulse: f32) {
        let slot = &self.slots[i];
        let rect = slot.rect;
        let hovered = self.state.hovered == Some(i);
        let neon = self.icons.neon(i);

        radial_glow(
            painter,
            rect.center(),
            rect.width().max(rect.height()) * 0.6 * if hovered { 1.25 } else { 1.0 },
            neon.with_opacity(220.0 / 255.0 * glow_strength(hovered, pulse)),
            neon.with_alpha(0),
        );

        let scale = icon_scale(pulse, self.state.hover_t(i));
        let draw = Rect::from_center_size(rect.center(), rect.size() * scale);
        match self.icons.texture(i) {
            Some(tex) => {
                painter.image(
                    tex.id(),
                    draw,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                painter.circle_filled(draw.center(), draw.width() / 2.0, PLACEHOLDER);
            }
        }

        if self.state.selected == Some(i) {
            double_ring(painter, rect, neon, 3.0, 0.06 + 0.01 * pulse);
        }
        if hovered {
            double_ring(painter, rect, neon, 2.0, 0.02);
        }
    }
}

impl eframe::App for MatrixApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let rect = ctx.input(|i| i.viewport_rect());
        if rect.size() != self.size && rect.width() > 0.0 && rect.height() > 0.0 {
            self.relayout(rect.size());
        }
        self.icons.ensure_loaded(ctx, self.entries.iter().map(|e| &e.icon));

        let mut cmds = self.keyboard_commands(ctx);
        cmds.extend(self.pointer(ctx));

        for _ in 0..self.clock.ticks() {
            self.state.ease();
            if let Some(rain) = &mut self.rain {
                rain.step();
            }
            for ev in self.gamepad.poll() {
                cmds.push(match ev {
                    PadEvent::Navigate(dir) => Command::Navigate(dir),
                    PadEvent::Activate => Command::Activate(None),
                });
            }
        }

        for cmd in cmds {
            self.apply(ctx, cmd);
        }

        let pulse = idle_pulse(self.started.elapsed().as_secs_f32());
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let painter = ui.painter().clone();
                linear_gradient(&painter, rect, rect.left_top(), rect.right_bottom(), BG_FROM, BG_TO);
                if let Some(rain) = &mut self.rain {
                    rain.paint(&painter);
                }
                for i in 0..self.slots.len() {
                    self.paint_icon(&painter, i, pulse);
                }
            });

        ctx.request_repaint_after(FRAME);
    }
}

pub struct MatrixOptions {
    pub config: PathBuf,
    pub base_dir: PathBuf,
}

pub fn run(opts: MatrixOptions) -> eframe::Result {
    let entries = match config::load_or_create(&opts.config, &opts.base_dir) {
        Ok(LoadedConfig { entries, .. }) => entries,
        Err(e) => {
            log::error!("{}", e);
            Vec::new()
        }
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Matrix Launcher")
        .with_inner_size(WINDOW_SIZE)
        .with_decorations(false)
        .with_icon(super::window::app_icon());
    // Fill the work area of the monitor under the cursor
    if let Some(area) = super::window::cursor_work_area() {
        viewport = viewport.with_position(area.min).with_inner_size(area.size());
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "matrix-launcher",
        options,
        Box::new(|_cc| Ok(Box::new(MatrixApp::new(entries)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_eases_towards_target() {
        let mut sel = MatrixState::new(3);
        sel.hovered = Some(1);
        sel.ease();
        assert!((sel.hover_t(1) - 0.2).abs() < 1e-6);
        for _ in 0..40 {
            sel.ease();
        }
        assert!(sel.hover_t(1) > 0.99);
        sel.hovered = None;
        sel.ease();
        assert!(sel.hover_t(1) < 0.8);
        assert_eq!(sel.hover_t(0), 0.0);
    }

    #[test]
    fn hovered_wins_over_selected_on_activation() {
        let mut sel = MatrixState::new(4);
        assert_eq!(sel.activation_target(), None);
        sel.selected = Some(2);
        assert_eq!(sel.activation_target(), Some(2));
        sel.hovered = Some(0);
        assert_eq!(sel.activation_target(), Some(0));
    }

    #[test]
    fn navigation_sets_selection_and_hover() {
        let centers = vec![pos2(0.0, 0.0), pos2(100.0, 0.0), pos2(-100.0, 0.0)];
        let mut sel = MatrixState::new(3);
        sel.navigate(&centers, Direction::Right);
        assert_eq!(sel.selected, Some(1));
        assert_eq!(sel.hovered, Some(1));
        sel.navigate(&centers, Direction::Left);
        assert_eq!(sel.selected, Some(0));
    }

    #[test]
    fn glow_and_scale_follow_pulse_and_hover() {
        assert_eq!(glow_strength(true, -1.0), 1.0);
        assert!((glow_strength(false, -1.0) - 0.3).abs() < 1e-6);
        assert!((glow_strength(false, 1.0) - 0.5).abs() < 1e-6);
        assert_eq!(icon_scale(0.0, 0.0), 1.0);
        assert!((icon_scale(0.0, 1.0) - 1.12).abs() < 1e-6);
        assert!(idle_pulse(0.0).abs() < 1e-6);
        // 0.2 Hz: a quarter period is 1.25 s
        assert!((idle_pulse(1.25) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rain_columns_fill_the_width_and_respawn() {
        let size = vec2(380.0, 200.0);
        let mut rain = Rain::new(size, 19.0, StdRng::seed_from_u64(7));
        assert_eq!(rain.column_count(), 20);
        for col in &rain.columns {
            assert!((1..=MAX_DROPS_PER_COL).contains(&col.drops.len()));
            for d in &col.drops {
                assert!(d.y <= 0.0 && d.y > -200.0);
                assert!((1.0..3.0).contains(&d.speed));
                assert!((6..20).contains(&d.length));
            }
        }
        for _ in 0..5000 {
            rain.step();
        }
        let limit = size.y + 19.0 + 20.0 * 19.0 + 3.0;
        assert!(rain
            .columns
            .iter()
            .flat_map(|c| &c.drops)
            .all(|d| d.y <= limit));
    }

    #[test]
    fn trail_brightness_floors_at_twenty() {
        assert_eq!(Rain::brightness(0), 90);
        assert_eq!(Rain::brightness(4), 70);
        assert_eq!(Rain::brightness(14), 20);
        assert_eq!(Rain::brightness(19), 20);
    }
}
