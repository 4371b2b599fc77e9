//! Borderless multi-mode loader with rotating phrases.

pub mod scene;

use super::{window, TickClock};
use crate::anim::phrases::PhraseRotator;
use crate::anim::transition::{ModeSwitch, Toast};
use crate::anim::{ease_out_cubic, lerp};
use crate::launch::Companion;
use crate::lifecycle::{LifecycleConfig, SplashLifecycle};
use crate::ready::ReadySignal;
use crate::settings::{AnimMode, Preferences, Theme};
use anyhow::Context;
use eframe::egui::{self, pos2, vec2, Key, Pos2, Vec2};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const WINDOW_SIZE: Vec2 = vec2(1100.0, 700.0);
pub const LAUNCH_DELAY: Duration = Duration::from_secs(10);
pub const PROBE_INTERVAL: Duration = Duration::from_millis(200);
const HOVER_RADIUS: f32 = 140.0;
const HOVER_SPEED: f32 = 1.25;
/// Extra speed-up of the mode animation itself while hovered.
const HOVER_MODE_SPEED: f32 = 1.15;
const MAX_DT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SkipPhrase,
    ToggleTheme,
    CycleMode,
    TogglePause,
    ToggleHud,
    Screenshot,
    Quit,
}

/// Everything that animates, independent of the window.
#[derive(Debug, Clone)]
pub struct NeonState {
    pub theme: Theme,
    pub modes: ModeSwitch<AnimMode>,
    pub phrases: PhraseRotator,
    pub toast: Toast,
    /// Animation clock, seconds. Runs faster under hover, stops when paused.
    pub t: f32,
    pub paused: bool,
    pub hud: bool,
    pub hover_boost: bool,
}

impl NeonState {
    pub fn new(prefs: Preferences, seed: f32) -> Self {
        Self {
            theme: prefs.theme,
            modes: ModeSwitch::new(prefs.mode),
            phrases: PhraseRotator::with_defaults(seed),
            toast: Toast::default(),
            t: 0.0,
            paused: false,
            hud: false,
            hover_boost: false,
        }
    }

    pub fn prefs(&self) -> Preferences {
        Preferences {
            theme: self.theme,
            mode: self.modes.current(),
        }
    }

    /// Advance by `dt` seconds. Returns the mode a fade just settled on.
    pub fn update(&mut self, dt: f32) -> Option<AnimMode> {
        // The toast keeps counting so "Pausado" does not stick
        self.toast.update(dt);
        if self.paused {
            return None;
        }
        let speed = if self.hover_boost { HOVER_SPEED } else { 1.0 };
        self.t += dt * speed;
        self.phrases.update(dt, self.t);

        let settled = self.modes.update(dt);
        if let Some(mode) = settled {
            self.toast.show(mode.label());
        }
        settled
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::SkipPhrase => self.phrases.skip(),
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.toast.show(self.theme.label());
            }
            Command::CycleMode => self.modes.request(self.modes.current().next()),
            Command::TogglePause => {
                self.paused = !self.paused;
                self.toast.show(if self.paused { "Pausado" } else { "Animando" });
            }
            Command::ToggleHud => self.hud = !self.hud,
            Command::Screenshot | Command::Quit => {}
        }
    }

    /// Hover boost while the pointer is near the window centre.
    pub fn track_pointer(&mut self, pos: Pos2, size: Vec2) {
        let centre = pos2(size.x * 0.5, size.y * 0.5);
        self.hover_boost = pos.distance_sq(centre) < HOVER_RADIUS * HOVER_RADIUS;
    }

    /// Clock fed to the mode drawings.
    pub fn mode_time(&self) -> f32 {
        self.t * if self.hover_boost { HOVER_MODE_SPEED } else { 1.0 }
    }
}

pub fn commands(input: &egui::InputState) -> Vec<Command> {
    let mut cmds = Vec::new();
    let m = input.modifiers;
    if m.shift && input.key_pressed(Key::Tab) {
        cmds.push(Command::ToggleHud);
    }
    if m.command && input.key_pressed(Key::S) {
        cmds.push(Command::Screenshot);
        return cmds;
    }
    for (key, cmd) in [
        (Key::F1, Command::SkipPhrase),
        (Key::F2, Command::ToggleTheme),
        (Key::F3, Command::CycleMode),
        (Key::Space, Command::TogglePause),
        (Key::Escape, Command::Quit),
    ] {
        if input.key_pressed(key) {
            cmds.push(cmd);
        }
    }
    cmds
}

pub fn screenshot_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("launcher_{}.png", now.format("%Y%m%d_%H%M%S"))
}

/// Write `shot` as PNG into `dir`, named after the current local time.
pub fn save_screenshot(shot: &egui::ColorImage, dir: &Path) -> anyhow::Result<String> {
    let name = screenshot_name(chrono::Local::now());
    let [w, h] = shot.size;
    image::save_buffer(
        dir.join(&name),
        shot.as_raw(),
        w as u32,
        h as u32,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to save {name}"))?;
    Ok(name)
}

/// Frames-per-second estimate, exponentially smoothed.
#[derive(Debug, Clone, Copy, Default)]
struct FrameStats {
    fps: f32,
    dt: f32,
}

impl FrameStats {
    fn record(&mut self, dt: f32) {
        self.dt = dt;
        if dt > 0.0 {
            let inst = 1.0 / dt;
            self.fps = if self.fps == 0.0 { inst } else { lerp(self.fps, inst, 0.1) };
        }
    }
}

pub struct NeonOptions {
    pub companion: String,
    pub args: String,
    pub event: String,
    pub timeout: Duration,
    pub launch_delay: Duration,
    pub base_dir: PathBuf,
    pub screenshot_dir: PathBuf,
}

pub struct NeonApp {
    state: NeonState,
    lifecycle: SplashLifecycle,
    ready: ReadySignal,
    companion: Companion,
    clock: TickClock,
    stats: FrameStats,
    screenshot_dir: PathBuf,
    dots: Vec<Pos2>,
    dots_size: Vec2,
    closing: bool,
}

impl NeonApp {
    pub fn new(opts: NeonOptions, prefs: Preferences, seed: f32) -> Self {
        Self {
            state: NeonState::new(prefs, seed),
            lifecycle: SplashLifecycle::new(LifecycleConfig {
                launch_delay: opts.launch_delay,
                probe_interval: PROBE_INTERVAL,
                timeout: opts.timeout,
                launch: true,
            }),
            ready: ReadySignal::lazy_with_fallbacks(&opts.event),
            companion: Companion::new(&opts.base_dir, &opts.companion, opts.args),
            clock: TickClock::new(),
            stats: FrameStats::default(),
            screenshot_dir: opts.screenshot_dir,
            dots: Vec::new(),
            dots_size: Vec2::ZERO,
            closing: false,
        }
    }

    fn hud_line(&self, ppp: f32) -> String {
        format!(
            "FPS: {:.1} | dt: {:.3} | DPI: {} | escala: {:.2} | modo: {} | frase: {}",
            self.stats.fps,
            self.stats.dt,
            (96.0 * ppp).round() as i32,
            ppp,
            self.state.modes.current().raw(),
            self.state.phrases.index()
        )
    }

    /// Persist preferences and close, once.
    fn close(&mut self, ctx: &egui::Context) {
        if !self.closing {
            self.closing = true;
            if !self.companion.is_running() {
                log::warn!("Closing before {} was started", self.companion.path().display());
            }
            self.state.prefs().save();
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn take_screenshots(&mut self, ctx: &egui::Context) {
        let shots: Vec<_> = ctx.input(|i| {
            i.raw
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
                .collect()
        });
        for shot in shots {
            match save_screenshot(&shot, &self.screenshot_dir) {
                Ok(name) => {
                    log::info!("Saved screenshot {}", name);
                    self.state.toast.show(format!("Screenshot salvo: {name}"));
                }
                Err(e) => log::error!("{:#}", e),
            }
        }
    }

    fn paint(&mut self, painter: &egui::Painter, rect: egui::Rect, ppp: f32) {
        let size = rect.size();
        if size != self.dots_size {
            self.dots = scene::noise_dots(size);
            self.dots_size = size;
        }
        let pal = scene::palette(self.state.theme);

        scene::background(painter, rect, &pal, &self.dots);
        scene::overlay(painter, size);

        let centre = pos2(size.x * 0.5, size.y * 0.55);
        let t = self.state.mode_time();
        for layer in self.state.modes.layers() {
            scene::draw_mode(painter, &pal, layer.mode, centre, t, layer.alpha, layer.scale);
        }

        if let Some(text) = self.state.phrases.current() {
            let a = ease_out_cubic(self.state.phrases.alpha());
            scene::phrase_bubble(painter, &pal, size, text, a, self.state.t);
        }
        if let Some(text) = self.state.toast.text() {
            scene::toast(painter, &pal, size, text, self.state.toast.opacity());
        }
        if self.state.hud {
            scene::hud(painter, &pal, &self.hud_line(ppp));
        }
    }
}

impl eframe::App for NeonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let real = self.clock.delta();
        let outcome = self.lifecycle.drive(real, &mut self.ready, || self.companion.launch());
        if outcome.should_close() || ctx.input(|i| i.viewport().close_requested()) {
            self.close(ctx);
            return;
        }

        self.take_screenshots(ctx);

        let rect = ctx.input(|i| i.viewport_rect());
        if let Some(pos) = ctx.input(|i| i.pointer.hover_pos()) {
            self.state.track_pointer(pos, rect.size());
        }
        for cmd in ctx.input(commands) {
            match cmd {
                Command::Quit => self.close(ctx),
                Command::Screenshot => ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(
                    egui::UserData::default(),
                )),
                other => self.state.apply(other),
            }
        }

        let dt = real.as_secs_f32().min(MAX_DT);
        self.stats.record(dt);
        if self.state.update(dt).is_some() {
            self.state.prefs().save();
        }

        let ppp = ctx.pixels_per_point();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let painter = ui.painter().clone();
                self.paint(&painter, rect, ppp);
            });

        ctx.request_repaint_after(super::FRAME);
    }
}

pub fn run(opts: NeonOptions) -> eframe::Result {
    let prefs = Preferences::load();
    let seed = rand::random::<f32>() * 1000.0;

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Neon 2500 — Launcher")
        .with_inner_size(WINDOW_SIZE)
        .with_resizable(false)
        .with_decorations(false)
        .with_icon(window::app_icon());
    if let Some(pos) = window::centered_on_cursor_monitor(WINDOW_SIZE) {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };
    eframe::run_native(
        "neon-launcher",
        options,
        Box::new(move |_cc| Ok(Box::new(NeonApp::new(opts, prefs, seed)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::transition::MODE_FADE_SECS;

    fn state() -> NeonState {
        NeonState::new(Preferences::default(), 0.0)
    }

    #[test]
    fn cycle_mode_settles_after_the_fade_and_toasts() {
        let mut s = state();
        s.apply(Command::CycleMode);
        assert!(s.modes.is_switching());
        let mut settled = None;
        for _ in 0..40 {
            if let Some(m) = s.update(0.016) {
                settled = Some(m);
                break;
            }
        }
        assert_eq!(settled, Some(AnimMode::Energy));
        assert_eq!(s.toast.text(), Some(AnimMode::Energy.label()));
        assert_eq!(s.prefs().mode, AnimMode::Energy);
        assert!(0.016 * 40.0 > MODE_FADE_SECS);
    }

    #[test]
    fn pause_freezes_the_clock_but_not_the_toast() {
        let mut s = state();
        s.update(0.5);
        s.apply(Command::TogglePause);
        assert_eq!(s.toast.text(), Some("Pausado"));
        let t = s.t;
        for _ in 0..80 {
            s.update(0.016);
        }
        assert_eq!(s.t, t);
        assert_eq!(s.toast.text(), None);
        s.apply(Command::TogglePause);
        assert_eq!(s.toast.text(), Some("Animando"));
        s.update(0.1);
        assert!(s.t > t);
    }

    #[test]
    fn hover_near_centre_speeds_time_up() {
        let mut s = state();
        let size = WINDOW_SIZE;
        s.track_pointer(pos2(560.0, 360.0), size);
        assert!(s.hover_boost);
        s.update(1.0);
        assert!((s.t - 1.25).abs() < 1e-6);
        assert!((s.mode_time() - 1.25 * 1.15).abs() < 1e-5);
        s.track_pointer(pos2(10.0, 10.0), size);
        assert!(!s.hover_boost);
    }

    #[test]
    fn theme_toggle_announces_the_new_theme() {
        let mut s = state();
        assert_eq!(s.theme, Theme::Light);
        s.apply(Command::ToggleTheme);
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.toast.text(), Some("Tema: Neon Escuro"));
        assert_eq!(s.prefs().theme, Theme::Dark);
    }

    #[test]
    fn fps_is_smoothed() {
        let mut stats = FrameStats::default();
        stats.record(0.016);
        assert!((stats.fps - 62.5).abs() < 1e-3);
        stats.record(0.032);
        assert!(stats.fps < 62.5 && stats.fps > 31.25);
    }

    #[test]
    fn screenshots_are_named_by_local_time_and_written() {
        use chrono::TimeZone;
        let when = chrono::Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(screenshot_name(when), "launcher_20240305_070809.png");

        let dir = tempfile::tempdir().unwrap();
        let shot = egui::ColorImage::from_rgba_unmultiplied([2, 2], &[255u8; 16]);
        let name = save_screenshot(&shot, dir.path()).unwrap();
        let saved = image::open(dir.path().join(name)).unwrap();
        assert_eq!((saved.width(), saved.height()), (2, 2));
    }
}
