use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, ImageFormat};
use std::path::{Path, PathBuf};

const SUPERSAMPLE: u32 = 4;
const PINK: [u8; 4] = [255, 64, 129, 255];
const PURPLE: [u8; 4] = [124, 77, 255, 255];
const CYAN: [u8; 4] = [0, 229, 255, 255];
const GREEN: [u8; 4] = [0, 230, 118, 255];

/// Ids match the `#101`..`#103` references in the sample apps file.
const RCDATA_ICONS: &[(u32, &str, fn(u32) -> Vec<u8>)] = &[
    (101, "rc_chat.png", draw_chat),
    (102, "rc_scan.png", draw_scan),
    (103, "rc_tasks.png", draw_tasks),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());

    // Window/taskbar icon, needed on every target
    std::fs::write(out_dir.join("icon_rgba.bin"), draw_app_icon(48))
        .expect("Failed to write icon_rgba.bin");

    if std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let ico_path = out_dir.join("app.ico");
    write_ico(&ico_path, &[16, 32, 48, 64, 128, 256]);

    let mut rc = String::new();
    for &(id, file, draw) in RCDATA_ICONS {
        let path = out_dir.join(file);
        write_png(&path, &draw(128), 128);
        rc.push_str(&format!("{} RCDATA \"{}\"\n", id, rc_path(&path)));
    }

    let mut res = winresource::WindowsResource::new();
    res.set_icon(ico_path.to_str().unwrap());
    res.append_rc_content(&rc);
    res.compile().unwrap();
}

fn rc_path(path: &Path) -> String {
    path.to_str().unwrap().replace('\\', "\\\\")
}

fn write_png(path: &Path, rgba: &[u8], size: u32) {
    image::save_buffer_with_format(path, rgba, size, size, ExtendedColorType::Rgba8, ImageFormat::Png)
        .expect("Failed to write PNG");
}

fn write_ico(path: &Path, sizes: &[u32]) {
    let frames: Vec<IcoFrame> = sizes
        .iter()
        .map(|&sz| {
            IcoFrame::as_png(&draw_app_icon(sz), sz, sz, ExtendedColorType::Rgba8)
                .expect("Failed to encode ICO frame")
        })
        .collect();
    let file = std::fs::File::create(path).expect("Failed to create ICO file");
    IcoEncoder::new(file)
        .encode_images(&frames)
        .expect("Failed to write ICO file");
}

// ── Icon drawing ─────────────────────────────────────────────────

/// Dark tile with a pink-to-purple spinner arc and a bright core.
fn draw_app_icon(size: u32) -> Vec<u8> {
    let mut canvas = Canvas::tile(size, [18, 16, 30, 255], [40, 22, 62, 255]);
    let s = canvas.unit();

    let segments = 48;
    for i in 0..segments {
        let t = i as f32 / (segments - 1) as f32;
        let a = (-90.0 + 300.0 * t).to_radians();
        let (x, y) = (32.0 + 18.0 * a.cos(), 32.0 + 18.0 * a.sin());
        canvas.fill_circle(x * s, y * s, 4.0 * s, lerp_color(&PINK, &PURPLE, t));
    }
    canvas.fill_circle(32.0 * s, 32.0 * s, 7.0 * s, [255, 255, 255, 230]);
    canvas.fill_circle(32.0 * s, 32.0 * s, 5.0 * s, [255, 150, 200, 255]);
    canvas.finish()
}

/// Speech bubble.
fn draw_chat(size: u32) -> Vec<u8> {
    let mut canvas = Canvas::tile(size, [30, 10, 24, 255], [60, 14, 40, 255]);
    let s = canvas.unit();
    canvas.fill_rounded(14.0 * s, 16.0 * s, 50.0 * s, 42.0 * s, 8.0 * s, PINK);
    canvas.fill_polygon(&[(20.0 * s, 40.0 * s), (30.0 * s, 40.0 * s), (18.0 * s, 52.0 * s)], PINK);
    for x in [23.0, 32.0, 41.0] {
        canvas.fill_circle(x * s, 29.0 * s, 3.0 * s, [255, 255, 255, 255]);
    }
    canvas.finish()
}

/// Target reticle.
fn draw_scan(size: u32) -> Vec<u8> {
    let mut canvas = Canvas::tile(size, [6, 22, 30, 255], [8, 40, 56, 255]);
    let s = canvas.unit();
    canvas.ring(32.0 * s, 32.0 * s, 18.0 * s, 4.0 * s, CYAN);
    canvas.fill_circle(32.0 * s, 32.0 * s, 6.0 * s, CYAN);
    canvas.fill_rounded(30.0 * s, 8.0 * s, 34.0 * s, 18.0 * s, 1.0 * s, CYAN);
    canvas.fill_rounded(30.0 * s, 46.0 * s, 34.0 * s, 56.0 * s, 1.0 * s, CYAN);
    canvas.fill_rounded(8.0 * s, 30.0 * s, 18.0 * s, 34.0 * s, 1.0 * s, CYAN);
    canvas.fill_rounded(46.0 * s, 30.0 * s, 56.0 * s, 34.0 * s, 1.0 * s, CYAN);
    canvas.finish()
}

/// Four tiles, one highlighted.
fn draw_tasks(size: u32) -> Vec<u8> {
    let mut canvas = Canvas::tile(size, [6, 26, 14, 255], [10, 44, 24, 255]);
    let s = canvas.unit();
    let dim = [0, 130, 70, 255];
    for (i, (x, y)) in [(14.0, 14.0), (34.0, 14.0), (14.0, 34.0), (34.0, 34.0)]
        .into_iter()
        .enumerate()
    {
        let color = if i == 0 { GREEN } else { dim };
        canvas.fill_rounded(x * s, y * s, (x + 16.0) * s, (y + 16.0) * s, 3.0 * s, color);
    }
    canvas.finish()
}

// ── Canvas with drawing primitives ───────────────────────────────

/// Supersampled square canvas drawn in a 64-unit coordinate space.
struct Canvas {
    pixels: Vec<u8>,
    size: u32,
}

impl Canvas {
    /// Rounded tile with a vertical gradient, the common base of every icon.
    fn tile(target: u32, top: [u8; 4], bottom: [u8; 4]) -> Self {
        let size = target * SUPERSAMPLE;
        let mut canvas = Canvas {
            pixels: vec![0u8; (size * size * 4) as usize],
            size,
        };
        let s = canvas.unit();
        let (pad, r) = (2.0 * s, 12.0 * s);
        let far = size as f32 - pad;
        for y in 0..size {
            let t = (y as f32 - pad) / (far - pad);
            let color = lerp_color(&top, &bottom, t);
            for x in 0..size {
                if in_rounded_rect(x as f32 + 0.5, y as f32 + 0.5, pad, pad, far, far, r) {
                    canvas.set(x, y, color);
                }
            }
        }
        canvas
    }

    fn unit(&self) -> f32 {
        self.size as f32 / 64.0
    }

    fn set(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x < self.size && y < self.size {
            let idx = ((y * self.size + x) * 4) as usize;
            self.pixels[idx..idx + 4].copy_from_slice(&color);
        }
    }

    /// Source-over blend.
    fn blend(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.size || y >= self.size || color[3] == 0 {
            return;
        }
        let idx = ((y * self.size + x) * 4) as usize;
        let sa = color[3] as u32;
        let inv = 255 - sa;
        for c in 0..3 {
            let d = self.pixels[idx + c] as u32;
            self.pixels[idx + c] = ((color[c] as u32 * sa + d * inv) / 255) as u8;
        }
        let da = self.pixels[idx + 3] as u32;
        self.pixels[idx + 3] = (sa + da * inv / 255) as u8;
    }

    fn fill_where(&mut self, bounds: (f32, f32, f32, f32), color: [u8; 4], hit: impl Fn(f32, f32) -> bool) {
        let max = self.size as f32 - 1.0;
        let (x0, y0) = (bounds.0.floor().max(0.0) as u32, bounds.1.floor().max(0.0) as u32);
        let (x1, y1) = (bounds.2.ceil().min(max) as u32, bounds.3.ceil().min(max) as u32);
        for py in y0..=y1 {
            for px in x0..=x1 {
                if hit(px as f32 + 0.5, py as f32 + 0.5) {
                    self.blend(px, py, color);
                }
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [u8; 4]) {
        self.fill_where((cx - r, cy - r, cx + r, cy + r), color, |x, y| {
            (x - cx).powi(2) + (y - cy).powi(2) <= r * r
        });
    }

    fn ring(&mut self, cx: f32, cy: f32, r: f32, width: f32, color: [u8; 4]) {
        let (inner, outer) = (r - width / 2.0, r + width / 2.0);
        self.fill_where((cx - outer, cy - outer, cx + outer, cy + outer), color, |x, y| {
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            d >= inner && d <= outer
        });
    }

    fn fill_rounded(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, r: f32, color: [u8; 4]) {
        self.fill_where((x0, y0, x1, y1), color, |x, y| in_rounded_rect(x, y, x0, y0, x1, y1, r));
    }

    fn fill_polygon(&mut self, pts: &[(f32, f32)], color: [u8; 4]) {
        if pts.is_empty() {
            return;
        }
        let bounds = pts.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(a, b, c, d), &(x, y)| (a.min(x), b.min(y), c.max(x), d.max(y)),
        );
        self.fill_where(bounds, color, |x, y| point_in_polygon(x, y, pts));
    }

    fn finish(self) -> Vec<u8> {
        downsample(&self.pixels, self.size, SUPERSAMPLE)
    }
}

/// Even-odd ray cast.
fn point_in_polygon(x: f32, y: f32, pts: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let ((xi, yi), (xj, yj)) = (pts[i], pts[j]);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn in_rounded_rect(x: f32, y: f32, x0: f32, y0: f32, x1: f32, y1: f32, r: f32) -> bool {
    if x < x0 || x > x1 || y < y0 || y > y1 {
        return false;
    }
    // Distance to the inner rectangle shrunk by r
    let dx = (x0 + r - x).max(x - (x1 - r)).max(0.0);
    let dy = (y0 + r - y).max(y - (y1 - r)).max(0.0);
    dx * dx + dy * dy <= r * r
}

fn lerp_color(a: &[u8; 4], b: &[u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t) as u8)
}

/// Box filter, `scale`x`scale` samples per output pixel.
fn downsample(pixels: &[u8], big: u32, scale: u32) -> Vec<u8> {
    let small = big / scale;
    let count = scale * scale;
    let mut out = Vec::with_capacity((small * small * 4) as usize);
    for sy in 0..small {
        for sx in 0..small {
            let mut acc = [0u32; 4];
            for dy in 0..scale {
                for dx in 0..scale {
                    let idx = (((sy * scale + dy) * big + sx * scale + dx) * 4) as usize;
                    for (c, sum) in acc.iter_mut().enumerate() {
                        *sum += pixels[idx + c] as u32;
                    }
                }
            }
            out.extend(acc.iter().map(|&sum| (sum / count) as u8));
        }
    }
    out
}
