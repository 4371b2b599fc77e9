use eframe::egui::Color32;

/// Opaque 8-bit colour. Alpha is applied at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    pub fn with_alpha(self, a: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(self.0, self.1, self.2, a)
    }

    /// Alpha from a `[0, 1]` opacity.
    pub fn with_opacity(self, opacity: f32) -> Color32 {
        self.with_alpha((opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn max_channel(self) -> u8 {
        self.0.max(self.1).max(self.2)
    }
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

/// `0xAARRGGBB`, the form theme tables are written in.
pub fn argb(v: u32) -> Color32 {
    Color32::from_rgba_unmultiplied((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8)
}

/// Scale an existing colour's alpha by `opacity`.
pub fn fade(c: Color32, opacity: f32) -> Color32 {
    c.gamma_multiply(opacity.clamp(0.0, 1.0))
}

pub const NEON_DEFAULT: Rgb = Rgb(80, 220, 120);
const NEON_DARK_FALLBACK: Rgb = Rgb(60, 180, 90);

/// Push an average colour towards a saturated accent: the dominant channel
/// goes to full scale and green is favoured a little.
pub fn neon_from_average(avg: Rgb) -> Rgb {
    let avg = if avg.max_channel() < 60 {
        NEON_DARK_FALLBACK
    } else {
        avg
    };
    let scale = 255.0 / avg.max_channel().max(1) as f32;
    let ch = |v: u8, k: f32| (v as f32 * scale * k).min(255.0) as u8;
    Rgb(ch(avg.0, 0.85), ch(avg.1, 0.95), ch(avg.2, 0.85))
}

/// Neon accent for an RGBA8 image. Pixels are sampled on a lattice of at most
/// 64×64 points and those with alpha below 24 are ignored.
pub fn neon_from_rgba(pixels: &[u8], width: usize, height: usize) -> Rgb {
    if width == 0 || height == 0 || pixels.len() < width * height * 4 {
        return NEON_DEFAULT;
    }
    let step_x = (width / 64).max(1);
    let step_y = (height / 64).max(1);

    let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);
    for y in (0..height).step_by(step_y) {
        for x in (0..width).step_by(step_x) {
            let p = &pixels[(y * width + x) * 4..][..4];
            let a = p[3] as u64;
            if a < 24 {
                continue;
            }
            // Premultiplied, so translucent edges weigh less
            r += p[0] as u64 * a / 255;
            g += p[1] as u64 * a / 255;
            b += p[2] as u64 * a / 255;
            count += 1;
        }
    }
    if count == 0 {
        return neon_from_average(NEON_DEFAULT);
    }
    neon_from_average(Rgb(
        (r / count) as u8,
        (g / count) as u8,
        (b / count) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(c: Rgb, a: u8, w: usize, h: usize) -> Vec<u8> {
        (0..w * h).flat_map(|_| [c.0, c.1, c.2, a]).collect()
    }

    #[test]
    fn dominant_channel_is_normalised() {
        let n = neon_from_average(Rgb(100, 50, 20));
        assert_eq!(n, Rgb(216, 121, 43));
    }

    #[test]
    fn dark_averages_fall_back_to_green() {
        assert_eq!(neon_from_average(Rgb(10, 20, 30)), neon_from_average(Rgb(60, 180, 90)));
        let n = neon_from_average(Rgb(10, 20, 30));
        assert!(n.1 > n.0 && n.1 > n.2);
    }

    #[test]
    fn transparent_images_use_the_default_accent() {
        let px = solid(Rgb(255, 0, 0), 0, 16, 16);
        assert_eq!(neon_from_rgba(&px, 16, 16), neon_from_average(NEON_DEFAULT));
        assert_eq!(neon_from_rgba(&[], 0, 0), NEON_DEFAULT);
    }

    #[test]
    fn opaque_image_tints_towards_its_colour() {
        let px = solid(Rgb(20, 40, 200), 255, 128, 128);
        let n = neon_from_rgba(&px, 128, 128);
        assert!(n.2 > n.0 && n.2 > n.1);
    }

    #[test]
    fn colour_lerp_and_hex() {
        let a = Rgb::hex(0xFF4081);
        let b = Rgb::hex(0x7C4DFF);
        assert_eq!(a, Rgb(0xFF, 0x40, 0x81));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(argb(0xCC181E2A).a(), 0xCC);
    }
}
