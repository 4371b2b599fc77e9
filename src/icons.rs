//! Icon images for launcher entries.

use crate::anim::color::{neon_from_rgba, Rgb, NEON_DEFAULT};
use crate::models::IconRef;
use anyhow::{Context, Result};
use eframe::egui;

/// Decoded icon, ready to upload.
pub struct IconImage {
    pub image: egui::ColorImage,
    pub neon: Rgb,
}

impl IconImage {
    pub fn from_rgba(rgba: image::RgbaImage) -> Self {
        let (w, h) = (rgba.width() as usize, rgba.height() as usize);
        let raw = rgba.into_raw();
        let neon = neon_from_rgba(&raw, w, h);
        Self {
            image: egui::ColorImage::from_rgba_unmultiplied([w, h], &raw),
            neon,
        }
    }
}

/// Decode PNG/ICO bytes.
pub fn decode(bytes: &[u8]) -> Result<IconImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode icon")?;
    Ok(IconImage::from_rgba(img.to_rgba8()))
}

/// `Ok(None)` when the entry has no icon.
pub fn load(icon: &IconRef) -> Result<Option<IconImage>> {
    match icon {
        IconRef::None => Ok(None),
        IconRef::File(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read icon {}", path.display()))?;
            decode(&bytes).map(Some)
        }
        IconRef::Resource(id) => {
            let bytes = resource::load_rcdata(*id)
                .with_context(|| format!("Failed to load icon resource #{}", id))?;
            decode(&bytes).map(Some)
        }
    }
}

#[cfg(windows)]
mod resource {
    use anyhow::{bail, Result};
    use windows::core::PCWSTR;
    use windows::Win32::System::LibraryLoader::{
        FindResourceW, GetModuleHandleW, LoadResource, LockResource, SizeofResource,
    };
    use windows::Win32::UI::WindowsAndMessaging::RT_RCDATA;

    /// Bytes of an `RCDATA` resource compiled into this executable.
    pub fn load_rcdata(id: u32) -> Result<Vec<u8>> {
        unsafe {
            let module = GetModuleHandleW(None)?;
            // MAKEINTRESOURCE
            let name = PCWSTR(id as usize as *const u16);
            let res = FindResourceW(Some(module), name, RT_RCDATA);
            if res.is_invalid() {
                bail!("resource not found");
            }
            let size = SizeofResource(Some(module), res) as usize;
            let handle = LoadResource(Some(module), res)?;
            let ptr = LockResource(handle) as *const u8;
            if ptr.is_null() || size == 0 {
                bail!("resource is empty");
            }
            Ok(std::slice::from_raw_parts(ptr, size).to_vec())
        }
    }
}

#[cfg(not(windows))]
mod resource {
    pub fn load_rcdata(_id: u32) -> anyhow::Result<Vec<u8>> {
        anyhow::bail!("embedded resources are only available on Windows")
    }
}

enum Slot {
    Pending,
    Ready {
        texture: egui::TextureHandle,
        neon: Rgb,
    },
    Missing,
}

/// Per-entry textures, uploaded on first use.
pub struct IconCache {
    slots: Vec<Slot>,
}

impl IconCache {
    pub fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| Slot::Pending).collect(),
        }
    }

    /// Load every pending icon. Failures are logged once and leave a
    /// placeholder.
    pub fn ensure_loaded<'a>(
        &mut self,
        ctx: &egui::Context,
        icons: impl IntoIterator<Item = &'a IconRef>,
    ) {
        for (i, icon) in icons.into_iter().enumerate() {
            let Some(slot) = self.slots.get_mut(i) else {
                break;
            };
            if !matches!(slot, Slot::Pending) {
                continue;
            }
            *slot = match load(icon) {
                Ok(Some(img)) => Slot::Ready {
                    texture: ctx.load_texture(
                        format!("app-icon-{i}"),
                        img.image,
                        egui::TextureOptions::LINEAR,
                    ),
                    neon: img.neon,
                },
                Ok(None) => Slot::Missing,
                Err(e) => {
                    log::error!("Icon {} ({}): {:#}", i, icon, e);
                    Slot::Missing
                }
            };
        }
    }

    pub fn texture(&self, index: usize) -> Option<&egui::TextureHandle> {
        match self.slots.get(index) {
            Some(Slot::Ready { texture, .. }) => Some(texture),
            _ => None,
        }
    }

    pub fn neon(&self, index: usize) -> Rgb {
        match self.slots.get(index) {
            Some(Slot::Ready { neon, .. }) => *neon,
            _ => NEON_DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_and_derives_an_accent() {
        let mut img = image::RgbaImage::new(8, 8);
        for p in img.pixels_mut() {
            *p = image::Rgba([200, 30, 30, 255]);
        }
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let icon = decode(&bytes).unwrap();
        assert_eq!(icon.image.size, [8, 8]);
        assert!(icon.neon.0 > icon.neon.1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&IconRef::File(dir.path().join("gone.png")));
        assert!(err.is_err());
        assert!(load(&IconRef::None).unwrap().is_none());
    }
}
