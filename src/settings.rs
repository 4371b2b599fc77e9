//! Theme and mode persisted per user.

pub const REG_PATH: &str = r"Software\NeonLauncher";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn from_raw(v: u32) -> Self {
        if v == 0 {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Theme::Dark => 0,
            Theme::Light => 1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Tema: Neon Escuro",
            Theme::Light => "Tema: Neon Claro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimMode {
    #[default]
    Orbital,
    Energy,
    Triangle,
}

impl AnimMode {
    pub fn from_raw(v: u32) -> Self {
        match v % 3 {
            0 => AnimMode::Orbital,
            1 => AnimMode::Energy,
            _ => AnimMode::Triangle,
        }
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn next(self) -> Self {
        Self::from_raw(self.raw() + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimMode::Orbital => "Modo: Orbital",
            AnimMode::Energy => "Modo: Barra de Energia",
            AnimMode::Triangle => "Modo: Triangulo Pulsante",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub mode: AnimMode,
}

impl Preferences {
    /// Stored values, or defaults for anything missing.
    pub fn load() -> Self {
        match imp::load() {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("Using default preferences: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if let Err(e) = imp::save(self) {
            log::error!("Failed to save preferences: {:#}", e);
        }
    }
}

#[cfg(windows)]
mod imp {
    use super::{AnimMode, Preferences, Theme, REG_PATH};
    use anyhow::{Context, Result};
    use winreg::enums::*;
    use winreg::RegKey;

    fn open() -> Result<RegKey> {
        let (key, _) = RegKey::predef(HKEY_CURRENT_USER)
            .create_subkey(REG_PATH)
            .with_context(|| format!("Failed to open HKCU\\{}", REG_PATH))?;
        Ok(key)
    }

    pub fn load() -> Result<Preferences> {
        let key = open()?;
        let mut prefs = Preferences::default();
        if let Ok(v) = key.get_value::<u32, _>("Theme") {
            prefs.theme = Theme::from_raw(v);
        }
        if let Ok(v) = key.get_value::<u32, _>("Mode") {
            prefs.mode = AnimMode::from_raw(v);
        }
        Ok(prefs)
    }

    pub fn save(prefs: &Preferences) -> Result<()> {
        let key = open()?;
        key.set_value("Theme", &prefs.theme.raw())
            .context("Failed to write Theme")?;
        key.set_value("Mode", &prefs.mode.raw())
            .context("Failed to write Mode")?;
        Ok(())
    }
}

#[cfg(not(windows))]
mod imp {
    use super::Preferences;

    pub fn load() -> anyhow::Result<Preferences> {
        Ok(Preferences::default())
    }

    pub fn save(_prefs: &Preferences) -> anyhow::Result<()> {
        Ok(())
    }
}
