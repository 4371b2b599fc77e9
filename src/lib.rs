//! Borderless splash screens and launchers.
//!
//! Each binary under `src/bin` is a thin `clap` front end over one of the
//! [`gui`] variants. The remaining modules hold the window-free logic.

pub mod anim;
pub mod config;
pub mod gamepad;
pub mod gui;
pub mod icons;
pub mod launch;
pub mod layout;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod nav;
pub mod ready;
pub mod settings;
