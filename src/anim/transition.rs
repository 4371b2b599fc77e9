use super::ease::{clamp01, ease_in_out_quart, edge_fade, lerp};

pub const MODE_FADE_SECS: f32 = 0.32;
pub const TOAST_SECS: f32 = 1.0;
const TOAST_EDGE: f32 = 0.15;

/// One layer of a cross-fade: what to draw, at which opacity and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer<M> {
    pub mode: M,
    pub alpha: f32,
    pub scale: f32,
}

/// Cross-fade between animation modes.
#[derive(Debug, Clone)]
pub struct ModeSwitch<M> {
    current: M,
    next: M,
    switching: bool,
    t: f32,
}

impl<M: Copy + PartialEq> ModeSwitch<M> {
    pub fn new(mode: M) -> Self {
        Self {
            current: mode,
            next: mode,
            switching: false,
            t: 0.0,
        }
    }

    pub fn current(&self) -> M {
        self.current
    }

    pub fn is_switching(&self) -> bool {
        self.switching
    }

    /// Begin fading towards `next`. Restarts the fade if one is running.
    pub fn request(&mut self, next: M) {
        self.next = next;
        if next != self.current {
            self.switching = true;
            self.t = 0.0;
        }
    }

    /// Returns the new mode on the frame the fade completes.
    pub fn update(&mut self, dt: f32) -> Option<M> {
        if !self.switching {
            return None;
        }
        self.t += dt / MODE_FADE_SECS;
        if self.t >= 1.0 {
            self.switching = false;
            self.current = self.next;
            self.t = 0.0;
            return Some(self.current);
        }
        None
    }

    /// Outgoing layer first.
    pub fn layers(&self) -> Vec<Layer<M>> {
        if !self.switching {
            return vec![Layer {
                mode: self.current,
                alpha: 1.0,
                scale: 1.0,
            }];
        }
        let k = ease_in_out_quart(clamp01(self.t));
        vec![
            Layer {
                mode: self.current,
                alpha: 1.0 - k,
                scale: lerp(1.0, 0.97, k),
            },
            Layer {
                mode: self.next,
                alpha: k,
                scale: lerp(0.97, 1.0, k),
            },
        ]
    }
}

/// Short notice that fades in and out over [`TOAST_SECS`].
#[derive(Debug, Clone, Default)]
pub struct Toast {
    text: Option<String>,
    timer: f32,
}

impl Toast {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.timer = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.text.is_some() {
            self.timer += dt;
            if self.timer > TOAST_SECS {
                self.text = None;
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn opacity(&self) -> f32 {
        match self.text {
            Some(_) => edge_fade(self.timer, TOAST_SECS, TOAST_EDGE),
            None => 0.0,
        }
    }
}
