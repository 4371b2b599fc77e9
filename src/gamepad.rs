//! Controller 0 polling for D-pad navigation and the A button.

use crate::nav::Direction;

pub const DPAD_UP: u16 = 0x0001;
pub const DPAD_DOWN: u16 = 0x0002;
pub const DPAD_LEFT: u16 = 0x0004;
pub const DPAD_RIGHT: u16 = 0x0008;
pub const BUTTON_A: u16 = 0x1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadEvent {
    Navigate(Direction),
    Activate,
}

/// Buttons that went down since the previous sample.
pub fn pressed_edges(now: u16, prev: u16) -> u16 {
    (now ^ prev) & now
}

#[derive(Debug, Default)]
pub struct Gamepad {
    last_buttons: u16,
}

impl Gamepad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the controller. No controller, no events.
    pub fn poll(&mut self) -> Vec<PadEvent> {
        match imp::buttons(0) {
            Some(buttons) => self.feed(buttons),
            None => Vec::new(),
        }
    }

    /// Turn a raw button mask into events for newly pressed buttons.
    pub fn feed(&mut self, buttons: u16) -> Vec<PadEvent> {
        let down = pressed_edges(buttons, self.last_buttons);
        self.last_buttons = buttons;

        let mut events = Vec::new();
        for (mask, dir) in [
            (DPAD_LEFT, Direction::Left),
            (DPAD_RIGHT, Direction::Right),
            (DPAD_UP, Direction::Up),
            (DPAD_DOWN, Direction::Down),
        ] {
            if down & mask != 0 {
                events.push(PadEvent::Navigate(dir));
            }
        }
        if down & BUTTON_A != 0 {
            events.push(PadEvent::Activate);
        }
        events
    }
}

#[cfg(windows)]
mod imp {
    use windows::Win32::UI::Input::XboxController::{XInputGetState, XINPUT_STATE};

    pub fn buttons(user: u32) -> Option<u16> {
        let mut state = XINPUT_STATE::default();
        // ERROR_SUCCESS
        let rc = unsafe { XInputGetState(user, &mut state) };
        (rc == 0).then_some(state.Gamepad.wButtons.0)
    }
}

#[cfg(not(windows))]
mod imp {
    pub fn buttons(_user: u32) -> Option<u16> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_only_report_new_presses() {
        assert_eq!(pressed_edges(DPAD_UP, 0), DPAD_UP);
        assert_eq!(pressed_edges(DPAD_UP, DPAD_UP), 0);
        assert_eq!(pressed_edges(DPAD_UP | BUTTON_A, DPAD_UP), BUTTON_A);
        assert_eq!(pressed_edges(0, DPAD_LEFT), 0);
    }

    #[test]
    fn held_buttons_fire_once() {
        let mut pad = Gamepad::new();
        assert_eq!(
            pad.feed(DPAD_RIGHT),
            vec![PadEvent::Navigate(Direction::Right)]
        );
        assert!(pad.feed(DPAD_RIGHT).is_empty());
        assert_eq!(pad.feed(DPAD_RIGHT | BUTTON_A), vec![PadEvent::Activate]);
        pad.feed(0);
        assert_eq!(
            pad.feed(DPAD_RIGHT),
            vec![PadEvent::Navigate(Direction::Right)]
        );
    }
}
