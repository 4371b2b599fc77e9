//! Window placement and the embedded application icon.

use eframe::egui::{self, pos2, Pos2, Rect, Vec2};

/// Work area (monitor minus taskbar) of the monitor under the mouse cursor.
pub fn cursor_work_area() -> Option<Rect> {
    imp::cursor_work_area()
}

/// Work area of the primary monitor.
pub fn primary_work_area() -> Option<Rect> {
    imp::primary_work_area()
}

/// Top-left position that centres `size` inside `area`.
pub fn centered_in(area: Rect, size: Vec2) -> Pos2 {
    pos2(
        area.min.x + (area.width() - size.x) / 2.0,
        area.min.y + (area.height() - size.y) / 2.0,
    )
}

/// Position for a `size` window centred on the cursor's monitor.
pub fn centered_on_cursor_monitor(size: Vec2) -> Option<Pos2> {
    cursor_work_area().map(|area| centered_in(area, size))
}

pub fn app_icon() -> egui::IconData {
    egui::IconData {
        rgba: include_bytes!(concat!(env!("OUT_DIR"), "/icon_rgba.bin")).to_vec(),
        width: 48,
        height: 48,
    }
}

#[cfg(windows)]
mod imp {
    use super::*;
    use eframe::egui::vec2;
    use windows::Win32::Foundation::POINT;
    use windows::Win32::Graphics::Gdi::{
        GetMonitorInfoW, MonitorFromPoint, MONITORINFO, MONITOR_DEFAULTTONEAREST,
        MONITOR_DEFAULTTOPRIMARY, MONITOR_FROM_FLAGS,
    };
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    fn work_area_at(pt: POINT, flags: MONITOR_FROM_FLAGS) -> Option<Rect> {
        let mut mi = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let ok = unsafe {
            let monitor = MonitorFromPoint(pt, flags);
            GetMonitorInfoW(monitor, &mut mi).as_bool()
        };
        ok.then(|| {
            let r = mi.rcWork;
            Rect::from_min_size(
                pos2(r.left as f32, r.top as f32),
                vec2((r.right - r.left) as f32, (r.bottom - r.top) as f32),
            )
        })
    }

    pub fn cursor_work_area() -> Option<Rect> {
        let mut pt = POINT::default();
        unsafe { GetCursorPos(&mut pt) }.ok()?;
        work_area_at(pt, MONITOR_DEFAULTTONEAREST)
    }

    pub fn primary_work_area() -> Option<Rect> {
        // The origin always lies on the primary monitor
        work_area_at(POINT { x: 0, y: 0 }, MONITOR_DEFAULTTOPRIMARY)
    }
}

#[cfg(not(windows))]
mod imp {
    use super::*;

    pub fn cursor_work_area() -> Option<Rect> {
        None
    }

    pub fn primary_work_area() -> Option<Rect> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    #[test]
    fn centres_inside_an_offset_area() {
        let area = Rect::from_min_size(pos2(1920.0, 40.0), vec2(1600.0, 900.0));
        assert_eq!(centered_in(area, vec2(400.0, 400.0)), pos2(2520.0, 290.0));
    }
}
