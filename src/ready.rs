//! Named readiness event shared with the companion process.

pub const READY_EVENT_NAME: &str = "CHATBOT_AI_READY";

/// Something a lifecycle can poll to learn the companion is up.
pub trait ReadyProbe {
    /// Zero-timeout check.
    fn is_ready(&mut self) -> bool;
}

/// Manual-reset, initially unsignalled named event.
pub struct ReadySignal {
    names: Vec<String>,
    event: Option<imp::Event>,
    tried: bool,
}

impl ReadySignal {
    /// Create or open `Local\<name>` right away.
    pub fn open_local(name: &str) -> Self {
        let mut signal = Self {
            names: vec![format!(r"Local\{name}")],
            event: None,
            tried: false,
        };
        signal.ensure();
        signal
    }

    /// Try `Local\`, `Global\` and the bare name, in that order, on the first
    /// probe. That first probe always reports not ready.
    pub fn lazy_with_fallbacks(name: &str) -> Self {
        Self {
            names: vec![
                format!(r"Local\{name}"),
                format!(r"Global\{name}"),
                name.to_string(),
            ],
            event: None,
            tried: false,
        }
    }

    fn ensure(&mut self) {
        if self.tried {
            return;
        }
        self.tried = true;
        for name in &self.names {
            match imp::Event::create(name) {
                Ok(event) => {
                    log::debug!("Readiness event {} opened", name);
                    self.event = Some(event);
                    return;
                }
                Err(e) => log::debug!("Readiness event {} unavailable: {}", name, e),
            }
        }
        log::warn!("No readiness event could be opened; relying on the timeout");
    }
}

impl ReadyProbe for ReadySignal {
    fn is_ready(&mut self) -> bool {
        if !self.tried {
            self.ensure();
            return false;
        }
        self.event.as_ref().is_some_and(imp::Event::is_set)
    }
}

#[cfg(windows)]
mod imp {
    use windows::core::HSTRING;
    use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
    use windows::Win32::System::Threading::{CreateEventW, WaitForSingleObject};

    pub struct Event {
        handle: HANDLE,
    }

    impl Event {
        pub fn create(name: &str) -> anyhow::Result<Self> {
            let handle = unsafe { CreateEventW(None, true, false, &HSTRING::from(name)) }?;
            Ok(Self { handle })
        }

        pub fn is_set(&self) -> bool {
            unsafe { WaitForSingleObject(self.handle, 0) == WAIT_OBJECT_0 }
        }
    }

    impl Drop for Event {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }
}

#[cfg(not(windows))]
mod imp {
    pub struct Event;

    impl Event {
        pub fn create(_name: &str) -> anyhow::Result<Self> {
            anyhow::bail!("named events are only available on Windows")
        }

        pub fn is_set(&self) -> bool {
            false
        }
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn lazy_signal_reports_not_ready_on_first_probe() {
        let mut signal = ReadySignal::lazy_with_fallbacks(READY_EVENT_NAME);
        assert!(!signal.is_ready());
        assert!(signal.event.is_none());
    }
}
