//! Launch delay, readiness polling and timeout for splash windows.

use crate::ready::ReadyProbe;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Zero launches on the first tick.
    pub launch_delay: Duration,
    /// Zero probes on every tick.
    pub probe_interval: Duration,
    pub timeout: Duration,
    /// Whether there is a companion to launch at all.
    pub launch: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            launch_delay: Duration::ZERO,
            probe_interval: Duration::ZERO,
            timeout: Duration::from_secs(60),
            launch: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Launch,
    Probe,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Ready,
    TimedOut,
}

impl Outcome {
    pub fn should_close(self) -> bool {
        self != Outcome::Running
    }
}

#[derive(Debug, Clone)]
pub struct SplashLifecycle {
    config: LifecycleConfig,
    elapsed: Duration,
    next_probe: Duration,
    launched: bool,
    finished: bool,
    outcome: Outcome,
}

impl SplashLifecycle {
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            config,
            elapsed: Duration::ZERO,
            next_probe: config.probe_interval,
            launched: false,
            finished: false,
            outcome: Outcome::Running,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn launched(&self) -> bool {
        self.launched
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt` and report what is due, in order.
    pub fn tick(&mut self, dt: Duration) -> Vec<LifecycleAction> {
        let mut actions = Vec::new();
        if self.finished {
            return actions;
        }
        self.elapsed += dt;

        if self.config.launch && !self.launched && self.elapsed >= self.config.launch_delay {
            self.launched = true;
            actions.push(LifecycleAction::Launch);
        }

        if self.elapsed >= self.config.timeout {
            self.finished = true;
            actions.push(LifecycleAction::Exit);
            return actions;
        }

        if self.config.probe_interval.is_zero() {
            actions.push(LifecycleAction::Probe);
        } else if self.elapsed >= self.next_probe {
            // One probe per tick even if several intervals passed
            while self.next_probe <= self.elapsed {
                self.next_probe += self.config.probe_interval;
            }
            actions.push(LifecycleAction::Probe);
        }
        actions
    }

    /// Run one tick against a probe, calling `launch` when the companion is due.
    pub fn drive<P, F>(&mut self, dt: Duration, probe: &mut P, mut launch: F) -> Outcome
    where
        P: ReadyProbe + ?Sized,
        F: FnMut(),
    {
        if self.finished {
            return self.outcome;
        }
        for action in self.tick(dt) {
            match action {
                LifecycleAction::Launch => launch(),
                LifecycleAction::Exit => {
                    log::info!("Timed out after {:.1}s", self.elapsed.as_secs_f32());
                    self.outcome = Outcome::TimedOut;
                    return self.outcome;
                }
                LifecycleAction::Probe => {
                    if probe.is_ready() {
                        log::info!("Companion signalled ready");
                        self.finished = true;
                        self.outcome = Outcome::Ready;
                        return self.outcome;
                    }
                }
            }
        }
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    struct ScriptedProbe {
        polls: usize,
        ready_after: Option<usize>,
    }

    impl ReadyProbe for ScriptedProbe {
        fn is_ready(&mut self) -> bool {
            self.polls += 1;
            self.ready_after.is_some_and(|n| self.polls > n)
        }
    }

    fn never() -> ScriptedProbe {
        ScriptedProbe {
            polls: 0,
            ready_after: None,
        }
    }

    #[test]
    fn launches_once_after_the_delay() {
        let mut lc = SplashLifecycle::new(LifecycleConfig {
            launch_delay: Duration::from_secs(10),
            probe_interval: Duration::from_millis(200),
            ..Default::default()
        });
        let mut probe = never();
        let mut launches = 0;
        let mut launched_at = None;
        for _ in 0..2000 {
            lc.drive(FRAME, &mut probe, || launches += 1);
            if launches == 1 && launched_at.is_none() {
                launched_at = Some(lc.elapsed());
            }
        }
        assert_eq!(launches, 1);
        assert!(launched_at.unwrap() >= Duration::from_secs(10));
        assert!(launched_at.unwrap() < Duration::from_secs(10) + FRAME);
    }

    #[test]
    fn zero_delay_launches_on_the_first_tick() {
        let mut lc = SplashLifecycle::new(LifecycleConfig::default());
        let actions = lc.tick(Duration::ZERO);
        assert_eq!(actions, vec![LifecycleAction::Launch, LifecycleAction::Probe]);
        assert!(!lc.tick(FRAME).contains(&LifecycleAction::Launch));
    }

    #[test]
    fn probes_at_the_interval() {
        let mut lc = SplashLifecycle::new(LifecycleConfig {
            probe_interval: Duration::from_millis(200),
            launch: false,
            ..Default::default()
        });
        let probes = (0..125)
            .flat_map(|_| lc.tick(FRAME))
            .filter(|a| *a == LifecycleAction::Probe)
            .count();
        // 2 s of frames
        assert_eq!(probes, 10);
    }

    #[test]
    fn times_out_and_then_goes_quiet() {
        let mut lc = SplashLifecycle::new(LifecycleConfig {
            timeout: Duration::from_secs(1),
            ..Default::default()
        });
        let mut probe = never();
        let mut outcome = Outcome::Running;
        let mut frames = 0;
        while outcome == Outcome::Running {
            outcome = lc.drive(FRAME, &mut probe, || {});
            frames += 1;
        }
        assert_eq!(outcome, Outcome::TimedOut);
        assert_eq!(frames, 63);
        assert!(lc.tick(FRAME).is_empty());
    }

    #[test]
    fn ready_closes_early() {
        let mut lc = SplashLifecycle::new(LifecycleConfig::default());
        let mut probe = ScriptedProbe {
            polls: 0,
            ready_after: Some(3),
        };
        let outcomes: Vec<_> = (0..5).map(|_| lc.drive(FRAME, &mut probe, || {})).collect();
        assert_eq!(outcomes[3], Outcome::Ready);
        assert_eq!(outcomes[4], Outcome::Ready);
        assert!(lc.finished());
    }
}
