use neon_launcher::anim::timeline::{BlockTimeline, HOLD_MS, STEP_MS};
use neon_launcher::gamepad::{Gamepad, PadEvent, BUTTON_A, DPAD_RIGHT};
use neon_launcher::lifecycle::{LifecycleConfig, Outcome, SplashLifecycle};
use neon_launcher::nav::Direction;
use neon_launcher::ready::ReadyProbe;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

struct ReadyAfter {
    probes: usize,
    ready_at: usize,
}

impl ReadyProbe for ReadyAfter {
    fn is_ready(&mut self) -> bool {
        self.probes += 1;
        self.probes >= self.ready_at
    }
}

#[test]
fn neon_lifecycle_launches_once_after_the_delay() {
    let mut life = SplashLifecycle::new(LifecycleConfig {
        launch_delay: Duration::from_secs(10),
        probe_interval: Duration::from_millis(200),
        timeout: Duration::from_secs(60),
        launch: true,
    });
    let mut probe = ReadyAfter {
        probes: 0,
        ready_at: usize::MAX,
    };
    let mut launches = 0;
    let mut launched_at = None;

    let mut outcome = Outcome::Running;
    while !outcome.should_close() {
        outcome = life.drive(FRAME, &mut probe, || launches += 1);
        if launches == 1 && launched_at.is_none() {
            launched_at = Some(life.elapsed());
        }
    }

    assert_eq!(outcome, Outcome::TimedOut);
    assert_eq!(launches, 1);
    assert!(launched_at.unwrap() >= Duration::from_secs(10));
    assert!(launched_at.unwrap() < Duration::from_secs(10) + FRAME);
    // Roughly five probes per second
    assert!((280..=300).contains(&probe.probes), "{} probes", probe.probes);
    assert_eq!(life.drive(FRAME, &mut probe, || launches += 1), Outcome::TimedOut);
    assert_eq!(launches, 1);
}

#[test]
fn readiness_ends_the_splash_early() {
    let mut life = SplashLifecycle::new(LifecycleConfig::default());
    let mut probe = ReadyAfter {
        probes: 0,
        ready_at: 3,
    };
    let mut launches = 0;
    let outcomes: Vec<_> = (0..3)
        .map(|_| life.drive(FRAME, &mut probe, || launches += 1))
        .collect();
    assert_eq!(outcomes, [Outcome::Running, Outcome::Running, Outcome::Ready]);
    assert_eq!(launches, 1);
}

#[test]
fn block_timeline_wraps_the_cycle() {
    let mut tl = BlockTimeline::new(50);
    assert_eq!(tl.cycle_ms(), 2 * 50 * STEP_MS + HOLD_MS);
    let mut max_seen = 0;
    for _ in 0..1000 {
        tl.advance(FRAME);
        assert!(tl.elapsed_ms() < tl.cycle_ms());
        max_seen = max_seen.max(tl.active_count());
        assert!(tl.active_count() <= 50);
    }
    assert_eq!(max_seen, 50);
}

#[test]
fn held_buttons_fire_once() {
    let mut pad = Gamepad::new();
    assert_eq!(pad.feed(DPAD_RIGHT), [PadEvent::Navigate(Direction::Right)]);
    assert!(pad.feed(DPAD_RIGHT).is_empty());
    assert_eq!(pad.feed(DPAD_RIGHT | BUTTON_A), [PadEvent::Activate]);
    assert!(pad.feed(0).is_empty());
}
