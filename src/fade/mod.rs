//! Three-phase fade sequencer masking scene swaps.
//!
//! A sequence fades an overlay in, holds it fully opaque, then fades it out.
//! The midpoint callback fires at the start of the hold, when the overlay
//! covers everything — the safe moment to swap scene content without a
//! visual discontinuity.
//!
//! The sequencer never sleeps and owns no clock: the caller passes the
//! current instant to [`FadeSequencer::start`] and pumps
//! [`FadeSequencer::tick`] from its frame loop. At most one deadline is
//! armed at a time, so cancellation is a single disarm.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A stage of the timed fade sequence. `Idle` is both initial and terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    FadingIn,
    Holding,
    FadingOut,
}

/// Durations for the three phases, resolved at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FadeTiming {
    pub fade_in: Duration,
    pub hold: Duration,
    pub fade_out: Duration,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            fade_in: Duration::from_millis(300),
            hold: Duration::from_millis(500),
            fade_out: Duration::from_millis(300),
        }
    }
}

/// Floor each phase duration is clamped to when reduced motion is
/// preferred. Near zero, not zero: the midpoint must still fire.
pub const REDUCED_MOTION_FLOOR: Duration = Duration::from_millis(10);

// Short scheduling delay between start and the opacity flip to 1, so the
// consumer registers the starting opacity before animating toward it.
const ARM_DELAY: Duration = Duration::from_millis(16);

// The pending step an armed deadline will perform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Step {
    RaiseOpacity,
    Midpoint,
    BeginFadeOut,
    Complete,
}

/// Drives one fade-in → hold → fade-out sequence at a time.
///
/// `on_midpoint` and `on_complete` each fire at most once per `start`, and
/// never after a `reset` that preempts them. Callbacks are read from the
/// sequencer at fire time, so swapping them between sequences never invokes
/// a stale closure.
///
/// # Example
///
/// ```rust
/// use playcore::fade::{FadeSequencer, FadeTiming, Phase};
/// use std::time::{Duration, Instant};
///
/// let mut fade = FadeSequencer::new(FadeTiming {
///     fade_in: Duration::from_millis(100),
///     hold: Duration::from_millis(100),
///     fade_out: Duration::from_millis(100),
/// });
///
/// let t0 = Instant::now();
/// fade.start(t0);
/// assert_eq!(fade.phase(), Phase::FadingIn);
///
/// // One late tick still walks every boundary in order.
/// fade.tick(t0 + Duration::from_millis(400));
/// assert_eq!(fade.phase(), Phase::Idle);
/// assert!(!fade.is_running());
/// ```
pub struct FadeSequencer {
    timing: FadeTiming,
    reduced_motion: bool,
    phase: Phase,
    opacity: f32,
    running: bool,
    started_at: Option<Instant>,
    deadline: Option<(Instant, Step)>,
    on_midpoint: Option<Box<dyn FnMut() + Send>>,
    on_complete: Option<Box<dyn FnMut() + Send>>,
}

impl FadeSequencer {
    /// Create an idle sequencer with the given timings.
    pub fn new(timing: FadeTiming) -> Self {
        Self {
            timing,
            reduced_motion: false,
            phase: Phase::Idle,
            opacity: 0.0,
            running: false,
            started_at: None,
            deadline: None,
            on_midpoint: None,
            on_complete: None,
        }
    }

    /// Set the callback fired when the hold phase begins (overlay fully
    /// opaque). Replaces any previous callback.
    pub fn set_on_midpoint<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_midpoint = Some(Box::new(callback));
    }

    /// Set the callback fired when the sequence returns to idle. Replaces
    /// any previous callback.
    pub fn set_on_complete<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Begin a sequence at `now`. An in-flight sequence is fully reset
    /// first — two sequences never interleave.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            self.reset();
        }
        self.phase = Phase::FadingIn;
        self.opacity = 0.0;
        self.running = true;
        self.started_at = Some(now);
        self.deadline = Some((now + ARM_DELAY, Step::RaiseOpacity));
    }

    /// Advance past every deadline at or before `now`, in order. A late
    /// tick fires skipped boundaries in sequence (midpoint always before
    /// complete). Idempotent when idle.
    pub fn tick(&mut self, now: Instant) {
        while let Some((deadline, step)) = self.deadline {
            if now < deadline {
                break;
            }
            self.advance(step);
        }
    }

    /// Cancel whatever is pending: phase idle, opacity 0, not running.
    /// Neither callback fires afterward for the preempted sequence.
    /// Idempotent.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.opacity = 0.0;
        self.running = false;
        self.started_at = None;
        self.deadline = None;
    }

    /// The active phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The opacity signal for presentation, 0.0 or 1.0 (the consumer's
    /// animation layer interpolates between them).
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether a sequence is in flight.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the overlay should be in the scene at all.
    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// The armed deadline, if any — when the next `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline.map(|(at, _)| at)
    }

    /// The configured timings (before any reduced-motion clamp).
    pub fn timing(&self) -> FadeTiming {
        self.timing
    }

    /// Toggle the reduced-motion clamp. Applies from the next `start`;
    /// phase boundaries already armed keep their deadline.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Whether the reduced-motion clamp is on.
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn effective(&self, duration: Duration) -> Duration {
        if self.reduced_motion {
            duration.min(REDUCED_MOTION_FLOOR)
        } else {
            duration
        }
    }

    fn advance(&mut self, step: Step) {
        // started_at is always set while a deadline is armed.
        let Some(started) = self.started_at else {
            self.deadline = None;
            return;
        };
        let fade_in = self.effective(self.timing.fade_in);
        let hold = self.effective(self.timing.hold);
        let fade_out = self.effective(self.timing.fade_out);

        match step {
            Step::RaiseOpacity => {
                self.opacity = 1.0;
                self.deadline = Some((started + fade_in, Step::Midpoint));
            }
            Step::Midpoint => {
                self.phase = Phase::Holding;
                self.opacity = 1.0;
                self.deadline = Some((started + fade_in + hold, Step::BeginFadeOut));
                if let Some(callback) = self.on_midpoint.as_mut() {
                    callback();
                }
            }
            Step::BeginFadeOut => {
                self.phase = Phase::FadingOut;
                self.opacity = 0.0;
                self.deadline = Some((started + fade_in + hold + fade_out, Step::Complete));
            }
            Step::Complete => {
                self.phase = Phase::Idle;
                self.opacity = 0.0;
                self.running = false;
                self.started_at = None;
                self.deadline = None;
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
            }
        }
    }
}

impl Default for FadeSequencer {
    fn default() -> Self {
        Self::new(FadeTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn timing(fade_in: u64, hold: u64, fade_out: u64) -> FadeTiming {
        FadeTiming {
            fade_in: Duration::from_millis(fade_in),
            hold: Duration::from_millis(hold),
            fade_out: Duration::from_millis(fade_out),
        }
    }

    fn counters(fade: &mut FadeSequencer) -> (Arc<Mutex<u32>>, Arc<Mutex<u32>>) {
        let midpoints = Arc::new(Mutex::new(0));
        let completes = Arc::new(Mutex::new(0));
        let m = midpoints.clone();
        let c = completes.clone();
        fade.set_on_midpoint(move || *m.lock().unwrap() += 1);
        fade.set_on_complete(move || *c.lock().unwrap() += 1);
        (midpoints, completes)
    }

    #[test]
    fn full_sequence_walks_phases_in_order() {
        let mut fade = FadeSequencer::new(timing(100, 200, 100));
        let (midpoints, completes) = counters(&mut fade);
        let t0 = Instant::now();

        fade.start(t0);
        assert_eq!(fade.phase(), Phase::FadingIn);
        assert_eq!(fade.opacity(), 0.0);
        assert!(fade.is_running());
        assert!(fade.is_visible());

        // Opacity flips to 1 after the short arm delay, still fading in.
        fade.tick(t0 + Duration::from_millis(20));
        assert_eq!(fade.phase(), Phase::FadingIn);
        assert_eq!(fade.opacity(), 1.0);

        fade.tick(t0 + Duration::from_millis(100));
        assert_eq!(fade.phase(), Phase::Holding);
        assert_eq!(*midpoints.lock().unwrap(), 1);
        assert_eq!(*completes.lock().unwrap(), 0);

        fade.tick(t0 + Duration::from_millis(300));
        assert_eq!(fade.phase(), Phase::FadingOut);
        assert_eq!(fade.opacity(), 0.0);

        fade.tick(t0 + Duration::from_millis(400));
        assert_eq!(fade.phase(), Phase::Idle);
        assert_eq!(fade.opacity(), 0.0);
        assert!(!fade.is_running());
        assert!(!fade.is_visible());
        assert_eq!(*midpoints.lock().unwrap(), 1);
        assert_eq!(*completes.lock().unwrap(), 1);
        assert!(fade.next_deadline().is_none());
    }

    #[test]
    fn late_tick_fires_midpoint_before_complete() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut fade = FadeSequencer::new(timing(50, 50, 50));
        let mid = order.clone();
        let done = order.clone();
        fade.set_on_midpoint(move || mid.lock().unwrap().push("midpoint"));
        fade.set_on_complete(move || done.lock().unwrap().push("complete"));

        let t0 = Instant::now();
        fade.start(t0);
        fade.tick(t0 + Duration::from_secs(5));

        assert_eq!(*order.lock().unwrap(), vec!["midpoint", "complete"]);
        assert_eq!(fade.phase(), Phase::Idle);
    }

    #[test]
    fn callbacks_fire_at_most_once_per_start() {
        let mut fade = FadeSequencer::new(timing(50, 50, 50));
        let (midpoints, completes) = counters(&mut fade);
        let t0 = Instant::now();

        fade.start(t0);
        for ms in [100, 200, 300, 400] {
            fade.tick(t0 + Duration::from_millis(ms));
        }
        assert_eq!(*midpoints.lock().unwrap(), 1);
        assert_eq!(*completes.lock().unwrap(), 1);

        // A fresh start fires them again, once.
        let t1 = t0 + Duration::from_secs(10);
        fade.start(t1);
        fade.tick(t1 + Duration::from_secs(1));
        assert_eq!(*midpoints.lock().unwrap(), 2);
        assert_eq!(*completes.lock().unwrap(), 2);
    }

    #[test]
    fn reset_cancels_pending_callbacks() {
        let mut fade = FadeSequencer::new(timing(100, 100, 100));
        let (midpoints, completes) = counters(&mut fade);
        let t0 = Instant::now();

        fade.start(t0);
        fade.tick(t0 + Duration::from_millis(20));
        fade.reset();

        assert_eq!(fade.phase(), Phase::Idle);
        assert_eq!(fade.opacity(), 0.0);
        assert!(!fade.is_running());

        // Ticking far past every boundary fires nothing.
        fade.tick(t0 + Duration::from_secs(10));
        assert_eq!(*midpoints.lock().unwrap(), 0);
        assert_eq!(*completes.lock().unwrap(), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut fade = FadeSequencer::default();
        fade.reset();
        fade.reset();
        assert_eq!(fade.phase(), Phase::Idle);
        assert!(!fade.is_running());
    }

    #[test]
    fn restart_preempts_in_flight_sequence() {
        let mut fade = FadeSequencer::new(timing(100, 100, 100));
        let (midpoints, completes) = counters(&mut fade);
        let t0 = Instant::now();

        fade.start(t0);
        fade.tick(t0 + Duration::from_millis(150));
        assert_eq!(fade.phase(), Phase::Holding);

        // Restart mid-hold: old sequence's remaining boundaries are gone.
        let t1 = t0 + Duration::from_millis(160);
        fade.start(t1);
        assert_eq!(fade.phase(), Phase::FadingIn);
        assert_eq!(fade.opacity(), 0.0);

        fade.tick(t1 + Duration::from_secs(1));
        assert_eq!(*midpoints.lock().unwrap(), 2);
        // Only the second sequence completed.
        assert_eq!(*completes.lock().unwrap(), 1);
    }

    #[test]
    fn reduced_motion_clamps_but_still_fires_midpoint() {
        let mut fade = FadeSequencer::new(timing(3000, 5000, 3000));
        fade.set_reduced_motion(true);
        let (midpoints, completes) = counters(&mut fade);
        let t0 = Instant::now();

        fade.start(t0);
        // Well under the configured seconds-long timings.
        fade.tick(t0 + Duration::from_millis(100));

        assert_eq!(fade.phase(), Phase::Idle);
        assert_eq!(*midpoints.lock().unwrap(), 1);
        assert_eq!(*completes.lock().unwrap(), 1);
    }

    #[test]
    fn callbacks_can_be_swapped_between_sequences() {
        let mut fade = FadeSequencer::new(timing(10, 10, 10));
        let first = Arc::new(Mutex::new(0));
        let second = Arc::new(Mutex::new(0));

        let f = first.clone();
        fade.set_on_midpoint(move || *f.lock().unwrap() += 1);
        let t0 = Instant::now();
        fade.start(t0);
        fade.tick(t0 + Duration::from_secs(1));

        let s = second.clone();
        fade.set_on_midpoint(move || *s.lock().unwrap() += 1);
        let t1 = t0 + Duration::from_secs(2);
        fade.start(t1);
        fade.tick(t1 + Duration::from_secs(1));

        assert_eq!(*first.lock().unwrap(), 1);
        assert_eq!(*second.lock().unwrap(), 1);
    }

    #[test]
    fn tick_before_deadline_does_nothing() {
        let mut fade = FadeSequencer::new(timing(100, 100, 100));
        let t0 = Instant::now();
        fade.start(t0);

        fade.tick(t0 + Duration::from_millis(5));
        assert_eq!(fade.phase(), Phase::FadingIn);
        assert_eq!(fade.opacity(), 0.0);
        assert_eq!(fade.next_deadline(), Some(t0 + ARM_DELAY));
    }
}
