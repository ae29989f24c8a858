#![forbid(unsafe_code)]

//! Tick scheduling port.
//!
//! The driver never sleeps, spawns or talks to a display API; it asks a
//! [`TickScheduler`] for one callback "later, roughly at refresh rate" and
//! the host decides what that means. A browser-style host would wire this to
//! its animation-frame callback, the terminal demo wires it to a wall-clock
//! deadline it polls between input events, and tests wire it to a recorder.

use std::time::{Duration, Instant};

/// Host capability for requesting one future tick.
pub trait TickScheduler {
    /// Ask to be ticked once, later. Idempotent: a second request before
    /// the callback fires coalesces into the first, never queues a second.
    fn request(&mut self);

    /// Drop the pending callback, if any.
    fn cancel(&mut self);
}

/// Scheduler that never calls back. For headless or manually ticked use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullScheduler;

impl TickScheduler for NullScheduler {
    fn request(&mut self) {}
    fn cancel(&mut self) {}
}

/// Test double that records scheduling traffic.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingScheduler {
    requests: u32,
    cancels: u32,
    pending: bool,
}

impl RecordingScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total `request` calls observed, coalesced or not.
    #[must_use]
    pub const fn requests(&self) -> u32 {
        self.requests
    }

    /// Total `cancel` calls observed.
    #[must_use]
    pub const fn cancels(&self) -> u32 {
        self.cancels
    }

    /// Whether a callback is currently outstanding.
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.pending
    }

    /// Simulates the host firing the callback: clears and reports the
    /// pending flag.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl TickScheduler for RecordingScheduler {
    fn request(&mut self) {
        self.requests += 1;
        self.pending = true;
    }

    fn cancel(&mut self) {
        self.cancels += 1;
        self.pending = false;
    }
}

/// Wall-clock one-shot deadline for host poll loops.
///
/// `request` arms a deadline one period ahead; the host polls
/// [`FrameClock::take_due`] (typically around its input wait) and ticks the
/// driver when it reports true. Re-requests while armed keep the earlier
/// deadline, so a busy loop still ticks at the configured cadence.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    period: Duration,
    due: Option<Instant>,
}

impl FrameClock {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period, due: None }
    }

    /// Clock targeting `fps` frames per second; zero is treated as one.
    #[must_use]
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_nanos(
            1_000_000_000 / u64::from(fps.max(1)),
        ))
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Whether a deadline is armed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Arms the deadline relative to `now`; keeps an earlier one.
    pub fn request_at(&mut self, now: Instant) {
        if self.due.is_none() {
            self.due = Some(now + self.period);
        }
    }

    /// Time left until the armed deadline; `None` when disarmed, zero when
    /// overdue. Feed this to the host's event-poll timeout.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Reports and disarms an expired deadline.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

impl TickScheduler for FrameClock {
    fn request(&mut self) {
        self.request_at(Instant::now());
    }

    fn cancel(&mut self) {
        self.due = None;
    }
}
