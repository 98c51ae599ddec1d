//! Virtual time for phase timers.
//!
//! The core never reads wall-clock time. A driver (CLI loop, test, or an
//! external scheduler collaborator) owns a clock value in milliseconds and
//! feeds it into the registry; phase deadlines are stamped against that
//! value. Tests advance the clock synchronously.

/// Milliseconds on the driver's clock.
pub type ClockMs = u64;

/// A manually advanced clock. The whole simulation is driven by calling
/// [`VirtualClock::advance`] and polling the registry for due games.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualClock {
    now: ClockMs,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self { now: 0 }
    }

    pub fn now(&self) -> ClockMs {
        self.now
    }

    pub fn advance(&mut self, ms: ClockMs) {
        self.now = self.now.saturating_add(ms);
    }
}

/// Proof that a timer fire belongs to the current phase of a game.
///
/// Every time a phase timer is armed or cancelled the epoch increments, so
/// a fire scheduled for an earlier phase (or for a game that has since been
/// replaced under the same id) no longer matches and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    epoch: u64,
}

/// Deadline bookkeeping for one game's phase timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTimer {
    deadline: Option<ClockMs>,
    epoch: u64,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for the current phase and return the token a fire must
    /// present to be accepted.
    pub fn arm(&mut self, now: ClockMs, duration_ms: ClockMs) -> TimerToken {
        self.epoch += 1;
        self.deadline = Some(now.saturating_add(duration_ms));
        TimerToken { epoch: self.epoch }
    }

    /// Cancel any outstanding deadline. Tokens handed out earlier become
    /// stale, so a fire that races the cancellation is a no-op.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<ClockMs> {
        self.deadline
    }

    /// Whether the armed deadline has passed.
    pub fn is_due(&self, now: ClockMs) -> bool {
        matches!(self.deadline, Some(d) if now >= d)
    }

    /// Token for the currently armed deadline, if any.
    pub fn current_token(&self) -> Option<TimerToken> {
        self.deadline.map(|_| TimerToken { epoch: self.epoch })
    }

    /// Whether a presented token matches the armed deadline.
    pub fn accepts(&self, token: TimerToken) -> bool {
        self.deadline.is_some() && token.epoch == self.epoch
    }
}
