//! Debounce scheduling for deferred side effects
//!
//! Typing produces far more events than we want persistence or preview
//! renders, so the expensive actions sit behind [`Debouncer`] instances that
//! collapse a burst of requests into a single trailing invocation. The
//! scheduler is a plain owned value polled from the update loop each frame
//! (the same pull model the toast timer uses), not a background timer thread.

// Allow dead code - the debouncer exposes its complete API surface even
// though the pipeline wiring only drives part of it directly
#![allow(dead_code)]

use std::time::{Duration, Instant};

/// Delay before the preview re-renders after the last edit.
///
/// Short, so the preview feels live while typing.
pub const RENDER_DELAY: Duration = Duration::from_millis(150);

/// Delay before an edited note is persisted.
///
/// Longer than the render delay so a typing burst becomes one save.
pub const SAVE_DELAY: Duration = Duration::from_millis(1500);

/// A trailing-edge debouncer.
///
/// Scheduling a payload replaces any pending one and restarts the quiet
/// period; the payload is handed out by [`poll`](Self::poll) exactly once,
/// after `delay` of inactivity. Only the most recent payload survives a
/// burst. Nothing is durable in here: a payload still pending at process
/// exit is simply lost.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule a payload, replacing any pending one and restarting the
    /// quiet period from now.
    pub fn schedule(&mut self, payload: T) {
        self.schedule_at(payload, Instant::now());
    }

    /// Schedule with an explicit clock reading (tests drive this directly).
    pub fn schedule_at(&mut self, payload: T, now: Instant) {
        self.pending = Some((now + self.delay, payload));
    }

    /// Return the pending payload if its quiet period has elapsed.
    ///
    /// The payload is handed out at most once; subsequent polls return
    /// `None` until something is scheduled again.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => {
                self.pending.take().map(|(_, payload)| payload)
            }
            _ => None,
        }
    }

    /// Take the pending payload immediately, canceling the timer.
    ///
    /// This is the explicit "save now" path: it bypasses the quiet period
    /// entirely.
    pub fn fire_now(&mut self) -> Option<T> {
        self.pending.take().map(|(_, payload)| payload)
    }

    /// Drop any pending payload without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a payload is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The instant the pending payload becomes due, if any.
    ///
    /// The update loop uses this to request a repaint at the right time
    /// instead of spinning.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer(ms: u64) -> Debouncer<i32> {
        Debouncer::new(Duration::from_millis(ms))
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let mut d = debouncer(100);
        let t0 = Instant::now();

        d.schedule_at(1, t0);
        assert!(d.poll(t0 + Duration::from_millis(50)).is_none());
        assert_eq!(d.poll(t0 + Duration::from_millis(100)), Some(1));
        // Handed out exactly once
        assert!(d.poll(t0 + Duration::from_millis(200)).is_none());
        assert!(!d.is_pending());
    }

    #[test]
    fn test_burst_keeps_only_last_payload() {
        let mut d = debouncer(100);
        let t0 = Instant::now();

        // Five rapid calls, each restarting the quiet period
        for k in 1..=5 {
            d.schedule_at(k, t0 + Duration::from_millis(10 * k as u64));
        }

        // Quiet period counts from the final call at t0+50
        assert!(d.poll(t0 + Duration::from_millis(140)).is_none());
        assert_eq!(d.poll(t0 + Duration::from_millis(150)), Some(5));
    }

    #[test]
    fn test_reschedule_restarts_quiet_period() {
        let mut d = debouncer(100);
        let t0 = Instant::now();

        d.schedule_at(1, t0);
        // Just before the deadline, a new call arrives
        d.schedule_at(2, t0 + Duration::from_millis(99));

        assert!(d.poll(t0 + Duration::from_millis(100)).is_none());
        assert_eq!(d.poll(t0 + Duration::from_millis(199)), Some(2));
    }

    #[test]
    fn test_fire_now_bypasses_delay() {
        let mut d = debouncer(1000);
        let t0 = Instant::now();

        d.schedule_at(7, t0);
        assert_eq!(d.fire_now(), Some(7));
        assert!(!d.is_pending());
        // Timer is gone; nothing fires later
        assert!(d.poll(t0 + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_fire_now_with_nothing_pending() {
        let mut d = debouncer(100);
        assert_eq!(d.fire_now(), None);
    }

    #[test]
    fn test_cancel_discards_payload() {
        let mut d = debouncer(100);
        let t0 = Instant::now();

        d.schedule_at(3, t0);
        d.cancel();
        assert!(d.poll(t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_next_deadline() {
        let mut d = debouncer(100);
        let t0 = Instant::now();

        assert!(d.next_deadline().is_none());
        d.schedule_at(1, t0);
        assert_eq!(d.next_deadline(), Some(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_independent_instances_do_not_share_timers() {
        let mut render: Debouncer<&str> = Debouncer::new(Duration::from_millis(50));
        let mut save: Debouncer<&str> = Debouncer::new(Duration::from_millis(200));
        let t0 = Instant::now();

        render.schedule_at("render", t0);
        save.schedule_at("save", t0);

        let t1 = t0 + Duration::from_millis(60);
        assert_eq!(render.poll(t1), Some("render"));
        assert!(save.poll(t1).is_none());
        assert_eq!(save.poll(t0 + Duration::from_millis(200)), Some("save"));
    }
}
