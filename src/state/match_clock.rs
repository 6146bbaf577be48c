//! Server-authoritative match clock.
//!
//! The clock never ticks on its own. It stores the instant it was last started
//! and the seconds accumulated before that instant, and derives the elapsed
//! playing time whenever someone asks. Because only those three values are
//! persisted, every reader (admin panel, on-air overlay) computes the same
//! elapsed time from the same row, across reloads and server restarts.

/// Timer commands accepted by [`MatchClock::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Resume counting from the accumulated total.
    Start,
    /// Freeze the elapsed time.
    Pause,
    /// Stop the clock and zero the elapsed time.
    Reset,
}

/// Persisted clock memory of the match.
///
/// While `is_running` is true, `start_timestamp` is the instant of the last
/// start and `accumulated_seconds` holds the time accrued before it. While
/// paused, `accumulated_seconds` is the complete total and `start_timestamp`
/// is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchClock {
    /// Seconds since the epoch of the last start; `0.0` when unset.
    pub start_timestamp: f64,
    /// Elapsed seconds frozen at the last pause or reset.
    pub accumulated_seconds: f64,
    /// Whether the clock is currently counting.
    pub is_running: bool,
}

impl MatchClock {
    /// Start counting at `now`. Returns `false` (and changes nothing) when already running.
    pub fn start(&mut self, now: f64) -> bool {
        if self.is_running {
            return false;
        }
        self.start_timestamp = now;
        self.is_running = true;
        true
    }

    /// Fold the running stretch into the accumulator. Returns `false` when already paused.
    pub fn pause(&mut self, now: f64) -> bool {
        if !self.is_running {
            return false;
        }
        self.accumulated_seconds += self.running_stretch(now);
        self.is_running = false;
        true
    }

    /// Stop and zero the clock regardless of its current state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a timer command stamped with `now`, returning whether the clock changed.
    pub fn apply(&mut self, action: TimerAction, now: f64) -> bool {
        match action {
            TimerAction::Start => self.start(now),
            TimerAction::Pause => self.pause(now),
            TimerAction::Reset => {
                let changed = *self != Self::default();
                self.reset();
                changed
            }
        }
    }

    /// Elapsed playing time as observed at `now`.
    pub fn elapsed_at(&self, now: f64) -> f64 {
        if self.is_running {
            self.accumulated_seconds + self.running_stretch(now)
        } else {
            self.accumulated_seconds
        }
    }

    // A server clock set behind the last start counts as zero running time, so
    // elapsed never drops below `accumulated_seconds`.
    fn running_stretch(&self, now: f64) -> f64 {
        (now - self.start_timestamp).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fresh_clock_is_stopped_at_zero() {
        let clock = MatchClock::default();
        assert!(!clock.is_running);
        assert_close(clock.elapsed_at(1_000.0), 0.0);
    }

    #[test]
    fn start_pause_resume_scenario() {
        let mut clock = MatchClock::default();

        assert!(clock.start(0.0));
        assert_close(clock.elapsed_at(10.0), 10.0);

        assert!(clock.pause(10.0));
        assert_close(clock.accumulated_seconds, 10.0);
        assert_close(clock.elapsed_at(20.0), 10.0);

        assert!(clock.start(20.0));
        assert_close(clock.elapsed_at(25.0), 15.0);
    }

    #[test]
    fn second_start_is_ignored() {
        let mut clock = MatchClock::default();
        clock.start(100.0);
        let before = clock;

        assert!(!clock.start(130.0));
        assert_eq!(clock, before);
        assert_close(clock.elapsed_at(140.0), 40.0);
    }

    #[test]
    fn pause_while_paused_is_ignored() {
        let mut clock = MatchClock::default();
        clock.start(0.0);
        clock.pause(5.0);

        assert!(!clock.pause(50.0));
        assert_close(clock.accumulated_seconds, 5.0);
    }

    #[test]
    fn reset_zeroes_running_clock() {
        let mut clock = MatchClock::default();
        clock.start(0.0);
        clock.pause(30.0);
        clock.start(40.0);

        assert!(clock.apply(TimerAction::Reset, 45.0));
        assert!(!clock.is_running);
        assert_eq!(clock.start_timestamp, 0.0);
        assert_close(clock.elapsed_at(90.0), 0.0);
    }

    #[test]
    fn reset_on_fresh_clock_reports_no_change() {
        let mut clock = MatchClock::default();
        assert!(!clock.apply(TimerAction::Reset, 3.0));
    }

    #[test]
    fn clock_behind_start_floors_at_accumulated() {
        let mut clock = MatchClock {
            start_timestamp: 100.0,
            accumulated_seconds: 12.0,
            is_running: true,
        };
        assert_close(clock.elapsed_at(105.0), 17.0);
        // Stepping back inside the stretch shows less, but never less than the banked time.
        assert_close(clock.elapsed_at(102.0), 14.0);
        assert_close(clock.elapsed_at(90.0), 12.0);
        clock.pause(90.0);
        assert_close(clock.accumulated_seconds, 12.0);
    }

    fn action_strategy() -> impl Strategy<Value = TimerAction> {
        prop_oneof![
            Just(TimerAction::Start),
            Just(TimerAction::Pause),
            Just(TimerAction::Reset),
        ]
    }

    proptest! {
        #[test]
        fn elapsed_grows_while_running_and_freezes_while_paused(
            steps in prop::collection::vec((action_strategy(), 0.0f64..120.0), 1..40)
        ) {
            let mut clock = MatchClock::default();
            let mut now = 1_700_000_000.0;

            for (action, gap) in steps {
                let before = clock.elapsed_at(now);
                now += gap;
                let after = clock.elapsed_at(now);
                if clock.is_running {
                    prop_assert!(after >= before);
                    prop_assert!((after - before - gap).abs() < 1e-6);
                } else {
                    prop_assert_eq!(after, before);
                }

                let elapsed_before_action = clock.elapsed_at(now);
                clock.apply(action, now);
                let elapsed_after_action = clock.elapsed_at(now);
                match action {
                    TimerAction::Reset => prop_assert_eq!(elapsed_after_action, 0.0),
                    _ => prop_assert!((elapsed_after_action - elapsed_before_action).abs() < 1e-6),
                }
            }
        }

        #[test]
        fn repeated_start_keeps_accumulator(
            accumulated in 0.0f64..10_000.0,
            first in 0.0f64..1_000.0,
            later in 0.0f64..1_000.0,
        ) {
            let mut clock = MatchClock { accumulated_seconds: accumulated, ..MatchClock::default() };
            clock.start(first);
            let snapshot = clock;
            clock.start(first + later);
            prop_assert_eq!(clock, snapshot);
        }
    }
}
