//! Frame timing: an injectable clock and a per-surface timer.
//!
//! The render loop recomputes elapsed time from a [`Clock`] each tick instead
//! of trusting the host's callback cadence. Injecting the clock keeps the
//! timing math deterministic under test, with no real display-refresh signal
//! required.

/// A monotonic millisecond clock.
///
/// The browser front end implements this over `performance.now()`; native
/// callers use [`StdClock`]; tests use a hand-advanced fake.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Must never decrease.
    fn now_ms(&self) -> f64;
}

/// A [`Clock`] backed by `std::time::Instant`, with its origin at
/// construction.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl StdClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for StdClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Per-surface animation timer: a start timestamp plus a speed factor.
///
/// One timer per surface so that the hero, each gallery preview, and the
/// detail view animate independently. Elapsed time scales by the speed
/// factor (1.0 for active surfaces, 0.5 for passive previews); changing the
/// factor rescales the whole elapsed interval, which makes the animation
/// jump rather than smoothly change rate. That matches the portfolio's
/// slider semantics.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    start_ms: f64,
    speed_factor: f64,
}

impl FrameTimer {
    /// Starts a timer at the clock's current time with speed factor 1.0.
    pub fn new(clock: &dyn Clock) -> Self {
        Self::with_speed(clock, 1.0)
    }

    /// Starts a timer with an explicit speed factor.
    pub fn with_speed(clock: &dyn Clock, speed_factor: f64) -> Self {
        Self {
            start_ms: clock.now_ms(),
            speed_factor,
        }
    }

    /// Current speed factor.
    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    /// Replaces the speed factor. Takes effect on the next tick.
    pub fn set_speed_factor(&mut self, speed_factor: f64) {
        self.speed_factor = speed_factor;
    }

    /// Restarts the timer at the clock's current time.
    pub fn reset(&mut self, clock: &dyn Clock) {
        self.start_ms = clock.now_ms();
    }

    /// Scaled elapsed time in seconds, as uploaded to `u_time`.
    pub fn elapsed_seconds(&self, clock: &dyn Clock) -> f32 {
        let elapsed_ms = (clock.now_ms() - self.start_ms).max(0.0);
        ((elapsed_ms * self.speed_factor) / 1000.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Hand-advanced clock for deterministic timer tests.
    struct FakeClock {
        ms: Cell<f64>,
    }

    impl FakeClock {
        fn at(ms: f64) -> Self {
            Self { ms: Cell::new(ms) }
        }

        fn advance(&self, ms: f64) {
            self.ms.set(self.ms.get() + ms);
        }
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> f64 {
            self.ms.get()
        }
    }

    #[test]
    fn elapsed_starts_at_zero() {
        let clock = FakeClock::at(5_000.0);
        let timer = FrameTimer::new(&clock);
        assert_eq!(timer.elapsed_seconds(&clock), 0.0);
    }

    #[test]
    fn elapsed_converts_milliseconds_to_seconds() {
        let clock = FakeClock::at(0.0);
        let timer = FrameTimer::new(&clock);
        clock.advance(1_500.0);
        let elapsed = timer.elapsed_seconds(&clock);
        assert!(
            (elapsed - 1.5).abs() < 1e-6,
            "expected 1.5s elapsed, got {elapsed}"
        );
    }

    #[test]
    fn preview_speed_halves_elapsed() {
        let clock = FakeClock::at(0.0);
        let timer = FrameTimer::with_speed(&clock, 0.5);
        clock.advance(2_000.0);
        let elapsed = timer.elapsed_seconds(&clock);
        assert!(
            (elapsed - 1.0).abs() < 1e-6,
            "expected 1.0s at half speed, got {elapsed}"
        );
    }

    #[test]
    fn changing_speed_rescales_whole_interval() {
        // The slider semantics: the full elapsed interval is rescaled, so
        // the animation jumps when the factor changes.
        let clock = FakeClock::at(0.0);
        let mut timer = FrameTimer::new(&clock);
        clock.advance(4_000.0);
        timer.set_speed_factor(2.0);
        let elapsed = timer.elapsed_seconds(&clock);
        assert!(
            (elapsed - 8.0).abs() < 1e-6,
            "expected 8.0s after doubling speed, got {elapsed}"
        );
    }

    #[test]
    fn reset_moves_start_to_now() {
        let clock = FakeClock::at(0.0);
        let mut timer = FrameTimer::new(&clock);
        clock.advance(3_000.0);
        timer.reset(&clock);
        assert_eq!(timer.elapsed_seconds(&clock), 0.0);
        clock.advance(500.0);
        let elapsed = timer.elapsed_seconds(&clock);
        assert!((elapsed - 0.5).abs() < 1e-6, "got {elapsed}");
    }

    #[test]
    fn clock_going_backwards_clamps_to_zero() {
        let clock = FakeClock::at(1_000.0);
        let timer = FrameTimer::new(&clock);
        clock.ms.set(400.0);
        assert_eq!(
            timer.elapsed_seconds(&clock),
            0.0,
            "elapsed must never be negative"
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn std_clock_is_monotonic() {
        let clock = StdClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a, "StdClock went backwards: {a} -> {b}");
    }
}
