//! Clock provider for bisection deadlines.
//!
//! The bisector polls the clock once per search depth. Anything that can
//! report a monotonic [`Instant`] can drive it.

use std::time::Instant;

/// Source of the current time.
pub trait Clock {
    /// Current instant, comparable to a bisection deadline.
    fn now(&self) -> Instant;
}

/// Monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_clock_through_reference() {
        fn read(c: impl Clock) -> Instant {
            c.now()
        }
        let before = Instant::now();
        assert!(read(&SystemClock) >= before);
    }
}
