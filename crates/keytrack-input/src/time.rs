use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of "now" for windowed key queries.
///
/// The unit must match the timestamps carried by incoming key events.
/// Implementations: [`SystemTimeProvider`] (production), [`MockTimeProvider`] (testing).
pub trait TimeProvider {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn now_us(&self) -> i64 {
        (**self).now_us()
    }
}

impl<T: TimeProvider + ?Sized> TimeProvider for Rc<T> {
    fn now_us(&self) -> i64 {
        (**self).now_us()
    }
}

/// Monotonic clock measured from the moment the provider was created.
pub struct SystemTimeProvider {
    start: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Manually driven clock for deterministic tests and event replay.
#[derive(Debug, Default)]
pub struct MockTimeProvider {
    current_us: Cell<i64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at a given time.
    pub fn at(us: i64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    pub fn set_time(&self, us: i64) {
        self.current_us.set(us);
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us
            .set(self.current_us.get().saturating_add(delta_us));
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.current_us.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_provider_advance() {
        let tp = MockTimeProvider::new();
        assert_eq!(tp.now_us(), 0);
        tp.advance(1_000_000);
        assert_eq!(tp.now_us(), 1_000_000);
        tp.advance(500_000);
        assert_eq!(tp.now_us(), 1_500_000);
    }

    #[test]
    fn mock_time_provider_advance_saturates() {
        let tp = MockTimeProvider::at(i64::MAX - 1);
        tp.advance(10);
        assert_eq!(tp.now_us(), i64::MAX);
    }

    #[test]
    fn mock_time_provider_set() {
        let tp = MockTimeProvider::at(10);
        assert_eq!(tp.now_us(), 10);
        tp.set_time(5_000_000);
        assert_eq!(tp.now_us(), 5_000_000);
    }

    fn read(tp: impl TimeProvider) -> i64 {
        tp.now_us()
    }

    #[test]
    fn shared_providers_observe_the_same_clock() {
        let tp = Rc::new(MockTimeProvider::new());
        let shared = Rc::clone(&tp);
        tp.advance(42);
        assert_eq!(read(shared), 42);
        assert_eq!(read(&*tp), 42);
    }

    #[test]
    fn system_time_provider_monotonic() {
        let tp = SystemTimeProvider::new();
        let t1 = tp.now_us();
        let t2 = tp.now_us();
        assert!(t2 >= t1);
    }
}
