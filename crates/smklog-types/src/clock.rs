use chrono::Utc;

/// Source of "now" for records created by this process.
///
/// Record constructors take a clock instead of reading the system time so
/// that tests can pin timestamps.
pub trait Clock: Send + Sync {
    /// Current time as fractional seconds since the epoch.
    fn now(&self) -> f64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        let now = Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}
