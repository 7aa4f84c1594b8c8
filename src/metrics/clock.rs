use chrono::{Local, NaiveDateTime};

/// Source of "today" and "now" for sentinel substitution.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
