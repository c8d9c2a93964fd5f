use chrono::{Local, NaiveDateTime};

/// Wall-clock source for time and date replies.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn spoken_time(clock: &dyn Clock) -> String {
    format!("The current time is {}", clock.now().format("%I:%M %p"))
}

pub fn spoken_date(clock: &dyn Clock) -> String {
    format!("Today is {}", clock.now().format("%A, %B %d, %Y"))
}
