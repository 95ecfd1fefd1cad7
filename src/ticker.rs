use std::time::{Duration, Instant};

/// A cancellable periodic timer.
///
/// At most one schedule exists at a time: starting the ticker replaces
/// whatever was installed before.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Ticker {
    schedule: Option<Schedule>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Schedule {
    interval: Duration,
    deadline: Instant,
}

impl Ticker {
    pub(crate) fn new() -> Ticker {
        Ticker::default()
    }

    /// Install a timer that first fires `interval` after `now` and then
    /// every `interval` after that, cancelling any existing timer
    pub(crate) fn start(&mut self, interval: Duration, now: Instant) {
        self.schedule = Some(Schedule {
            interval,
            deadline: now + interval,
        });
    }

    pub(crate) fn stop(&mut self) {
        self.schedule = None;
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// The period of the installed timer, if any
    #[cfg(test)]
    pub(crate) fn interval(&self) -> Option<Duration> {
        self.schedule.map(|sch| sch.interval)
    }

    /// Time left until the timer next fires.  Returns `None` if no timer is
    /// installed.
    pub(crate) fn remaining(&self, now: Instant) -> Option<Duration> {
        self.schedule.map(|sch| sch.deadline.saturating_duration_since(now))
    }

    /// If the deadline has been reached, schedule the next one and return
    /// `true`.  A timer that has fallen more than a full interval behind is
    /// rescheduled relative to `now` instead of firing repeatedly to catch
    /// up.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        let Some(sch) = self.schedule.as_mut() else {
            return false;
        };
        if now < sch.deadline {
            return false;
        }
        sch.deadline += sch.interval;
        if sch.deadline <= now {
            sch.deadline = now + sch.interval;
        }
        true
    }
}
