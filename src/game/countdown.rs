use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownPoll {
    /// No deadline set yet.
    Idle,
    Running(Duration),
    /// Reported once, on the first poll past the deadline.
    Expired,
    /// Expired earlier or paused.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Deadline tracker that signals expiry exactly once.
#[derive(Clone, Debug)]
pub struct Countdown {
    deadline: Option<Instant>,
    phase: Phase,
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown {
            deadline: None,
            phase: Phase::Idle,
        }
    }
}

impl Countdown {
    pub fn start(&mut self, now: Instant, length: Duration) {
        self.deadline = Some(now + length);
        self.phase = Phase::Running;
    }

    /// Stops ticking for good; the deadline is kept for display.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn poll(&mut self, now: Instant) -> CountdownPoll {
        match (self.phase, self.deadline) {
            (Phase::Running, Some(deadline)) if now >= deadline => {
                self.phase = Phase::Expired;
                CountdownPoll::Expired
            }
            (Phase::Running, Some(deadline)) => CountdownPoll::Running(deadline - now),
            (Phase::Idle, _) | (Phase::Running, None) => CountdownPoll::Idle,
            (Phase::Paused | Phase::Expired, _) => CountdownPoll::Finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut countdown = Countdown::default();
        assert_eq!(countdown.poll(Instant::now()), CountdownPoll::Idle);
        assert_eq!(countdown.remaining(Instant::now()), None);
    }

    #[test]
    fn expires_exactly_once() {
        let start = Instant::now();
        let mut countdown = Countdown::default();
        countdown.start(start, Duration::from_secs(5));

        assert_eq!(
            countdown.poll(start + Duration::from_secs(2)),
            CountdownPoll::Running(Duration::from_secs(3))
        );
        assert_eq!(countdown.poll(start + Duration::from_secs(5)), CountdownPoll::Expired);
        assert_eq!(countdown.poll(start + Duration::from_secs(6)), CountdownPoll::Finished);
        assert_eq!(countdown.poll(start + Duration::from_secs(60)), CountdownPoll::Finished);
    }

    #[test]
    fn paused_never_expires() {
        let start = Instant::now();
        let mut countdown = Countdown::default();
        countdown.start(start, Duration::from_secs(1));
        countdown.pause();
        assert!(!countdown.is_running());
        assert_eq!(countdown.poll(start + Duration::from_secs(10)), CountdownPoll::Finished);
        assert_eq!(
            countdown.remaining(start + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
    }
}
