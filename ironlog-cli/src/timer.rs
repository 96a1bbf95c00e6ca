use std::time::{Duration, Instant};

pub const DEFAULT_REST: Duration = Duration::from_secs(90);

/// Rest countdown kept as a monotonic deadline and checked on demand, so
/// the remaining time stays honest however long the event loop sleeps
/// between redraws.
#[derive(Debug, Default)]
pub struct RestTimer {
    deadline: Option<Instant>,
}

impl RestTimer {
    pub fn start(&mut self, duration: Duration) {
        self.deadline = Some(Instant::now() + duration);
    }

    pub fn reset(&mut self) {
        self.deadline = None;
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// True exactly once, when a running timer is first observed past its
    /// deadline; the timer disarms itself.
    pub fn just_expired(&mut self) -> bool {
        match self.remaining() {
            Some(rest) if rest.is_zero() => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// `MM:SS` for a running timer, nothing otherwise.
    pub fn display(&self) -> Option<String> {
        self.remaining().map(|rest| {
            let secs = rest.as_secs();
            format!("{:02}:{:02}", secs / 60, secs % 60)
        })
    }
}
