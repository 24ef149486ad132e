//! Wall-clock budgets.

use std::time::{Duration, Instant};

/// A time limit measured from when it was created.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wardplan_solver::Deadline;
///
/// let run = Deadline::new(Duration::from_secs(300));
/// // A nested budget never outlives its parent.
/// let call = run.capped(Duration::from_secs(30));
/// assert!(call.remaining() <= Duration::from_secs(30));
/// assert!(!call.is_reached());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// A deadline that is never reached.
    pub fn unlimited() -> Self {
        Self::new(Duration::MAX)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn is_reached(&self) -> bool {
        self.elapsed() >= self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    /// A new deadline starting now, ending at `limit` or at this deadline,
    /// whichever comes first.
    pub fn capped(&self, limit: Duration) -> Self {
        Self::new(limit.min(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_deadline_is_reached() {
        assert!(Deadline::new(Duration::ZERO).is_reached());
        assert_eq!(Deadline::new(Duration::ZERO).remaining(), Duration::ZERO);
    }

    #[test]
    fn test_unlimited_is_never_reached() {
        let deadline = Deadline::unlimited();
        assert!(!deadline.is_reached());
        assert!(deadline.capped(Duration::from_secs(1)).remaining() <= Duration::from_secs(1));
    }

    #[test]
    fn test_capped_by_parent() {
        let parent = Deadline::new(Duration::ZERO);
        assert!(parent.capped(Duration::from_secs(60)).is_reached());
    }
}
