//! Shutdown deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::error::Elapsed;
use tokio::time::Instant;

/// Optional point in time bounding a teardown step.
///
/// `Deadline::none()` waits as long as the operation takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn none() -> Self {
        Self { at: None }
    }

    /// Deadline `timeout` from now. `Duration::ZERO` is already expired.
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Some(Instant::now() + timeout),
        }
    }

    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    /// Time left, saturating at zero. `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.at.is_some_and(|at| at <= Instant::now())
    }

    /// Drive `fut` until it completes or the deadline passes.
    pub async fn run<F: Future>(self, fut: F) -> Result<F::Output, Elapsed> {
        match self.at {
            Some(at) => tokio::time::timeout_at(at, fut).await,
            None => Ok(fut.await),
        }
    }
}

impl From<Duration> for Deadline {
    fn from(timeout: Duration) -> Self {
        Deadline::after(timeout)
    }
}

impl From<Instant> for Deadline {
    fn from(instant: Instant) -> Self {
        Deadline::at(instant)
    }
}

impl From<Option<Duration>> for Deadline {
    fn from(timeout: Option<Duration>) -> Self {
        timeout.map_or_else(Deadline::none, Deadline::after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unbounded_deadline_runs_to_completion() {
        let deadline = Deadline::none();
        assert!(!deadline.is_expired());
        assert_eq!(deadline.remaining(), None);
        assert_eq!(deadline.run(async { 7 }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn expired_deadline_returns_promptly() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), Some(Duration::ZERO));

        let started = Instant::now();
        let result = deadline.run(tokio::time::sleep(Duration::from_secs(30))).await;
        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn deadline_bounds_slow_work() {
        let deadline = Deadline::from(Duration::from_millis(50));
        let result = deadline.run(tokio::time::sleep(Duration::from_secs(5))).await;
        assert!(result.is_err());

        let deadline = Deadline::from(Some(Duration::from_secs(5)));
        let result = deadline.run(tokio::time::sleep(Duration::from_millis(10))).await;
        assert!(result.is_ok());
    }
}
