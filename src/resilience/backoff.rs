//! Exponential backoff retry driver.
//!
//! The driver keeps invoking an operation until it succeeds, fails fatally, or
//! the accumulated delay grows past the ceiling. There is no attempt limit; the
//! ceiling alone bounds how long a caller can be held up.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::config::BackoffConfig;
use crate::error::ClassifiedError;
use crate::observability::metrics;

/// Multiplicative backoff state.
///
/// The current delay is never reset, so reusing one driver for several
/// operations continues the same growing sequence.
#[derive(Debug, Clone)]
pub struct Backoff {
    factor: f64,
    current: Duration,
    max: Duration,
    jitter: bool,
}

impl Backoff {
    pub fn new(factor: f64, initial: Duration, max: Duration) -> Self {
        Self {
            factor,
            current: initial,
            max,
            jitter: false,
        }
    }

    /// Fresh driver from configuration. Each submission should own one.
    pub fn from_config(config: &BackoffConfig) -> Self {
        Self::new(
            config.factor,
            Duration::from_millis(config.initial_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
        .with_jitter(config.jitter)
    }

    /// Lengthen each wait by up to 10%. The ceiling check ignores jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn current(&self) -> Duration {
        self.current
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Grow the delay. `None` once the ceiling is exceeded.
    fn advance(&mut self) -> Option<Duration> {
        let nanos = (self.current.as_nanos() as f64 * self.factor).round();
        if !nanos.is_finite() || nanos < 0.0 || nanos >= u64::MAX as f64 {
            return None;
        }
        let next = Duration::from_nanos(nanos as u64);
        self.current = next;
        if next > self.max {
            return None;
        }
        Some(next)
    }

    fn wait_time(&self, delay: Duration) -> Duration {
        if !self.jitter {
            return delay;
        }
        let jitter_range = delay.as_millis() as u64 / 10;
        if jitter_range == 0 {
            return delay;
        }
        delay + Duration::from_millis(rand::thread_rng().gen_range(0..jitter_range))
    }

    /// Number of invocations an always-failing operation would get, or `None`
    /// if the delay never grows past the ceiling.
    pub fn max_attempts(&self) -> Option<usize> {
        let mut probe = self.clone();
        if !(self.factor > 1.0) || self.current.is_zero() {
            return probe.advance().is_none().then_some(1);
        }
        let mut attempts = 1;
        while probe.advance().is_some() {
            attempts += 1;
        }
        Some(attempts)
    }

    /// Drive an async operation, suspending only the calling task between
    /// attempts.
    pub async fn run<T, E, F, Fut>(&mut self, mut operation: F) -> Result<T, ClassifiedError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClassifiedError<E>>>,
        E: Display,
    {
        let mut attempt: u32 = 1;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => err,
            };

            let Some(delay) = self.advance() else {
                tracing::warn!(attempt, error = %err, "Backoff ceiling exceeded, giving up");
                return Err(err);
            };

            tracing::info!(attempt, delay = ?delay, error = %err, "Retrying");
            metrics::record_retry();
            tokio::time::sleep(self.wait_time(delay)).await;
            attempt += 1;
        }
    }

    /// Drive a synchronous operation, blocking the calling thread between
    /// attempts. Must not be called from an async worker thread.
    pub fn run_blocking<T, E, F>(&mut self, mut operation: F) -> Result<T, ClassifiedError<E>>
    where
        F: FnMut() -> Result<T, ClassifiedError<E>>,
        E: Display,
    {
        let mut attempt: u32 = 1;
        loop {
            let err = match operation() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => err,
            };

            let Some(delay) = self.advance() else {
                tracing::warn!(attempt, error = %err, "Backoff ceiling exceeded, giving up");
                return Err(err);
            };

            tracing::info!(attempt, delay = ?delay, error = %err, "Retrying");
            metrics::record_retry();
            std::thread::sleep(self.wait_time(delay));
            attempt += 1;
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::from_config(&BackoffConfig::default())
    }
}
