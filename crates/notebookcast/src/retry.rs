//! Bounded retry with fixed or exponential backoff.
//!
//! Shared by the web reader, the completion calls and the standard TTS
//! backend; each call site only picks a [`RetryPolicy`].

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backoff {
    /// Same delay before every retry
    Fixed { delay_ms: u64 },
    /// `initial_ms * 2^(attempt-1)`, capped at `max_ms`
    Exponential { initial_ms: u64, max_ms: u64 },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::Fixed { delay_ms } => Duration::from_millis(delay_ms),
            Backoff::Exponential { initial_ms, max_ms } => {
                let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
                Duration::from_millis(initial_ms.saturating_mul(factor).min(max_ms))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// No new attempt starts once this much time has passed since the first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_elapsed_ms: Option<u64>,
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed {
                delay_ms: delay.as_millis() as u64,
            },
            max_elapsed_ms: None,
        }
    }

    pub fn exponential(max_attempts: u32, initial: Duration, max: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Exponential {
                initial_ms: initial.as_millis() as u64,
                max_ms: max.as_millis() as u64,
            },
            max_elapsed_ms: None,
        }
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed_ms = Some(max_elapsed.as_millis() as u64);
        self
    }

    /// A single attempt, no retries
    pub fn none() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// Completion calls: 3 tries, 1 s doubling up to 10 s, 30 s budget
    pub fn llm_default() -> Self {
        Self::exponential(3, Duration::from_secs(1), Duration::from_secs(10))
            .with_max_elapsed(Duration::from_secs(30))
    }

    /// Web reader: 3 tries, waiting 1 s then 2 s
    pub fn reader_default() -> Self {
        Self::exponential(3, Duration::from_secs(1), Duration::from_secs(2))
    }

    /// Standard TTS backend: 3 tries, 5 s apart
    pub fn standard_tts_default() -> Self {
        Self::fixed(3, Duration::from_secs(5))
    }

    /// Run `operation` until it succeeds, attempts run out, or the elapsed
    /// budget is spent. The last error is returned on exhaustion.
    ///
    /// `operation` receives the 1-based attempt number. `label` only shows
    /// up in logs.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let budget = self.max_elapsed_ms.map(Duration::from_millis);
        let started = Instant::now();
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= max_attempts {
                        log::error!("{label}: giving up after {attempt} attempt(s): {err}");
                        return Err(err);
                    }

                    let delay = self.backoff.delay_after(attempt);
                    if let Some(budget) = budget {
                        if started.elapsed() + delay >= budget {
                            log::error!(
                                "{label}: retry budget of {:?} spent after {attempt} attempt(s): {err}",
                                budget
                            );
                            return Err(err);
                        }
                    }

                    log::warn!(
                        "{label}: attempt {attempt}/{max_attempts} failed: {err}; retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
