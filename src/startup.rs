//! Startup readiness gate.
//!
//! Before the listener is bound, the gate probes the database and creates
//! the users table, retrying with a fixed delay. Exhausting every attempt
//! is logged and otherwise ignored: the server starts regardless and the
//! readiness flag stays false.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::db::DbError;

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait to apply after failed attempt `attempt` (1-based), or `None`
    /// when that was the last attempt.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts).then_some(self.delay)
    }
}

/// Outer attempt policy plus the probe's own sub-policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupPolicy {
    pub attempts: RetryPolicy,
    pub probe: RetryPolicy,
}

/// Process-wide readiness flag, shared through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ready: bool) {
        self.0.store(ready, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Something the gate can probe and initialize.
#[async_trait]
pub trait SchemaTarget: Send + Sync {
    /// Lightweight connectivity check.
    async fn probe(&self) -> Result<(), DbError>;

    /// Idempotent schema creation.
    async fn create_schema(&self) -> Result<(), DbError>;
}

#[derive(Debug)]
pub enum GateOutcome {
    Ready { attempts: u32 },
    Exhausted { attempts: u32, last_error: String },
}

impl GateOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, GateOutcome::Ready { .. })
    }
}

/// Run the probe under its sub-policy.
async fn probe_with_retry<T: SchemaTarget + ?Sized>(
    target: &T,
    policy: &RetryPolicy,
) -> Result<(), DbError> {
    let mut attempt = 1;
    loop {
        match target.probe().await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!(attempt, error = %e, "Database probe failed");
                match policy.delay_after(attempt) {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => return Err(e),
                }
            }
        }
        attempt += 1;
    }
}

/// Wait for the database and create the schema, then record the result in `readiness`.
///
/// Never fails: exhaustion is reported through the returned outcome.
#[instrument(name = "startup::gate", skip_all)]
pub async fn run_gate<T: SchemaTarget + ?Sized>(
    target: &T,
    policy: &StartupPolicy,
    readiness: &Readiness,
) -> GateOutcome {
    let max_attempts = policy.attempts.max_attempts();
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        tracing::info!("Database connection attempt {}/{}", attempt, max_attempts);

        let result = match probe_with_retry(target, &policy.probe).await {
            Ok(()) => target.create_schema().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!("users table initialized");
                readiness.set(true);
                tracing::info!(attempts = attempt, "Database ready");
                return GateOutcome::Ready { attempts: attempt };
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Startup attempt {}/{} failed",
                    attempt,
                    max_attempts
                );
                last_error = e.to_string();
                if let Some(delay) = policy.attempts.delay_after(attempt) {
                    tracing::info!(delay_secs = delay.as_secs(), "Waiting before retry");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    tracing::error!(
        attempts = max_attempts,
        error = %last_error,
        "Failed to connect to database after all retries"
    );
    readiness.set(false);
    GateOutcome::Exhausted {
        attempts: max_attempts,
        last_error,
    }
}
