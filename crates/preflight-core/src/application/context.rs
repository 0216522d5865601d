//! Per-run lookup context: cancellation and timeout.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::application::error::{LookupError, LookupResult};

/// Default bound on a single cloud lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared flag that aborts a validation run.
///
/// Clones observe the same flag, so one handle can be given to a signal
/// handler while the run holds another.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Passed to every `CloudApi` call of one run.
#[derive(Debug, Clone)]
pub struct LookupContext {
    cancellation: CancellationFlag,
    timeout: Duration,
}

impl LookupContext {
    pub fn new() -> Self {
        Self {
            cancellation: CancellationFlag::new(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Deadline adapters should apply to each request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Run one port call under this context.
    ///
    /// Returns `Cancelled` without calling when the run is already cancelled,
    /// `Cancelled` if cancellation arrived while the call was in flight, and
    /// `Timeout` if the call overran the deadline. The call's own result is
    /// discarded in the last two cases.
    pub fn run<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce() -> LookupResult<T>,
    ) -> LookupResult<T> {
        if self.is_cancelled() {
            debug!(operation, "run cancelled, skipping lookup");
            return Err(LookupError::Cancelled);
        }

        let started = Instant::now();
        let result = call();
        let elapsed = started.elapsed();

        debug!(
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            ok = result.is_ok(),
            "lookup finished"
        );

        if self.is_cancelled() {
            return Err(LookupError::Cancelled);
        }
        if elapsed > self.timeout {
            return Err(LookupError::Timeout(self.timeout));
        }
        result
    }
}

impl Default for LookupContext {
    fn default() -> Self {
        Self::new()
    }
}
