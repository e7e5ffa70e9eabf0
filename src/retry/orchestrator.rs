//! Retry Orchestrator
//!
//! Re-invokes a failing async operation with exponential backoff while the
//! classifier says the failure is transient.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::classifier::{classify, ErrorClassification, RemoteFailure};
use crate::error::OperationError;
use crate::params::Params;
use crate::retry::RetryPolicy;

// == Retry Orchestrator ==
/// Runs remote operations under a retry policy.
///
/// Holds the default policy used when a call does not supply its own.
#[derive(Debug, Clone, Default)]
pub struct RetryOrchestrator {
    policy: RetryPolicy,
}

impl RetryOrchestrator {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// The policy applied when a call passes `None`.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    // == Retry ==
    /// Runs `operation` until it succeeds, fails permanently, or the retry
    /// budget is spent.
    ///
    /// The backoff wait is an async sleep, so other tasks keep running.
    pub async fn retry<T, E, F, Fut>(
        &self,
        operation: F,
        operation_name: &str,
        policy: Option<&RetryPolicy>,
    ) -> Result<T, OperationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RemoteFailure + Send + Sync + 'static,
    {
        self.run(operation, operation_name, policy, Params::new(), None)
            .await
    }

    /// Like [`retry`](Self::retry), attaching `context` to every classification.
    pub async fn retry_with_context<T, E, F, Fut>(
        &self,
        operation: F,
        operation_name: &str,
        policy: Option<&RetryPolicy>,
        context: Params,
    ) -> Result<T, OperationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RemoteFailure + Send + Sync + 'static,
    {
        self.run(operation, operation_name, policy, context, None)
            .await
    }

    /// Like [`retry`](Self::retry), but gives up with
    /// [`OperationError::Cancelled`] once `token` is cancelled.
    ///
    /// The token is checked before every attempt and raced against each
    /// backoff wait. An attempt already in flight is allowed to finish.
    pub async fn retry_cancellable<T, E, F, Fut>(
        &self,
        operation: F,
        operation_name: &str,
        policy: Option<&RetryPolicy>,
        token: &CancellationToken,
    ) -> Result<T, OperationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RemoteFailure + Send + Sync + 'static,
    {
        self.run(operation, operation_name, policy, Params::new(), Some(token))
            .await
    }

    // == Safe Operation ==
    /// Runs `operation` exactly once.
    ///
    /// On failure returns `default` when given, otherwise the annotated error.
    pub async fn safe_operation<T, E, F, Fut>(
        &self,
        operation: F,
        operation_name: &str,
        default: Option<T>,
    ) -> Result<T, OperationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RemoteFailure + Send + Sync + 'static,
    {
        match operation().await {
            Ok(value) => Ok(value),
            Err(err) => {
                let classification = classify(&err, operation_name, None);
                match default {
                    Some(value) => {
                        warn!(
                            operation = operation_name,
                            kind = %classification.kind,
                            "Operation failed, using default value: {}",
                            classification.message
                        );
                        Ok(value)
                    }
                    None => {
                        error!(
                            operation = operation_name,
                            kind = %classification.kind,
                            "Operation failed: {}",
                            classification.message
                        );
                        Err(OperationError::Failed {
                            operation: operation_name.to_string(),
                            attempts: 1,
                            classification,
                            source: Box::new(err),
                        })
                    }
                }
            }
        }
    }

    async fn run<T, E, F, Fut>(
        &self,
        mut operation: F,
        operation_name: &str,
        policy: Option<&RetryPolicy>,
        context: Params,
        token: Option<&CancellationToken>,
    ) -> Result<T, OperationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RemoteFailure + Send + Sync + 'static,
    {
        let policy = policy.unwrap_or(&self.policy);
        let max_attempts = policy.max_attempts();
        let mut attempts = 0u32;

        loop {
            if token.is_some_and(CancellationToken::is_cancelled) {
                return Err(cancelled(operation_name, attempts, context));
            }

            attempts += 1;
            let err = match operation().await {
                Ok(value) => {
                    if attempts > 1 {
                        info!(operation = operation_name, attempts, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            let classification = classify(
                &err,
                operation_name,
                Some(context.clone().with("attempt", attempts)),
            );

            if !classification.retryable {
                error!(
                    operation = operation_name,
                    attempts,
                    kind = %classification.kind,
                    "Non-retryable failure: {}",
                    classification.message
                );
                return Err(OperationError::Failed {
                    operation: operation_name.to_string(),
                    attempts,
                    classification,
                    source: Box::new(err),
                });
            }

            if attempts >= max_attempts {
                error!(
                    operation = operation_name,
                    attempts,
                    kind = %classification.kind,
                    "Retries exhausted: {}",
                    classification.message
                );
                return Err(OperationError::RetriesExhausted {
                    operation: operation_name.to_string(),
                    attempts,
                    classification,
                    source: Box::new(err),
                });
            }

            let delay = policy.delay_for(attempts);
            warn!(
                operation = operation_name,
                attempts,
                delay_ms = delay.as_millis() as u64,
                kind = %classification.kind,
                "Retryable failure, backing off: {}",
                classification.message
            );

            match token {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => {
                            return Err(cancelled(operation_name, attempts, context));
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                None => tokio::time::sleep(delay).await,
            }
        }
    }
}

fn cancelled(operation_name: &str, attempts: u32, context: Params) -> OperationError {
    warn!(operation = operation_name, attempts, "Retry loop cancelled");
    OperationError::Cancelled {
        operation: operation_name.to_string(),
        attempts,
        classification: ErrorClassification::cancelled(operation_name, context),
    }
}
