// ABOUTME: Request context carrying cancellation and deadlines for override store calls
// ABOUTME: Store round-trips race against the context so cancelled callers never hang
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Request Context
//!
//! Every store-touching [`Entry`](crate::Entry) operation takes a [`RequestContext`].
//! The context owns a [`CancellationToken`] and an optional deadline; store-backed
//! resolvers and mutators run their store call through [`RequestContext::run`], which
//! returns `Cancelled` or `DeadlineExceeded` as soon as either fires.
//!
//! Dropping the returned future also abandons the store call, so callers that only
//! need a timeout can equally wrap the operation in `tokio::time::timeout`.

use runtimeconfig_core::{RuntimeConfigError, RuntimeConfigResult};
use std::future::{self, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

/// Cloneable cancellation signal shared by every clone of a context
///
/// A child token is cancelled when its parent is, but cancelling the child
/// leaves the parent untouched.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
    parent: Option<Box<CancellationToken>>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
            parent: None,
        }
    }

    /// Create a token that is also cancelled whenever this one is
    #[must_use]
    pub fn child_token(&self) -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Cancel the token; every waiter wakes up
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    /// Whether this token or any ancestor has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow() || self.parent.as_ref().is_some_and(|p| p.is_cancelled())
    }

    /// Resolve once this token or any ancestor is cancelled
    pub fn cancelled(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            match &self.parent {
                Some(parent) => {
                    tokio::select! {
                        () = self.own_cancelled() => {}
                        () = parent.cancelled() => {}
                    }
                }
                None => self.own_cancelled().await,
            }
        })
    }

    async fn own_cancelled(&self) {
        let mut rx = self.state.subscribe();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives as long as this token, so the channel cannot close
            future::pending::<()>().await;
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-request cancellation and deadline scope
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context that is never cancelled and has no deadline
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that also expires after `timeout`
    ///
    /// The derived context shares this context's cancellation token; the earlier
    /// of the two deadlines wins.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a context that also expires at `deadline`
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = self
            .deadline
            .map_or(deadline, |current| current.min(deadline));
        Self {
            cancellation: self.cancellation.clone(),
            deadline: Some(deadline),
        }
    }

    /// Derive a context with its own token
    ///
    /// Cancelling the child leaves this context running; cancelling this context
    /// also cancels the child. The deadline is inherited.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context and every context sharing its token
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Token shared by this context
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Deadline, if any
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context is already done
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` or `DeadlineExceeded` when the context is done.
    pub fn check(&self) -> RuntimeConfigResult<()> {
        if self.cancellation.is_cancelled() {
            return Err(RuntimeConfigError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(RuntimeConfigError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Run a store operation, abandoning it when the context is cancelled or expires
    ///
    /// # Errors
    ///
    /// Returns the operation's own error, `Cancelled`, or `DeadlineExceeded`.
    pub async fn run<F, T>(&self, operation: F) -> RuntimeConfigResult<T>
    where
        F: Future<Output = RuntimeConfigResult<T>> + Send,
        T: Send,
    {
        self.check()?;
        tokio::select! {
            biased;
            () = self.cancellation.cancelled() => Err(RuntimeConfigError::Cancelled),
            () = expire(self.deadline) => Err(RuntimeConfigError::DeadlineExceeded),
            result = operation => result,
        }
    }
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_run_passes_result_through() {
        let ctx = RequestContext::background();
        let value = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_in_flight_operation() {
        let ctx = RequestContext::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = ctx
            .run(async {
                future::pending::<()>().await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeConfigError::Cancelled));
    }

    #[tokio::test]
    async fn test_deadline_interrupts_in_flight_operation() {
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(20));
        let err = ctx
            .run(async {
                future::pending::<()>().await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeConfigError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_already_cancelled_context_fails_before_running() {
        let ctx = RequestContext::background();
        ctx.cancel();
        let err = ctx.run(async { Ok(()) }).await.unwrap_err();
        assert!(matches!(err, RuntimeConfigError::Cancelled));
        assert!(ctx.token().is_cancelled());
    }

    #[tokio::test]
    async fn test_parent_cancel_reaches_child_but_not_back() {
        let parent = RequestContext::background();
        let child = parent.child();
        child.cancel();
        assert!(child.check().is_err());
        assert!(parent.check().is_ok());

        let second = parent.child();
        let canceller = parent.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });
        let err = second
            .run(async {
                future::pending::<()>().await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeConfigError::Cancelled));
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let outer = RequestContext::background().with_timeout(Duration::from_secs(1));
        let inner = outer.with_timeout(Duration::from_secs(60));
        assert_eq!(inner.deadline(), outer.deadline());
    }
}
