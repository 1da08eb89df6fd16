//! Per-call context: deadline and cancellation.
//!
//! The context bounds exactly one HTTP exchange. When the deadline passes or
//! the paired [`CancelHandle`] fires, the in-flight request future is dropped
//! (aborting the connection work) and the call returns an error instead of
//! waiting for the server.

use std::future::{pending, poll_fn, Future};
use std::pin::Pin;
use std::task::Poll;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use centrix_core::error::{CentrixError, Result};

/// Cancellation/deadline scope for a call. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    /// Cancel signals of this context and every context it was derived from.
    cancel: Vec<watch::Receiver<bool>>,
}

/// Fires the cancellation of every context derived from it.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallContext {
    /// No deadline, never cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Bound the call by `timeout` from now. An earlier deadline is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Derive a cancellable context. Cancelling any parent still cancels the child.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel.push(rx);
        (self, CancelHandle { tx })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.iter().any(|rx| *rx.borrow())
    }

    /// Fail fast when the context is already done.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(CentrixError::Cancelled);
        }
        if matches!(self.deadline, Some(d) if d <= Instant::now()) {
            return Err(CentrixError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` until it completes, the deadline passes, or the call is cancelled.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        let cancelled = any_cancelled(self.cancel.clone());

        let expired = async {
            match self.deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => {
                tracing::warn!("call cancelled");
                Err(CentrixError::Cancelled)
            }
            _ = expired => {
                tracing::warn!("call deadline exceeded");
                Err(CentrixError::DeadlineExceeded)
            }
            res = fut => res,
        }
    }
}

type Signal = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Completes once any of `signals` fires. Never completes for an empty set.
async fn any_cancelled(signals: Vec<watch::Receiver<bool>>) {
    let mut waits: Vec<Signal> = signals
        .into_iter()
        .map(|mut rx| {
            Box::pin(async move {
                // Err means the handle was dropped without cancelling.
                if rx.wait_for(|c| *c).await.is_err() {
                    pending::<()>().await;
                }
            }) as Signal
        })
        .collect();

    poll_fn(|cx| {
        if waits.iter_mut().any(|w| w.as_mut().poll(cx).is_ready()) {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    })
    .await
}
