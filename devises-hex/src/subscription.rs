//! Single-shot result streams.
//!
//! The operation runs on the Tokio runtime and its result is handed to the
//! consumer over a channel. Dropping the `Subscription` aborts the operation.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use devises_types::AppError;

/// Stream of at most one `Result<T, AppError>`.
///
/// If the operation is aborted or panics before producing a value, the stream
/// yields `Err(AppError::Cancelled)` and then ends.
pub struct Subscription<T> {
    rx: mpsc::Receiver<Result<T, AppError>>,
    task: JoinHandle<()>,
    delivered: bool,
    finished: bool,
}

// No field is structurally pinned.
impl<T> Unpin for Subscription<T> {}

impl<T: Send + 'static> Subscription<T> {
    /// Spawns `operation` onto the current runtime.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn spawn<F>(operation: F) -> Self
    where
        F: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let result = operation.await;
            // A closed channel only means the consumer is gone.
            let _ = tx.send(result).await;
        });

        Self {
            rx,
            task,
            delivered: false,
            finished: false,
        }
    }
}

impl<T> Subscription<T> {
    /// Aborts the underlying operation.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// True once the underlying operation has stopped running.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the single result.
    pub async fn first(mut self) -> Result<T, AppError> {
        self.next().await.unwrap_or(Err(AppError::Cancelled))
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T, AppError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        match this.rx.poll_recv(cx) {
            Poll::Ready(Some(item)) => {
                this.delivered = true;
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                this.finished = true;
                if this.delivered {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Err(AppError::Cancelled)))
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
