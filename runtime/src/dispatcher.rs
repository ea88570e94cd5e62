//! Ordered, fire-and-forget dispatch into a [`Store`].
//!
//! `Store::send` is async, but views dispatch from synchronous event
//! handlers. [`StoreDispatcher`] bridges the two with an unbounded channel
//! drained by a single task, so commands reach the reducer in exactly the
//! order they were dispatched.

use crate::{Store, StoreError};
use mentor_club_core::{dispatch::Dispatch, reducer::Reducer};
use tokio::sync::{mpsc, oneshot};

enum Command<A> {
    Dispatch(A),
    Flush(oneshot::Sender<()>),
}

/// Cloneable [`Dispatch`] handle backed by a store.
///
/// The forwarding task exits once every clone has been dropped.
pub struct StoreDispatcher<A> {
    tx: mpsc::UnboundedSender<Command<A>>,
}

impl<A> std::fmt::Debug for StoreDispatcher<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreDispatcher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl<A> Clone for StoreDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A> StoreDispatcher<A>
where
    A: Clone + Send + 'static,
{
    /// Start forwarding dispatched commands into `store`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<S, E, R>(store: Store<S, A, E, R>) -> Self
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command<A>>();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                let action = match command {
                    Command::Dispatch(action) => action,
                    Command::Flush(done) => {
                        let _ = done.send(());
                        continue;
                    },
                };
                match store.send(action).await {
                    Ok(_) => {},
                    Err(StoreError::ShutdownInProgress) => {
                        tracing::debug!("Store shut down, dropping dispatched command");
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Dispatched command failed");
                    },
                }
            }
            tracing::trace!("All dispatchers dropped, forwarding task exiting");
        });

        Self { tx }
    }

    /// Wait until every command dispatched before this call has been
    /// handed to the store
    pub async fn flush(&self) {
        let (done, flushed) = oneshot::channel();
        if self.tx.send(Command::Flush(done)).is_ok() {
            let _ = flushed.await;
        }
    }
}

impl<A> Dispatch<A> for StoreDispatcher<A>
where
    A: Send,
{
    fn dispatch(&self, action: A) {
        metrics::counter!("store.dispatch.total").increment(1);
        if self.tx.send(Command::Dispatch(action)).is_err() {
            tracing::warn!("Dispatch after forwarding task exited");
        }
    }
}
