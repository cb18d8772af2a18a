//! Polling and observation helpers.
//!
//! [`wait_for_element`] has no deadline of its own. Callers bound it with
//! [`until_async`] or `tokio::time::timeout`.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::host::Host;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError<E> {
    #[error("timed out after {timeout:?} waiting for condition to become true")]
    TimedOut { timeout: Duration },

    #[error("condition failed: {0}")]
    Predicate(E),
}

/// Poll `predicate` until it returns `true`.
///
/// A predicate error is returned immediately without retrying. Otherwise,
/// once more than `timeout` has elapsed since the first call, fails with
/// [`WaitError::TimedOut`]; if not, sleeps `interval` and tries again. The
/// failure therefore lands within one `interval` after the deadline.
pub async fn until_async<F, Fut, E>(
    mut predicate: F,
    interval: Duration,
    timeout: Duration,
) -> Result<(), WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let start = Instant::now();
    loop {
        if predicate().await.map_err(WaitError::Predicate)? {
            return Ok(());
        }

        if start.elapsed() > timeout {
            return Err(WaitError::TimedOut { timeout });
        }

        tokio::time::sleep(interval).await;
    }
}

/// Resolve with the element once an element with `id` exists.
///
/// Returns immediately if it is already present. Otherwise watches subtree
/// changes and resolves on the first change after which the element exists;
/// the watcher is dropped on return. Never fails. If the host stops
/// publishing changes the future stays pending forever.
pub async fn wait_for_element<H>(host: &H, id: &str) -> H::Element
where
    H: Host + ?Sized,
{
    let mut mutations = host.mutations();
    mutations.borrow_and_update();

    if let Some(element) = host.element_by_id(id) {
        return element;
    }

    loop {
        if mutations.changed().await.is_err() {
            tracing::debug!(id, "host stopped publishing changes, element never appears");
            std::future::pending::<()>().await;
        }

        if let Some(element) = host.element_by_id(id) {
            return element;
        }
    }
}
