//! Quiet-period gate for search-as-you-type.
//!
//! Every call to [`Debouncer::wait`] cancels the wait started before it, so only the
//! last input within the quiet period survives.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the quiet period. Returns `false` if a newer call or [`Debouncer::cancel`]
    /// superseded this one.
    pub async fn wait(&self) -> bool {
        let token = CancellationToken::new();
        if let Some(previous) = self.replace(Some(token.clone())) {
            previous.cancel();
        }

        tokio::select! {
            _ = token.cancelled() => {
                log::debug!("Debounced input superseded");
                false
            }
            _ = tokio::time::sleep(self.delay) => !token.is_cancelled(),
        }
    }

    /// Cancel any pending wait
    pub fn cancel(&self) {
        if let Some(previous) = self.replace(None) {
            previous.cancel();
        }
    }

    fn replace(&self, token: Option<CancellationToken>) -> Option<CancellationToken> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *pending, token)
    }
}
