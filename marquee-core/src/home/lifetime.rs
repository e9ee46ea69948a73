use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Ties async work to a mounted view.
///
/// Work run through [`ViewLifetime::run`] yields `None` once the view is
/// unmounted, so late results are dropped instead of applied.
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    token: CancellationToken,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<F>(&self, work: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.token.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = work => Some(output),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token that cancels this lifetime when triggered from elsewhere.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
