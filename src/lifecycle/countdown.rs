use std::time::Duration;

use tokio::sync::watch;

use crate::lifecycle::scope::{LifecycleScope, ScopeError};

/// Periodic countdown published through a watch channel.
///
/// Emits `ticks, ticks - 1, ..., 1`, one value per `interval`, starting
/// immediately, then stops on its own. With [`through_zero`](Self::through_zero)
/// a final `0` follows one interval later. Cancelling the owning scope stops
/// it early; no value is published after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub ticks: u32,
    pub interval: Duration,
    pub finish_on_zero: bool,
}

impl Countdown {
    pub fn new(ticks: u32, interval: Duration) -> Self {
        Self {
            ticks,
            interval,
            finish_on_zero: false,
        }
    }

    /// Also publish `0` when the count runs out.
    pub fn through_zero(mut self) -> Self {
        self.finish_on_zero = true;
        self
    }

    /// Start counting on `scope`. The receiver holds `0` until the first tick.
    pub fn launch(self, scope: &LifecycleScope) -> Result<watch::Receiver<u32>, ScopeError> {
        let (tx, rx) = watch::channel(0);
        let Countdown {
            ticks,
            interval,
            finish_on_zero,
        } = self;
        let last = if finish_on_zero { 0 } else { 1 };

        scope.launch("countdown", move |token| async move {
            for remaining in (last..=ticks).rev() {
                if token.is_cancelled() {
                    return;
                }
                tx.send_replace(remaining);
                if remaining > last {
                    tokio::time::sleep(interval).await;
                }
            }
            tracing::debug!(ticks, "Countdown finished");
        })?;

        Ok(rx)
    }
}
