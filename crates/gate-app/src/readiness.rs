//! Display readiness barrier.
//!
//! 用于协调启动遮罩移除的就绪门闩。
//!
//! Fonts, theme and bootstrap completion each report in independently; the
//! splash veil may be removed exactly once, when the last of them arrives.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use gate_core::ReadinessSource;
use tokio::sync::watch;
use tracing::{debug, info};

pub struct DisplayReadiness {
    reached: AtomicU8,
    finished: AtomicBool,
    ready: watch::Sender<bool>,
}

impl DisplayReadiness {
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            reached: AtomicU8::new(0),
            finished: AtomicBool::new(false),
            ready,
        }
    }

    /// Record that `source` is ready.
    ///
    /// Returns `true` only for the call that completes the barrier.
    pub fn mark_ready(&self, source: ReadinessSource) -> bool {
        let reached = self.reached.fetch_or(source.bit(), Ordering::SeqCst) | source.bit();
        if reached != ReadinessSource::ALL_BITS {
            debug!(?source, pending = ?self.pending(), "display readiness source reached");
            return false;
        }

        if self
            .finished
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        self.ready.send_replace(true);
        info!(last = ?source, "display ready, splash veil can be removed");
        true
    }

    pub fn is_ready(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn is_reached(&self, source: ReadinessSource) -> bool {
        self.reached.load(Ordering::SeqCst) & source.bit() != 0
    }

    pub fn pending(&self) -> Vec<ReadinessSource> {
        ReadinessSource::ALL
            .into_iter()
            .filter(|source| !self.is_reached(*source))
            .collect()
    }

    /// Resolve once every source has reported in.
    pub async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for DisplayReadiness {
    fn default() -> Self {
        Self::new()
    }
}
