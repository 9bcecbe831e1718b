use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTick {
    pub sequence: u64,
    pub at: Instant,
}

/// Owns the background ticker thread. Dropping the handle stops it.
pub struct PollerHandle {
    cancel: Option<Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
    skipped: Arc<AtomicU64>,
}

impl PollerHandle {
    /// Stops the ticker and waits for its thread to exit.
    pub fn cancel(&mut self) {
        // Disconnecting the cancel channel wakes the ticker immediately.
        self.cancel.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }

    /// Ticks dropped because the consumer had not taken the previous one.
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Starts a ticker that emits a [`PollTick`] every `interval` until the
/// returned handle is cancelled or dropped.
///
/// The tick channel holds a single tick. While the consumer is busy (for
/// example, waiting on a slow fetch) further ticks are discarded, so fetches
/// never pile up or overlap.
pub fn spawn(interval: Duration) -> (Receiver<PollTick>, PollerHandle) {
    let (tick_tx, tick_rx) = crossbeam_channel::bounded::<PollTick>(1);
    let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(0);
    let skipped = Arc::new(AtomicU64::new(0));
    let skipped_clone = skipped.clone();

    let thread = thread::spawn(move || {
        let mut sequence = 0u64;
        loop {
            match cancel_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
            sequence += 1;
            let tick = PollTick {
                sequence,
                at: Instant::now(),
            };
            match tick_tx.try_send(tick) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    skipped_clone.fetch_add(1, Ordering::Relaxed);
                    log::debug!("Poll tick {sequence} skipped, previous tick still pending");
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
        log::debug!("Poller stopped after {sequence} ticks");
    });

    (
        tick_rx,
        PollerHandle {
            cancel: Some(cancel_tx),
            thread: Some(thread),
            skipped,
        },
    )
}
