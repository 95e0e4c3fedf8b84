//! Channel-backed event sink for runtimes that drain events on their own
//! thread.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use sensor_core::SensorEvent;
use tracing::trace;

use crate::traits::EventSink;

/// Posts events into a crossbeam channel without ever blocking the
/// delivery thread. Events that do not fit are counted and lost.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<SensorEvent>,
    overflow: AtomicU64,
}

impl ChannelSink {
    /// Bounded queue holding at most `capacity` undrained events.
    pub fn bounded(capacity: usize) -> (Self, Receiver<SensorEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self::from_sender(tx), rx)
    }

    pub fn unbounded() -> (Self, Receiver<SensorEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::from_sender(tx), rx)
    }

    pub fn from_sender(tx: Sender<SensorEvent>) -> Self {
        Self {
            tx,
            overflow: AtomicU64::new(0),
        }
    }

    /// Events lost to a full or disconnected queue.
    pub fn overflow_count(&self) -> u64 {
        self.overflow.load(Ordering::Relaxed)
    }
}

impl EventSink for ChannelSink {
    fn post_event(&self, event: SensorEvent) {
        if let Err(e) = self.tx.try_send(event) {
            let total = self.overflow.fetch_add(1, Ordering::Relaxed) + 1;
            let reason = match e {
                TrySendError::Full(_) => "full",
                TrySendError::Disconnected(_) => "disconnected",
            };
            trace!(reason, total, "Sensor event queue rejected event");
        }
    }
}
