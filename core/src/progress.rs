//! Upload progress as an observable stream.
//!
//! The transport holds a [`ProgressSender`] and reports raw byte counts; the
//! orchestrator (or any UI) consumes the matching [`ProgressStream`] of
//! integer percentages. Values never decrease within one channel, and the
//! stream ends once the sender is closed or dropped.
//!
//! ```rust,ignore
//! let (sender, stream) = progress_channel();
//! sender.report(512, 1024);
//! sender.close();
//! assert_eq!(block_on(stream.collect::<Vec<_>>()), vec![50]);
//! ```

use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::stream::{FusedStream, Stream};

/// `floor(sent * 100 / total)`, clamped to 100.
///
/// Returns `None` when the total is unknown (zero).
pub fn percent(sent: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (u128::from(sent) * 100 / u128::from(total)).min(100);
    Some(pct as u8)
}

/// Create a connected sender/stream pair for one upload attempt.
pub fn progress_channel() -> (ProgressSender, ProgressStream) {
    let (tx, rx) = unbounded();
    let sender = ProgressSender {
        tx,
        high_water: Arc::new(AtomicU8::new(0)),
    };
    (sender, ProgressStream { rx })
}

/// Producer side, handed to the transport.
///
/// Clones share the same high-water mark, so the stream stays monotonic
/// whichever clone reports.
#[derive(Clone, Debug)]
pub struct ProgressSender {
    tx: UnboundedSender<u8>,
    high_water: Arc<AtomicU8>,
}

impl ProgressSender {
    /// Report bytes sent so far. Ignored when `total` is unknown.
    pub fn report(&self, sent: u64, total: u64) {
        if let Some(pct) = percent(sent, total) {
            self.report_percent(pct);
        }
    }

    /// Report a percentage directly; values above 100 are clamped.
    pub fn report_percent(&self, pct: u8) {
        let pct = pct.min(100);
        let value = self.high_water.fetch_max(pct, Ordering::Relaxed).max(pct);
        // A dropped stream only means nobody is watching.
        let _ = self.tx.unbounded_send(value);
    }

    /// Report the attempt as fully sent.
    pub fn complete(&self) {
        self.report_percent(100);
    }

    /// End the stream for every clone of this sender.
    pub fn close(&self) {
        self.tx.close_channel();
    }

    /// Highest percentage reported so far.
    pub fn current(&self) -> u8 {
        self.high_water.load(Ordering::Relaxed)
    }
}

/// Consumer side: a stream of non-decreasing percentages.
#[derive(Debug)]
pub struct ProgressStream {
    rx: UnboundedReceiver<u8>,
}

impl Stream for ProgressStream {
    type Item = u8;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<u8>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

impl FusedStream for ProgressStream {
    fn is_terminated(&self) -> bool {
        self.rx.is_terminated()
    }
}
