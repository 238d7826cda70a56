//! Bounded dispatch queue and its background consumer
//!
//! Producers push fully encoded records with `try_send`; a single named
//! thread drains them in FIFO order and writes them to the logger's current
//! sink. When the logger drops its sender the consumer keeps draining until
//! the queue is empty, then exits.

use super::logger::Shared;
use crossbeam_channel::Receiver;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Default number of records the queue can hold before dropping
pub const DEFAULT_QUEUE_CAPACITY: usize = 100_000;

/// Records written per read-lock acquisition before the sink is flushed
pub(crate) const BATCH_SIZE: usize = 64;

const CONSUMER_THREAD_NAME: &str = "logx-dispatch";

/// One serialized record. Immutable once built; keeps the allocation the
/// formatter rendered into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBuffer(Vec<u8>);

impl EncodedBuffer {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hand the allocation back for reuse
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for EncodedBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Lifecycle of the dispatch queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DispatchState {
    /// Accepting and draining records
    Open = 0,
    /// No longer accepting; draining what is queued
    Closing = 1,
    /// Drained; the consumer has exited
    Closed = 2,
}

/// Atomic cell holding a [`DispatchState`]
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(DispatchState::Open as u8))
    }

    pub(crate) fn load(&self) -> DispatchState {
        match self.0.load(Ordering::Acquire) {
            0 => DispatchState::Open,
            1 => DispatchState::Closing,
            _ => DispatchState::Closed,
        }
    }

    pub(crate) fn store(&self, state: DispatchState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Start the consumer thread.
///
/// Returns `None` if the thread could not be spawned; the receiver is then
/// dropped, the channel disconnects and every record is counted as dropped.
pub(crate) fn spawn_consumer(
    receiver: Receiver<EncodedBuffer>,
    shared: Arc<Shared>,
) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name(CONSUMER_THREAD_NAME.to_string())
        .spawn(move || drain(&receiver, &shared));

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!(
                "[LOGGER CRITICAL] Failed to spawn dispatch thread: {}. Records will be dropped.",
                e
            );
            None
        }
    }
}

/// Consumer loop: block for one record, grab whatever else is ready, write
/// the batch. Returns once the channel is empty and disconnected.
fn drain(receiver: &Receiver<EncodedBuffer>, shared: &Shared) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    while let Ok(first) = receiver.recv() {
        batch.push(first);
        while batch.len() < BATCH_SIZE {
            match receiver.try_recv() {
                Ok(record) => batch.push(record),
                Err(_) => break,
            }
        }

        write_batch(shared, &batch);
        for record in batch.drain(..) {
            shared.buffers.recycle(record.into_inner());
        }
    }
}

/// Write a batch to the current sink under the shared side of the
/// reconfiguration lock, isolating sink panics per record.
///
/// The shared lock is held for the whole batch, so a pending `set_output` or
/// `set_formatter` (and, behind it, new producer reads) waits for up to
/// `BATCH_SIZE` writes to a slow sink.
fn write_batch(shared: &Shared, batch: &[EncodedBuffer]) {
    let inner = shared.inner.read();
    let mut sink = inner.sink.lock();

    for record in batch {
        let result = panic::catch_unwind(AssertUnwindSafe(|| sink.write_all(record.as_bytes())));

        match result {
            Ok(Ok(())) => {
                shared.metrics.record_written();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink write failed: {}", e);
                shared.metrics.record_write_failure();
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Sink panicked during write: {}. Draining continues.",
                    panic_message(panic_info.as_ref())
                );
                shared.metrics.record_write_failure();
            }
        }
    }

    match panic::catch_unwind(AssertUnwindSafe(|| sink.flush())) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => eprintln!("[LOGGER ERROR] Sink flush failed: {}", e),
        Err(panic_info) => eprintln!(
            "[LOGGER CRITICAL] Sink panicked during flush: {}",
            panic_message(panic_info.as_ref())
        ),
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cell_transitions() {
        let cell = StateCell::new();
        assert_eq!(cell.load(), DispatchState::Open);
        cell.store(DispatchState::Closing);
        assert_eq!(cell.load(), DispatchState::Closing);
        cell.store(DispatchState::Closed);
        assert_eq!(cell.load(), DispatchState::Closed);
    }

    #[test]
    fn test_encoded_buffer() {
        let buffer = EncodedBuffer::from(b"line\n".to_vec());
        assert_eq!(buffer.as_bytes(), b"line\n");
        assert_eq!(buffer.len(), 5);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.into_inner(), b"line\n".to_vec());
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "Unknown panic");
    }
}
