//! Main logger implementation
//!
//! A log call runs entirely on the caller's thread up to the queue:
//! level gate, pooled message, encode, non-blocking enqueue. The dispatch
//! thread does the actual sink write. The sink, the formatter and the queue's
//! input side live behind one `RwLock`: log calls and the consumer take the
//! shared side, `set_output`, `set_formatter` and `close` take the exclusive
//! side.

use super::{
    dispatch::{self, DispatchState, EncodedBuffer, StateCell, DEFAULT_QUEUE_CAPACITY},
    error::Result,
    field_value::FieldValue,
    fields::FieldBuilder,
    formatter::Formatter,
    log_level::{Level, LEVEL_ERROR},
    message::{Message, MESSAGE_POOL_SIZE},
    metrics::LoggerMetrics,
    pool::Pool,
};
use crate::formatters::JsonFormatter;
use crate::sinks::ConsoleSink;
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Longest time a fatal record waits for room in a full queue (5 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Initial capacity reserved for one encoded record
const ENCODE_CAPACITY_HINT: usize = 256;

/// Idle encode buffers kept for reuse between producers and the consumer
const BUFFER_POOL_SIZE: usize = 1024;

pub(crate) type BoxedSink = Box<dyn Write + Send>;

/// State guarded by the reconfiguration lock
pub(crate) struct Inner {
    /// Only the consumer (and `flush`) lock this; producers never touch it
    pub(crate) sink: Mutex<BoxedSink>,
    pub(crate) formatter: Box<dyn Formatter>,
    sender: Option<Sender<EncodedBuffer>>,
    closed: bool,
}

/// State shared between the logger and its dispatch thread
pub(crate) struct Shared {
    pub(crate) inner: RwLock<Inner>,
    pub(crate) metrics: LoggerMetrics,
    /// Producers take encode buffers here; the consumer returns them once written
    pub(crate) buffers: Pool<Vec<u8>>,
}

pub struct Logger {
    level: AtomicU32,
    shared: Arc<Shared>,
    messages: Pool<Message>,
    consumer: Mutex<Option<JoinHandle<()>>>,
    state: StateCell,
    capacity: usize,
}

impl Logger {
    /// Logger writing JSON lines to stdout at the `ERR` threshold
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Same as [`Logger::new`] with a custom queue capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(
            LEVEL_ERROR,
            capacity,
            Box::new(ConsoleSink::Stdout),
            Box::new(JsonFormatter::new()),
        )
    }

    pub(crate) fn from_parts(
        level: u32,
        capacity: usize,
        sink: BoxedSink,
        formatter: Box<dyn Formatter>,
    ) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);

        let shared = Arc::new(Shared {
            inner: RwLock::new(Inner {
                sink: Mutex::new(sink),
                formatter,
                sender: Some(sender),
                closed: false,
            }),
            metrics: LoggerMetrics::new(),
            buffers: Pool::new(BUFFER_POOL_SIZE),
        });
        let consumer = dispatch::spawn_consumer(receiver, Arc::clone(&shared));

        Self {
            level: AtomicU32::new(level),
            shared,
            messages: Pool::new(MESSAGE_POOL_SIZE),
            consumer: Mutex::new(consumer),
            state: StateCell::new(),
            capacity,
        }
    }

    /// Replace the sink. Records still queued are written to the new sink;
    /// the previous one is flushed and dropped.
    pub fn set_output<W: Write + Send + 'static>(&self, sink: W) {
        let mut previous = {
            let mut inner = self.shared.inner.write();
            std::mem::replace(inner.sink.get_mut(), Box::new(sink))
        };

        if let Err(e) = previous.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush replaced sink: {}", e);
        }
    }

    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        let mut inner = self.shared.inner.write();
        inner.formatter = Box::new(formatter);
    }

    /// Set the verbosity ceiling; accepts a [`Level`] or a raw ordinal
    pub fn set_level(&self, level: impl Into<u32>) {
        self.level.store(level.into(), Ordering::Relaxed);
    }

    pub fn get_level(&self) -> u32 {
        self.level.load(Ordering::Relaxed)
    }

    /// Whether a call at `level` would currently be emitted
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level.passes(self.get_level())
    }

    /// Emit a record at `level` with alternating key/value `context`.
    ///
    /// Never blocks on the queue: when it is full the record is dropped and
    /// counted in [`LoggerMetrics::dropped_count`]. `Level::Fatal` goes
    /// through the same path here; use [`Logger::fatal`] to drain and exit.
    pub fn log(&self, level: Level, message: &str, context: &[FieldValue]) {
        if !self.enabled(level) {
            return;
        }

        let inner = self.shared.inner.read();
        let Some(sender) = inner.sender.as_ref() else {
            self.shared.metrics.record_dropped();
            return;
        };
        let Some(record) = self.encode(&inner, level, message, context) else {
            return;
        };

        match sender.try_send(record) {
            Ok(()) => {
                self.shared.metrics.record_enqueued();
            }
            Err(TrySendError::Full(record)) | Err(TrySendError::Disconnected(record)) => {
                self.shared.metrics.record_dropped();
                self.shared.buffers.recycle(record.into_inner());
            }
        }
    }

    /// Populate a pooled message, encode it into a pooled byte buffer, and
    /// return the message to the pool before the bytes go anywhere.
    fn encode(
        &self,
        inner: &Inner,
        level: Level,
        message: &str,
        context: &[FieldValue],
    ) -> Option<EncodedBuffer> {
        let mut record = self.messages.acquire();
        record.populate(level, message, context);

        // This buffer is the one the queue carries
        let mut bytes = self.shared.buffers.take();
        bytes.reserve(ENCODE_CAPACITY_HINT);
        let result = inner.formatter.encode(&mut bytes, &record);
        record.release();

        match result {
            Ok(()) => Some(EncodedBuffer::from(bytes)),
            Err(e) => {
                eprintln!("[LOGGER ERROR] Dropping record that failed to encode: {}", e);
                self.shared.metrics.record_encode_failure();
                self.shared.buffers.recycle(bytes);
                None
            }
        }
    }

    #[inline]
    pub fn error(&self, message: &str, context: &[FieldValue]) {
        self.log(Level::Error, message, context);
    }

    #[inline]
    pub fn warn(&self, message: &str, context: &[FieldValue]) {
        self.log(Level::Warn, message, context);
    }

    #[inline]
    pub fn info(&self, message: &str, context: &[FieldValue]) {
        self.log(Level::Info, message, context);
    }

    #[inline]
    pub fn debug(&self, message: &str, context: &[FieldValue]) {
        self.log(Level::Debug, message, context);
    }

    /// Emit a record regardless of level, drain the queue, and exit the
    /// process with status 1.
    pub fn fatal(&self, message: &str, context: &[FieldValue]) -> ! {
        self.fatal_and_close(message, context);
        std::process::exit(1)
    }

    /// Everything `fatal` does short of exiting.
    ///
    /// The record waits up to [`DEFAULT_SHUTDOWN_TIMEOUT`] for queue space
    /// instead of being dropped. On an already closed logger it is written
    /// straight to the sink.
    pub(crate) fn fatal_and_close(&self, message: &str, context: &[FieldValue]) {
        let pending = {
            let inner = self.shared.inner.read();
            match inner.sender.clone() {
                Some(sender) => self
                    .encode(&inner, Level::Fatal, message, context)
                    .map(|record| (sender, record)),
                None => {
                    if let Some(record) = self.encode(&inner, Level::Fatal, message, context) {
                        self.write_direct(&inner, &record);
                    }
                    None
                }
            }
        };

        // The cloned sender must be gone before close() waits on the consumer
        if let Some((sender, record)) = pending {
            match sender.send_timeout(record, DEFAULT_SHUTDOWN_TIMEOUT) {
                Ok(()) => {
                    self.shared.metrics.record_enqueued();
                }
                Err(e) => {
                    eprintln!("[LOGGER ERROR] Fatal record could not be queued: {}", e);
                    self.shared.metrics.record_dropped();
                }
            }
        }

        self.close();
    }

    fn write_direct(&self, inner: &Inner, record: &EncodedBuffer) {
        let mut sink = inner.sink.lock();
        match sink.write_all(record.as_bytes()).and_then(|()| sink.flush()) {
            Ok(()) => {
                self.shared.metrics.record_written();
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Sink write failed: {}", e);
                self.shared.metrics.record_write_failure();
            }
        }
    }

    /// Attach one key/value pair to the next record
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logx::{Logger, LEVEL_INFO};
    ///
    /// let logger = Logger::new();
    /// logger.set_level(LEVEL_INFO);
    /// logger.with_field("ip", "0.0.0.0").info("connected");
    /// logger.close();
    /// ```
    pub fn with_field(&self, key: impl Into<FieldValue>, value: impl Into<FieldValue>) -> FieldBuilder<'_> {
        FieldBuilder::new(self).with_field(key, value)
    }

    /// Attach several key/value pairs to the next record
    pub fn with_fields<K, V, I>(&self, fields: I) -> FieldBuilder<'_>
    where
        K: Into<FieldValue>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        FieldBuilder::new(self).with_fields(fields)
    }

    /// Attach an error (or `null` for `None`) under `key` to the next record
    pub fn with_error<E: std::error::Error + ?Sized>(
        &self,
        key: impl Into<FieldValue>,
        err: Option<&E>,
    ) -> FieldBuilder<'_> {
        FieldBuilder::new(self).with_error(key, err)
    }

    /// Stop accepting records, drain everything already queued, and wait for
    /// the dispatch thread to exit. Safe to call more than once; later calls
    /// return once the first has finished draining.
    pub fn close(&self) {
        {
            let mut inner = self.shared.inner.write();
            if !inner.closed {
                inner.closed = true;
                inner.sender = None;
                self.state.store(DispatchState::Closing);
            }
        }

        // Held across the join so concurrent callers also wait for the drain
        let mut consumer = self.consumer.lock();
        if let Some(handle) = consumer.take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Dispatch thread panicked during close: {:?}", e);
            }
        }

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during close: {}", e);
        }
        self.state.store(DispatchState::Closed);
    }

    /// Flush the current sink. Records still in the queue are not waited for.
    pub fn flush(&self) -> Result<()> {
        let inner = self.shared.inner.read();
        let mut sink = inner.sink.lock();
        sink.flush()?;
        Ok(())
    }

    pub fn state(&self) -> DispatchState {
        self.state.load()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.inner.read().closed
    }

    /// Number of records waiting for the dispatch thread
    pub fn queued(&self) -> usize {
        self.shared
            .inner
            .read()
            .sender
            .as_ref()
            .map_or(0, Sender::len)
    }

    /// Fixed capacity of the dispatch queue
    pub fn queue_capacity(&self) -> usize {
        self.capacity
    }

    /// Counters for enqueued, dropped and written records
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logx::Logger;
    ///
    /// let logger = Logger::new();
    /// logger.error("disk full", &[]);
    /// logger.close();
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.enqueued_count() + metrics.dropped_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.get_level())
            .field("state", &self.state())
            .field("capacity", &self.capacity)
            .field("metrics", self.metrics())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logx::prelude::*;
///
/// let sink = SharedBuffer::new();
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .queue_capacity(1000)
///     .output(sink.clone())
///     .formatter(DelimitedFormatter::new())
///     .build();
///
/// logger.debug("ready", &["port".into(), 8080.into()]);
/// logger.close();
/// assert!(sink.to_string_lossy().contains("port=\"8080\""));
/// ```
pub struct LoggerBuilder {
    level: u32,
    capacity: usize,
    sink: Option<BoxedSink>,
    formatter: Option<Box<dyn Formatter>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LEVEL_ERROR,
            capacity: DEFAULT_QUEUE_CAPACITY,
            sink: None,
            formatter: None,
        }
    }

    /// Set the verbosity ceiling
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<u32>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the dispatch queue capacity (minimum 1)
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the sink; stdout when not called
    #[must_use = "builder methods return a new value"]
    pub fn output<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Set the formatter; JSON when not called
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Build the Logger and start its dispatch thread
    pub fn build(self) -> Logger {
        Logger::from_parts(
            self.level,
            self.capacity,
            self.sink.unwrap_or_else(|| Box::new(ConsoleSink::Stdout)),
            self.formatter
                .unwrap_or_else(|| Box::new(JsonFormatter::new())),
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LEVEL_DEBUG, LEVEL_INFO};
    use crate::formatters::DelimitedFormatter;
    use crate::sinks::SharedBuffer;
    use std::io;

    fn capture(level: u32) -> (Logger, SharedBuffer) {
        let sink = SharedBuffer::new();
        let logger = Logger::builder().level(level).output(sink.clone()).build();
        (logger, sink)
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build();
        assert_eq!(logger.get_level(), LEVEL_ERROR);
        assert_eq!(logger.queue_capacity(), DEFAULT_QUEUE_CAPACITY);
        assert_eq!(logger.state(), DispatchState::Open);
        assert!(!logger.is_closed());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let logger = Logger::builder().queue_capacity(0).build();
        assert_eq!(logger.queue_capacity(), 1);
    }

    #[test]
    fn test_gate_discards_before_queue() {
        let (logger, sink) = capture(LEVEL_ERROR);

        logger.debug("hidden", &[]);
        logger.info("hidden", &[]);
        logger.warn("hidden", &[]);
        logger.error("shown", &[]);
        logger.close();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(r#""lvl":"ERR","msg":"shown""#));
        assert_eq!(logger.metrics().enqueued_count(), 1);
        assert_eq!(logger.metrics().dropped_count(), 0);
    }

    #[test]
    fn test_set_level_raw_and_typed() {
        let logger = Logger::builder().build();
        logger.set_level(Level::Debug);
        assert_eq!(logger.get_level(), LEVEL_DEBUG);
        assert!(logger.enabled(Level::Debug));

        logger.set_level(0u32);
        assert!(!logger.enabled(Level::Error));
        assert!(logger.enabled(Level::Fatal));
    }

    #[test]
    fn test_close_drains_in_order() {
        let (logger, sink) = capture(LEVEL_INFO);

        for i in 0..500 {
            logger.info(&format!("message {}", i), &[]);
        }
        logger.close();

        let lines = sink.lines();
        assert_eq!(lines.len(), 500);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.contains(&format!(r#""msg":"message {}""#, i)), "{}", line);
        }
        assert_eq!(logger.state(), DispatchState::Closed);
        assert_eq!(logger.metrics().written_count(), 500);
    }

    #[test]
    fn test_close_is_idempotent_and_rejects_later_calls() {
        let (logger, sink) = capture(LEVEL_INFO);
        logger.info("before", &[]);
        logger.close();
        logger.close();

        logger.info("after", &[]);
        assert!(logger.is_closed());
        assert_eq!(logger.metrics().dropped_count(), 1);
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_set_formatter_switches_encoding() {
        let (logger, sink) = capture(LEVEL_INFO);
        logger.info("as json", &[]);
        logger.set_formatter(DelimitedFormatter::new());
        logger.info("as text", &["k".into(), "v".into()]);
        logger.close();

        let lines = sink.lines();
        assert!(lines[0].starts_with('{'));
        assert!(lines[1].contains("lvl=INF\tmsg=\"as text\"\tk=\"v\""));
    }

    #[test]
    fn test_set_output_redirects_following_writes() {
        let (logger, first) = capture(LEVEL_INFO);
        logger.info("one", &[]);
        while logger.metrics().written_count() < 1 {
            std::thread::yield_now();
        }

        let second = SharedBuffer::new();
        logger.set_output(second.clone());
        logger.info("two", &[]);
        logger.close();

        assert!(first.to_string_lossy().contains("\"one\""));
        assert!(!first.to_string_lossy().contains("\"two\""));
        assert!(second.to_string_lossy().contains("\"two\""));
    }

    #[test]
    fn test_encode_failure_is_dropped_not_propagated() {
        let (logger, sink) = capture(LEVEL_INFO);
        logger.info("bad", &["x".into(), f64::NAN.into()]);
        logger.info("good", &[]);
        logger.close();

        assert_eq!(logger.metrics().encode_failures(), 1);
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"good\""));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "simulated failure"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors_do_not_stop_consumer() {
        let logger = Logger::builder()
            .level(LEVEL_INFO)
            .output(FailingSink)
            .build();

        for _ in 0..5 {
            logger.info("lost", &[]);
        }
        logger.close();

        assert_eq!(logger.metrics().write_failures(), 5);
        assert_eq!(logger.state(), DispatchState::Closed);
    }

    struct PanickingSink;

    impl Write for PanickingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_panic_is_isolated() {
        let logger = Logger::builder()
            .level(LEVEL_INFO)
            .output(PanickingSink)
            .build();

        logger.info("first", &[]);
        logger.info("second", &[]);
        logger.close();

        assert_eq!(logger.metrics().write_failures(), 2);
    }

    /// Only implements `encode`, writing in several pieces
    struct PlainFormatter;

    impl Formatter for PlainFormatter {
        fn encode(&self, out: &mut dyn Write, message: &Message) -> Result<()> {
            write!(out, "{} ", message.level())?;
            out.write_all(message.text().as_bytes())?;
            out.write_all(b"\n")?;
            Ok(())
        }
    }

    #[test]
    fn test_encode_buffers_are_recycled() {
        let (logger, sink) = capture(LEVEL_INFO);
        logger.set_formatter(PlainFormatter);

        logger.info(&"x".repeat(1000), &[]);
        while logger.shared.buffers.idle() < 1 {
            std::thread::yield_now();
        }

        // Reuses the buffer above; nothing of the longer record may leak through
        logger.info("short", &[]);
        logger.close();

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "INF short");
        assert_eq!(logger.shared.buffers.idle(), 1);
    }

    #[test]
    fn test_failed_encode_returns_its_buffer() {
        let (logger, _sink) = capture(LEVEL_INFO);
        logger.info("bad", &["x".into(), f64::NAN.into()]);

        assert_eq!(logger.metrics().encode_failures(), 1);
        assert_eq!(logger.shared.buffers.idle(), 1);
        logger.close();
    }

    /// Blocks inside `write` until released, reporting when it got there
    struct StalledSink {
        entered: Arc<std::sync::atomic::AtomicBool>,
        release: Arc<std::sync::atomic::AtomicBool>,
    }

    impl Write for StalledSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.entered.store(true, Ordering::Release);
            while !self.release.load(Ordering::Acquire) {
                std::thread::sleep(Duration::from_millis(1));
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_queued_counts_pending_records() {
        use std::sync::atomic::AtomicBool;

        let entered = Arc::new(AtomicBool::new(false));
        let release = Arc::new(AtomicBool::new(false));
        let logger = Logger::builder()
            .level(LEVEL_INFO)
            .output(StalledSink {
                entered: Arc::clone(&entered),
                release: Arc::clone(&release),
            })
            .build();
        assert_eq!(logger.queued(), 0);

        logger.info("taken by the consumer", &[]);
        while !entered.load(Ordering::Acquire) {
            std::thread::yield_now();
        }
        for _ in 0..3 {
            logger.info("waiting", &[]);
        }
        assert_eq!(logger.queued(), 3);

        release.store(true, Ordering::Release);
        logger.close();
        assert_eq!(logger.queued(), 0);
        assert_eq!(logger.metrics().written_count(), 4);
    }

    #[test]
    fn test_fatal_bypasses_gate_and_closes() {
        let (logger, sink) = capture(0);
        logger.error("filtered", &[]);
        logger.fatal_and_close("going down", &["code".into(), 3.into()]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(r#""lvl":"FAT","msg":"going down","ctx":{"code":3}"#));
        assert_eq!(logger.state(), DispatchState::Closed);
    }

    #[test]
    fn test_fatal_survives_full_queue() {
        let sink = SharedBuffer::new();
        let logger = Logger::builder()
            .level(LEVEL_INFO)
            .queue_capacity(1)
            .output(sink.clone())
            .build();

        for _ in 0..100 {
            logger.info("flood", &[]);
        }
        logger.fatal_and_close("last words", &[]);

        assert!(sink.to_string_lossy().contains("\"last words\""));
    }

    #[test]
    fn test_fatal_after_close_writes_directly() {
        let (logger, sink) = capture(LEVEL_INFO);
        logger.close();
        logger.fatal_and_close("late", &[]);

        assert!(sink.to_string_lossy().contains(r#""lvl":"FAT","msg":"late""#));
    }

    #[test]
    fn test_field_builder() {
        let (logger, sink) = capture(LEVEL_INFO);
        let err = io::Error::new(io::ErrorKind::Other, "er1");

        logger.with_field("ip", "0.0.0.0").info("context4");
        logger.with_fields([("a", 1), ("b", 2)]).warn("context5");
        logger.with_error("err", Some(&err)).info("context8");
        logger.with_error::<io::Error>("err", None).info("context7");
        logger.close();

        let out = sink.to_string_lossy();
        assert!(out.contains(r#""msg":"context4","ctx":{"ip":"0.0.0.0"}"#));
        assert!(out.contains(r#""msg":"context5","ctx":{"a":1,"b":2}"#));
        assert!(out.contains(r#""msg":"context8","ctx":{"err":"er1"}"#));
        assert!(out.contains(r#""msg":"context7","ctx":{"err":null}"#));
    }
}
