use std::mem;
use std::num::NonZeroUsize;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::Stream;
use pin_project_lite::pin_project;

use crate::domain::Record;

/// Maximum records per batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    pub const DEFAULT: BatchSize = BatchSize(NonZeroUsize::new(20).unwrap());

    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// Round a possibly fractional size to the nearest integer
    pub fn from_f64(size: f64) -> Option<Self> {
        let rounded = size.round();
        if !rounded.is_finite() || rounded < 1.0 || rounded > usize::MAX as f64 {
            return None;
        }
        Self::new(rounded as usize)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Non-empty, ordered group of records flushed to storage together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    records: Vec<Record>,
}

impl Batch {
    /// `None` for an empty vector
    pub fn new(records: Vec<Record>) -> Option<Self> {
        (!records.is_empty()).then_some(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Buffers records and hands out full batches
///
/// A flushed buffer is moved out whole and replaced with a fresh one, so an
/// emitted batch never shares storage with the next accumulation cycle.
#[derive(Debug)]
pub struct BatchAccumulator {
    buffer: Vec<Record>,
    batch_size: BatchSize,
}

impl BatchAccumulator {
    pub fn new(batch_size: BatchSize) -> Self {
        Self {
            buffer: Vec::with_capacity(batch_size.get()),
            batch_size,
        }
    }

    /// Append a record, returning a batch once the buffer is full
    pub fn push(&mut self, record: Record) -> Option<Batch> {
        self.buffer.push(record);
        if self.buffer.len() >= self.batch_size.get() {
            let full = mem::replace(&mut self.buffer, Vec::with_capacity(self.batch_size.get()));
            return Batch::new(full);
        }
        None
    }

    /// Remaining records as a final batch; nothing if the buffer is empty
    pub fn finish(self) -> Option<Batch> {
        Batch::new(self.buffer)
    }

    /// Records waiting for the next flush
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

pin_project! {
    /// Groups a fallible record stream into batches
    ///
    /// Pulls from the inner stream only while its consumer is polling. The
    /// first error is passed through and ends the stream; buffered records
    /// behind it are dropped.
    pub struct BatchStream<S> {
        #[pin]
        inner: S,
        accumulator: Option<BatchAccumulator>,
    }
}

impl<S> BatchStream<S> {
    pub fn new(inner: S, batch_size: BatchSize) -> Self {
        Self {
            inner,
            accumulator: Some(BatchAccumulator::new(batch_size)),
        }
    }
}

impl<S, E> Stream for BatchStream<S>
where
    S: Stream<Item = Result<Record, E>>,
{
    type Item = Result<Batch, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            let Some(accumulator) = this.accumulator.as_mut() else {
                return Poll::Ready(None);
            };

            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(record)) => {
                    if let Some(batch) = accumulator.push(record) {
                        return Poll::Ready(Some(Ok(batch)));
                    }
                }
                Some(Err(e)) => {
                    *this.accumulator = None;
                    return Poll::Ready(Some(Err(e)));
                }
                None => {
                    let last = this.accumulator.take().and_then(BatchAccumulator::finish);
                    return Poll::Ready(last.map(Ok));
                }
            }
        }
    }
}
