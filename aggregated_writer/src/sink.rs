//! Wrapping without nesting.
//!
//! A function handed "some writer" may be given a raw sink or one that is
//! already aggregating. Wrapping the latter again would split the count and
//! the error across two layers, so [`aggregate`] takes a tagged [`Sink`] and
//! hands an existing [`AggregatedWriter`] back untouched.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use crate::writer::AggregatedWriter;

/// A sink to aggregate: either a raw writer or an existing aggregator.
#[derive(Debug)]
pub enum Sink<'a, W> {
    Raw(W),
    Aggregated(&'a mut AggregatedWriter<W>),
}

impl<'a, W> From<&'a mut AggregatedWriter<W>> for Sink<'a, W> {
    fn from(writer: &'a mut AggregatedWriter<W>) -> Self {
        Sink::Aggregated(writer)
    }
}

/// Result of [`aggregate`]: an aggregator that is either freshly created or
/// the caller's own.
///
/// Dereferences to [`AggregatedWriter`] and implements [`Write`], so it can be
/// used anywhere a sink is expected.
#[derive(Debug)]
pub enum Aggregator<'a, W> {
    Owned(AggregatedWriter<W>),
    Borrowed(&'a mut AggregatedWriter<W>),
}

/// Wraps a raw sink, or passes an existing aggregator through as-is.
///
/// ```
/// use aggregated_writer::{aggregate, AggregatedWriter, Sink};
///
/// let mut outer = AggregatedWriter::new(Vec::new());
/// let outer_ptr: *const _ = &outer;
///
/// let again = aggregate(Sink::from(&mut outer));
/// assert!(std::ptr::eq(&*again, outer_ptr));
/// ```
pub fn aggregate<W>(sink: Sink<'_, W>) -> Aggregator<'_, W> {
    match sink {
        Sink::Raw(inner) => Aggregator::Owned(AggregatedWriter::new(inner)),
        Sink::Aggregated(writer) => Aggregator::Borrowed(writer),
    }
}

impl<W> Aggregator<'_, W> {
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Aggregator::Borrowed(_))
    }

    /// Terminal outcome of the aggregator.
    ///
    /// A borrowed aggregator keeps its recorded error, so the caller gets a
    /// copy instead of the original (see [`StickyError`](crate::StickyError)).
    pub fn into_result(self) -> io::Result<u64> {
        match self {
            Aggregator::Owned(writer) => writer.into_result(),
            Aggregator::Borrowed(writer) => writer.to_result(),
        }
    }
}

impl<W> Deref for Aggregator<'_, W> {
    type Target = AggregatedWriter<W>;

    fn deref(&self) -> &Self::Target {
        match self {
            Aggregator::Owned(writer) => writer,
            Aggregator::Borrowed(writer) => &**writer,
        }
    }
}

impl<W> DerefMut for Aggregator<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Aggregator::Owned(writer) => writer,
            Aggregator::Borrowed(writer) => &mut **writer,
        }
    }
}

impl<W: Write> Write for Aggregator<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
