//! Error-aggregating writer.
//!
//! [`AggregatedWriter`] wraps any [`Write`] and lets a caller issue a whole
//! sequence of writes without checking each result. The first failure is
//! remembered and every later call becomes a no-op, so a single check at the
//! end yields both the byte count and the error, if any.

use std::fmt;
use std::io::{self, ErrorKind, Write};
use thiserror::Error;

/// Payload of the errors an [`AggregatedWriter`] hands out for a recorded
/// failure that carried a custom payload.
///
/// `io::Error` is not `Clone`, so the writer keeps the original and returns
/// copies. OS errors are copied by their raw code and bare kinds by kind, so
/// both compare equal to the original. A custom payload cannot be copied; it
/// is replaced by a `StickyError` with the same [`ErrorKind`] and message,
/// which can be told apart from a fresh sink error by downcasting:
///
/// ```
/// use std::io::{self, Write};
/// use aggregated_writer::{AggregatedWriter, ScriptedSink, Step, StickyError};
///
/// let sink = ScriptedSink::new([Step::Fail(io::ErrorKind::BrokenPipe)]);
/// let mut w = AggregatedWriter::new(sink);
/// let err = w.write(b"data").unwrap_err();
///
/// let sticky = err.get_ref().and_then(|e| e.downcast_ref::<StickyError>());
/// assert_eq!(sticky.map(StickyError::kind), Some(io::ErrorKind::BrokenPipe));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StickyError {
    kind: ErrorKind,
    message: String,
}

impl StickyError {
    fn replay(err: &io::Error) -> io::Error {
        if let Some(code) = err.raw_os_error() {
            return io::Error::from_raw_os_error(code);
        }
        if err.get_ref().is_none() {
            return io::Error::from(err.kind());
        }
        let sticky = StickyError {
            kind: err.kind(),
            message: err.to_string(),
        };
        io::Error::new(sticky.kind, sticky)
    }

    /// Kind of the recorded failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Display message of the recorded failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug)]
enum State {
    Clean,
    Faulted(io::Error),
}

/// A writer that forwards to `W` until the first failure, then goes inert.
///
/// Per-call return values are those of the underlying sink for that call; the
/// running total is only exposed through [`written`](Self::written) and
/// [`result`](Self::result).
///
/// `ErrorKind::Interrupted` is relayed but never recorded, since the `Write`
/// contract makes it retryable.
#[derive(Debug)]
pub struct AggregatedWriter<W> {
    inner: W,
    written: u64,
    state: State,
}

impl<W> AggregatedWriter<W> {
    /// Wraps `inner` with a zero count and no recorded error.
    ///
    /// This always creates a new wrapper. Use [`aggregate`](crate::aggregate)
    /// when the sink may already be an `AggregatedWriter`.
    pub fn new(inner: W) -> Self {
        AggregatedWriter {
            inner,
            written: 0,
            state: State::Clean,
        }
    }

    /// Total bytes the underlying sink accepted.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// The first recorded error.
    pub fn error(&self) -> Option<&io::Error> {
        match &self.state {
            State::Clean => None,
            State::Faulted(err) => Some(err),
        }
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self.state, State::Faulted(_))
    }

    /// Byte count and first error, in one call.
    ///
    /// After a failure the count still reflects everything accepted up to and
    /// including the failing call.
    pub fn result(&self) -> (u64, Option<&io::Error>) {
        (self.written, self.error())
    }

    /// Like [`result`](Self::result) but as an `io::Result`, for use with `?`.
    ///
    /// The error is a copy (see [`StickyError`]); the original stays recorded.
    pub fn to_result(&self) -> io::Result<u64> {
        match &self.state {
            State::Clean => Ok(self.written),
            State::Faulted(err) => Err(StickyError::replay(err)),
        }
    }

    /// Consumes the writer, returning the count or the original first error.
    pub fn into_result(self) -> io::Result<u64> {
        match self.state {
            State::Clean => Ok(self.written),
            State::Faulted(err) => Err(err),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwraps the sink, discarding the count and any recorded error.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn check(&self) -> io::Result<()> {
        match &self.state {
            State::Clean => Ok(()),
            State::Faulted(err) => Err(StickyError::replay(err)),
        }
    }

    fn record(&mut self, err: io::Error) -> io::Error {
        let copy = StickyError::replay(&err);
        self.state = State::Faulted(err);
        copy
    }
}

impl<W: Write> AggregatedWriter<W> {
    /// Writes the whole of `buf`, ignoring the outcome.
    ///
    /// Short writes are continued and `Interrupted` is retried. A sink that
    /// accepts nothing from a non-empty buffer is recorded as a `WriteZero`
    /// failure.
    pub fn emit(&mut self, mut buf: &[u8]) -> &mut Self {
        while !buf.is_empty() && !self.is_faulted() {
            match self.write(buf) {
                Ok(0) => {
                    self.record(io::Error::new(
                        ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    ));
                }
                Ok(n) => buf = &buf[n..],
                // Interrupted is retried, anything else is now recorded.
                Err(_) => {}
            }
        }
        self
    }

    /// Formatted counterpart of [`emit`](Self::emit).
    ///
    /// ```
    /// use aggregated_writer::AggregatedWriter;
    ///
    /// let mut w = AggregatedWriter::new(Vec::new());
    /// w.emit(b"[").emit_fmt(format_args!("\"{}\"", "foo")).emit(b"]");
    /// assert_eq!(w.result().0, 7);
    /// assert_eq!(w.into_inner(), b"[\"foo\"]");
    /// ```
    pub fn emit_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        struct Adapter<'a, W>(&'a mut AggregatedWriter<W>);

        impl<W: Write> fmt::Write for Adapter<'_, W> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                if self.0.emit(s.as_bytes()).is_faulted() {
                    Err(fmt::Error)
                } else {
                    Ok(())
                }
            }
        }

        let _ = fmt::write(&mut Adapter(&mut *self), args);
        self
    }
}

impl<W: Write> Write for AggregatedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check()?;
        match self.inner.write(buf) {
            Ok(n) => {
                self.written += n as u64;
                Ok(n)
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => Err(err),
            Err(err) => Err(self.record(err)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check()?;
        match self.inner.flush() {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => Err(err),
            Err(err) => Err(self.record(err)),
        }
    }
}
