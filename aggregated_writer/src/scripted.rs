//! A scripted in-memory sink.
//!
//! [`ScriptedSink`] plays back a list of per-call outcomes, which makes it easy
//! to inject a failure on exactly the k-th write and then check how many calls
//! actually reached the sink.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Write};

/// Outcome of a single `write` call on a [`ScriptedSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Accept the whole buffer.
    AcceptAll,
    /// Accept at most this many bytes (a short write).
    Accept(usize),
    /// Fail with an error of this kind, accepting nothing.
    Fail(ErrorKind),
    /// Fail with the OS error of this raw code, accepting nothing.
    FailOs(i32),
}

/// In-memory sink that follows a script of [`Step`]s.
///
/// Once the script is exhausted every further write is accepted in full.
#[derive(Debug, Default)]
pub struct ScriptedSink {
    script: VecDeque<Step>,
    data: Vec<u8>,
    calls: usize,
    flushes: usize,
    flush_failure: Option<ErrorKind>,
}

impl ScriptedSink {
    pub fn new<I: IntoIterator<Item = Step>>(steps: I) -> Self {
        Self {
            script: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Makes every `flush` fail with the given kind.
    pub fn failing_flush(mut self, kind: ErrorKind) -> Self {
        self.flush_failure = Some(kind);
        self
    }

    /// Bytes accepted so far.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of `write` invocations, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Number of `flush` invocations.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Write for ScriptedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        match self.script.pop_front().unwrap_or(Step::AcceptAll) {
            Step::AcceptAll => {
                self.data.extend_from_slice(buf);
                Ok(buf.len())
            }
            Step::Accept(max) => {
                let n = max.min(buf.len());
                self.data.extend_from_slice(&buf[..n]);
                Ok(n)
            }
            Step::Fail(kind) => Err(io::Error::new(
                kind,
                format!("scripted failure on write #{}", self.calls),
            )),
            Step::FailOs(code) => Err(io::Error::from_raw_os_error(code)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        match self.flush_failure {
            Some(kind) => Err(io::Error::new(kind, "scripted flush failure")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_accept_all() {
        let mut sink = ScriptedSink::new([Step::Accept(2), Step::Fail(ErrorKind::Other)]);

        assert_eq!(sink.write(b"abcd").unwrap(), 2);
        assert!(sink.write(b"cd").is_err());
        assert_eq!(sink.write(b"cd").unwrap(), 2);

        assert_eq!(sink.data(), b"abcd");
        assert_eq!(sink.calls(), 3);
    }

    #[test]
    fn test_failing_flush() {
        let mut sink = ScriptedSink::default().failing_flush(ErrorKind::BrokenPipe);
        let err = sink.flush().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
        assert_eq!(sink.flushes(), 1);
    }
}
