//! Write now, check once.
//!
//! [`AggregatedWriter`] wraps any [`std::io::Write`] so that a run of writes
//! can be issued without inspecting each result. It forwards while the sink is
//! healthy, keeps a running byte count, and freezes on the first failure:
//! later writes never reach the sink. One call to
//! [`result`](AggregatedWriter::result) at the end reports both.
//!
//! ```
//! use aggregated_writer::AggregatedWriter;
//!
//! let mut out = Vec::new();
//! let mut w = AggregatedWriter::new(&mut out);
//! w.emit(b"[").emit_fmt(format_args!("\"{}\"", "foo")).emit(b"]");
//!
//! let (n, err) = w.result();
//! assert_eq!(n, 7);
//! assert!(err.is_none());
//! assert_eq!(out, b"[\"foo\"]");
//! ```

pub mod scripted;
pub mod sink;
pub mod stringify;
pub mod writer;

pub use scripted::{ScriptedSink, Step};
pub use sink::{aggregate, Aggregator, Sink};
pub use writer::{AggregatedWriter, StickyError};
