//! Three ways to render `["foo", "bar", "baz"]`.
//!
//! All of them produce the same bytes on a healthy sink. They differ in what
//! happens when the sink fails:
//!
//! - [`naive`] ignores every result and cannot report anything,
//! - [`pedantic`] checks after each call and counts by hand,
//! - [`aggregated`] writes straight through an [`AggregatedWriter`] and checks
//!   once at the end.
//!
//! Items are quoted verbatim, without escaping.
//!
//! [`AggregatedWriter`]: crate::AggregatedWriter

use std::io::{self, Write};

use crate::sink::{aggregate, Sink};

const OPEN: &[u8] = b"[";
const CLOSE: &[u8] = b"]";
const SEPARATOR: &[u8] = b", ";

/// Renders `items` and drops every error on the floor.
pub fn naive<W: Write, S: AsRef<str>>(w: &mut W, items: &[S]) {
    let _ = w.write_all(OPEN);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            let _ = w.write_all(SEPARATOR);
        }
        let _ = write!(w, "\"{}\"", item.as_ref());
    }
    let _ = w.write_all(CLOSE);
}

/// Renders `items`, returning early on the first failed call.
pub fn pedantic<W: Write, S: AsRef<str>>(w: &mut W, items: &[S]) -> io::Result<u64> {
    let mut n = 0u64;

    // opening bracket
    w.write_all(OPEN)?;
    n += OPEN.len() as u64;

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            // separator
            w.write_all(SEPARATOR)?;
            n += SEPARATOR.len() as u64;
        }

        // quoted member
        let item = item.as_ref();
        write!(w, "\"{}\"", item)?;
        n += item.len() as u64 + 2;
    }

    // closing bracket
    w.write_all(CLOSE)?;
    n += CLOSE.len() as u64;

    Ok(n)
}

/// Renders `items` without per-call checks.
///
/// When `sink` is an existing aggregator the writes join its sequence and the
/// returned count is its cumulative total.
///
/// ```
/// use aggregated_writer::{stringify, Sink};
///
/// let mut out = Vec::new();
/// let n = stringify::aggregated(Sink::Raw(&mut out), &["foo", "bar", "baz"]).unwrap();
/// assert_eq!(out, br#"["foo", "bar", "baz"]"#);
/// assert_eq!(n, 21);
/// ```
pub fn aggregated<W: Write, S: AsRef<str>>(sink: Sink<'_, W>, items: &[S]) -> io::Result<u64> {
    let mut w = aggregate(sink);
    w.emit(OPEN);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.emit(SEPARATOR);
        }
        w.emit_fmt(format_args!("\"{}\"", item.as_ref()));
    }
    w.emit(CLOSE);
    w.into_result()
}

/// Exact number of bytes any of the renderers writes for `items`.
pub fn encoded_len<S: AsRef<str>>(items: &[S]) -> u64 {
    let quoted: u64 = items
        .iter()
        .map(|item| item.as_ref().len() as u64 + 2)
        .sum();
    let separators = items.len().saturating_sub(1) as u64 * SEPARATOR.len() as u64;
    (OPEN.len() + CLOSE.len()) as u64 + quoted + separators
}
