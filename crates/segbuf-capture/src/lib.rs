//! Response body and header capture on top of [`segbuf`].
//!
//! A transfer layer (an HTTP client, a pcap reassembler, a test double) hands
//! each received chunk to a [`TransferSink`]. [`ResponseCapture`] owns one
//! [`SegmentedBuffer`](segbuf::SegmentedBuffer) for the body and another for
//! the headers, reuses both across exchanges, and flattens them to text on
//! demand.
//!
//! Retrying, redirects and the request itself stay with the caller.

pub use self::capture::ResponseCapture;
pub use self::error::{CaptureError, Result};
pub use self::sink::{ChunkSink, FnSink, Stream, TransferSink, feed};

mod capture;
mod error;
mod sink;
