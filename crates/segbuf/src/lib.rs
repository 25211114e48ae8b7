//! Chunked, append-only byte accumulator for streamed transfer data.
//!
//! A [`SegmentedBuffer`] collects bytes delivered piecemeal (a response body
//! arriving through a transfer callback, for instance) into a chain of
//! fixed-capacity segments instead of one growing array, so appends never copy
//! what was already written.
//!
//! # Key Features
//!
//! - **Lazy**: nothing is allocated until the first non-empty append
//! - **Reusable**: [`SegmentedBuffer::clear`] keeps every segment for the next exchange
//! - **Fallible allocation**: running out of memory is an error, not an abort
//! - **Whole reads only**: length, flatten, or borrowed chunk iteration
//!
//! # Example
//!
//! ```
//! use segbuf::{BufferConfig, SegmentedBuffer};
//!
//! let mut buffer = SegmentedBuffer::with_config(BufferConfig::default().chunk_size(8192));
//! buffer.append(b"HTTP/1.1 200 OK\r\n").unwrap();
//! buffer.append(b"\r\n").unwrap();
//!
//! let mut out = vec![0; buffer.len()];
//! buffer.flatten(&mut out).unwrap();
//! assert_eq!(out, b"HTTP/1.1 200 OK\r\n\r\n");
//!
//! buffer.clear();
//! assert!(buffer.is_empty());
//! buffer.destroy();
//! ```

pub use self::buffer::SegmentedBuffer;
pub use self::config::{BufferConfig, DEFAULT_CHUNK_SIZE};
pub use self::dump::{Dump, SegmentInfo};
pub use self::error::{BufferError, Result};

mod buffer;
mod config;
mod dump;
mod error;
mod segment;
