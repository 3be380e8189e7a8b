//! Records of experiment statistics and diagnostics.
//!
//! A [`Record`] is a set of named values. The coordinator produces one with
//! [`Glue::record`](crate::Glue::record), and diagnostic helpers produce
//! records holding value tables and error measures. Records are handed to a
//! [`Recorder`], which decides where they go.
//!
//! ```rust
//! use rlglue_core::record::{BufferedRecorder, Record, RecordValue, Recorder};
//!
//! let mut recorder = BufferedRecorder::new();
//! let mut record = Record::from_scalar("return", -12.0);
//! record.insert("episode", RecordValue::Scalar(3.0));
//! recorder.write(record);
//!
//! assert_eq!(recorder.len(), 1);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
