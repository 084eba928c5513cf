//! Text layer for Snakemake JSON event logs.
//!
//! A log is a sequence of JSON objects, each written either on a single line
//! or pretty-printed with its outer braces alone at column 0. The two layouts
//! may be mixed freely within one file.

// Error types
pub mod error;

// Line-level object detection
pub mod boundary;

// Lazy record reader
pub mod reader;

// Record encoding
pub mod writer;

pub use boundary::{BoundaryError, ObjectBoundaryParser, RawObject};
pub use error::{Error, Result};
pub use reader::{RecordReader, parse_logfile, parse_str, read_records};
pub use writer::{Layout, RecordWriter, encode_record};
