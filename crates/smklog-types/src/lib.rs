//! Record model for Snakemake JSON event logs.
//!
//! - [`Record`]: the closed set of record variants with structural equality
//! - [`registry`]: static (category, event tag) table used to pick a variant
//! - [`decode_record`]: strict decoder from a raw JSON object to a [`Record`]
//! - [`Clock`]: injectable time source for records created in-process

pub mod clock;
pub mod decode;
pub mod error;
pub mod record;
pub mod registry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use decode::{decode_record, BaseDefaults, FieldReader, TRANSPORT_KEYS};
pub use error::{DecodeError, RegistryError, Result, UnknownTag};
pub use record::*;
pub use registry::{registry, Registry, RegistryEntry};
