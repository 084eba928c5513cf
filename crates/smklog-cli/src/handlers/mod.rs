mod context;

pub mod convert;
pub mod job;
pub mod jobs;
pub mod record;
pub mod show;
pub mod validate;

pub use context::HandlerContext;
