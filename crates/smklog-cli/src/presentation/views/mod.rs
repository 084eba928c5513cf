// Views render view models as plain text. Each one is a Display wrapper.

pub mod job_detail;
pub mod jobs;
pub mod record_detail;
pub mod timeline;
pub mod validation;

pub use job_detail::JobDetailView;
pub use jobs::JobTableView;
pub use record_detail::RecordDetailView;
pub use timeline::TimelineView;
pub use validation::ValidationView;
