mod error;
mod http;
mod job;
mod service;
mod spool;

pub use self::error::QueueError;
pub use self::http::HttpQueue;
pub use self::job::{EnqueueReceipt, JobDescriptor, JobPayload, JobType};
pub use self::service::JobQueue;
pub use self::spool::SpoolQueue;
