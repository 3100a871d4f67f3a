use std::any::Any;

use async_trait::async_trait;

use super::{EnqueueReceipt, JobDescriptor, QueueError};

/// Work queue consumed by the build workers.
///
/// `enqueue` resolves once the job has been accepted by the queue, and the
/// queue owns the job from then on.
#[async_trait]
pub trait JobQueue: std::fmt::Debug + Send + Sync {
    async fn enqueue(&self, job: JobDescriptor) -> Result<EnqueueReceipt, QueueError>;

    fn as_any(&self) -> &dyn Any;
}
