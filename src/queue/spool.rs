use std::{
    any::Any,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::value::RawValue;

use super::{EnqueueReceipt, JobDescriptor, JobQueue, JobType, QueueError};

/// Filesystem queue: one JSON file per job under `<root>/<queue>/`.
///
/// Jobs are written to a hidden temporary file first and renamed into place,
/// so a worker scanning the directory never sees a partial job.
#[derive(Debug, Clone)]
pub struct SpoolQueue {
    root: PathBuf,
    queue: String,
}

#[derive(Serialize)]
struct SpooledJob<'a> {
    id: &'a str,
    job: JobType,
    payload: SpooledPayload<'a>,
}

#[derive(Serialize)]
struct SpooledPayload<'a> {
    push: &'a RawValue,
}

impl SpoolQueue {
    pub fn new<P: Into<PathBuf>, T: Into<String>>(root: P, queue: T) -> Self {
        Self {
            root: root.into(),
            queue: queue.into(),
        }
    }

    pub fn queue_dir(&self) -> PathBuf {
        self.root.join(&self.queue)
    }

    pub fn job_path(&self, id: &str) -> PathBuf {
        self.queue_dir().join(format!("{id}.json"))
    }

    fn generate_id() -> String {
        hex::encode(rand::random::<[u8; 16]>())
    }

    async fn write_atomically(dir: &Path, id: &str, contents: Vec<u8>) -> Result<(), QueueError> {
        let tmp_path = dir.join(format!(".{id}.json.tmp"));
        let final_path = dir.join(format!("{id}.json"));

        let written = async {
            tokio::fs::write(&tmp_path, contents).await?;
            tokio::fs::rename(&tmp_path, &final_path).await
        }
        .await;

        if let Err(e) = written {
            tokio::fs::remove_file(&tmp_path).await.ok();
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl JobQueue for SpoolQueue {
    #[tracing::instrument(skip(job))]
    async fn enqueue(&self, job: JobDescriptor) -> Result<EnqueueReceipt, QueueError> {
        let id = Self::generate_id();
        let dir = self.queue_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let contents = serde_json::to_vec(&SpooledJob {
            id: &id,
            job: job.job_type(),
            payload: SpooledPayload { push: job.push() },
        })?;
        Self::write_atomically(&dir, &id, contents).await?;

        tracing::info!(id = %id, "job spooled");
        Ok(EnqueueReceipt {
            id,
            queue: self.queue.clone(),
            job: job.job_type(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
