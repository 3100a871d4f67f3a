use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobType {
    Build,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobPayload {
    push: Box<RawValue>,
}

/// Unit of work handed to the queue. The push event is kept as the exact
/// text that was received.
#[derive(Debug, Clone, Serialize)]
pub struct JobDescriptor {
    #[serde(rename = "job")]
    job_type: JobType,
    payload: JobPayload,
}

impl JobDescriptor {
    pub fn build(push: Box<RawValue>) -> Self {
        Self {
            job_type: JobType::Build,
            payload: JobPayload { push },
        }
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    pub fn push(&self) -> &RawValue {
        &self.payload.push
    }
}

/// Acknowledgment returned once a job has been queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnqueueReceipt {
    pub id: String,
    pub queue: String,
    pub job: JobType,
}
