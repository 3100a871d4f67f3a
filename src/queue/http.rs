use std::{any::Any, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::server_info::{APP_NAME, APP_VERSION};

use super::{EnqueueReceipt, JobDescriptor, JobQueue, QueueError};

/// Client for a queue broker exposing `POST /queues/{queue}/jobs`.
#[derive(Debug, Clone)]
pub struct HttpQueue {
    client: reqwest::Client,
    base_url: Url,
    queue: String,
}

#[derive(Deserialize)]
struct BrokerAck {
    id: String,
}

impl HttpQueue {
    pub fn new<T: Into<String>>(base_url: Url, queue: T) -> Result<Self, QueueError> {
        Ok(Self {
            client: Self::create_client()?,
            base_url,
            queue: queue.into(),
        })
    }

    fn create_client() -> Result<reqwest::Client, QueueError> {
        reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("{APP_NAME}/{APP_VERSION}"))
            .build()
            .map_err(|e| QueueError::Unavailable(e.to_string()))
    }

    pub fn jobs_url(&self) -> Result<Url, QueueError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| QueueError::Unavailable(format!("unusable queue URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(&["queues", self.queue.as_str(), "jobs"]);

        Ok(url)
    }
}

#[async_trait]
impl JobQueue for HttpQueue {
    #[tracing::instrument(skip(self, job))]
    async fn enqueue(&self, job: JobDescriptor) -> Result<EnqueueReceipt, QueueError> {
        let response = self
            .client
            .post(self.jobs_url()?)
            .json(&job)
            .send()
            .await
            .map_err(|e| QueueError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "queue rejected job");
            return Err(QueueError::BadStatusCode(status.as_u16()));
        }

        let ack: BrokerAck = response
            .json()
            .await
            .map_err(|e| QueueError::MalformedResponse(e.to_string()))?;

        tracing::info!(id = %ack.id, queue = %self.queue, "job enqueued");
        Ok(EnqueueReceipt {
            id: ack.id,
            queue: self.queue.clone(),
            job: job.job_type(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
