//! # Dispatch
//! Send many prompts to a generative model in rate-limited batches.
//!
//! The prompts are partitioned left-to-right into batches of at most [DispatchConfig::batch_size]. All requests in a
//! batch are issued concurrently and the dispatcher waits for all of them before moving on. Before every batch but the
//! first, the dispatcher pauses for [DispatchConfig::sleep_time] to stay under the rate limit of the endpoint.
//!
//! Replies are returned in the order of the prompts, regardless of which request finishes first.
//!
//! There is no retry, no timeout and no backpressure: a request that hangs stalls the whole dispatch.

use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::Result;
use futures::future::{join_all, try_join_all};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dispatch::errors::RequestFailed;
use crate::utils::llm::AsyncGenerate;
use crate::utils::progress::{ObserveProgress, Progress};

pub const DEFAULT_BATCH_SIZE: usize = 30;
pub const DEFAULT_SLEEP_TIME: Duration = Duration::from_secs(60);

/// Batching and pausing of a [BatchDispatcher].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Max number of concurrent requests in a batch
    pub batch_size: NonZeroUsize,
    /// Pause before every batch but the first, in seconds when (de)serialized
    #[serde(with = "crate::utils::timing::secs")]
    pub sleep_time: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap(),
            sleep_time: DEFAULT_SLEEP_TIME,
        }
    }
}

impl DispatchConfig {
    /// Load from JSON like `{"batch_size": 30, "sleep_time": 60}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Dispatches prompts to a model in batches. Holds no state between dispatches.
pub struct BatchDispatcher<M: AsyncGenerate> {
    pub model: M,
    pub config: DispatchConfig,
    progress: Option<Box<dyn ObserveProgress + Send + Sync>>,
}

impl<M: AsyncGenerate> BatchDispatcher<M> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, DispatchConfig::default())
    }

    pub fn with_config(model: M, config: DispatchConfig) -> Self {
        Self {
            model,
            config,
            progress: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    pub fn with_sleep_time(mut self, sleep_time: Duration) -> Self {
        self.config.sleep_time = sleep_time;
        self
    }

    /// Report progress to `observer` before the first batch and after every batch.
    pub fn with_progress(mut self, observer: impl ObserveProgress + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(observer));
        self
    }

    /// Get a reply for every prompt, in the order of the prompts.
    ///
    /// Fails as a whole if any request fails, with a [RequestFailed] error identifying the first failing request of
    /// the batch. Replies of earlier batches are discarded and later batches are not sent.
    pub async fn dispatch<S: AsRef<str> + Sync>(&self, prompts: &[S]) -> Result<Vec<String>> {
        let total = prompts.len();
        let mut results: Vec<String> = Vec::with_capacity(total);
        self.report(0, total);
        for (batch, chunk) in prompts.chunks(self.config.batch_size.get()).enumerate() {
            self.pause_before(batch).await;
            let start = results.len();
            debug!("sending batch {} with prompts {}..{} of {}", batch, start, start + chunk.len(), total);
            let requests = chunk.iter().enumerate().map(|(offset, prompt)| async move {
                self.model.generate(prompt.as_ref()).await
                    .map(|generation| generation.text)
                    .map_err(|cause| RequestFailed {
                        batch,
                        prompt_index: start + offset,
                        cause,
                    })
            });
            let replies = try_join_all(requests).await?;
            results.extend(replies);
            self.report(results.len(), total);
        }
        info!("dispatched {} prompts", total);
        Ok(results)
    }

    /// Like [Self::dispatch], but a failing request only fails its own slot.
    ///
    /// Batching, pausing and ordering are the same, so the failed subset can be picked out and dispatched again.
    pub async fn dispatch_settled<S: AsRef<str> + Sync>(&self, prompts: &[S]) -> Vec<Result<String>> {
        let total = prompts.len();
        let mut results: Vec<Result<String>> = Vec::with_capacity(total);
        self.report(0, total);
        for (batch, chunk) in prompts.chunks(self.config.batch_size.get()).enumerate() {
            self.pause_before(batch).await;
            let start = results.len();
            debug!("sending batch {} with prompts {}..{} of {}", batch, start, start + chunk.len(), total);
            let requests = chunk.iter().enumerate().map(|(offset, prompt)| async move {
                self.model.generate(prompt.as_ref()).await
                    .map(|generation| generation.text)
                    .map_err(|cause| anyhow::Error::from(RequestFailed {
                        batch,
                        prompt_index: start + offset,
                        cause,
                    }))
            });
            results.extend(join_all(requests).await);
            self.report(results.len(), total);
        }
        let failed = results.iter().filter(|r| r.is_err()).count();
        info!("dispatched {} prompts, {} failed", total, failed);
        results
    }

    async fn pause_before(&self, batch: usize) {
        if batch > 0 && !self.config.sleep_time.is_zero() {
            debug!("pausing {:?} before batch {}", self.config.sleep_time, batch);
            tokio::time::sleep(self.config.sleep_time).await;
        }
    }

    fn report(&self, dispatched: usize, total: usize) {
        if let Some(observer) = &self.progress {
            observer.on_progress(Progress { dispatched, total });
        }
    }
}

pub mod errors {
    use std::error::Error;
    use std::fmt;
    use std::fmt::Formatter;

    /// Error when the model fails to reply to a prompt.
    #[derive(Debug)]
    pub struct RequestFailed {
        /// Index of the batch, starting from 0
        pub batch: usize,
        /// Index of the prompt in the dispatched prompts
        pub prompt_index: usize,
        pub cause: anyhow::Error,
    }

    impl fmt::Display for RequestFailed {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "RequestFailed: request for prompt {} in batch {} failed: {}",
                   self.prompt_index, self.batch, self.cause)
        }
    }

    impl Error for RequestFailed {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(self.cause.as_ref())
        }
    }
}
