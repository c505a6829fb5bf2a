//! Job status poller.
//!
//! Tracks one server-side generation job at a time. While the job is
//! processing, a single tokio task asks the backend for its status at a fixed
//! interval; the first terminal status settles the poll and stops the task.
//!
//! Callbacks live in cells that are read at tick time, so re-registering a
//! callback while a poll is running takes effect on the next tick.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use scout_core::{reconcile_polling, JobStatus, PollingStatus, VideoPreview, VideoStatus, VideoUpdate};
use scout_logging::{scout_debug, scout_error, scout_info, scout_trace};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::{ApiClient, ApiError, PollSettings};

/// Where the poller reads job status from.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, video_id: &str) -> Result<VideoStatus, ApiError>;
}

#[async_trait::async_trait]
impl StatusSource for ApiClient {
    async fn fetch_status(&self, video_id: &str) -> Result<VideoStatus, ApiError> {
        self.video_status(video_id).await
    }
}

/// Invoked once with the completion patch.
pub type CompletionCallback = Arc<dyn Fn(VideoUpdate) + Send + Sync>;
/// Invoked once with the video id of a failed job.
pub type FailureCallback = Arc<dyn Fn(String) + Send + Sync>;

struct ActivePoll {
    video_id: String,
    generation: u64,
    task: JoinHandle<()>,
}

#[derive(Default)]
struct PollState {
    status: PollingStatus,
    active: Option<ActivePoll>,
    generation: u64,
}

#[derive(Default)]
struct Shared {
    state: Mutex<PollState>,
    on_complete: Mutex<Option<CompletionCallback>>,
    on_failed: Mutex<Option<FailureCallback>>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, PollState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a terminal status for the poll identified by `generation`.
    ///
    /// Returns `false` if that poll has been cancelled or superseded, in which
    /// case the caller must not fire callbacks.
    fn settle(&self, generation: u64, status: PollingStatus) -> bool {
        let mut state = self.state();
        let current = state
            .active
            .as_ref()
            .is_some_and(|active| active.generation == generation);
        if !current {
            return false;
        }
        state.status = status;
        // The task is finishing on its own; dropping the handle detaches it.
        state.active = None;
        true
    }

    fn completion_callback(&self) -> Option<CompletionCallback> {
        self.on_complete
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn failure_callback(&self) -> Option<FailureCallback> {
        self.on_failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    interval: Duration,
    runtime: Handle,
    shared: Arc<Shared>,
}

impl StatusPoller {
    /// Creates an idle poller whose ticks run on `runtime`.
    pub fn new(source: Arc<dyn StatusSource>, settings: &PollSettings, runtime: Handle) -> Self {
        Self {
            source,
            interval: settings.interval,
            runtime,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Replaces the completion callback; the next tick uses the new one.
    pub fn set_on_complete(&self, callback: impl Fn(VideoUpdate) + Send + Sync + 'static) {
        *self
            .shared
            .on_complete
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(callback));
    }

    /// Replaces the failure callback; the next tick uses the new one.
    pub fn set_on_failed(&self, callback: impl Fn(String) + Send + Sync + 'static) {
        *self
            .shared
            .on_failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(callback));
    }

    pub fn status(&self) -> PollingStatus {
        self.shared.state().status
    }

    pub fn is_polling(&self) -> bool {
        self.status().is_polling()
    }

    /// Video currently being polled, if any.
    pub fn active_video_id(&self) -> Option<String> {
        self.shared
            .state()
            .active
            .as_ref()
            .map(|active| active.video_id.clone())
    }

    /// Starts polling `video_id`, cancelling any poll for another video.
    ///
    /// Returns `false` without touching the timer when that video is already
    /// being polled.
    pub fn start(&self, video_id: &str) -> bool {
        let mut state = self.shared.state();
        if let Some(active) = state.active.as_ref() {
            if active.video_id == video_id {
                scout_trace!("Already polling video {}", video_id);
                return false;
            }
        }
        if let Some(previous) = state.active.take() {
            scout_debug!("Cancelling poll for video {}", previous.video_id);
            previous.task.abort();
        }

        state.generation += 1;
        let generation = state.generation;
        state.status = PollingStatus::Processing;
        let task = self.runtime.spawn(run_poll(
            self.source.clone(),
            self.shared.clone(),
            video_id.to_string(),
            generation,
            self.interval,
        ));
        state.active = Some(ActivePoll {
            video_id: video_id.to_string(),
            generation,
            task,
        });
        scout_info!("Polling status of video {}", video_id);
        true
    }

    /// Reconciles with a freshly fetched video: processing starts (or keeps)
    /// polling, anything else stops it.
    pub fn observe(&self, video: &VideoPreview) -> PollingStatus {
        if video.recipe_generation_status == JobStatus::Processing {
            self.start(&video.video_id);
            return PollingStatus::Processing;
        }
        let mut state = self.shared.state();
        if let Some(previous) = state.active.take() {
            previous.task.abort();
        }
        state.status = reconcile_polling(state.status, video.recipe_generation_status);
        state.status
    }

    /// Cancels the running poll, if any. In-flight requests are dropped with
    /// the task.
    pub fn stop(&self) {
        let mut state = self.shared.state();
        if let Some(previous) = state.active.take() {
            scout_debug!("Stopped polling video {}", previous.video_id);
            previous.task.abort();
        }
        if state.status == PollingStatus::Processing {
            state.status = PollingStatus::Idle;
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_poll(
    source: Arc<dyn StatusSource>,
    shared: Arc<Shared>,
    video_id: String,
    generation: u64,
    period: Duration,
) {
    // First request one period after start, then every period.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let status = match source.fetch_status(&video_id).await {
            Ok(status) => status,
            Err(err) => {
                // No backoff: retry at the next tick until terminal or stopped.
                scout_error!("Polling error for video {}: {}", video_id, err);
                continue;
            }
        };
        match status.status {
            JobStatus::Completed => {
                if shared.settle(generation, PollingStatus::Completed) {
                    scout_info!("Recipe generation completed for video {}", video_id);
                    if let Some(callback) = shared.completion_callback() {
                        callback(VideoUpdate::completed(video_id, status.recipe_slug));
                    }
                }
                return;
            }
            JobStatus::Failed => {
                if shared.settle(generation, PollingStatus::Failed) {
                    scout_info!(
                        "Recipe generation failed for video {}: {}",
                        video_id,
                        status.error_message.as_deref().unwrap_or("no reason given")
                    );
                    if let Some(callback) = shared.failure_callback() {
                        callback(video_id);
                    }
                }
                return;
            }
            JobStatus::Pending | JobStatus::Processing => {
                scout_trace!("Video {} still {}", video_id, status.status.as_str());
            }
        }
    }
}
