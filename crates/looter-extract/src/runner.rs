//! Timed extraction job runner.
//!
//! Drives the `Idle → Connecting → Extracting → Completed → Idle` state
//! machine, publishing status through a watch channel. A provider error takes
//! the `Failed` arc instead, with a user-visible message. At most one job is
//! in flight: triggering while not `Idle` is rejected outright, never queued.

use std::sync::Arc;
use std::time::Duration;

use looter_core::{Platform, PostRecord};
use serde::Serialize;
use tokio::sync::watch;

use crate::error::ExtractError;
use crate::provider::SampleProvider;
use crate::store::ResultStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPhase {
    Idle,
    Connecting,
    Extracting,
    Completed,
    Failed,
}

/// Current runner state plus the transient user-facing status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStatus {
    pub phase: JobPhase,
    pub message: Option<String>,
}

impl JobStatus {
    #[must_use]
    pub fn idle() -> Self {
        Self {
            phase: JobPhase::Idle,
            message: None,
        }
    }
}

/// Phase durations. Production defaults mirror the simulated backend
/// latencies; tests zero them out so the state machine runs without
/// wall-clock waiting.
#[derive(Debug, Clone, Copy)]
pub struct JobTiming {
    pub connect: Duration,
    pub extract: Duration,
    /// How long a Completed/Failed status stays visible before the runner
    /// resets to Idle.
    pub status_linger: Duration,
}

impl Default for JobTiming {
    fn default() -> Self {
        Self::from_millis(2_000, 1_500, 3_000)
    }
}

impl JobTiming {
    #[must_use]
    pub fn from_millis(connect: u64, extract: u64, status_linger: u64) -> Self {
        Self {
            connect: Duration::from_millis(connect),
            extract: Duration::from_millis(extract),
            status_linger: Duration::from_millis(status_linger),
        }
    }

    /// All delays zeroed.
    #[must_use]
    pub fn immediate() -> Self {
        Self::from_millis(0, 0, 0)
    }
}

/// Outcome of one completed job.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub platform: Platform,
    pub requested: usize,
    pub records: Vec<PostRecord>,
}

pub struct JobRunner {
    provider: Arc<dyn SampleProvider>,
    store: ResultStore,
    timing: JobTiming,
    status: Arc<watch::Sender<JobStatus>>,
}

impl JobRunner {
    #[must_use]
    pub fn new(provider: Arc<dyn SampleProvider>, store: ResultStore, timing: JobTiming) -> Self {
        let (status, _) = watch::channel(JobStatus::idle());
        Self {
            provider,
            store,
            timing,
            status: Arc::new(status),
        }
    }

    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status.borrow().phase == JobPhase::Idle
    }

    /// Subscribe to status transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<JobStatus> {
        self.status.subscribe()
    }

    /// Run one extraction job for `targets` on `platform`.
    ///
    /// An empty target list is a no-op: the store and the state machine are
    /// untouched and an empty report is returned. Otherwise the runner walks
    /// the connect and extract phases with their configured delays,
    /// synthesizes one record per target in input order, prepends the batch
    /// to the store, and returns the report. The transient Completed status
    /// clears to Idle after the linger delay via a spawned reset task, so the
    /// caller is not held for it.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Busy`] when a job is already in flight (the machine
    ///   is not `Idle`). The attempt is rejected, not queued.
    /// - [`ExtractError::Synthesis`] when the provider fails; the whole batch
    ///   is discarded, nothing reaches the store, and the runner shows
    ///   `Failed` until the linger reset.
    pub async fn run(
        &self,
        platform: Platform,
        targets: &[String],
    ) -> Result<JobReport, ExtractError> {
        if targets.is_empty() {
            return Ok(JobReport {
                platform,
                requested: 0,
                records: Vec::new(),
            });
        }

        // Atomic admission: transition Idle → Connecting or reject.
        let admitted = self.status.send_if_modified(|status| {
            if status.phase == JobPhase::Idle {
                status.phase = JobPhase::Connecting;
                status.message = Some("Connecting to backend...".to_owned());
                true
            } else {
                false
            }
        });
        if !admitted {
            return Err(ExtractError::Busy);
        }

        tracing::info!(%platform, targets = targets.len(), "extraction job started");
        tokio::time::sleep(self.timing.connect).await;

        self.publish(
            JobPhase::Extracting,
            Some(format!(
                "Extracting data from {}...",
                platform.code().to_uppercase()
            )),
        );
        tokio::time::sleep(self.timing.extract).await;

        let mut records = Vec::with_capacity(targets.len());
        for username in targets {
            match self.provider.synthesize(platform, username) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::error!(
                        %platform,
                        username = %username,
                        error = %err,
                        "synthesis failed, aborting job"
                    );
                    self.publish(JobPhase::Failed, Some(format!("Extraction failed: {err}")));
                    self.schedule_reset();
                    return Err(err);
                }
            }
        }

        self.store.prepend_all(records.clone());
        self.publish(
            JobPhase::Completed,
            Some("Completed successfully!".to_owned()),
        );
        self.schedule_reset();
        tracing::info!(%platform, records = records.len(), "extraction job completed");

        Ok(JobReport {
            platform,
            requested: targets.len(),
            records,
        })
    }

    fn publish(&self, phase: JobPhase, message: Option<String>) {
        self.status.send_modify(|status| {
            status.phase = phase;
            status.message = message;
        });
    }

    /// Clear the transient Completed/Failed status once the linger elapses.
    ///
    /// Only one reset can be outstanding: the runner stays non-Idle until it
    /// fires, so no new job (and no new reset) can start underneath it.
    fn schedule_reset(&self) {
        let status = Arc::clone(&self.status);
        let linger = self.timing.status_linger;
        tokio::spawn(async move {
            tokio::time::sleep(linger).await;
            status.send_if_modified(|status| {
                if matches!(status.phase, JobPhase::Completed | JobPhase::Failed) {
                    *status = JobStatus::idle();
                    true
                } else {
                    false
                }
            });
        });
    }
}
