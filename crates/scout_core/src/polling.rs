use crate::JobStatus;

/// Client-side view of a tracked generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollingStatus {
    #[default]
    Idle,
    Processing,
    Completed,
    Failed,
}

impl PollingStatus {
    pub fn is_polling(self) -> bool {
        self == PollingStatus::Processing
    }
}

/// Reconciles the poller status with a freshly observed server status.
///
/// A server reporting `processing` always (re)enters polling. Anything else
/// drops back to idle, except that a completed poll stays completed so the
/// "recipe ready" state survives a refetch of the same video.
pub fn reconcile_polling(previous: PollingStatus, observed: JobStatus) -> PollingStatus {
    match (observed, previous) {
        (JobStatus::Processing, _) => PollingStatus::Processing,
        (_, PollingStatus::Completed) => PollingStatus::Completed,
        _ => PollingStatus::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_always_enters_polling() {
        for previous in [
            PollingStatus::Idle,
            PollingStatus::Processing,
            PollingStatus::Completed,
            PollingStatus::Failed,
        ] {
            assert_eq!(
                reconcile_polling(previous, JobStatus::Processing),
                PollingStatus::Processing
            );
        }
    }

    #[test]
    fn completed_is_sticky_everything_else_idles() {
        assert_eq!(
            reconcile_polling(PollingStatus::Completed, JobStatus::Pending),
            PollingStatus::Completed
        );
        assert_eq!(
            reconcile_polling(PollingStatus::Failed, JobStatus::Completed),
            PollingStatus::Idle
        );
        assert_eq!(
            reconcile_polling(PollingStatus::Processing, JobStatus::Failed),
            PollingStatus::Idle
        );
    }
}
