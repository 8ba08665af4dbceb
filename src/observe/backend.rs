use crate::foundation::core::ElementId;
use crate::foundation::error::{UnveilError, UnveilResult};
use crate::observe::config::ObservationConfig;

/// One intersection report from the host for a single target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntersectionEntry {
    /// Element the report is about.
    pub target: ElementId,
    /// Whether the target meets the configured threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the target, in `[0, 1]`.
    pub intersection_ratio: f64,
    /// Host timestamp of the report, in seconds.
    pub time_secs: f64,
}

/// Host intersection-detection capability.
///
/// Observers register interest with `observe` and always pair it with `unobserve`; the host
/// then delivers [`IntersectionEntry`] batches to
/// [`ViewportObserver::deliver`](crate::ViewportObserver::deliver).
pub trait IntersectionBackend {
    /// Start reporting for `target`.
    ///
    /// Return [`UnveilError::ObservationUnavailable`] when the host has no intersection
    /// primitive; callers degrade instead of propagating it.
    fn observe(&mut self, target: ElementId, config: &ObservationConfig) -> UnveilResult<()>;

    /// Stop reporting for `target`. Unknown targets are ignored.
    fn unobserve(&mut self, target: ElementId);
}

/// Backend for hosts with no intersection primitive at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableBackend;

impl IntersectionBackend for UnavailableBackend {
    fn observe(&mut self, target: ElementId, _config: &ObservationConfig) -> UnveilResult<()> {
        Err(UnveilError::unavailable(format!(
            "no intersection primitive for {target}"
        )))
    }

    fn unobserve(&mut self, _target: ElementId) {}
}
