use crate::foundation::core::ElementId;
use crate::foundation::error::UnveilResult;
use crate::observe::backend::{IntersectionBackend, IntersectionEntry};
use crate::observe::config::ObservationConfig;

/// Current and historical intersection of one guarded element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObservationState {
    /// Latest raw intersection result.
    pub is_intersecting: bool,
    /// Set on the first intersection and never cleared while attached.
    pub has_ever_intersected: bool,
}

impl ObservationState {
    /// State reported when observation is unavailable: shown, and shown before.
    pub const FAIL_OPEN: Self = Self {
        is_intersecting: true,
        has_ever_intersected: true,
    };

    /// Fold one raw intersection result into this state.
    pub fn record(self, is_intersecting: bool) -> Self {
        Self {
            is_intersecting,
            has_ever_intersected: self.has_ever_intersected || is_intersecting,
        }
    }
}

/// Token identifying one attachment of a [`ViewportObserver`].
///
/// Handles from earlier attachments go stale once the observer is re-attached; detaching
/// with a stale handle does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverHandle {
    target: ElementId,
    generation: u64,
}

impl ObserverHandle {
    /// Element this handle observes.
    pub fn target(self) -> ElementId {
        self.target
    }
}

// Owns the backend registration; unregisters on every drop path.
struct Attachment {
    target: ElementId,
    generation: u64,
    backend: Box<dyn IntersectionBackend>,
    failed_open: bool,
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.backend.unobserve(self.target);
    }
}

type Listener = Box<dyn FnMut(ObservationState)>;

/// Tracks intersection of one element with its viewport.
pub struct ViewportObserver {
    config: ObservationConfig,
    state: ObservationState,
    attachment: Option<Attachment>,
    generation: u64,
    listener: Option<Listener>,
}

impl std::fmt::Debug for ViewportObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportObserver")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("target", &self.target())
            .field("failed_open", &self.is_failed_open())
            .finish()
    }
}

impl ViewportObserver {
    /// Create a detached observer after validating `config`.
    pub fn new(config: ObservationConfig) -> UnveilResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: ObservationState::default(),
            attachment: None,
            generation: 0,
            listener: None,
        })
    }

    /// Configuration this observer registers with.
    pub fn config(&self) -> &ObservationConfig {
        &self.config
    }

    /// Latest observation state.
    pub fn state(&self) -> ObservationState {
        self.state
    }

    /// Element currently observed, if any.
    pub fn target(&self) -> Option<ElementId> {
        self.attachment.as_ref().map(|a| a.target)
    }

    /// Return `true` while an element is attached.
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Return `true` when the current attachment degraded to always-visible.
    pub fn is_failed_open(&self) -> bool {
        self.attachment.as_ref().is_some_and(|a| a.failed_open)
    }

    /// Register the state-change callback, replacing any previous one.
    pub fn on_update(&mut self, callback: impl FnMut(ObservationState) + 'static) {
        self.listener = Some(Box::new(callback));
    }

    /// Begin observing `element` through `backend`.
    ///
    /// An absent element is not an error: nothing is registered and `None` is returned.
    /// Any previous attachment is released first and the state starts over from the
    /// default. When the backend cannot observe, the observer reports
    /// [`ObservationState::FAIL_OPEN`] for the lifetime of this attachment.
    pub fn attach(
        &mut self,
        element: Option<ElementId>,
        backend: Box<dyn IntersectionBackend>,
    ) -> Option<ObserverHandle> {
        let Some(target) = element else {
            tracing::debug!("attach skipped: element reference not bound");
            return None;
        };

        self.release();
        self.state = ObservationState::default();
        self.generation += 1;

        let mut attachment = Attachment {
            target,
            generation: self.generation,
            backend,
            failed_open: false,
        };

        if let Err(err) = attachment.backend.observe(target, &self.config) {
            tracing::warn!(element = %target, error = %err, "intersection observation unavailable, showing content");
            attachment.failed_open = true;
        } else {
            tracing::debug!(element = %target, threshold = self.config.threshold, "observation attached");
        }

        let failed_open = attachment.failed_open;
        let handle = ObserverHandle {
            target,
            generation: attachment.generation,
        };
        self.attachment = Some(attachment);

        if failed_open {
            self.apply(ObservationState::FAIL_OPEN);
        }
        Some(handle)
    }

    /// Stop the observation identified by `handle`.
    ///
    /// Returns `true` if a registration was released. Repeated or stale calls return `false`.
    pub fn detach(&mut self, handle: ObserverHandle) -> bool {
        let current = self.attachment.as_ref().map(|a| a.generation);
        if current == Some(handle.generation) {
            self.release()
        } else {
            false
        }
    }

    /// Stop whatever observation is active, if any.
    pub fn release(&mut self) -> bool {
        let Some(attachment) = self.attachment.take() else {
            return false;
        };
        tracing::debug!(element = %attachment.target, "observation detached");
        drop(attachment);
        true
    }

    /// Feed a batch of host entries.
    ///
    /// Entries for other targets are skipped. The batch is folded in order and the listener
    /// runs at most once, with the final state. Returns the new state when it changed.
    pub fn deliver(&mut self, entries: &[IntersectionEntry]) -> Option<ObservationState> {
        let attachment = self.attachment.as_ref()?;
        if attachment.failed_open {
            return None;
        }
        let target = attachment.target;

        let mut next = self.state;
        let mut matched = 0usize;
        for entry in entries.iter().filter(|e| e.target == target) {
            next = next.record(entry.is_intersecting);
            matched += 1;
        }
        tracing::trace!(element = %target, batch = entries.len(), matched, "coalesced intersection batch");

        if matched == 0 || next == self.state {
            return None;
        }
        self.apply(next);
        Some(next)
    }

    fn apply(&mut self, next: ObservationState) {
        tracing::debug!(
            is_intersecting = next.is_intersecting,
            has_ever_intersected = next.has_ever_intersected,
            "observation state changed"
        );
        self.state = next;
        if let Some(listener) = self.listener.as_mut() {
            listener(next);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/observer.rs"]
mod tests;
