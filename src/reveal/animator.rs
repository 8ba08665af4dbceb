use crate::foundation::core::ElementId;
use crate::foundation::error::UnveilResult;
use crate::observe::backend::{IntersectionBackend, IntersectionEntry};
use crate::observe::config::ObservationConfig;
use crate::observe::observer::{ObservationState, ObserverHandle, ViewportObserver};
use crate::reveal::config::RevealConfig;
use crate::reveal::preset::{PresetStates, VisualState};
use crate::reveal::schedule::{RevealSchedule, compute_schedule};

/// Emitted when a region's visibility flips.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "schedule", rename_all = "snake_case")]
pub enum RevealEvent {
    /// The region became visible; children move toward their visible state.
    Reveal(RevealSchedule),
    /// The region was hidden again (only under `WhileVisible`).
    Conceal(RevealSchedule),
}

impl RevealEvent {
    /// Schedule carried by the event.
    pub fn schedule(&self) -> &RevealSchedule {
        match self {
            Self::Reveal(s) | Self::Conceal(s) => s,
        }
    }

    /// Return `true` for [`RevealEvent::Reveal`].
    pub fn is_reveal(&self) -> bool {
        matches!(self, Self::Reveal(_))
    }
}

type EventListener = Box<dyn FnMut(&RevealEvent)>;

/// Drives the staggered reveal of one guarded region and its children.
///
/// Owns its [`ViewportObserver`]; observers are never shared between animators.
pub struct RevealAnimator {
    observer: ViewportObserver,
    config: RevealConfig,
    states: PresetStates,
    child_count: usize,
    schedule: RevealSchedule,
    handle: Option<ObserverHandle>,
    listener: Option<EventListener>,
}

impl std::fmt::Debug for RevealAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealAnimator")
            .field("observer", &self.observer)
            .field("config", &self.config)
            .field("child_count", &self.child_count)
            .field("region_visible", &self.schedule.region_visible)
            .finish()
    }
}

impl RevealAnimator {
    /// Validate both configs and build a detached animator.
    pub fn new(
        config: RevealConfig,
        observation: ObservationConfig,
        child_count: usize,
    ) -> UnveilResult<Self> {
        let observer = ViewportObserver::new(observation)?;
        let schedule = compute_schedule(observer.state(), &config, child_count)?;
        Ok(Self {
            observer,
            states: config.preset().states(),
            config,
            child_count,
            schedule,
            handle: None,
            listener: None,
        })
    }

    /// Reveal configuration.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Hidden/visible endpoints of the configured preset.
    pub fn preset_states(&self) -> &PresetStates {
        &self.states
    }

    /// The owned observer.
    pub fn observer(&self) -> &ViewportObserver {
        &self.observer
    }

    /// Number of children being staggered.
    pub fn child_count(&self) -> usize {
        self.child_count
    }

    /// Schedule for the latest observation state.
    pub fn schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    /// Register the event callback, replacing any previous one.
    pub fn on_event(&mut self, callback: impl FnMut(&RevealEvent) + 'static) {
        self.listener = Some(Box::new(callback));
    }

    /// Start observing `element`. See [`ViewportObserver::attach`].
    ///
    /// Each attachment starts hidden without emitting; a fail-open attach reveals
    /// immediately and returns the event.
    pub fn attach(
        &mut self,
        element: Option<ElementId>,
        backend: Box<dyn IntersectionBackend>,
    ) -> UnveilResult<Option<RevealEvent>> {
        if element.is_some() {
            self.schedule =
                compute_schedule(ObservationState::default(), &self.config, self.child_count)?;
        }
        let Some(handle) = self.observer.attach(element, backend) else {
            return Ok(None);
        };
        self.handle = Some(handle);
        self.refresh()
    }

    /// Stop observing. Safe to call repeatedly.
    pub fn detach(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => self.observer.detach(handle),
            None => false,
        }
    }

    /// Feed a batch of host entries and emit an event if region visibility flipped.
    pub fn deliver(&mut self, entries: &[IntersectionEntry]) -> UnveilResult<Option<RevealEvent>> {
        if self.observer.deliver(entries).is_none() {
            return Ok(None);
        }
        self.refresh()
    }

    /// Change the number of children. Recomputes the schedule without emitting.
    pub fn set_child_count(&mut self, child_count: usize) -> UnveilResult<()> {
        self.child_count = child_count;
        self.schedule = compute_schedule(self.observer.state(), &self.config, child_count)?;
        Ok(())
    }

    /// Sample every child `elapsed_secs` after the latest flip.
    pub fn sample(&self, elapsed_secs: f64) -> Vec<VisualState> {
        self.schedule
            .sample(&self.states, self.config.ease(), elapsed_secs)
    }

    fn refresh(&mut self) -> UnveilResult<Option<RevealEvent>> {
        let state: ObservationState = self.observer.state();
        let next = compute_schedule(state, &self.config, self.child_count)?;
        let flipped = next.region_visible != self.schedule.region_visible;
        self.schedule = next;
        if !flipped {
            return Ok(None);
        }

        let event = if self.schedule.region_visible {
            RevealEvent::Reveal(self.schedule.clone())
        } else {
            RevealEvent::Conceal(self.schedule.clone())
        };
        tracing::debug!(
            element = ?self.observer.target(),
            reveal = event.is_reveal(),
            children = self.child_count,
            "region visibility flipped"
        );
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
        Ok(Some(event))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/animator.rs"]
mod tests;
