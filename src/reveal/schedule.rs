use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::foundation::error::UnveilResult;
use crate::observe::observer::ObservationState;
use crate::reveal::config::{RevealConfig, RevealPolicy};
use crate::reveal::preset::{PresetStates, VisualState};

/// Target state of a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Child rests at the preset's hidden state.
    Hidden,
    /// Child rests at the preset's visible state.
    Visible,
}

/// Timing and target of one child's transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ChildReveal {
    /// Declaration index among the region's children.
    pub index: usize,
    /// Seconds from the region flip until this child starts moving.
    pub delay_secs: f64,
    /// Seconds the transition takes once started.
    pub duration_secs: f64,
    /// State the child moves toward.
    pub state: RevealState,
}

impl ChildReveal {
    /// Linear progress in `[0, 1]` at `elapsed_secs` after the region flip.
    pub fn progress(&self, elapsed_secs: f64) -> f64 {
        ((elapsed_secs - self.delay_secs) / self.duration_secs).clamp(0.0, 1.0)
    }

    /// End of this child's transition, relative to the region flip.
    pub fn end_secs(&self) -> f64 {
        self.delay_secs + self.duration_secs
    }
}

/// Region visibility plus the staggered per-child transitions it implies.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealSchedule {
    /// Whether the region as a whole should be shown.
    pub region_visible: bool,
    /// One entry per child, in declaration order.
    pub children: Vec<ChildReveal>,
}

impl RevealSchedule {
    /// Time at which the last child settles. `0` for an empty region.
    pub fn total_secs(&self) -> f64 {
        self.children
            .iter()
            .map(ChildReveal::end_secs)
            .fold(0.0, f64::max)
    }

    /// Sample every child at `elapsed_secs` after the flip that produced this schedule.
    ///
    /// Children move from the opposite endpoint toward their target state.
    pub fn sample(&self, states: &PresetStates, ease: Ease, elapsed_secs: f64) -> Vec<VisualState> {
        self.children
            .iter()
            .map(|child| {
                let t = ease.apply(child.progress(elapsed_secs));
                let (from, to) = match child.state {
                    RevealState::Visible => (&states.hidden, &states.visible),
                    RevealState::Hidden => (&states.visible, &states.hidden),
                };
                VisualState::lerp(from, to, t)
            })
            .collect()
    }
}

/// Region visibility for `state` under `policy`.
pub fn region_visible(state: ObservationState, policy: RevealPolicy) -> bool {
    match policy {
        RevealPolicy::Once => state.has_ever_intersected,
        RevealPolicy::WhileVisible => state.is_intersecting,
    }
}

/// Compute the reveal schedule for a region with `child_count` children.
///
/// Pure: the result depends only on the arguments. Child `i` starts at
/// `base_delay + i * stagger`, so delays never decrease with the index.
pub fn compute_schedule(
    state: ObservationState,
    config: &RevealConfig,
    child_count: usize,
) -> UnveilResult<RevealSchedule> {
    config.validate()?;

    let visible = region_visible(state, config.policy());
    let target = if visible {
        RevealState::Visible
    } else {
        RevealState::Hidden
    };

    let children = (0..child_count)
        .map(|index| ChildReveal {
            index,
            delay_secs: config.base_delay_secs() + index as f64 * config.stagger_secs(),
            duration_secs: config.duration_secs(),
            state: target,
        })
        .collect();

    Ok(RevealSchedule {
        region_visible: visible,
        children,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/schedule.rs"]
mod tests;
