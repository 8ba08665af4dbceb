//! unveil schedules scroll-triggered reveal animations.
//!
//! A guarded region is watched by a [`ViewportObserver`]; a [`RevealAnimator`] turns
//! what the observer sees into a staggered [`RevealSchedule`] for the region's children.
//!
//! # Pipeline overview
//!
//! 1. **Observe**: host [`IntersectionEntry`] batches fold into an [`ObservationState`]
//!    (`is_intersecting` plus the monotonic `has_ever_intersected`).
//! 2. **Schedule**: [`compute_schedule`] maps `(state, config, child_count)` to a
//!    [`RevealSchedule`] (pure and deterministic).
//! 3. **Sample** (optional): [`RevealSchedule::sample`] interpolates each child's
//!    [`VisualState`] along the preset curve for the renderer.
//!
//! The key design constraints:
//!
//! - **Host-agnostic**: platform intersection detection sits behind [`IntersectionBackend`].
//! - **Fail-open**: when observation is unavailable, regions are shown rather than hidden.
//! - **Fail-fast configuration**: unknown presets and invalid timing abort setup.
//! - **Single-threaded**: observers and animators are owned, never shared; schedules are
//!   plain values that may be sent to a render thread.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod observe;
mod reveal;
mod stage;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use foundation::core::{ElementId, Insets, Point, Rect, Size, Vec2};
pub use foundation::error::{UnveilError, UnveilResult};
pub use observe::backend::{IntersectionBackend, IntersectionEntry, UnavailableBackend};
pub use observe::config::{
    DEFAULT_ROOT_MARGIN_PX, DEFAULT_THRESHOLD, MarginLength, ObservationConfig, RootMargin,
};
pub use observe::geometry::{intersection_ratio, measure, overlap};
pub use observe::observer::{ObservationState, ObserverHandle, ViewportObserver};
pub use observe::sim::{SimulatedBackend, SimulatedViewport};
pub use reveal::animator::{RevealAnimator, RevealEvent};
pub use reveal::config::{
    DEFAULT_DURATION_SECS, DEFAULT_STAGGER_SECS, RevealConfig, RevealConfigDef, RevealPolicy,
};
pub use reveal::preset::{PresetKind, PresetStates, VisualState, preset_lookup};
pub use reveal::schedule::{
    ChildReveal, RevealSchedule, RevealState, compute_schedule, region_visible,
};
pub use stage::arena::{RegionId, RevealStage};
pub use stage::scene::{
    RegionDef, RegionEvent, SceneDef, SceneReport, ScrollStep, StepReport, ViewportDef, run_scene,
};
