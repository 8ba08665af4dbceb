use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{ElementId, Point, Rect};
use crate::foundation::error::{UnveilError, UnveilResult};
use crate::observe::backend::IntersectionEntry;
use crate::observe::config::ObservationConfig;
use crate::observe::sim::SimulatedViewport;
use crate::reveal::animator::{RevealAnimator, RevealEvent};
use crate::reveal::config::{RevealConfig, RevealConfigDef};
use crate::reveal::schedule::RevealSchedule;
use crate::stage::arena::{RegionId, RevealStage};

/// Viewport size in CSS pixels; the viewport starts at the document origin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportDef {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// One guarded region of a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionDef {
    /// Element id of the guarded region.
    pub element: ElementId,
    /// Layout rect in document coordinates.
    pub rect: Rect,
    /// Number of staggered children.
    #[serde(default)]
    pub children: usize,
    /// Reveal settings.
    pub reveal: RevealConfigDef,
    /// Observation settings.
    #[serde(default)]
    pub observation: ObservationConfig,
    /// When `false` the element reference is never bound and the region stays hidden.
    #[serde(default = "default_mounted")]
    pub mounted: bool,
}

fn default_mounted() -> bool {
    true
}

/// A scroll position at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollStep {
    /// Host time of the step, in seconds.
    pub time_secs: f64,
    /// Horizontal scroll offset.
    #[serde(default)]
    pub x: f64,
    /// Vertical scroll offset.
    pub y: f64,
}

/// Scene file: a page of guarded regions plus a scroll timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// Viewport size.
    pub viewport: ViewportDef,
    /// Guarded regions.
    pub regions: Vec<RegionDef>,
    /// Scroll steps, in chronological order.
    #[serde(default)]
    pub timeline: Vec<ScrollStep>,
}

impl SceneDef {
    /// Parse a scene from JSON text.
    pub fn from_json_str(s: &str) -> UnveilResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a scene from a JSON file.
    pub fn from_path(path: &Path) -> UnveilResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check structural constraints that serde cannot express.
    pub fn validate(&self) -> UnveilResult<()> {
        let ViewportDef { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(UnveilError::validation(
                "viewport width and height must be > 0",
            ));
        }

        let mut seen = BTreeSet::new();
        for region in &self.regions {
            if !seen.insert(region.element) {
                return Err(UnveilError::validation(format!(
                    "element {} is guarded by more than one region",
                    region.element
                )));
            }
        }

        if !self
            .timeline
            .windows(2)
            .all(|w| w[0].time_secs <= w[1].time_secs)
        {
            return Err(UnveilError::validation(
                "timeline steps must be sorted by time",
            ));
        }
        Ok(())
    }
}

/// A region flip, as reported by [`run_scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionEvent {
    /// Stage slot of the region.
    pub region: RegionId,
    /// Guarded element.
    pub element: ElementId,
    /// The flip and its schedule.
    pub event: RevealEvent,
}

/// Everything that happened at one scroll position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StepReport {
    /// Host time of the step.
    pub time_secs: f64,
    /// Viewport origin after the step.
    pub scroll: Point,
    /// Raw entries the viewport reported.
    pub entries: Vec<IntersectionEntry>,
    /// Region flips caused by those entries.
    pub events: Vec<RegionEvent>,
}

/// Outcome of replaying a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneReport {
    /// Initial report at time `0` followed by one report per timeline step.
    pub steps: Vec<StepReport>,
    /// Final schedule of every region, in scene order.
    pub final_schedules: Vec<RevealSchedule>,
}

impl SceneReport {
    /// All events across every step, in order.
    pub fn events(&self) -> impl Iterator<Item = &RegionEvent> {
        self.steps.iter().flat_map(|s| s.events.iter())
    }
}

/// Replay `scene` against a [`SimulatedViewport`].
pub fn run_scene(scene: &SceneDef) -> UnveilResult<SceneReport> {
    scene.validate()?;

    let viewport = SimulatedViewport::new(Rect::new(
        0.0,
        0.0,
        scene.viewport.width,
        scene.viewport.height,
    ));
    let mut stage = RevealStage::new();
    let mut elements = Vec::with_capacity(scene.regions.len());

    for region in &scene.regions {
        let config = RevealConfig::try_from(&region.reveal)?;
        let mut animator = RevealAnimator::new(config, region.observation, region.children)?;
        viewport.place(region.element, region.rect);
        let bound = region.mounted.then_some(region.element);
        animator.attach(bound, viewport.boxed_backend())?;
        elements.push(region.element);
        stage.insert(animator);
    }
    tracing::debug!(regions = stage.len(), steps = scene.timeline.len(), "scene loaded");

    let mut steps = Vec::with_capacity(scene.timeline.len() + 1);
    steps.push(step(&mut stage, &elements, Point::ORIGIN, 0.0, viewport.flush(0.0))?);
    for s in &scene.timeline {
        let origin = Point::new(s.x, s.y);
        let entries = viewport.scroll_to(origin, s.time_secs);
        steps.push(step(&mut stage, &elements, origin, s.time_secs, entries)?);
    }

    let final_schedules = stage.iter().map(|(_, a)| a.schedule().clone()).collect();
    Ok(SceneReport {
        steps,
        final_schedules,
    })
}

fn step(
    stage: &mut RevealStage,
    elements: &[ElementId],
    scroll: Point,
    time_secs: f64,
    entries: Vec<IntersectionEntry>,
) -> UnveilResult<StepReport> {
    let events = stage
        .deliver(&entries)?
        .into_iter()
        .map(|(region, event)| RegionEvent {
            region,
            element: elements[region.0],
            event,
        })
        .collect();
    Ok(StepReport {
        time_secs,
        scroll,
        entries,
        events,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stage/scene.rs"]
mod tests;
