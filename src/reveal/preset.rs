use std::fmt;
use std::str::FromStr;

use crate::animation::lerp::Lerp;
use crate::foundation::core::Vec2;
use crate::foundation::error::{UnveilError, UnveilResult};

/// Opacity, offset, and scale of one child at a point in its transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Offset from the laid-out position, in CSS pixels.
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
}

impl VisualState {
    /// Fully shown at the laid-out position.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    const fn hidden(x: f64, y: f64, scale: f64) -> Self {
        Self {
            opacity: 0.0,
            translate: Vec2::new(x, y),
            scale,
        }
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// The hidden and visible endpoints of a preset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PresetStates {
    /// State before reveal.
    pub hidden: VisualState,
    /// State after reveal.
    pub visible: VisualState,
}

/// Named reveal motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetKind {
    /// Fade in while rising 50px.
    FadeUp,
    /// Fade in while dropping 50px.
    FadeDown,
    /// Fade in from 50px left.
    FadeLeft,
    /// Fade in from 50px right.
    FadeRight,
    /// Fade in while growing from 80%.
    Scale,
    /// Fade in while rising 100px and growing from 90%.
    SlideUp,
}

impl PresetKind {
    /// Every preset, in table order.
    pub const ALL: [Self; 6] = [
        Self::FadeUp,
        Self::FadeDown,
        Self::FadeLeft,
        Self::FadeRight,
        Self::Scale,
        Self::SlideUp,
    ];

    /// Name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::FadeUp => "fadeUp",
            Self::FadeDown => "fadeDown",
            Self::FadeLeft => "fadeLeft",
            Self::FadeRight => "fadeRight",
            Self::Scale => "scale",
            Self::SlideUp => "slideUp",
        }
    }

    /// Hidden and visible states of this preset.
    pub fn states(self) -> PresetStates {
        let hidden = match self {
            Self::FadeUp => VisualState::hidden(0.0, 50.0, 1.0),
            Self::FadeDown => VisualState::hidden(0.0, -50.0, 1.0),
            Self::FadeLeft => VisualState::hidden(-50.0, 0.0, 1.0),
            Self::FadeRight => VisualState::hidden(50.0, 0.0, 1.0),
            Self::Scale => VisualState::hidden(0.0, 0.0, 0.8),
            Self::SlideUp => VisualState::hidden(0.0, 100.0, 0.9),
        };
        PresetStates {
            hidden,
            visible: VisualState::SHOWN,
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetKind {
    type Err = UnveilError;

    fn from_str(s: &str) -> UnveilResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnveilError::unknown_preset(s))
    }
}

/// Resolve a preset name into its `(hidden, visible)` pair.
///
/// Names are matched exactly; anything outside the six presets is a configuration error.
pub fn preset_lookup(name: &str) -> UnveilResult<(VisualState, VisualState)> {
    let states = name.parse::<PresetKind>()?.states();
    Ok((states.hidden, states.visible))
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/preset.rs"]
mod tests;
