use crate::animation::ease::Ease;
use crate::foundation::core::is_non_negative_secs;
use crate::foundation::error::{UnveilError, UnveilResult};
use crate::reveal::preset::PresetKind;

/// Whether a region stays revealed after scrolling away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Reveal on first intersection and never hide again.
    Once,
    /// Follow the live intersection; hide again when scrolled away.
    WhileVisible,
}

/// Default per-child stagger.
pub const DEFAULT_STAGGER_SECS: f64 = 0.1;
/// Default per-child duration.
pub const DEFAULT_DURATION_SECS: f64 = 0.6;

/// Validated reveal timing and motion for one guarded region.
///
/// Built once and shared by reference; schedules are computed from it without mutation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealConfig {
    preset: PresetKind,
    policy: RevealPolicy,
    stagger_secs: f64,
    base_delay_secs: f64,
    duration_secs: f64,
    ease: Ease,
}

impl RevealConfig {
    /// Config with default timing. The policy has no default and must be chosen here.
    pub fn new(preset: PresetKind, policy: RevealPolicy) -> Self {
        Self {
            preset,
            policy,
            stagger_secs: DEFAULT_STAGGER_SECS,
            base_delay_secs: 0.0,
            duration_secs: DEFAULT_DURATION_SECS,
            ease: Ease::default(),
        }
    }

    /// Set the delay added per successive child.
    pub fn with_stagger(mut self, secs: f64) -> Self {
        self.stagger_secs = secs;
        self
    }

    /// Set the delay before the first child starts.
    pub fn with_base_delay(mut self, secs: f64) -> Self {
        self.base_delay_secs = secs;
        self
    }

    /// Set the per-child transition duration.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Set the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Motion preset.
    pub fn preset(&self) -> PresetKind {
        self.preset
    }

    /// Reveal policy.
    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    /// Per-child stagger in seconds.
    pub fn stagger_secs(&self) -> f64 {
        self.stagger_secs
    }

    /// Delay before the first child, in seconds.
    pub fn base_delay_secs(&self) -> f64 {
        self.base_delay_secs
    }

    /// Per-child duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Easing curve.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Check timing values.
    pub fn validate(&self) -> UnveilResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(UnveilError::reveal_config(format!(
                "duration must be > 0 seconds, got {}",
                self.duration_secs
            )));
        }
        if !is_non_negative_secs(self.stagger_secs) {
            return Err(UnveilError::reveal_config(format!(
                "stagger must be >= 0 seconds, got {}",
                self.stagger_secs
            )));
        }
        if !is_non_negative_secs(self.base_delay_secs) {
            return Err(UnveilError::reveal_config(format!(
                "base delay must be >= 0 seconds, got {}",
                self.base_delay_secs
            )));
        }
        if !self.ease.is_valid() {
            return Err(UnveilError::reveal_config(
                "ease control point x values must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Declarative reveal settings, as written in scene files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealConfigDef {
    /// Preset name, see [`PresetKind`].
    pub preset: String,
    /// Required reveal policy.
    pub policy: RevealPolicy,
    /// Per-child stagger in seconds.
    #[serde(default = "default_stagger")]
    pub stagger_secs: f64,
    /// Delay before the first child, in seconds.
    #[serde(default)]
    pub base_delay_secs: f64,
    /// Per-child duration in seconds.
    #[serde(default = "default_duration")]
    pub duration_secs: f64,
    /// Easing curve.
    #[serde(default)]
    pub ease: Ease,
}

fn default_stagger() -> f64 {
    DEFAULT_STAGGER_SECS
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECS
}

impl TryFrom<&RevealConfigDef> for RevealConfig {
    type Error = UnveilError;

    fn try_from(def: &RevealConfigDef) -> UnveilResult<Self> {
        let preset: PresetKind = def.preset.parse()?;
        let cfg = RevealConfig::new(preset, def.policy)
            .with_stagger(def.stagger_secs)
            .with_base_delay(def.base_delay_secs)
            .with_duration(def.duration_secs)
            .with_ease(def.ease);
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/config.rs"]
mod tests;
