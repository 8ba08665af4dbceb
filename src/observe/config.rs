use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Insets, Rect};
use crate::foundation::error::{UnveilError, UnveilResult};

/// Visible fraction of the target required to count as intersecting, when not overridden.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Root margin applied on every side when not overridden.
pub const DEFAULT_ROOT_MARGIN_PX: f64 = 50.0;

/// One side of a root margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginLength {
    /// Absolute offset in CSS pixels.
    Px(f64),
    /// Percentage of the root's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginLength {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

impl FromStr for MarginLength {
    type Err = UnveilError;

    fn from_str(s: &str) -> UnveilResult<Self> {
        let s = s.trim();
        let (num, percent) = if let Some(n) = s.strip_suffix("px") {
            (n, false)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, true)
        } else if s == "0" {
            return Ok(Self::Px(0.0));
        } else {
            return Err(UnveilError::observation_config(format!(
                "root margin length '{s}' must end in 'px' or '%'"
            )));
        };

        let v: f64 = num.parse().map_err(|_| {
            UnveilError::observation_config(format!("root margin length '{s}' is not a number"))
        })?;
        if !v.is_finite() {
            return Err(UnveilError::observation_config(format!(
                "root margin length '{s}' must be finite"
            )));
        }
        Ok(if percent {
            Self::Percent(v)
        } else {
            Self::Px(v)
        })
    }
}

/// Offsets that grow (positive) or shrink (negative) the root before intersection testing.
///
/// Parsed from the CSS `margin` shorthand: one to four lengths in `top right bottom left`
/// order, with missing sides mirrored from their opposite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Top offset.
    pub top: MarginLength,
    /// Right offset.
    pub right: MarginLength,
    /// Bottom offset.
    pub bottom: MarginLength,
    /// Left offset.
    pub left: MarginLength,
}

impl RootMargin {
    /// The same length on every side.
    pub fn uniform(len: MarginLength) -> Self {
        Self {
            top: len,
            right: len,
            bottom: len,
            left: len,
        }
    }

    /// No margin at all.
    pub fn zero() -> Self {
        Self::uniform(MarginLength::Px(0.0))
    }

    /// Resolve percentages against `root`, returning outward insets.
    pub fn resolve(&self, root: Rect) -> Insets {
        let w = root.width();
        let h = root.height();
        Insets::new(
            self.left.resolve(w),
            self.top.resolve(h),
            self.right.resolve(w),
            self.bottom.resolve(h),
        )
    }

    /// Apply this margin to `root`, producing the rect used for intersection tests.
    pub fn expand(&self, root: Rect) -> Rect {
        let i = self.resolve(root);
        Rect::new(root.x0 - i.x0, root.y0 - i.y0, root.x1 + i.x1, root.y1 + i.y1)
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::uniform(MarginLength::Px(DEFAULT_ROOT_MARGIN_PX))
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = UnveilError;

    fn from_str(s: &str) -> UnveilResult<Self> {
        let parts = s
            .split_whitespace()
            .map(MarginLength::from_str)
            .collect::<UnveilResult<Vec<_>>>()?;

        let (top, right, bottom, left) = match parts.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            [] => {
                return Err(UnveilError::observation_config("root margin must not be empty"));
            }
            _ => {
                return Err(UnveilError::observation_config(format!(
                    "root margin '{}' has more than four lengths",
                    s.trim()
                )));
            }
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl serde::Serialize for RootMargin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RootMargin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How a guarded element is tested against its root.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObservationConfig {
    /// Fraction of the target's area in `[0, 1]` that must be visible.
    ///
    /// `0.0` means any contact, including touching edges.
    pub threshold: f64,
    /// Margin applied to the root before testing.
    pub root_margin: RootMargin,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
        }
    }
}

impl ObservationConfig {
    /// Config with the given threshold and the default margin.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Check the threshold range.
    pub fn validate(&self) -> UnveilResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(UnveilError::observation_config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/config.rs"]
mod tests;
