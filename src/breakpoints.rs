//! Responsive style rules from a single breakpoint table.
//!
//! The site declares its viewport thresholds once, as an ordered table of
//! `label → pixels`. Every stylesheet rule that should only apply on some
//! screens asks the [`BreakpointStyleEngine`] for that label instead of
//! hardcoding a pixel value:
//!
//! ```text
//! phoneOnly          599   → @media (max-width: 37.4375em)
//! tabletPortraitUp   600   → @media (min-width: 37.5em)
//! tabletLandscapeUp  900   → @media (min-width: 56.25em)
//! desktopUp         1200   → @media (min-width: 75em)
//! bigDesktopUp      1800   → @media (min-width: 112.5em)
//! ```
//!
//! Exactly one label is the *upper bound* (`max-width`, the phone ceiling);
//! every other label is a *lower bound* (`min-width`). Thresholds are
//! converted to `em` by dividing by `pixels_per_unit` (16 by default), so
//! rules follow the user's font size rather than device pixels.
//!
//! Style fragments are opaque: the engine wraps them in a conditional block
//! and never looks inside.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pixels per `em` used when the config does not say otherwise.
pub const DEFAULT_PIXELS_PER_UNIT: u32 = 16;

/// Label of the breakpoint that acts as a `max-width` ceiling by default.
pub const DEFAULT_UPPER_BOUND: &str = "phoneOnly";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BreakpointError {
    #[error("Unknown breakpoint: {0}")]
    Unknown(String),
    #[error("Duplicate breakpoint label: {0}")]
    DuplicateLabel(String),
    #[error("Breakpoint {0} must have a threshold above zero")]
    ZeroThreshold(String),
    #[error("pixels_per_unit must be above zero")]
    ZeroUnit,
    #[error("Upper-bound breakpoint {0} is not in the table")]
    MissingUpperBound(String),
}

/// One row of the breakpoint table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreakpointEntry {
    pub label: String,
    pub pixels: u32,
}

/// Ordered `label → pixels` table. Declared order is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointTable(Vec<BreakpointEntry>);

impl BreakpointTable {
    pub fn new(entries: Vec<BreakpointEntry>) -> Self {
        Self(entries)
    }

    /// Build a table from `(label, pixels)` pairs, keeping their order.
    pub fn from_pairs(pairs: &[(&str, u32)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|&(label, pixels)| BreakpointEntry {
                    label: label.to_string(),
                    pixels,
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[BreakpointEntry] {
        &self.0
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.0.iter().find(|e| e.label == label).map(|e| e.pixels)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::from_pairs(&[
            ("phoneOnly", 599),
            ("tabletPortraitUp", 600),
            ("tabletLandscapeUp", 900),
            ("desktopUp", 1200),
            ("bigDesktopUp", 1800),
        ])
    }
}

/// Which side of the threshold a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFeature {
    /// Applies at and above the threshold.
    MinWidth,
    /// Applies at and below the threshold.
    MaxWidth,
}

impl MediaFeature {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaFeature::MinWidth => "min-width",
            MediaFeature::MaxWidth => "max-width",
        }
    }
}

/// A precomputed media condition such as `(max-width: 37.4375em)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCondition {
    pub feature: MediaFeature,
    /// Threshold in `em`.
    pub ems: f64,
}

impl fmt::Display for MediaCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {}em)", self.feature.as_str(), self.ems)
    }
}

/// Turns breakpoint labels into conditional style composers.
///
/// All conditions are computed in [`BreakpointStyleEngine::new`]; lookups
/// afterwards only borrow them.
#[derive(Debug, Clone)]
pub struct BreakpointStyleEngine {
    conditions: Vec<(String, MediaCondition)>,
}

impl BreakpointStyleEngine {
    pub fn new(
        table: &BreakpointTable,
        pixels_per_unit: u32,
        upper_bound: &str,
    ) -> Result<Self, BreakpointError> {
        if pixels_per_unit == 0 {
            return Err(BreakpointError::ZeroUnit);
        }
        if table.get(upper_bound).is_none() {
            return Err(BreakpointError::MissingUpperBound(upper_bound.to_string()));
        }

        let mut conditions: Vec<(String, MediaCondition)> =
            Vec::with_capacity(table.entries().len());
        for entry in table.entries() {
            if entry.pixels == 0 {
                return Err(BreakpointError::ZeroThreshold(entry.label.clone()));
            }
            if conditions.iter().any(|(label, _)| *label == entry.label) {
                return Err(BreakpointError::DuplicateLabel(entry.label.clone()));
            }
            let feature = if entry.label == upper_bound {
                MediaFeature::MaxWidth
            } else {
                MediaFeature::MinWidth
            };
            let ems = f64::from(entry.pixels) / f64::from(pixels_per_unit);
            conditions.push((entry.label.clone(), MediaCondition { feature, ems }));
        }

        Ok(Self { conditions })
    }

    /// Labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|(label, _)| label.as_str())
    }

    /// Composer for `label`, or [`BreakpointError::Unknown`] if the table
    /// has no such breakpoint.
    pub fn for_label(&self, label: &str) -> Result<StyleComposer<'_>, BreakpointError> {
        self.conditions
            .iter()
            .find(|(l, _)| l == label)
            .map(|(label, condition)| StyleComposer { label, condition })
            .ok_or_else(|| BreakpointError::Unknown(label.to_string()))
    }
}

/// Wraps style fragments in the media condition of one breakpoint.
#[derive(Debug, Clone, Copy)]
pub struct StyleComposer<'a> {
    label: &'a str,
    condition: &'a MediaCondition,
}

impl<'a> StyleComposer<'a> {
    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn condition(&self) -> &'a MediaCondition {
        self.condition
    }

    pub fn wrap(&self, fragment: impl Into<String>) -> ConditionalFragment {
        ConditionalFragment {
            condition: self.condition.clone(),
            body: fragment.into(),
        }
    }
}

/// A style fragment guarded by a media condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFragment {
    condition: MediaCondition,
    body: String,
}

impl ConditionalFragment {
    pub fn condition(&self) -> &MediaCondition {
        &self.condition
    }

    /// The wrapped fragment, exactly as it was passed in.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConditionalFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@media {} {{\n{}\n}}", self.condition, self.body)
    }
}
