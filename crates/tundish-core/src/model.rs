use serde::Serialize;

use crate::palette;

/// A funnel never has fewer stages than this.
pub const MIN_STAGES: usize = 2;
/// A funnel never has more stages than this.
pub const MAX_STAGES: usize = 10;

/// A stage volume: a resolved non-negative count, or the indeterminate state
/// an upstream blank/mid-edit field propagates downstream.
///
/// Serializes untagged: a bare number, or `null` when indeterminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Volume {
    Count(u64),
    Indeterminate,
}

impl Volume {
    pub fn count(self) -> Option<u64> {
        match self {
            Self::Count(v) => Some(v),
            Self::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

/// An outgoing conversion rate in percent, kept inside [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rate {
    Percent(f64),
    Indeterminate,
}

impl Rate {
    /// Clamps into the valid percent range; non-finite input degrades to the
    /// indeterminate state.
    pub fn from_percent(pct: f64) -> Self {
        if pct.is_finite() {
            Self::Percent(pct.clamp(0.0, 100.0))
        } else {
            Self::Indeterminate
        }
    }

    pub fn percent(self) -> Option<f64> {
        match self {
            Self::Percent(p) => Some(p),
            Self::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

/// A non-negative money amount (revenue per conversion).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Value(f64),
    Indeterminate,
}

impl Amount {
    /// Negative input clamps to 0; non-finite input degrades to the
    /// indeterminate state.
    pub fn from_value(v: f64) -> Self {
        if v.is_finite() {
            Self::Value(v.max(0.0))
        } else {
            Self::Indeterminate
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

/// One funnel step: a volume, an outgoing conversion rate (absent on the
/// terminal stage), and a fixed presentation color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub name: String,
    pub value: Volume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Rate>,
    pub color: String,
}

impl Stage {
    pub(crate) fn new(
        name: impl Into<String>,
        value: Volume,
        rate: Option<Rate>,
        index: usize,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            rate,
            color: palette::stage_color(index).to_string(),
        }
    }

    /// The terminal stage is the one with no outgoing rate.
    pub fn is_terminal(&self) -> bool {
        self.rate.is_none()
    }
}

/// Serializable view of a funnel with all derived state resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "accTitle", skip_serializing_if = "Option::is_none")]
    pub acc_title: Option<String>,
    #[serde(rename = "accDescr", skip_serializing_if = "Option::is_none")]
    pub acc_descr: Option<String>,
    pub stages: Vec<Stage>,
    #[serde(rename = "revenuePerConversion")]
    pub revenue_per_conversion: Amount,
    /// Display form: 0 when either operand is indeterminate.
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}
