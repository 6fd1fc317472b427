use tracing::debug;

use crate::input;
use crate::model::{Amount, FunnelSnapshot, MAX_STAGES, MIN_STAGES, Rate, Stage, Volume};
use crate::propagate::{any_significant_shift, propagate, resolved_values};

/// One user edit, carrying the raw text of the field it came from.
///
/// Field edits go through the parsing rules in [`crate::input`]; the typed
/// setters on [`Funnel`] are the equivalent surface for callers that already
/// hold a parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Name { index: usize, text: String },
    EntryVolume { index: usize, input: String },
    Rate { index: usize, input: String },
    RevenuePerConversion { input: String },
    AddStage,
    RemoveStage { index: usize },
}

/// What applying an edit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOutcome {
    /// False when the edit was rejected as a structural no-op (derived field,
    /// stage-count limit, protected index).
    pub applied: bool,
    /// True when some resolved stage value shifted by more than 5%; consumers
    /// use this to gate a cosmetic transition, nothing else.
    pub significant: bool,
}

/// The ordered stage sequence plus the revenue-per-conversion scalar.
///
/// Every mutation ends with a full propagation pass, so derived stage values
/// and the revenue projection are always consistent with the authoritative
/// inputs (the entry volume and the rate chain).
#[derive(Debug, Clone, PartialEq)]
pub struct Funnel {
    title: Option<String>,
    acc_title: Option<String>,
    acc_descr: Option<String>,
    stages: Vec<Stage>,
    revenue_per_conversion: Amount,
}

impl Default for Funnel {
    fn default() -> Self {
        Self::new()
    }
}

impl Funnel {
    /// A minimal two-stage funnel: 1000 visitors converting at 20%.
    pub fn new() -> Self {
        Self::from_parts(
            None,
            None,
            None,
            vec![
                Stage::new("Visitors", Volume::Count(1000), Some(Rate::Percent(20.0)), 0),
                Stage::new("Customers", Volume::Count(0), None, 1),
            ],
            Amount::Value(100.0),
        )
    }

    pub(crate) fn from_parts(
        title: Option<String>,
        acc_title: Option<String>,
        acc_descr: Option<String>,
        stages: Vec<Stage>,
        revenue_per_conversion: Amount,
    ) -> Self {
        debug_assert!((MIN_STAGES..=MAX_STAGES).contains(&stages.len()));
        let mut funnel = Self {
            title,
            acc_title,
            acc_descr,
            stages,
            revenue_per_conversion,
        };
        propagate(&mut funnel.stages);
        funnel
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn acc_title(&self) -> Option<&str> {
        self.acc_title.as_deref()
    }

    pub fn acc_descr(&self) -> Option<&str> {
        self.acc_descr.as_deref()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn revenue_per_conversion(&self) -> Amount {
        self.revenue_per_conversion
    }

    fn terminal_index(&self) -> usize {
        self.stages.len() - 1
    }

    /// Applies one raw field edit, then recomputes all derived state.
    pub fn apply(&mut self, edit: &Edit) -> EditOutcome {
        match edit {
            Edit::Name { index, text } => self.set_name(*index, text),
            Edit::EntryVolume { index, input } => {
                if *index != 0 {
                    // Derived, not authoritative.
                    return EditOutcome::default();
                }
                self.set_entry_volume(input::parse_volume_field(input))
            }
            Edit::Rate { index, input } => self.set_rate(*index, input::parse_rate_field(input)),
            Edit::RevenuePerConversion { input } => {
                self.set_revenue_per_conversion(input::parse_amount_field(input))
            }
            Edit::AddStage => self.add_stage(),
            Edit::RemoveStage { index } => self.remove_stage(*index),
        }
    }

    /// Sets a stage label, trimmed of surrounding whitespace. Labels do not
    /// feed propagation, so resolved values cannot shift.
    pub fn set_name(&mut self, index: usize, text: &str) -> EditOutcome {
        let Some(stage) = self.stages.get_mut(index) else {
            return EditOutcome::default();
        };
        stage.name = text.trim().to_string();
        EditOutcome {
            applied: true,
            significant: false,
        }
    }

    /// Sets the entry stage's volume, the only independently user-set volume.
    pub fn set_entry_volume(&mut self, volume: Volume) -> EditOutcome {
        let before = resolved_values(&self.stages);
        self.stages[0].value = volume;
        self.recompute(&before)
    }

    /// Sets an outgoing conversion rate. The terminal stage has none, so the
    /// terminal index (and anything past it) is a no-op.
    pub fn set_rate(&mut self, index: usize, rate: Rate) -> EditOutcome {
        if index >= self.terminal_index() {
            return EditOutcome::default();
        }
        let rate = match rate {
            Rate::Percent(p) => Rate::from_percent(p),
            Rate::Indeterminate => Rate::Indeterminate,
        };
        let before = resolved_values(&self.stages);
        self.stages[index].rate = Some(rate);
        self.recompute(&before)
    }

    pub fn set_revenue_per_conversion(&mut self, amount: Amount) -> EditOutcome {
        self.revenue_per_conversion = match amount {
            Amount::Value(v) => Amount::from_value(v),
            Amount::Indeterminate => Amount::Indeterminate,
        };
        // Revenue does not feed stage propagation.
        EditOutcome {
            applied: true,
            significant: false,
        }
    }

    /// Inserts a stage immediately before the terminal stage: positional
    /// default name, 100% rate, next palette color. No-op at the stage cap.
    pub fn add_stage(&mut self) -> EditOutcome {
        if self.stages.len() >= MAX_STAGES {
            return EditOutcome::default();
        }
        let before = resolved_values(&self.stages);
        let index = self.terminal_index();
        let color_index = self.stages.len();
        self.stages.insert(
            index,
            Stage::new(
                format!("Stage {}", index + 1),
                Volume::Count(0),
                Some(Rate::Percent(100.0)),
                color_index,
            ),
        );
        debug!(stages = self.stages.len(), "stage added");
        self.recompute(&before)
    }

    /// Removes a middle stage. The entry stage, the terminal stage, and the
    /// two-stage minimum are protected; those requests are no-ops.
    pub fn remove_stage(&mut self, index: usize) -> EditOutcome {
        if self.stages.len() <= MIN_STAGES || index == 0 || index >= self.terminal_index() {
            return EditOutcome::default();
        }
        let before = resolved_values(&self.stages);
        let removed = self.stages.remove(index);
        debug!(stage = %removed.name, stages = self.stages.len(), "stage removed");
        self.recompute(&before)
    }

    fn recompute(&mut self, before: &[Volume]) -> EditOutcome {
        propagate(&mut self.stages);
        EditOutcome {
            applied: true,
            significant: any_significant_shift(before, &self.stages),
        }
    }

    /// Projected revenue, when the terminal volume and the per-conversion
    /// amount are both determinate.
    pub fn total_revenue(&self) -> Option<f64> {
        let volume = self.stages[self.terminal_index()].value.count()?;
        let amount = self.revenue_per_conversion.value()?;
        Some(volume as f64 * amount)
    }

    /// Display form of [`Funnel::total_revenue`]: indeterminate reads as 0.
    pub fn total_revenue_or_zero(&self) -> f64 {
        self.total_revenue().unwrap_or(0.0)
    }

    pub fn snapshot(&self) -> FunnelSnapshot {
        FunnelSnapshot {
            title: self.title.clone(),
            acc_title: self.acc_title.clone(),
            acc_descr: self.acc_descr.clone(),
            stages: self.stages.clone(),
            revenue_per_conversion: self.revenue_per_conversion,
            total_revenue: self.total_revenue_or_zero(),
        }
    }
}
