use crate::model::{Rate, Stage, Volume};

/// Relative threshold above which a stage-value shift is worth animating.
pub(crate) const SIGNIFICANT_SHIFT_RATIO: f64 = 0.05;

/// Recomputes `value[i]` for every `i > 0` from the entry volume and the rate
/// chain: `value[i] = round(value[i-1] * rate[i-1] / 100)`, or indeterminate
/// when either operand is.
///
/// Only the entry value and the rates are read, never a downstream value, so
/// the pass is a fixed point: running it twice changes nothing. The rounding
/// (half away from zero) happens once per stage.
pub fn propagate(stages: &mut [Stage]) {
    for i in 1..stages.len() {
        let derived = match (stages[i - 1].value, stages[i - 1].rate) {
            (Volume::Count(v), Some(Rate::Percent(r))) => {
                Volume::Count(((v as f64) * r / 100.0).round() as u64)
            }
            _ => Volume::Indeterminate,
        };
        stages[i].value = derived;
    }
}

pub(crate) fn resolved_values(stages: &[Stage]) -> Vec<Volume> {
    stages.iter().map(|s| s.value).collect()
}

/// True when any stage's resolved value moved by more than 5% of its previous
/// resolved value. Pairs with an indeterminate side never flag; a zero
/// baseline flags any increase (the threshold itself is 0).
pub(crate) fn any_significant_shift(before: &[Volume], stages: &[Stage]) -> bool {
    before
        .iter()
        .zip(stages)
        .any(|(prev, stage)| match (prev, stage.value) {
            (Volume::Count(a), Volume::Count(b)) => {
                let a = *a as f64;
                (b as f64 - a).abs() > a * SIGNIFICANT_SHIFT_RATIO
            }
            _ => false,
        })
}
