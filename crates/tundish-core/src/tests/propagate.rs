use crate::model::{Rate, Stage, Volume};
use crate::propagate::propagate;

fn chain(entry: Volume, rates: &[Rate]) -> Vec<Stage> {
    let mut stages = vec![Stage::new("Entry", entry, Some(rates[0]), 0)];
    for (i, rate) in rates.iter().enumerate().skip(1) {
        stages.push(Stage::new(
            format!("Stage {}", i + 1),
            Volume::Count(0),
            Some(*rate),
            i,
        ));
    }
    stages.push(Stage::new(
        "Terminal",
        Volume::Count(0),
        None,
        rates.len(),
    ));
    stages
}

#[test]
fn derives_each_stage_from_the_one_above() {
    let mut stages = chain(
        Volume::Count(1000),
        &[Rate::Percent(20.0), Rate::Percent(50.0)],
    );
    propagate(&mut stages);
    assert_eq!(stages[0].value, Volume::Count(1000));
    assert_eq!(stages[1].value, Volume::Count(200));
    assert_eq!(stages[2].value, Volume::Count(100));
}

#[test]
fn rounds_half_away_from_zero_once_per_stage() {
    let mut stages = chain(Volume::Count(25), &[Rate::Percent(50.0)]);
    propagate(&mut stages);
    assert_eq!(stages[1].value, Volume::Count(13));

    let mut stages = chain(Volume::Count(999), &[Rate::Percent(0.05)]);
    propagate(&mut stages);
    assert_eq!(stages[1].value, Volume::Count(0));

    // The rounded 13, not the fractional 12.5, feeds the next stage.
    let mut stages = chain(
        Volume::Count(25),
        &[Rate::Percent(50.0), Rate::Percent(100.0)],
    );
    propagate(&mut stages);
    assert_eq!(stages[2].value, Volume::Count(13));
}

#[test]
fn is_idempotent() {
    let mut stages = chain(
        Volume::Count(777),
        &[Rate::Percent(33.33), Rate::Percent(66.6)],
    );
    propagate(&mut stages);
    let once = stages.clone();
    propagate(&mut stages);
    assert_eq!(stages, once);
}

#[test]
fn indeterminate_entry_volume_poisons_the_whole_chain() {
    let mut stages = chain(
        Volume::Indeterminate,
        &[Rate::Percent(20.0), Rate::Percent(50.0)],
    );
    propagate(&mut stages);
    assert_eq!(stages[0].value, Volume::Indeterminate);
    assert_eq!(stages[1].value, Volume::Indeterminate);
    assert_eq!(stages[2].value, Volume::Indeterminate);
}

#[test]
fn indeterminate_rate_poisons_downstream_only() {
    let mut stages = chain(
        Volume::Count(1000),
        &[Rate::Percent(20.0), Rate::Indeterminate, Rate::Percent(50.0)],
    );
    propagate(&mut stages);
    assert_eq!(stages[1].value, Volume::Count(200));
    assert_eq!(stages[2].value, Volume::Indeterminate);
    assert_eq!(stages[3].value, Volume::Indeterminate);
}

#[test]
fn never_writes_the_entry_value_or_any_rate() {
    let mut stages = chain(
        Volume::Count(123),
        &[Rate::Percent(10.0), Rate::Percent(90.0)],
    );
    let rates_before: Vec<_> = stages.iter().map(|s| s.rate).collect();
    propagate(&mut stages);
    assert_eq!(stages[0].value, Volume::Count(123));
    let rates_after: Vec<_> = stages.iter().map(|s| s.rate).collect();
    assert_eq!(rates_before, rates_after);
}

#[test]
fn zero_rate_yields_zero_not_indeterminate() {
    let mut stages = chain(Volume::Count(1000), &[Rate::Percent(0.0)]);
    propagate(&mut stages);
    assert_eq!(stages[1].value, Volume::Count(0));
}
