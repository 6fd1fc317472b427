use crate::*;

#[test]
fn total_revenue_is_terminal_volume_times_amount() {
    let mut funnel = Funnel::new();
    funnel.set_revenue_per_conversion(Amount::Value(2.5));
    // Terminal volume is 200.
    assert_eq!(funnel.total_revenue(), Some(500.0));
    assert_eq!(funnel.total_revenue_or_zero(), 500.0);
}

#[test]
fn indeterminate_amount_projects_as_zero() {
    let mut funnel = Funnel::new();
    funnel.apply(&Edit::RevenuePerConversion {
        input: "not a number".to_string(),
    });
    assert_eq!(funnel.total_revenue(), None);
    assert_eq!(funnel.total_revenue_or_zero(), 0.0);
}

#[test]
fn indeterminate_terminal_volume_projects_as_zero() {
    let mut funnel = Funnel::new();
    funnel.set_entry_volume(Volume::Indeterminate);
    assert_eq!(funnel.total_revenue(), None);
    assert_eq!(funnel.total_revenue_or_zero(), 0.0);
    // The revenue amount itself is untouched.
    assert_eq!(funnel.revenue_per_conversion(), Amount::Value(100.0));
}

#[test]
fn revenue_recomputes_after_every_stage_edit() {
    let mut funnel = Funnel::new();
    funnel.set_entry_volume(Volume::Count(500));
    // 500 * 20% = 100 conversions at 100 each.
    assert_eq!(funnel.total_revenue(), Some(10_000.0));

    funnel.set_rate(0, Rate::Percent(50.0));
    assert_eq!(funnel.total_revenue(), Some(25_000.0));
}

#[test]
fn zero_conversions_mean_zero_revenue() {
    let mut funnel = Funnel::new();
    funnel.set_rate(0, Rate::Percent(0.0));
    assert_eq!(funnel.total_revenue(), Some(0.0));
}
