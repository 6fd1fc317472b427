use crate::*;
use serde_json::json;

#[test]
fn default_funnel_is_two_stages_with_derived_terminal_value() {
    let funnel = Funnel::new();
    let stages = funnel.stages();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].name, "Visitors");
    assert_eq!(stages[0].value, Volume::Count(1000));
    assert_eq!(stages[0].rate, Some(Rate::Percent(20.0)));
    assert_eq!(stages[1].name, "Customers");
    assert_eq!(stages[1].value, Volume::Count(200));
    assert!(stages[1].is_terminal());
    assert_eq!(funnel.revenue_per_conversion(), Amount::Value(100.0));
}

#[test]
fn palette_cycles_by_position() {
    assert_eq!(palette::stage_color(0), "#E76F51");
    assert_eq!(palette::stage_color(3), "#2A9D8F");
    assert_eq!(palette::stage_color(4), "#E76F51");
    assert_eq!(palette::stage_color(9), "#F4A261");
}

#[test]
fn indeterminate_serializes_as_null() {
    assert_eq!(serde_json::to_value(Volume::Count(42)).unwrap(), json!(42));
    assert_eq!(
        serde_json::to_value(Volume::Indeterminate).unwrap(),
        json!(null)
    );
    assert_eq!(
        serde_json::to_value(Rate::Percent(12.5)).unwrap(),
        json!(12.5)
    );
    assert_eq!(
        serde_json::to_value(Rate::Indeterminate).unwrap(),
        json!(null)
    );
}

#[test]
fn snapshot_json_shape() {
    let funnel = Funnel::new();
    assert_eq!(
        serde_json::to_value(funnel.snapshot()).unwrap(),
        json!({
            "stages": [
                { "name": "Visitors", "value": 1000, "rate": 20.0, "color": "#E76F51" },
                { "name": "Customers", "value": 200, "color": "#F4A261" }
            ],
            "revenuePerConversion": 100.0,
            "totalRevenue": 20000.0
        })
    );
}

#[test]
fn rate_constructor_clamps_and_degrades() {
    assert_eq!(Rate::from_percent(150.0), Rate::Percent(100.0));
    assert_eq!(Rate::from_percent(-5.0), Rate::Percent(0.0));
    assert_eq!(Rate::from_percent(f64::NAN), Rate::Indeterminate);
    assert_eq!(Rate::from_percent(f64::INFINITY), Rate::Indeterminate);
}

#[test]
fn amount_constructor_clamps_negative_to_zero() {
    assert_eq!(Amount::from_value(-12.0), Amount::Value(0.0));
    assert_eq!(Amount::from_value(49.99), Amount::Value(49.99));
    assert_eq!(Amount::from_value(f64::NAN), Amount::Indeterminate);
}
