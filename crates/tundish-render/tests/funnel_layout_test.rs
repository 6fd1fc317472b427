use tundish_core::parse_funnel;
use tundish_render::{LayoutOptions, layout_funnel};

const FOUR_STAGE: &str = r#"funnel title Adoption
"Visitors" : 1000
"Leads" : 20
"Opportunities" : 50
"Customers" : 10
revenue: 250
"#;

#[test]
fn bands_shrink_linearly_by_position() {
    let funnel = parse_funnel(FOUR_STAGE).unwrap();
    let layout = layout_funnel(&funnel, &LayoutOptions::default()).unwrap();

    assert_eq!(layout.sections.len(), 4);
    let widths: Vec<(f64, f64)> = layout
        .sections
        .iter()
        .map(|s| (s.top_width, s.bottom_width))
        .collect();
    assert_eq!(
        widths,
        vec![(100.0, 75.0), (75.0, 50.0), (50.0, 25.0), (25.0, 0.0)]
    );

    for (i, section) in layout.sections.iter().enumerate() {
        assert_eq!(section.height, 25.0);
        assert_eq!(section.top_y, 25.0 * i as f64);
        assert_eq!(section.text_x, 50.0);
        assert_eq!(section.text_y, 25.0 * i as f64 + 12.5);
    }
}

#[test]
fn sections_carry_resolved_values_and_stage_colors() {
    let funnel = parse_funnel(FOUR_STAGE).unwrap();
    let layout = layout_funnel(&funnel, &LayoutOptions::default()).unwrap();

    let values: Vec<Option<u64>> = layout.sections.iter().map(|s| s.value).collect();
    assert_eq!(
        values,
        vec![Some(1000), Some(200), Some(100), Some(10)]
    );

    let fills: Vec<&str> = layout.sections.iter().map(|s| s.fill.as_str()).collect();
    assert_eq!(fills, vec!["#E76F51", "#F4A261", "#E9C46A", "#2A9D8F"]);

    assert_eq!(layout.total_revenue, 2500.0);
}

#[test]
fn indeterminate_values_stay_unresolved_in_the_layout() {
    let funnel = parse_funnel("funnel\n\"Visitors\"\n\"Customers\" : 10\n").unwrap();
    let layout = layout_funnel(&funnel, &LayoutOptions::default()).unwrap();
    assert_eq!(layout.sections[0].value, None);
    assert_eq!(layout.sections[1].value, None);
    assert_eq!(layout.total_revenue, 0.0);
}

#[test]
fn title_grows_the_viewbox_upward() {
    let funnel = parse_funnel(FOUR_STAGE).unwrap();
    let layout = layout_funnel(&funnel, &LayoutOptions::default()).unwrap();
    assert_eq!(layout.title.as_deref(), Some("Adoption"));
    assert!(layout.bounds.min_y < 0.0);
    let anchor = layout.title_anchor.as_ref().unwrap();
    assert!(anchor.y < 0.0 && anchor.y > layout.bounds.min_y);

    let untitled = parse_funnel("funnel\n\"A\" : 10\n\"B\" : 50\n").unwrap();
    let layout = layout_funnel(&untitled, &LayoutOptions::default()).unwrap();
    assert_eq!(layout.bounds.min_y, 0.0);
    assert!(layout.title_anchor.is_none());
}

#[test]
fn custom_viewport_scales_the_bands() {
    let funnel = parse_funnel("funnel\n\"A\" : 10\n\"B\" : 50\n").unwrap();
    let options = LayoutOptions {
        viewport_width: 400.0,
        viewport_height: 300.0,
    };
    let layout = layout_funnel(&funnel, &options).unwrap();
    assert_eq!(layout.bounds.max_x, 400.0);
    assert_eq!(layout.bounds.max_y, 300.0);
    assert_eq!(layout.sections[0].top_width, 400.0);
    assert_eq!(layout.sections[0].bottom_width, 200.0);
    assert_eq!(layout.sections[0].height, 150.0);
}

#[test]
fn rejects_degenerate_viewports() {
    let funnel = parse_funnel("funnel\n\"A\" : 10\n\"B\" : 50\n").unwrap();
    for (w, h) in [(0.0, 100.0), (100.0, -5.0), (f64::NAN, 100.0)] {
        let options = LayoutOptions {
            viewport_width: w,
            viewport_height: h,
        };
        assert!(layout_funnel(&funnel, &options).is_err());
    }
}

#[test]
fn layout_serializes_to_json() {
    let funnel = parse_funnel(FOUR_STAGE).unwrap();
    let layout = layout_funnel(&funnel, &LayoutOptions::default()).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["sections"][0]["label"], "Visitors");
    assert_eq!(json["sections"][3]["bottom_width"], 0.0);
    assert_eq!(json["total_revenue"], 2500.0);
}
