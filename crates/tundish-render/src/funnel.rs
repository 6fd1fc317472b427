use crate::model::{Bounds, FunnelDiagramLayout, FunnelSectionLayout, LayoutPoint};
use crate::{Error, LayoutOptions, Result};
use tundish_core::Funnel;

/// Lays out the funnel as a vertical stack of trapezoid bands: equal heights,
/// widths shrinking linearly by position (not by value), terminal band
/// narrowing to a point.
pub fn layout_funnel_diagram(
    funnel: &Funnel,
    options: &LayoutOptions,
) -> Result<FunnelDiagramLayout> {
    let w = options.viewport_width;
    let h = options.viewport_height;
    if !(w.is_finite() && w > 0.0 && h.is_finite() && h > 0.0) {
        return Err(Error::InvalidLayout {
            message: format!("viewport must be positive, got {w}x{h}"),
        });
    }

    let stages = funnel.stages();
    let n = stages.len() as f64;
    let section_height = h / n;

    let mut sections = Vec::with_capacity(stages.len());
    for (i, stage) in stages.iter().enumerate() {
        let top_y = (i as f64) * section_height;
        sections.push(FunnelSectionLayout {
            label: stage.name.clone(),
            value: stage.value.count(),
            top_y,
            height: section_height,
            top_width: w * (n - i as f64) / n,
            bottom_width: w * (n - (i as f64 + 1.0)) / n,
            text_x: w / 2.0,
            text_y: top_y + section_height / 2.0,
            fill: stage.color.clone(),
        });
    }

    // A title sits above the bands, so it grows the viewBox upward.
    let (min_y, title_anchor) = match funnel.title() {
        Some(_) => (
            -0.14 * h,
            Some(LayoutPoint {
                x: w / 2.0,
                y: -0.05 * h,
            }),
        ),
        None => (0.0, None),
    };

    Ok(FunnelDiagramLayout {
        title: funnel.title().map(str::to_string),
        title_anchor,
        acc_title: funnel.acc_title().map(str::to_string),
        acc_descr: funnel.acc_descr().map(str::to_string),
        bounds: Bounds {
            min_x: 0.0,
            min_y,
            max_x: w,
            max_y: h,
        },
        sections,
        total_revenue: funnel.total_revenue_or_zero(),
    })
}
