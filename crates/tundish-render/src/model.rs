use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// One trapezoid band of the funnel, in viewport coordinates. Widths are
/// centered on the viewport's vertical midline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelSectionLayout {
    pub label: String,
    /// Resolved volume, when determinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    pub top_y: f64,
    pub height: f64,
    pub top_width: f64,
    pub bottom_width: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelDiagramLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_anchor: Option<LayoutPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acc_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acc_descr: Option<String>,
    pub bounds: Bounds,
    pub sections: Vec<FunnelSectionLayout>,
    /// Display form of the projected revenue (0 when indeterminate).
    pub total_revenue: f64,
}
