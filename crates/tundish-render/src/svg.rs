use std::fmt::Write as _;

use crate::model::FunnelDiagramLayout;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// Optional diagram id used for scoped CSS and accessibility ids.
    pub diagram_id: Option<String>,
    /// When false, only the colored bands are drawn.
    pub include_labels: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 0.0,
            diagram_id: None,
            include_labels: true,
        }
    }
}

pub fn render_funnel_svg(layout: &FunnelDiagramLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("tundish");
    let diagram_id_esc = escape_xml(diagram_id);

    let pad = options.viewbox_padding.max(0.0);
    let vb_min_x = layout.bounds.min_x - pad;
    let vb_min_y = layout.bounds.min_y - pad;
    let vb_w = (layout.bounds.max_x - layout.bounds.min_x) + pad * 2.0;
    let vb_h = (layout.bounds.max_y - layout.bounds.min_y) + pad * 2.0;

    let aria = match (layout.acc_title.as_deref(), layout.acc_descr.as_deref()) {
        (Some(_), Some(_)) => format!(
            r#" aria-describedby="chart-desc-{id}" aria-labelledby="chart-title-{id}""#,
            id = diagram_id_esc
        ),
        (Some(_), None) => format!(
            r#" aria-labelledby="chart-title-{id}""#,
            id = diagram_id_esc
        ),
        (None, Some(_)) => format!(
            r#" aria-describedby="chart-desc-{id}""#,
            id = diagram_id_esc
        ),
        (None, None) => String::new(),
    };

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{diagram_id_esc}" width="100%" xmlns="http://www.w3.org/2000/svg" viewBox="{minx} {miny} {w} {h}" style="max-width: {maxw}px; background-color: white;" role="graphics-document document" aria-roledescription="funnel"{aria}>"#,
        minx = fmt(vb_min_x),
        miny = fmt(vb_min_y),
        w = fmt(vb_w.max(1.0)),
        h = fmt(vb_h.max(1.0)),
        maxw = fmt(vb_w.max(1.0)),
    );

    if let Some(t) = layout.acc_title.as_deref() {
        let _ = write!(
            &mut out,
            r#"<title id="chart-title-{id}">{text}</title>"#,
            id = diagram_id_esc,
            text = escape_xml(t)
        );
    }
    if let Some(d) = layout.acc_descr.as_deref() {
        let _ = write!(
            &mut out,
            r#"<desc id="chart-desc-{id}">{text}</desc>"#,
            id = diagram_id_esc,
            text = escape_xml(d)
        );
    }

    let _ = write!(&mut out, "<style>{}</style>", funnel_css(diagram_id));

    let center_x = (layout.bounds.min_x + layout.bounds.max_x) / 2.0;

    out.push_str(r#"<g class="funnelSections">"#);
    for section in &layout.sections {
        let y0 = section.top_y;
        let y1 = section.top_y + section.height;
        let d = format!(
            "M{x0},{y0}L{x1},{y0}L{x2},{y1}L{x3},{y1}Z",
            x0 = fmt(center_x - section.top_width / 2.0),
            x1 = fmt(center_x + section.top_width / 2.0),
            x2 = fmt(center_x + section.bottom_width / 2.0),
            x3 = fmt(center_x - section.bottom_width / 2.0),
            y0 = fmt(y0),
            y1 = fmt(y1),
        );
        let _ = write!(
            &mut out,
            r#"<path d="{d}" fill="{fill}" class="funnelSection"/>"#,
            d = d,
            fill = escape_xml(&section.fill)
        );
    }
    out.push_str("</g>");

    if options.include_labels {
        out.push_str(r#"<g class="funnelLabels">"#);
        for section in &layout.sections {
            let text = match section.value {
                Some(v) => format!("{}: {v}", section.label),
                None => section.label.clone(),
            };
            let _ = write!(
                &mut out,
                r#"<text class="funnelLabel" x="{x}" y="{y}">{text}</text>"#,
                x = fmt(section.text_x),
                y = fmt(section.text_y),
                text = escape_xml(&text)
            );
        }
        out.push_str("</g>");

        if let (Some(title), Some(anchor)) = (layout.title.as_deref(), &layout.title_anchor) {
            let _ = write!(
                &mut out,
                r#"<text class="funnelTitle" x="{x}" y="{y}">{text}</text>"#,
                x = fmt(anchor.x),
                y = fmt(anchor.y),
                text = escape_xml(title)
            );
        }
    }

    out.push_str("</svg>");
    out
}

fn funnel_css(diagram_id: &str) -> String {
    let id = escape_xml(diagram_id);
    format!(
        "#{id} .funnelSection{{stroke:white;stroke-width:0.3;}}\
         #{id} .funnelLabel{{font-family:\"trebuchet ms\",verdana,arial,sans-serif;font-size:3px;font-weight:bold;fill:black;text-anchor:middle;dominant-baseline:middle;}}\
         #{id} .funnelTitle{{font-family:\"trebuchet ms\",verdana,arial,sans-serif;font-size:5px;font-weight:bold;fill:black;text-anchor:middle;}}"
    )
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form without `-0` or tiny float noise from our
    // own calculations.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
