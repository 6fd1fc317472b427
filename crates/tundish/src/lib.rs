#![forbid(unsafe_code)]

//! `tundish` is a headless funnel-conversion calculator in Rust.
//!
//! The core models a funnel as an ordered stage list with derive-on-change
//! semantics: the entry volume and the per-stage conversion rates are
//! authoritative, every downstream volume and the revenue projection are
//! recomputed after each edit.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`tundish::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization

pub use tundish_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use tundish_render::model::{
        Bounds, FunnelDiagramLayout, FunnelSectionLayout, LayoutPoint,
    };
    pub use tundish_render::svg::{SvgRenderOptions, render_funnel_svg};
    pub use tundish_render::{LayoutOptions, layout_funnel};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] tundish_core::Error),
        #[error(transparent)]
        Render(#[from] tundish_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token
    /// suitable for embedding multiple funnel diagrams in the same UI tree.
    ///
    /// The root `<svg id="...">` value prefixes internal ids like
    /// `chart-title-<id>`; inlining multiple SVGs with the same id makes
    /// those internal ids collide.
    ///
    /// This helper:
    /// - trims whitespace
    /// - replaces unsupported characters with `-`
    /// - ensures the id starts with an ASCII letter by prefixing `f-` when needed
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "f-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "f-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "f" {
            return "f-untitled".to_string();
        }
        out.to_string()
    }

    /// Parses a funnel definition and lays out its diagram.
    pub fn layout_definition(
        text: &str,
        layout_options: &LayoutOptions,
    ) -> Result<FunnelDiagramLayout> {
        let funnel = tundish_core::parse_funnel(text)?;
        Ok(layout_funnel(&funnel, layout_options)?)
    }

    /// Definition text straight to SVG.
    pub fn render_svg(
        text: &str,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_definition(text, layout_options)?;
        Ok(render_funnel_svg(&layout, svg_options))
    }

}
