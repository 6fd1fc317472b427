#![forbid(unsafe_code)]

pub mod funnel;
pub mod model;
pub mod svg;

use tundish_core::Funnel;

use crate::model::FunnelDiagramLayout;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout input: {message}")]
    InvalidLayout { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport_width: 100.0,
            viewport_height: 100.0,
        }
    }
}

pub fn layout_funnel(funnel: &Funnel, options: &LayoutOptions) -> Result<FunnelDiagramLayout> {
    funnel::layout_funnel_diagram(funnel, options)
}
