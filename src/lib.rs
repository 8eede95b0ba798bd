//! forestplot-rs: forest plot layout and annotation engine.
//!
//! Rows of point estimates and confidence intervals are drawn onto a
//! `RenderSurface`, then labels are measured from rendered glyphs and every
//! annotation column, group header and zebra band is placed against that
//! single measurement.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ForestPlot, ForestPlotConfig, ForestPlotOptions, ForestPlotReport};
pub use crate::core::{ForestRecord, ForestTable};
pub use error::{ChartError, ChartResult};
