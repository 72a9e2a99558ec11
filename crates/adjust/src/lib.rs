//! # hydroburn-adjust
//!
//! The conditioning engine of hydroburn: sample terrain elevation under
//! crossing geometries and burn the resulting 3D flow paths into a DTM so
//! downstream flow-direction/accumulation tools see continuous channels
//! through culverts and under bridges.
//!
//! ## Pipeline
//!
//! - [`window`]: extract a pixel-aligned raster window around a feature
//! - [`interpolate`]: bilinear elevation sampling over a window
//! - [`horseshoe`]: profile densities and cross-line geometry for culvert
//!   cross-section quads
//! - [`sampling`]: drivers that turn 2D features into 3D lines
//! - [`burn`]: supercover rasterization of 3D lines into the DTM
//! - [`workflow`]: the end-to-end filter → sample → burn orchestration

pub mod burn;
pub mod horseshoe;
pub mod interpolate;
pub mod sampling;
pub mod window;
pub mod workflow;

pub use burn::{burn_lines, BurnLines, BurnParams};
pub use interpolate::{all_finite, RasterInterpolator};
pub use sampling::{
    sample_horseshoe_lines, sample_horseshoes_z, sample_line_z, sample_lines_z, SampleStats,
    SamplingParams,
};
pub use window::{extract_window, PixelWindow, RasterSource, WindowParams};
pub use workflow::{condition_dtm, filter_by_bounds, ConditionParams, ConditionReport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::burn::{burn_lines, BurnParams};
    pub use crate::interpolate::{all_finite, RasterInterpolator};
    pub use crate::sampling::{
        sample_horseshoe_lines, sample_line_z, sample_lines_z, SamplingParams,
    };
    pub use crate::window::{extract_window, RasterSource, WindowParams};
    pub use crate::workflow::{condition_dtm, ConditionParams};
    pub use hydroburn_core::prelude::*;
}
