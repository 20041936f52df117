//! End-to-end stencil generation: drawing → occupancy field → solid.

use crate::config::RenderConfig;
use crate::errors::StencilError;
use crate::extrude::Solid;
use crate::gerber::Drawing;
use crate::raster::{OccupancyField, Rasterizer};
use std::path::Path;
use tracing::info;

/// The products of one render pass.
///
/// The occupancy field is kept alongside the solid so callers can dump the
/// intermediate raster when [`RenderConfig::keep_raster`] is set.
#[derive(Debug, Clone)]
pub struct Stencil {
    pub field: OccupancyField,
    pub solid: Solid,
}

impl Stencil {
    /// Rasterizes `drawing` and extrudes the result to `config.extrusion_height`.
    ///
    /// ```rust
    /// # use gerber_stencil::{config::RenderConfig, gerber::Drawing, pipeline::Stencil};
    /// let drawing = Drawing::parse_str("%FSLAX24Y24*%\n%MOMM*%\n%ADD10C,0.5*%\nD10*\nX100000Y100000D03*\nM02*\n");
    /// let stencil = Stencil::generate(&drawing, &RenderConfig::default()).unwrap();
    /// assert!(stencil.solid.triangle_count() > 0);
    /// ```
    pub fn generate(drawing: &Drawing, config: &RenderConfig) -> Result<Self, StencilError> {
        let field = Rasterizer::new(drawing, config).render()?;
        let solid = Solid::extrude(&field, config.extrusion_height);
        info!(
            boxes = solid.box_count,
            triangles = solid.triangle_count(),
            "stencil generated"
        );
        Ok(Self { field, solid })
    }

    /// Reads the drawing at `path` and generates its stencil.
    pub fn from_path(path: impl AsRef<Path>, config: &RenderConfig) -> Result<Self, StencilError> {
        let drawing = Drawing::from_path(path)?;
        Self::generate(&drawing, config)
    }

    /// Writes the intermediate raster to `path` if the config asks for it.
    #[cfg(feature = "image-io")]
    pub fn keep_raster(
        &self,
        config: &RenderConfig,
        path: impl AsRef<Path>,
    ) -> Result<bool, StencilError> {
        if !config.keep_raster {
            return Ok(false);
        }
        self.field.save_png(path)?;
        Ok(true)
    }
}
