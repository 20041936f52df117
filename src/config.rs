//! Rendering parameters and the constants behind their defaults.

use crate::errors::StencilError;
use crate::float_types::{Real, tolerance};
use crate::raster::Bounds;

/// Output pixel density (dots per inch) used when none is configured.
///
/// Higher DPI gives smoother pad outlines at the cost of raster size.
pub const DEFAULT_DPI: Real = 1000.0;

/// Stencil thickness in millimeters.
pub const DEFAULT_EXTRUSION_HEIGHT_MM: Real = 0.2;

/// Clearance added on every side of the computed drawing bounds, in millimeters.
pub const BOUNDS_PADDING_MM: Real = 2.0;

/// Side length of the square extent used when a drawing has no geometry, in millimeters.
pub const DEFAULT_EXTENT_MM: Real = 10.0;

/// Largest raster (in pixels) the rasterizer will allocate.
///
/// One byte per pixel, so this caps the occupancy field at roughly 400 MB.
pub const MAX_RASTER_PIXELS: u64 = 400_000_000;

/// Parameters for one render pass.
///
/// # Examples
/// ```
/// use gerber_stencil::config::RenderConfig;
/// let cfg = RenderConfig::default().with_dpi(600.0).with_extrusion_height(0.12);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Stencil thickness (Z extent of the solid) in millimeters.
    pub extrusion_height: Real,
    /// Pixels per inch of the occupancy field.
    pub dpi: Real,
    /// Explicit drawing-unit bounds; skips automatic bounds computation.
    pub bounds: Option<Bounds>,
    /// Keep the intermediate raster (written as PNG by the front end).
    pub keep_raster: bool,
    /// Upper limit for `width * height` of the occupancy field.
    pub max_pixels: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            extrusion_height: DEFAULT_EXTRUSION_HEIGHT_MM,
            dpi: DEFAULT_DPI,
            bounds: None,
            keep_raster: false,
            max_pixels: MAX_RASTER_PIXELS,
        }
    }
}

impl RenderConfig {
    pub fn with_extrusion_height(mut self, height: Real) -> Self {
        self.extrusion_height = height;
        self
    }

    pub fn with_dpi(mut self, dpi: Real) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_keep_raster(mut self, keep: bool) -> Self {
        self.keep_raster = keep;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Physical size of one output pixel in millimeters.
    pub fn pixel_pitch_mm(&self) -> Real {
        crate::float_types::INCH / self.dpi
    }

    /// Rejects non-finite or non-positive parameters and empty bounds overrides.
    pub fn validate(&self) -> Result<(), StencilError> {
        if !self.extrusion_height.is_finite() || self.extrusion_height <= 0.0 {
            return Err(StencilError::InvalidConfig(format!(
                "extrusion height must be positive, got {}",
                self.extrusion_height
            )));
        }
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(StencilError::InvalidConfig(format!(
                "dpi must be positive, got {}",
                self.dpi
            )));
        }
        if let Some(b) = &self.bounds {
            let finite = [b.min_x, b.min_y, b.max_x, b.max_y]
                .iter()
                .all(|v| v.is_finite());
            if !finite || b.width() <= tolerance() || b.height() <= tolerance() {
                return Err(StencilError::InvalidConfig(format!(
                    "bounds override must have max > min on both axes, got {b:?}"
                )));
            }
        }
        Ok(())
    }
}
