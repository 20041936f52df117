//! Rasterization: replay a [`Drawing`] with a simulated pen into an [`OccupancyField`].

pub mod bounds;
pub mod field;
pub mod stamp;

#[cfg(feature = "image-io")]
pub mod image;

pub use bounds::Bounds;
pub use field::OccupancyField;
pub use stamp::Stamper;

use crate::config::RenderConfig;
use crate::errors::StencilError;
use crate::float_types::Real;
use crate::gerber::{Aperture, Command, Drawing, Pen};
use tracing::{debug, info, warn};

/// Resolution and placement of the raster for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterPlan {
    /// Drawing-unit rectangle covered by the raster
    pub bounds: Bounds,
    /// Pixels per drawing unit
    pub scale: Real,
    pub width: usize,
    pub height: usize,
    /// Physical size of one pixel in millimeters
    pub pixel_pitch: Real,
}

impl RasterPlan {
    /// Maps a drawing-space point to a pixel; Y is flipped so row 0 is the top.
    #[inline]
    pub fn to_pixel(&self, x: Real, y: Real) -> (i64, i64) {
        let px = ((x - self.bounds.min_x) * self.scale) as i64;
        let py = ((self.bounds.height() - (y - self.bounds.min_y)) * self.scale) as i64;
        (px, py)
    }
}

/// Replays a drawing's command sequence into an occupancy field.
pub struct Rasterizer<'a> {
    drawing: &'a Drawing,
    config: &'a RenderConfig,
}

impl<'a> Rasterizer<'a> {
    pub const fn new(drawing: &'a Drawing, config: &'a RenderConfig) -> Self {
        Self { drawing, config }
    }

    /// Chooses bounds and resolution, refusing rasters above `config.max_pixels`.
    pub fn plan(&self) -> Result<RasterPlan, StencilError> {
        self.config.validate()?;

        let bounds = self
            .config
            .bounds
            .unwrap_or_else(|| Bounds::of_drawing(self.drawing));
        let scale = self.drawing.state.unit.pixels_per_unit(self.config.dpi);

        let too_large = |width: u64, height: u64| StencilError::RasterTooLarge {
            width,
            height,
            limit: self.config.max_pixels,
        };

        let width = bounds.width() * scale;
        let height = bounds.height() * scale;
        if !width.is_finite() || !height.is_finite() {
            return Err(too_large(u64::MAX, u64::MAX));
        }
        let width = (width as u64).max(1);
        let height = (height as u64).max(1);

        match width.checked_mul(height) {
            Some(pixels) if pixels <= self.config.max_pixels => {},
            _ => return Err(too_large(width, height)),
        }
        let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
            return Err(too_large(width, height));
        };

        Ok(RasterPlan {
            bounds,
            scale,
            width: w,
            height: h,
            pixel_pitch: self.config.pixel_pitch_mm(),
        })
    }

    /// Renders the drawing. Commands referencing undefined apertures are skipped.
    pub fn render(&self) -> Result<OccupancyField, StencilError> {
        let plan = self.plan()?;
        info!(
            width = plan.width,
            height = plan.height,
            scale = plan.scale,
            "rasterizing drawing"
        );

        let state = &self.drawing.state;
        let mut field = OccupancyField::new(plan.width, plan.height, plan.pixel_pitch);
        let mut stamper = Stamper::new(state, plan.scale);
        let mut pen = Pen::default();
        let mut current = 0;
        let mut undefined = 0usize;

        for command in &self.drawing.commands {
            match *command {
                Command::SelectAperture(code) => current = code,
                Command::MoveTo { x, y } => {
                    pen.advance(x, y);
                },
                Command::FlashAt { x, y } => {
                    pen.advance(x, y);
                    let Some(aperture) = state.aperture(current) else {
                        undefined += 1;
                        continue;
                    };
                    let (px, py) = plan.to_pixel(pen.x, pen.y);
                    stamper.stamp(&mut field, px, py, aperture);
                },
                Command::DrawTo { x, y } => {
                    let from = pen.advance(x, y);
                    let Some(aperture) = state.aperture(current) else {
                        undefined += 1;
                        continue;
                    };
                    let start = plan.to_pixel(from.x, from.y);
                    let end = plan.to_pixel(pen.x, pen.y);
                    stroke(&mut stamper, &mut field, start, end, aperture);
                },
            }
        }

        if undefined > 0 {
            debug!(undefined, "skipped geometry using undefined apertures");
        }
        if stamper.missing_macros > 0 {
            debug!(
                count = stamper.missing_macros,
                "skipped stamps of undefined macros"
            );
        }
        if stamper.unrotated > 0 {
            warn!(
                count = stamper.unrotated,
                "center-line primitives with rotations other than multiples of 90 degrees were rendered unrotated"
            );
        }

        Ok(field)
    }
}

/// Stamps `aperture` along the segment at one-pixel intervals.
///
/// The segment is first clipped to the field grown by the aperture's reach,
/// so far off-raster endpoints cost nothing.
fn stroke(
    stamper: &mut Stamper<'_>,
    field: &mut OccupancyField,
    start: (i64, i64),
    end: (i64, i64),
    aperture: &Aperture,
) {
    let reach = stamper.reach(aperture).max(0).saturating_add(1) as Real;
    let window = Bounds::new(
        -reach,
        -reach,
        field.width() as Real + reach,
        field.height() as Real + reach,
    );
    let to_real = |(x, y): (i64, i64)| (x as Real, y as Real);
    let Some(((x1, y1), (x2, y2))) = clip_segment(to_real(start), to_real(end), &window) else {
        return;
    };

    let dx = x2 - x1;
    let dy = y2 - y1;
    let steps = dx.hypot(dy) as i64;

    if steps == 0 {
        stamper.stamp(field, x1 as i64, y1 as i64, aperture);
        return;
    }

    for i in 0..=steps {
        let t = i as Real / steps as Real;
        let x = (x1 + t * dx) as i64;
        let y = (y1 + t * dy) as i64;
        stamper.stamp(field, x, y, aperture);
    }
}

type Segment = ((Real, Real), (Real, Real));

/// Liang-Barsky clip of a segment against `window`; `None` when it misses.
///
/// Endpoints already inside are returned untouched.
fn clip_segment((x1, y1): (Real, Real), (x2, y2): (Real, Real), window: &Bounds) -> Option<Segment> {
    let (dx, dy) = (x2 - x1, y2 - y1);
    let mut t0: Real = 0.0;
    let mut t1: Real = 1.0;

    for (p, q) in [
        (-dx, x1 - window.min_x),
        (dx, window.max_x - x1),
        (-dy, y1 - window.min_y),
        (dy, window.max_y - y1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let from = if t0 > 0.0 { (x1 + t0 * dx, y1 + t0 * dy) } else { (x1, y1) };
    let to = if t1 < 1.0 { (x1 + t1 * dx, y1 + t1 * dy) } else { (x2, y2) };
    Some((from, to))
}
