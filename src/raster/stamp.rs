//! Stamping aperture shapes into an occupancy field.

use crate::float_types::Real;
use crate::gerber::{Aperture, InterpreterState, MacroPrimitive, MacroValue};
use crate::raster::OccupancyField;
use tracing::debug;

/// Pixel value written where an aperture is exposed.
const OPENING: bool = false;

/// Stamps apertures at pixel positions.
///
/// Dimensions are truncated to whole pixels, centers included, so repeated
/// stamps of the same aperture are pixel-identical.
pub struct Stamper<'a> {
    state: &'a InterpreterState,
    /// Pixels per drawing unit
    scale: Real,
    /// Center-line primitives whose rotation was not a multiple of 90°
    pub(crate) unrotated: usize,
    /// Macro references with no matching `%AM` definition
    pub(crate) missing_macros: usize,
}

impl<'a> Stamper<'a> {
    pub fn new(state: &'a InterpreterState, scale: Real) -> Self {
        Self {
            state,
            scale,
            unrotated: 0,
            missing_macros: 0,
        }
    }

    #[inline]
    fn px(&self, length: Real) -> i64 {
        (length * self.scale) as i64
    }

    /// Stamps `aperture` centered on pixel `(x, y)`.
    pub fn stamp(&mut self, field: &mut OccupancyField, x: i64, y: i64, aperture: &Aperture) {
        match aperture {
            Aperture::Circle { diameter } => {
                field.fill_disk(x, y, self.px(*diameter) / 2, OPENING);
            },
            // Obround ends are not rounded.
            Aperture::Rectangle { width, height } | Aperture::Obround { width, height } => {
                centered_rect(field, x, y, self.px(*width), self.px(*height), OPENING);
            },
            Aperture::Macro { name, params } => {
                let Some(aperture_macro) = self.state.aperture_macro(name) else {
                    self.missing_macros += 1;
                    debug!(name = name.as_str(), "aperture references an undefined macro");
                    return;
                };
                for primitive in &aperture_macro.primitives {
                    self.primitive(field, x, y, primitive, params);
                }
            },
        }
    }

    /// Upper bound, in pixels, of how far a stamp of `aperture` reaches from its center.
    pub fn reach(&self, aperture: &Aperture) -> i64 {
        match aperture {
            Aperture::Circle { diameter } => self.px(*diameter) / 2,
            Aperture::Rectangle { width, height } | Aperture::Obround { width, height } => {
                self.px(*width).max(self.px(*height))
            },
            Aperture::Macro { name, params } => self
                .state
                .aperture_macro(name)
                .map_or(0, |aperture_macro| {
                    aperture_macro
                        .primitives
                        .iter()
                        .map(|primitive| self.primitive_reach(primitive, params))
                        .max()
                        .unwrap_or(0)
                }),
        }
    }

    fn primitive_reach(&self, primitive: &MacroPrimitive, params: &[Real]) -> i64 {
        let offset = |cx: &MacroValue, cy: &MacroValue| {
            self.px(cx.resolve(params))
                .saturating_abs()
                .saturating_add(self.px(cy.resolve(params)).saturating_abs())
        };
        match primitive {
            MacroPrimitive::Circle {
                diameter,
                center_x,
                center_y,
                ..
            } => offset(center_x, center_y).saturating_add(self.px(diameter.resolve(params)) / 2),
            MacroPrimitive::CenterLine {
                width,
                height,
                center_x,
                center_y,
                ..
            } => {
                let side = self
                    .px(width.resolve(params))
                    .max(self.px(height.resolve(params)));
                offset(center_x, center_y).saturating_add(side)
            },
        }
    }

    fn primitive(
        &mut self,
        field: &mut OccupancyField,
        x: i64,
        y: i64,
        primitive: &MacroPrimitive,
        params: &[Real],
    ) {
        match primitive {
            MacroPrimitive::Circle {
                exposure,
                diameter,
                center_x,
                center_y,
            } => {
                // Exposure off puts material back.
                let value = exposure.resolve(params) == 0.0;
                let cx = x.saturating_add(self.px(center_x.resolve(params)));
                let cy = y.saturating_sub(self.px(center_y.resolve(params)));
                let r = self.px(diameter.resolve(params)) / 2;
                field.fill_disk(cx, cy, r, value);
            },
            MacroPrimitive::CenterLine {
                exposure,
                width,
                height,
                center_x,
                center_y,
                rotation,
            } => {
                let value = exposure.resolve(params) == 0.0;
                let mut w = width.resolve(params);
                let mut h = height.resolve(params);
                let rotation = rotation.resolve(params).rem_euclid(360.0);

                if (rotation - 90.0).abs() < 1.0 || (rotation - 270.0).abs() < 1.0 {
                    std::mem::swap(&mut w, &mut h);
                } else if !(rotation < 1.0 || (rotation - 180.0).abs() < 1.0 || rotation > 359.0) {
                    self.unrotated += 1;
                }

                let cx = x.saturating_add(self.px(center_x.resolve(params)));
                let cy = y.saturating_sub(self.px(center_y.resolve(params)));
                centered_rect(field, cx, cy, self.px(w), self.px(h), value);
            },
        }
    }
}

/// `[x - w/2, x + w/2) x [y - h/2, y + h/2)` with truncating halves.
fn centered_rect(field: &mut OccupancyField, x: i64, y: i64, w: i64, h: i64, value: bool) {
    field.fill_rect(
        x.saturating_sub(w / 2),
        y.saturating_sub(h / 2),
        x.saturating_add(w / 2),
        y.saturating_add(h / 2),
        value,
    );
}
