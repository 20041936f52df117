//! Mutable interpreter context threaded through one drawing.

use crate::float_types::{INCH, MM, Real};
use crate::gerber::aperture::{Aperture, ApertureMacro};
use hashbrown::HashMap;

/// Length unit selected by `%MO..*%` (or the legacy `G70`/`G71` codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Millimeters,
    Inches,
}

impl Unit {
    /// Millimeters per drawing unit.
    pub const fn millimeters_per_unit(&self) -> Real {
        match self {
            Unit::Millimeters => MM,
            Unit::Inches => INCH,
        }
    }

    /// Converts a millimeter length into this unit.
    pub fn from_millimeters(&self, mm: Real) -> Real {
        mm / self.millimeters_per_unit()
    }

    /// Raster density for this unit given a dots-per-inch setting.
    ///
    /// Inch drawings sample at `dpi` pixels per unit, millimeter drawings at
    /// `dpi / 25.4`, so one pixel is the same physical size either way.
    pub fn pixels_per_unit(&self, dpi: Real) -> Real {
        dpi * self.millimeters_per_unit() / INCH
    }
}

/// Which zeros a coordinate string may leave out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroOmission {
    /// `L`: leading zeros dropped, the string is right-aligned.
    #[default]
    Leading,
    /// `T`: trailing zeros dropped, the string is left-aligned.
    Trailing,
}

/// Integer and decimal digit counts of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisFormat {
    pub integer: u32,
    pub decimal: u32,
}

impl AxisFormat {
    pub const fn new(integer: u32, decimal: u32) -> Self {
        Self { integer, decimal }
    }
}

/// Coordinate format set by `%FS..*%`; X and Y are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateFormat {
    pub x: AxisFormat,
    pub y: AxisFormat,
    pub zeros: ZeroOmission,
    pub incremental: bool,
}

impl CoordinateFormat {
    /// Parses a coordinate string of one axis into drawing units.
    ///
    /// A literal decimal point means the value is already in physical units.
    /// Otherwise the digits are an integer scaled by `10^-decimal`.
    /// Returns `None` for anything that is not a signed number.
    pub fn parse_axis(&self, axis: &AxisFormat, text: &str) -> Option<Real> {
        if text.contains('.') {
            return text.parse::<Real>().ok().filter(|v| v.is_finite());
        }

        let (negative, digits) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut magnitude = digits.parse::<Real>().ok()?;
        if self.zeros == ZeroOmission::Trailing {
            let width = (axis.integer + axis.decimal) as usize;
            if digits.len() < width {
                magnitude *= (10.0 as Real).powi((width - digits.len()) as i32);
            }
        }
        let value = magnitude / (10.0 as Real).powi(axis.decimal as i32);
        Some(if negative { -value } else { value })
    }
}

/// Tables and modal settings accumulated while reading a drawing.
///
/// Apertures and macros are immutable once inserted; a later definition of
/// the same key replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct InterpreterState {
    pub apertures: HashMap<u32, Aperture>,
    pub macros: HashMap<String, ApertureMacro>,
    /// Aperture selected by the most recent `Dnn` statement (0 = none yet).
    pub current_aperture: u32,
    pub format: CoordinateFormat,
    pub unit: Unit,
}

impl InterpreterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aperture(&self, code: u32) -> Option<&Aperture> {
        self.apertures.get(&code)
    }

    pub fn aperture_macro(&self, name: &str) -> Option<&ApertureMacro> {
        self.macros.get(name)
    }
}
