//! Aperture shapes and aperture macros

use crate::float_types::Real;

/// A tool shape used for flashes and draws.
///
/// The standard shapes carry their dimensions; anything else refers to a
/// macro by name and forwards its modifiers as macro parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Aperture {
    /// `C,<diameter>[X<hole>]`
    Circle { diameter: Real },
    /// `R,<width>X<height>`
    Rectangle { width: Real, height: Real },
    /// `O,<width>X<height>`; rendered as a sharp rectangle.
    Obround { width: Real, height: Real },
    /// `<name>[,<p1>X<p2>...]` referencing `%AM<name>*...%`
    Macro { name: String, params: Vec<Real> },
}

impl Aperture {
    /// Builds an aperture from its template name and modifiers.
    ///
    /// Returns `None` when a standard template lacks required modifiers or a
    /// dimension is negative.
    pub fn from_template(name: &str, modifiers: &[Real]) -> Option<Self> {
        match name {
            "C" => modifiers
                .first()
                .filter(|d| **d >= 0.0)
                .map(|&diameter| Aperture::Circle { diameter }),
            "R" | "O" => {
                let &[width, height, ..] = modifiers else {
                    return None;
                };
                if width < 0.0 || height < 0.0 {
                    return None;
                }
                Some(if name == "R" {
                    Aperture::Rectangle { width, height }
                } else {
                    Aperture::Obround { width, height }
                })
            },
            _ if name.is_empty() => None,
            _ => Some(Aperture::Macro {
                name: name.to_string(),
                params: modifiers.to_vec(),
            }),
        }
    }
}

/// A macro modifier: either a literal or a `$n` reference to the aperture's
/// n-th modifier (1-based).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MacroValue {
    Literal(Real),
    Param(usize),
}

impl MacroValue {
    /// Parses `1.25`, `-0.5` or `$3`. Arithmetic expressions are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(index) = text.strip_prefix('$') {
            return index
                .parse::<usize>()
                .ok()
                .filter(|&i| i > 0)
                .map(MacroValue::Param);
        }
        text.parse::<Real>()
            .ok()
            .filter(|v| v.is_finite())
            .map(MacroValue::Literal)
    }

    /// Resolves against the referencing aperture's parameters; a missing
    /// parameter reads as zero.
    pub fn resolve(&self, params: &[Real]) -> Real {
        match *self {
            MacroValue::Literal(v) => v,
            MacroValue::Param(i) => params.get(i - 1).copied().unwrap_or(0.0),
        }
    }
}

/// One primitive of an aperture macro.
#[derive(Debug, Clone, PartialEq)]
pub enum MacroPrimitive {
    /// Code 1: exposure, diameter, center x, center y
    Circle {
        exposure: MacroValue,
        diameter: MacroValue,
        center_x: MacroValue,
        center_y: MacroValue,
    },
    /// Code 21: exposure, width, height, center x, center y, rotation (degrees)
    CenterLine {
        exposure: MacroValue,
        width: MacroValue,
        height: MacroValue,
        center_x: MacroValue,
        center_y: MacroValue,
        rotation: MacroValue,
    },
}

/// Why a macro block could not become a [`MacroPrimitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveRejection {
    /// Code 0 blocks are comments.
    Comment,
    /// A primitive code this crate does not render.
    UnsupportedCode(u32),
    /// Too few modifiers, or a modifier that is not a literal or `$n`.
    Malformed,
}

impl MacroPrimitive {
    /// Builds a typed primitive from a macro block such as `21,1,0.5,0.3,0,0,90`.
    pub fn parse(block: &str) -> Result<Self, PrimitiveRejection> {
        let block = block.trim();
        if block == "0" || block.starts_with("0 ") || block.starts_with("0,") {
            return Err(PrimitiveRejection::Comment);
        }

        let mut fields = block.split(',').map(str::trim);
        let code = fields
            .next()
            .and_then(|c| c.parse::<u32>().ok())
            .ok_or(PrimitiveRejection::Malformed)?;

        if code != 1 && code != 21 {
            return Err(PrimitiveRejection::UnsupportedCode(code));
        }

        let values = fields
            .filter(|f| !f.is_empty())
            .map(MacroValue::parse)
            .collect::<Option<Vec<_>>>()
            .ok_or(PrimitiveRejection::Malformed)?;

        match (code, values.as_slice()) {
            (1, [exposure, diameter, center_x, center_y, ..]) => Ok(MacroPrimitive::Circle {
                exposure: *exposure,
                diameter: *diameter,
                center_x: *center_x,
                center_y: *center_y,
            }),
            (21, [exposure, width, height, center_x, center_y, rotation, ..]) => {
                Ok(MacroPrimitive::CenterLine {
                    exposure: *exposure,
                    width: *width,
                    height: *height,
                    center_x: *center_x,
                    center_y: *center_y,
                    rotation: *rotation,
                })
            },
            _ => Err(PrimitiveRejection::Malformed),
        }
    }
}

/// A named, parametrized shape template from a `%AM...%` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApertureMacro {
    pub name: String,
    pub primitives: Vec<MacroPrimitive>,
}
