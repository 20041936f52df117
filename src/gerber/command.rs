//! Geometry commands produced by the interpreter

use crate::float_types::Real;

/// Pen operation carried by a coordinate statement's D code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// D01: stroke from the current position with the active aperture
    Draw,
    /// D02: reposition without stamping
    Move,
    /// D03: stamp the active aperture once
    Flash,
}

impl Operation {
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Operation::Draw),
            2 => Some(Operation::Move),
            3 => Some(Operation::Flash),
            _ => None,
        }
    }
}

/// One entry of the command sequence, in file order.
///
/// An omitted axis keeps the pen's current value on that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectAperture(u32),
    MoveTo { x: Option<Real>, y: Option<Real> },
    DrawTo { x: Option<Real>, y: Option<Real> },
    FlashAt { x: Option<Real>, y: Option<Real> },
}

impl Command {
    pub const fn with_operation(op: Operation, x: Option<Real>, y: Option<Real>) -> Self {
        match op {
            Operation::Draw => Command::DrawTo { x, y },
            Operation::Move => Command::MoveTo { x, y },
            Operation::Flash => Command::FlashAt { x, y },
        }
    }

    /// Axis values of a pen command; `None` for aperture selection.
    pub const fn target(&self) -> Option<(Option<Real>, Option<Real>)> {
        match *self {
            Command::SelectAperture(_) => None,
            Command::MoveTo { x, y } | Command::DrawTo { x, y } | Command::FlashAt { x, y } => {
                Some((x, y))
            },
        }
    }
}

/// Running pen position threaded through a command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pen {
    pub x: Real,
    pub y: Real,
}

impl Pen {
    /// Moves the pen to the command's target and returns the previous position.
    pub fn advance(&mut self, x: Option<Real>, y: Option<Real>) -> Pen {
        let previous = *self;
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(y) = y {
            self.y = y;
        }
        previous
    }
}
