//! Drawing extents

use crate::config::{BOUNDS_PADDING_MM, DEFAULT_EXTENT_MM};
use crate::float_types::Real;
use crate::gerber::{Command, Drawing, Pen};

/// Axis-aligned rectangle in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: Real,
    pub min_y: Real,
    pub max_x: Real,
    pub max_y: Real,
}

impl Bounds {
    pub const fn new(min_x: Real, min_y: Real, max_x: Real, max_y: Real) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A degenerate rectangle containing only `(x, y)`.
    pub const fn point(x: Real, y: Real) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn width(&self) -> Real {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> Real {
        self.max_y - self.min_y
    }

    pub fn include(&mut self, x: Real, y: Real) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expand(&self, margin: Real) -> Self {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// Extent of the pen positions that produce geometry.
    ///
    /// A flash contributes its own point, a draw both of its end points.
    /// Moves only thread the pen. Returns `None` when nothing is drawn.
    pub fn of_geometry(commands: &[Command]) -> Option<Self> {
        let mut pen = Pen::default();
        let mut bounds: Option<Bounds> = None;
        let mut include = |x: Real, y: Real| match bounds.as_mut() {
            Some(b) => b.include(x, y),
            None => bounds = Some(Bounds::point(x, y)),
        };

        for command in commands {
            let Some((x, y)) = command.target() else {
                continue;
            };
            let previous = pen.advance(x, y);
            match command {
                Command::FlashAt { .. } => include(pen.x, pen.y),
                Command::DrawTo { .. } => {
                    include(previous.x, previous.y);
                    include(pen.x, pen.y);
                },
                _ => {},
            }
        }
        bounds
    }

    /// Bounds used for rendering `drawing`: the geometry extent (or a small
    /// default square at the origin when there is none), padded on all sides.
    ///
    /// Padding and the default extent are millimeter constants converted to
    /// the drawing's unit.
    pub fn of_drawing(drawing: &Drawing) -> Self {
        let unit = drawing.state.unit;
        let extent = Self::of_geometry(&drawing.commands).unwrap_or_else(|| {
            let side = unit.from_millimeters(DEFAULT_EXTENT_MM);
            Self::new(0.0, 0.0, side, side)
        });
        extent.expand(unit.from_millimeters(BOUNDS_PADDING_MM))
    }
}
