//! Binary occupancy raster

use crate::float_types::Real;

/// A row-major grid of solid (`true`) / clear (`false`) pixels.
///
/// The field starts fully solid: it models the stencil sheet, and stamped
/// apertures cut openings into it. Row 0 is the top of the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyField {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    /// Physical size of one pixel in millimeters
    pixel_pitch: Real,
}

impl OccupancyField {
    /// Creates a fully solid field.
    pub fn new(width: usize, height: usize, pixel_pitch: Real) -> Self {
        Self {
            width,
            height,
            cells: vec![true; width * height],
            pixel_pitch,
        }
    }

    /// Builds a field from explicit rows; every row must have the same length.
    ///
    /// Returns `None` for ragged input.
    pub fn from_rows(rows: &[Vec<bool>], pixel_pitch: Real) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            cells: rows.concat(),
            pixel_pitch,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn pixel_pitch(&self) -> Real {
        self.pixel_pitch
    }

    /// Returns `false` outside the field.
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Sets one pixel; coordinates outside the field are ignored.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, solid: bool) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = solid;
        }
    }

    pub fn row(&self, y: usize) -> &[bool] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn clear_count(&self) -> usize {
        self.cells.len() - self.solid_count()
    }

    /// Paints the half-open pixel rectangle `[x0, x1) x [y0, y1)`, clipped to the field.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, solid: bool) {
        let clamp_x = |v: i64| v.clamp(0, self.width as i64) as usize;
        let clamp_y = |v: i64| v.clamp(0, self.height as i64) as usize;
        let (x0, x1) = (clamp_x(x0), clamp_x(x1));
        let (y0, y1) = (clamp_y(y0), clamp_y(y1));
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            let start = y * self.width;
            self.cells[start + x0..start + x1].fill(solid);
        }
    }

    /// Paints every pixel with `dx² + dy² <= r²` around `(cx, cy)`.
    pub fn fill_disk(&mut self, cx: i64, cy: i64, r: i64, solid: bool) {
        if r < 0 {
            return;
        }
        let top = cy.saturating_sub(r).max(0);
        let bottom = cy.saturating_add(r).min(self.height as i64 - 1);
        let r2 = (r as i128) * (r as i128);

        for y in top..=bottom {
            let dy = (y - cy) as i128;
            let remaining = r2 - dy * dy;
            // Widest dx on this scanline that stays inside the disk.
            let mut span = (remaining as f64).sqrt() as i128;
            while span * span > remaining {
                span -= 1;
            }
            while (span + 1) * (span + 1) <= remaining {
                span += 1;
            }
            let span = span.min(i64::MAX as i128) as i64;
            self.fill_rect(
                cx.saturating_sub(span),
                y,
                cx.saturating_add(span).saturating_add(1),
                y + 1,
                solid,
            );
        }
    }
}
