//! Extrusion of an [`OccupancyField`] into a watertight [`Solid`].
//!
//! Each row is split into maximal runs of solid pixels and every run becomes
//! one closed axis-aligned box: 12 triangles, no faces shared or culled
//! between neighbours. Triangle count scales with the number of runs rather
//! than the number of pixels.

pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use serial::SerialExtrudeOps;
pub use traits::ExtrudeOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExtrudeOps;

use crate::float_types::{Real, tolerance};
use crate::raster::OccupancyField;
use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::info;

/// Three vertices, counter-clockwise seen from outside the solid.
pub type Triangle = [Point3<Real>; 3];

/// A maximal horizontal span of solid pixels within one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRun {
    pub start: usize,
    pub len: usize,
}

/// Splits a row into its maximal solid runs, left to right.
pub fn row_runs(row: &[bool]) -> Vec<RowRun> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (x, &solid) in row.iter().enumerate() {
        match (solid, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                runs.push(RowRun { start: s, len: x - s });
                start = None;
            },
            _ => {},
        }
    }
    if let Some(s) = start {
        runs.push(RowRun {
            start: s,
            len: row.len() - s,
        });
    }
    runs
}

/// The 12 triangles of the box covering `run` in raster row `row`.
///
/// Row 0 is the top of the raster, so it maps to the highest Y band and the
/// solid keeps the drawing's orientation.
pub(crate) fn run_triangles(
    field: &OccupancyField,
    row: usize,
    run: RowRun,
    height: Real,
) -> [Triangle; 12] {
    let pitch = field.pixel_pitch();
    let x0 = run.start as Real * pitch;
    let x1 = (run.start + run.len) as Real * pitch;
    let y0 = (field.height() - 1 - row) as Real * pitch;
    let y1 = (field.height() - row) as Real * pitch;
    box_triangles(Point3::new(x0, y0, 0.0), Point3::new(x1, y1, height))
}

/// Two triangles per face, outward winding, all six faces.
pub fn box_triangles(min: Point3<Real>, max: Point3<Real>) -> [Triangle; 12] {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);

    let p000 = Point3::new(x0, y0, z0);
    let p100 = Point3::new(x1, y0, z0);
    let p110 = Point3::new(x1, y1, z0);
    let p010 = Point3::new(x0, y1, z0);
    let p001 = Point3::new(x0, y0, z1);
    let p101 = Point3::new(x1, y0, z1);
    let p111 = Point3::new(x1, y1, z1);
    let p011 = Point3::new(x0, y1, z1);

    let quad = |a: Point3<Real>, b: Point3<Real>, c: Point3<Real>, d: Point3<Real>| {
        [[a, b, c], [c, d, a]]
    };

    let [t0, t1] = quad(p000, p010, p110, p100); // bottom
    let [t2, t3] = quad(p101, p111, p011, p001); // top
    let [t4, t5] = quad(p000, p100, p101, p001); // front
    let [t6, t7] = quad(p100, p110, p111, p101); // right
    let [t8, t9] = quad(p110, p010, p011, p111); // back
    let [t10, t11] = quad(p010, p000, p001, p011); // left

    [t0, t1, t2, t3, t4, t5, t6, t7, t8, t9, t10, t11]
}

/// A triangle soup made of closed boxes of uniform height, in millimeters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solid {
    /// Box-major: triangles `12 * i .. 12 * (i + 1)` belong to box `i`.
    pub triangles: Vec<Triangle>,
    pub box_count: usize,
    /// Z extent of every box
    pub height: Real,
}

impl Solid {
    pub const TRIANGLES_PER_BOX: usize = 12;

    pub const fn empty(height: Real) -> Self {
        Self {
            triangles: Vec::new(),
            box_count: 0,
            height,
        }
    }

    /// Extrudes every solid run of `field` to `height` millimeters.
    ///
    /// Uses rayon when the `parallel` feature is enabled.
    pub fn extrude(field: &OccupancyField, height: Real) -> Self {
        #[cfg(not(feature = "parallel"))]
        let ops = SerialExtrudeOps::new();
        #[cfg(feature = "parallel")]
        let ops = ParallelExtrudeOps::new();

        let solid = ops.extrude(field, height);
        info!(
            boxes = solid.box_count,
            triangles = solid.triangle_count(),
            "extruded occupancy field"
        );
        solid
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles of box `i`, if it exists.
    pub fn box_triangles(&self, i: usize) -> Option<&[Triangle]> {
        let start = i.checked_mul(Self::TRIANGLES_PER_BOX)?;
        self.triangles.get(start..start + Self::TRIANGLES_PER_BOX)
    }

    /// `(mins, maxs)` over all vertices; `None` for an empty solid.
    pub fn bounding_box(&self) -> Option<(Point3<Real>, Point3<Real>)> {
        let mut vertices = self.triangles.iter().flatten();
        let first = *vertices.next()?;
        Some(vertices.fold((first, first), |(lo, hi), p| {
            (
                Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }

    /// Enclosed volume via the divergence theorem (cubic millimeters).
    pub fn volume(&self) -> Real {
        self.triangles
            .iter()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Checks that every box is closed: within each group of 12 triangles,
    /// every edge is used exactly twice.
    ///
    /// Coordinates are compared after quantizing by the crate tolerance.
    pub fn is_watertight(&self) -> bool {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        struct QuantizedPoint(i64, i64, i64);

        let quantum = tolerance();
        let quantize = |p: &Point3<Real>| {
            QuantizedPoint(
                (p.x / quantum).round() as i64,
                (p.y / quantum).round() as i64,
                (p.z / quantum).round() as i64,
            )
        };

        if self.triangles.len() != self.box_count * Self::TRIANGLES_PER_BOX {
            return false;
        }

        self.triangles
            .chunks_exact(Self::TRIANGLES_PER_BOX)
            .all(|chunk| {
                let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> =
                    HashMap::new();
                for tri in chunk {
                    for (i0, i1) in [(0, 1), (1, 2), (2, 0)] {
                        let a = quantize(&tri[i0]);
                        let b = quantize(&tri[i1]);
                        if a == b {
                            return false;
                        }
                        let key = if a < b { (a, b) } else { (b, a) };
                        *edge_counts.entry(key).or_insert(0) += 1;
                    }
                }
                edge_counts.values().all(|&count| count == 2)
            })
    }
}
