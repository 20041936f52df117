//! Parallel implementation of row-run extrusion
//!
//! Rows are independent, so each one is meshed on its own and the results
//! are concatenated in row order; the output matches the serial version.

use crate::extrude::traits::ExtrudeOps;
use crate::extrude::{Solid, Triangle, row_runs, run_triangles};
use crate::float_types::Real;
use crate::raster::OccupancyField;
use rayon::prelude::*;

/// Parallel implementation of row-run extrusion
pub struct ParallelExtrudeOps;

impl ParallelExtrudeOps {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ParallelExtrudeOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtrudeOps for ParallelExtrudeOps {
    fn extrude(&self, field: &OccupancyField, height: Real) -> Solid {
        let rows: Vec<(usize, Vec<Triangle>)> = (0..field.height())
            .into_par_iter()
            .map(|r| {
                let runs = row_runs(field.row(r));
                let mut triangles = Vec::with_capacity(runs.len() * Solid::TRIANGLES_PER_BOX);
                for run in &runs {
                    triangles.extend_from_slice(&run_triangles(field, r, *run, height));
                }
                (runs.len(), triangles)
            })
            .collect();

        let mut solid = Solid::empty(height);
        for (boxes, triangles) in rows {
            solid.box_count += boxes;
            solid.triangles.extend(triangles);
        }
        solid
    }
}
