//! Serial implementation of row-run extrusion

use crate::extrude::traits::ExtrudeOps;
use crate::extrude::{Solid, row_runs, run_triangles};
use crate::float_types::Real;
use crate::raster::OccupancyField;

/// Serial implementation of row-run extrusion
pub struct SerialExtrudeOps;

impl SerialExtrudeOps {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SerialExtrudeOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtrudeOps for SerialExtrudeOps {
    fn extrude(&self, field: &OccupancyField, height: Real) -> Solid {
        let mut solid = Solid::empty(height);
        for (r, row) in field.rows().enumerate() {
            for run in row_runs(row) {
                solid
                    .triangles
                    .extend_from_slice(&run_triangles(field, r, run, height));
                solid.box_count += 1;
            }
        }
        solid
    }
}
