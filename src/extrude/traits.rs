//! Traits defining extrusion operations for dependency inversion

use crate::extrude::Solid;
use crate::float_types::Real;
use crate::raster::OccupancyField;

/// Turns an occupancy field into a solid of uniform height
pub trait ExtrudeOps {
    /// Emit one box per maximal horizontal run of solid pixels.
    fn extrude(&self, field: &OccupancyField, height: Real) -> Solid;
}
