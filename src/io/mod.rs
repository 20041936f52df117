//! Mesh sinks: serializing a [`Solid`](crate::extrude::Solid) to disk.

#[cfg(feature = "stl-io")]
pub mod stl;
