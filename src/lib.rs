//! Turn **Gerber** solder-paste layers into 3D-printable stencils.
//!
//! A drawing is interpreted into a command list, rasterized into an
//! [occupancy field](raster::OccupancyField) where stamped apertures become
//! openings, and every horizontal run of remaining material is extruded into
//! a closed box, giving a watertight [`Solid`](extrude::Solid).
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export, required by the binary
//! - **image-io**: dump the intermediate raster as a PNG, build fields from images
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for multithreaded extrusion

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod errors;
pub mod extrude;
pub mod float_types;
pub mod gerber;
pub mod io;
pub mod pipeline;
pub mod raster;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use config::RenderConfig;
pub use errors::StencilError;
pub use extrude::Solid;
pub use gerber::Drawing;
pub use pipeline::Stencil;
pub use raster::OccupancyField;
