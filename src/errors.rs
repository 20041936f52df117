//! Failures surfaced to the caller

/// Everything that can stop the stencil pipeline.
///
/// Malformed drawing syntax is deliberately *not* represented here: the
/// interpreter records it as [`Anomaly`](crate::gerber::Anomaly) values and
/// keeps going.
#[derive(Debug, thiserror::Error)]
pub enum StencilError {
    /// (Io) The input could not be read or the output could not be written
    #[error("(Io) {0}")]
    Io(#[from] std::io::Error),
    /// (RasterTooLarge) The bounds and density imply an infeasible raster
    #[error(
        "(RasterTooLarge) a {width} x {height} raster exceeds the limit of {limit} pixels; lower the DPI or tighten the bounds"
    )]
    RasterTooLarge { width: u64, height: u64, limit: u64 },
    /// (InvalidConfig) A rendering parameter is out of range
    #[error("(InvalidConfig) {0}")]
    InvalidConfig(String),
    #[cfg(feature = "image-io")]
    /// Error bubbled up from the `image` crate while encoding the raster.
    #[error("(Image) {0}")]
    Image(#[from] ::image::ImageError),
}
