//! Converting occupancy fields to and from grayscale images

use crate::errors::StencilError;
use crate::float_types::Real;
use crate::raster::OccupancyField;
use image::{GrayImage, Luma};
use std::path::Path;

/// Luma written for stencil material.
const SOLID_LUMA: u8 = 0;
/// Luma written for openings.
const CLEAR_LUMA: u8 = 255;

impl OccupancyField {
    /// Renders the field as a grayscale image: material black, openings white.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            if self.is_solid(x as usize, y as usize) {
                Luma([SOLID_LUMA])
            } else {
                Luma([CLEAR_LUMA])
            }
        })
    }

    /// Writes the field as a PNG (the intermediate raster of a render pass).
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), StencilError> {
        self.to_gray_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Builds a field from a grayscale image.
    ///
    /// - `threshold`: pixels darker than this are material, the rest are openings
    /// - `pixel_pitch`: physical size of one pixel in millimeters
    ///
    /// # Example
    /// ```no_run
    /// # use gerber_stencil::raster::OccupancyField;
    /// let img = image::open("paste.png").unwrap().to_luma8();
    /// let field = OccupancyField::from_gray_image(&img, 128, 25.4 / 1000.0);
    /// # let _ = field;
    /// ```
    pub fn from_gray_image(img: &GrayImage, threshold: u8, pixel_pitch: Real) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        let mut field = OccupancyField::new(width, height, pixel_pitch);
        for (x, y, pixel) in img.enumerate_pixels() {
            if pixel[0] >= threshold {
                field.set(x as i64, y as i64, false);
            }
        }
        field
    }
}
