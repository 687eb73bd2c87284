// SPDX-License-Identifier: MPL-2.0

//! Interoperability conversions between the image, matrix and array types.

use image::{GrayImage, ImageBuffer, Rgb, RgbImage};
use nalgebra::DMatrix;
use ndarray::Array3;

// Convert a gray Image into a DMatrix -----------------------------------------
// -----------------------------------------------------------------------------

/// Convert a gray image into a (height x width) matrix.
pub fn matrix_from_image(img: GrayImage) -> DMatrix<u8> {
    let ((height, width), pixels) = column_from_image(img);
    DMatrix::from_row_slice(height, width, &pixels)
}

/// Flatten a gray image into a single column of pixels, in row-major order.
///
/// Returns the `(height, width)` of the image alongside the column.
pub fn column_from_image(img: GrayImage) -> ((usize, usize), Vec<u8>) {
    let (width, height) = img.dimensions();
    ((height as usize, width as usize), img.into_raw())
}

// Convert a normal map into an Image ------------------------------------------
// -----------------------------------------------------------------------------

/// Convert a `(height, width, 3)` array with values in [0, 1],
/// stored in BGR channel order, into an 8 bits RGB image.
///
/// Values outside of [0, 1] are saturated.
#[allow(clippy::cast_possible_truncation)]
pub fn rgb_from_bgr_array(bgr: &Array3<f64>) -> RgbImage {
    let (height, width, _) = bgr.dim();
    let to_u8 = |v: f64| (v * 255.0).round().max(0.0).min(255.0) as u8;
    let mut img_buf = ImageBuffer::new(width as u32, height as u32);
    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let (x, y) = (x as usize, y as usize);
        *pixel = Rgb([
            to_u8(bgr[(y, x, 2)]),
            to_u8(bgr[(y, x, 1)]),
            to_u8(bgr[(y, x, 0)]),
        ]);
    }
    img_buf
}
