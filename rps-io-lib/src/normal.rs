// SPDX-License-Identifier: MPL-2.0

//! Surface normals: visualization, saving and loading.
//!
//! Normals are stored with (x, y, z) channels, either flat (p x 3)
//! or image-shaped (height x width x 3).

use crate::display;
use crate::error::{Error, Result};
use crate::interop;
use crate::npy;
use ndarray::{s, Array3, ArrayBase, ArrayD, Data, Dimension, Zip};
use std::path::Path;

/// Title of the normal map window.
pub const WINDOW_TITLE: &str = "normal map";

/// Reshape normals into a (height x width x 3) normal map ready for display.
///
/// Channels 0 and 2 are swapped, so the result is in BGR order
/// (z, y, x), and values are rescaled from [-1, 1] to [0, 1].
pub fn normal_map<S, D>(
    normal: &ArrayBase<S, D>,
    height: usize,
    width: usize,
) -> Result<Array3<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let len = normal.len();
    let values: Vec<f64> = normal.iter().cloned().collect();
    let mut map = Array3::from_shape_vec((height, width, 3), values).map_err(|_| {
        Error::Reshape {
            len,
            height,
            width,
        }
    })?;
    let (x, z) = map.multi_slice_mut((s![.., .., 0], s![.., .., 2]));
    Zip::from(x).and(z).for_each(|x, z| std::mem::swap(x, z));
    map.mapv_inplace(|v| (v + 1.0) / 2.0);
    Ok(map)
}

/// Show the normal map in a window, until a key is pressed if `delay` is 0,
/// or during `delay` milliseconds otherwise.
pub fn disp_normalarray<S, D>(
    normal: Option<&ArrayBase<S, D>>,
    height: usize,
    width: usize,
    delay: u64,
) -> Result<()>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let normal = normal.ok_or(Error::MissingArgument("normal"))?;
    let map = normal_map(normal, height, width)?;
    display::show(WINDOW_TITLE, &interop::rgb_from_bgr_array(&map), delay)
}

/// Save the normal map as it would be displayed, into an RGB image file.
/// The format is deduced from the extension of `filename`.
pub fn save_normal_map_image<P, S, D>(
    filename: Option<P>,
    normal: Option<&ArrayBase<S, D>>,
    height: usize,
    width: usize,
) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = f64>,
    D: Dimension,
{
    let path = filename.ok_or(Error::MissingArgument("filename"))?;
    let normal = normal.ok_or(Error::MissingArgument("normal"))?;
    let map = normal_map(normal, height, width)?;
    interop::rgb_from_bgr_array(&map).save(path.as_ref())?;
    log::debug!("Saved normal map image {:?}", path.as_ref());
    Ok(())
}

/// Save normals as they are, whatever their shape.
pub fn save_normalarray<P, S, D>(
    filename: Option<P>,
    normal: Option<&ArrayBase<S, D>>,
) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = f64>,
    D: Dimension,
{
    let path = filename.ok_or(Error::MissingArgument("filename"))?;
    let normal = normal.ok_or(Error::MissingArgument("normal"))?;
    npy::write(path.as_ref(), normal)?;
    log::debug!("Saved normals {:?} to {:?}", normal.shape(), path.as_ref());
    Ok(())
}

/// Load normals saved with `save_normalarray`, with their original shape.
pub fn load_normalarray<P: AsRef<Path>>(filename: Option<P>) -> Result<ArrayD<f64>> {
    let path = filename.ok_or(Error::MissingArgument("filename"))?;
    npy::read(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    fn flat_normals() -> Array2<f64> {
        // 2 x 2 image.
        arr2(&[
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.6, 0.0, 0.8],
        ])
    }

    #[test]
    fn normal_map_swaps_and_rescales() {
        let map = normal_map(&flat_normals(), 2, 2).unwrap();
        assert_eq!(map.dim(), (2, 2, 3));
        // Pixel (0, 1) has normal (1, 0, 0), displayed as (z, y, x).
        assert_eq!(map[(0, 1, 0)], 0.5);
        assert_eq!(map[(0, 1, 1)], 0.5);
        assert_eq!(map[(0, 1, 2)], 1.0);
        // Pixel (1, 1) has normal (0.6, 0, 0.8).
        assert!((map[(1, 1, 0)] - 0.9).abs() < 1e-12);
        assert!((map[(1, 1, 2)] - 0.8).abs() < 1e-12);
        assert!(map.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn normal_map_accepts_image_shaped_normals() {
        let flat = flat_normals();
        let shaped = flat.clone().into_shape((2, 2, 3)).unwrap();
        assert_eq!(
            normal_map(&flat, 2, 2).unwrap(),
            normal_map(&shaped, 2, 2).unwrap()
        );
    }

    #[test]
    fn normal_map_checks_size() {
        assert!(matches!(
            normal_map(&flat_normals(), 3, 2),
            Err(Error::Reshape {
                len: 12,
                height: 3,
                width: 2
            })
        ));
    }

    #[test]
    fn missing_arguments() {
        let normals = flat_normals();
        assert!(matches!(
            disp_normalarray(None::<&Array2<f64>>, 2, 2, 0),
            Err(Error::MissingArgument("normal"))
        ));
        assert!(matches!(
            save_normalarray(None::<&str>, Some(&normals)),
            Err(Error::MissingArgument("filename"))
        ));
        assert!(matches!(
            load_normalarray(None::<&str>),
            Err(Error::MissingArgument("filename"))
        ));
    }

    #[test]
    fn nothing_saved_without_normals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normals.npy");
        assert!(matches!(
            save_normalarray(Some(&path), None::<&Array2<f64>>),
            Err(Error::MissingArgument("normal"))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn normal_map_image_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normals.png");
        save_normal_map_image(Some(&path), Some(&flat_normals()), 2, 2).unwrap();
        let img = image::open(&path).unwrap().into_rgb8();
        assert_eq!(img.dimensions(), (2, 2));
        // x -> red, y -> green, z -> blue.
        assert_eq!(img.get_pixel(1, 0).0, [255, 128, 128]);
        assert_eq!(img.get_pixel(0, 1).0, [128, 0, 128]);
    }

    #[cfg(not(feature = "display"))]
    #[test]
    fn no_window_without_display_feature() {
        assert!(matches!(
            disp_normalarray(Some(&flat_normals()), 2, 2, 0),
            Err(Error::DisplayUnavailable)
        ));
    }
}
