// SPDX-License-Identifier: MPL-2.0

//! Loading of gray images, one at a time or a whole folder at once.

use crate::error::{Error, Result};
use crate::interop;
use glob::{MatchOptions, Pattern};
use nalgebra::DMatrix;
use std::path::{Path, PathBuf};

/// Measurement matrix (p x f) of a folder of images.
///
/// Each column is one image, flattened in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    pub matrix: DMatrix<u8>,
    pub height: usize,
    pub width: usize,
}

impl Measurements {
    /// No image matched: 0 x 0 matrix with zero height and width.
    pub fn empty() -> Self {
        Measurements {
            matrix: DMatrix::from_vec(0, 0, Vec::new()),
            height: 0,
            width: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Number of images, or columns of the matrix.
    pub fn nb_images(&self) -> usize {
        self.matrix.ncols()
    }
}

/// Load an image as a gray level (height x width) matrix.
///
/// Returns `Ok(None)` if the file does not exist or cannot be decoded.
/// Only a missing filename is reported as an error.
pub fn load_image<P: AsRef<Path>>(filename: Option<P>) -> Result<Option<DMatrix<u8>>> {
    let path = filename.ok_or(Error::MissingArgument("filename"))?;
    match image::open(path.as_ref()) {
        Ok(img) => Ok(Some(interop::matrix_from_image(img.into_luma8()))),
        Err(err) => {
            log::warn!("Could not load image {:?}: {}", path.as_ref(), err);
            Ok(None)
        }
    }
}

/// Load all images of the folder with the given extension,
/// in the lexicographic order of their paths.
///
/// All images must have the same dimensions.
/// If no file matches, the returned measurements are empty.
pub fn load_images<P: AsRef<Path>>(
    foldername: Option<P>,
    ext: Option<&str>,
) -> Result<Measurements> {
    let (folder, ext) = match (foldername, ext) {
        (Some(folder), Some(ext)) => (folder, ext),
        (None, _) => return Err(Error::MissingArgument("foldername")),
        (_, None) => return Err(Error::MissingArgument("ext")),
    };
    let paths = matching_paths(folder.as_ref(), ext)?;

    let mut shape = None;
    let mut data = Vec::new();
    for path in paths.iter() {
        let img = image::open(path)
            .map_err(|source| Error::Decode {
                path: path.clone(),
                source,
            })?
            .into_luma8();
        let (img_shape, column) = interop::column_from_image(img);
        match shape {
            None => shape = Some(img_shape),
            Some(expected) if expected != img_shape => {
                return Err(Error::DimensionMismatch {
                    path: path.clone(),
                    expected,
                    found: img_shape,
                })
            }
            Some(_) => {}
        }
        log::debug!("Loaded {:?}", path);
        data.extend(column);
    }

    match shape {
        None => {
            log::info!("No *.{} image in {:?}", ext, folder.as_ref());
            Ok(Measurements::empty())
        }
        Some((height, width)) => {
            log::info!(
                "Loaded {} images of {}x{} from {:?}",
                paths.len(),
                width,
                height,
                folder.as_ref()
            );
            Ok(Measurements {
                matrix: DMatrix::from_vec(height * width, paths.len(), data),
                height,
                width,
            })
        }
    }
}

/// Files directly inside `folder` ending with `.ext`, sorted.
fn matching_paths(folder: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let folder_str = folder
        .to_str()
        .ok_or_else(|| Error::InvalidPath(folder.to_path_buf()))?;
    let pattern = Path::new(&Pattern::escape(folder_str)).join(format!("*.{}", ext));
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    // Pattern was built from valid unicode.
    let pattern = pattern.to_string_lossy();
    let mut paths: Vec<PathBuf> = glob::glob_with(&pattern, options)?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn gray_image(mat: &DMatrix<u8>) -> GrayImage {
        let (height, width) = mat.shape();
        GrayImage::from_fn(width as u32, height as u32, |x, y| {
            Luma([mat[(y as usize, x as usize)]])
        })
    }

    fn write_gray(dir: &Path, name: &str, height: usize, width: usize, value: u8) -> PathBuf {
        let path = dir.join(name);
        gray_image(&DMatrix::from_element(height, width, value))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn single_image_is_a_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let mat = DMatrix::from_row_slice(2, 3, &[0u8, 10, 20, 30, 40, 50]);
        gray_image(&mat).save(&path).unwrap();
        assert_eq!(load_image(Some(&path)).unwrap(), Some(mat));
    }

    #[test]
    fn undecodable_image_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        assert_eq!(load_image(Some(&missing)).unwrap(), None);
        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not a png").unwrap();
        assert_eq!(load_image(Some(&garbage)).unwrap(), None);
    }

    #[test]
    fn missing_arguments() {
        assert!(matches!(
            load_image(None::<&str>),
            Err(Error::MissingArgument("filename"))
        ));
        assert!(matches!(
            load_images(None::<&str>, Some("png")),
            Err(Error::MissingArgument("foldername"))
        ));
        assert!(matches!(
            load_images(Some("."), None),
            Err(Error::MissingArgument("ext"))
        ));
    }

    #[test]
    fn only_matching_extension_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        write_gray(dir.path(), "b.png", 2, 3, 7);
        write_gray(dir.path(), "a.png", 2, 3, 3);
        let scratch = tempfile::tempdir().unwrap();
        let nine = write_gray(scratch.path(), "nine.png", 2, 3, 9);
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let ignored = [
            dir.path().join("c.bmp"),
            dir.path().join("d.PNG"),
            dir.path().join(".hidden.png"),
            sub.join("e.png"),
        ];
        for other in ignored.iter() {
            std::fs::copy(&nine, other).unwrap();
        }
        let measurements = load_images(Some(dir.path()), Some("png")).unwrap();
        assert_eq!(measurements.nb_images(), 2);
        assert_eq!((measurements.height, measurements.width), (2, 3));
        assert!(measurements.matrix.column(0).iter().all(|&v| v == 3));
        assert!(measurements.matrix.column(1).iter().all(|&v| v == 7));
    }

    #[test]
    fn no_match_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_gray(dir.path(), "a.png", 2, 2, 0);
        let measurements = load_images(Some(dir.path()), Some("jpg")).unwrap();
        assert!(measurements.is_empty());
        assert_eq!(measurements, Measurements::empty());
    }

    #[test]
    fn sizes_must_agree() {
        let dir = tempfile::tempdir().unwrap();
        write_gray(dir.path(), "a.png", 2, 2, 0);
        let odd = write_gray(dir.path(), "b.png", 3, 2, 0);
        match load_images(Some(dir.path()), Some("png")) {
            Err(Error::DimensionMismatch {
                path,
                expected,
                found,
            }) => {
                assert_eq!(path, odd);
                assert_eq!(expected, (2, 2));
                assert_eq!(found, (3, 2));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn undecodable_folder_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_gray(dir.path(), "a.png", 2, 2, 0);
        std::fs::write(dir.path().join("b.png"), b"not a png").unwrap();
        assert!(matches!(
            load_images(Some(dir.path()), Some("png")),
            Err(Error::Decode { .. })
        ));
    }
}
