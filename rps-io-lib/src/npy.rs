// SPDX-License-Identifier: MPL-2.0

//! Serialized arrays in the numpy `.npy` format.
//!
//! Arrays are always handed out as `f64`.
//! Files storing other numeric types (`f32` and fixed-size integers)
//! are also accepted and widened on read.

use crate::error::Result;
use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use ndarray_npy::ReadableElement;
use std::path::Path;

/// Read a `.npy` file of any dimensionality and numeric element type.
pub fn read<P: AsRef<Path>>(path: P) -> Result<ArrayD<f64>> {
    let path = path.as_ref();
    let err_f64 = match ndarray_npy::read_npy::<_, ArrayD<f64>>(path) {
        Ok(array) => return Ok(array),
        Err(err) => err,
    };
    let widened = read_widened(path, <f64 as From<f32>>::from)
        .or_else(|| read_widened(path, |v: i64| v as f64))
        .or_else(|| read_widened(path, <f64 as From<i32>>::from))
        .or_else(|| read_widened(path, <f64 as From<i16>>::from))
        .or_else(|| read_widened(path, <f64 as From<i8>>::from))
        .or_else(|| read_widened(path, |v: u64| v as f64))
        .or_else(|| read_widened(path, <f64 as From<u32>>::from))
        .or_else(|| read_widened(path, <f64 as From<u16>>::from))
        .or_else(|| read_widened(path, <f64 as From<u8>>::from));
    // Report the error of the preferred element type.
    widened.ok_or_else(|| err_f64.into())
}

/// Read the file as an array of `T` and widen it to `f64`,
/// or `None` if the file does not hold `T` elements.
fn read_widened<T, F>(path: &Path, widen: F) -> Option<ArrayD<f64>>
where
    T: ReadableElement + Clone,
    F: Fn(T) -> f64,
{
    let array = ndarray_npy::read_npy::<_, ArrayD<T>>(path).ok()?;
    log::debug!(
        "Widening {} array of {:?} to f64",
        std::any::type_name::<T>(),
        path
    );
    Some(array.mapv(widen))
}

/// Write an array of any shape into a `.npy` file.
pub fn write<P, S, D>(path: P, array: &ArrayBase<S, D>) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = f64>,
    D: Dimension,
{
    ndarray_npy::write_npy(path, array)?;
    Ok(())
}
