// SPDX-License-Identifier: MPL-2.0

//! Light directions loaders.
//!
//! Both the text and the npy formats store one light per row:
//!
//! ```text
//! light1_x light1_y light1_z
//! light2_x light2_y light2_z
//! ...
//! lightf_x lightf_y lightf_z
//! ```
//!
//! and both loaders return the transposed light matrix (3 x f),
//! with one light direction per column.

use crate::error::{Error, Result};
use crate::npy;
use nalgebra::Matrix3xX;
use std::path::Path;

/// Light matrix, one column per light source.
pub type Lights = Matrix3xX<f64>;

/// Load a whitespace separated text file of lights.
///
/// Empty lines and `#` comments are ignored.
pub fn load_lighttxt<P: AsRef<Path>>(filename: Option<P>) -> Result<Lights> {
    let path = filename.ok_or(Error::MissingArgument("filename"))?;
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lights = parse_lights(&content)?;
    log::debug!("Loaded {} lights from {:?}", lights.ncols(), path);
    Ok(lights)
}

/// Load lights from a `.npy` file containing a (f, 3) array.
pub fn load_lightnpy<P: AsRef<Path>>(filename: Option<P>) -> Result<Lights> {
    let path = filename.ok_or(Error::MissingArgument("filename"))?;
    let array = npy::read(path.as_ref())?;
    match array.shape() {
        &[_, 3] => {}
        shape => return Err(Error::LightShape(shape.to_vec())),
    }
    // Logical (row-major) order of a (f, 3) array is the
    // column-major order of its (3, f) transpose.
    let nb_lights = array.shape()[0];
    let lights = Lights::from_iterator(nb_lights, array.iter().cloned());
    log::debug!("Loaded {} lights from {:?}", nb_lights, path.as_ref());
    Ok(lights)
}

fn parse_lights(content: &str) -> Result<Lights> {
    let mut coords = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        let line_nb = line_idx + 1;
        let data = line.split('#').next().unwrap_or("");
        let tokens: Vec<_> = data.split_whitespace().collect();
        match tokens.len() {
            0 => continue,
            3 => {}
            found => {
                return Err(Error::LightRow {
                    line: line_nb,
                    found,
                })
            }
        }
        for token in tokens {
            let value: f64 = token.parse().map_err(|source| Error::ParseFloat {
                line: line_nb,
                token: token.to_string(),
                source,
            })?;
            coords.push(value);
        }
    }
    Ok(Lights::from_iterator(coords.len() / 3, coords))
}
