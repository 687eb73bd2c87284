// SPDX-License-Identifier: MPL-2.0

//! Errors shared by all loaders and savers of the crate.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is None")]
    MissingArgument(&'static str),
    #[error("Cannot access {path:?}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Light at line {line}: expected 3 coordinates but got {found}")]
    LightRow { line: usize, found: usize },
    #[error("Light at line {line}: {token:?} is not a number")]
    ParseFloat {
        line: usize,
        token: String,
        source: std::num::ParseFloatError,
    },
    #[error("Light array must be of shape (f, 3) but is of shape {0:?}")]
    LightShape(Vec<usize>),
    #[error("Invalid npy file")]
    ReadNpy(#[from] ndarray_npy::ReadNpyError),
    #[error("Error writing npy file")]
    WriteNpy(#[from] ndarray_npy::WriteNpyError),
    #[error("Folder path is not valid unicode: {0:?}")]
    InvalidPath(PathBuf),
    #[error("Invalid file pattern")]
    Pattern(#[from] glob::PatternError),
    #[error("Cannot decode image {path:?}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Image {path:?} is {found:?} (height, width) but previous images are {expected:?}")]
    DimensionMismatch {
        path: PathBuf,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Cannot reshape {len} values into ({height}, {width}, 3)")]
    Reshape {
        len: usize,
        height: usize,
        width: usize,
    },
    #[error("Error encoding image")]
    Image(#[from] image::ImageError),
    #[error("Display window error: {0}")]
    Display(String),
    #[error("Built without the \"display\" feature, cannot open a window")]
    DisplayUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;
