// SPDX-License-Identifier: MPL-2.0

//! # Photometric stereo data I/O
//!
//! Loaders for light directions and images, and saving, loading
//! and visualization of surface normals.

// #![warn(missing_docs)]

mod display;
pub mod error;
pub mod images;
pub mod interop;
pub mod light;
pub mod normal;
pub mod npy;

pub use error::{Error, Result};
pub use images::{load_image, load_images, Measurements};
pub use light::{load_lightnpy, load_lighttxt, Lights};
pub use normal::{
    disp_normalarray, load_normalarray, normal_map, save_normal_map_image, save_normalarray,
};
