// SPDX-License-Identifier: MPL-2.0

//! On-screen window, only available with the "display" feature.

use crate::error::{Error, Result};
use image::RgbImage;

#[cfg(feature = "display")]
pub fn show(title: &str, img: &RgbImage, delay: u64) -> Result<()> {
    use minifb::{KeyRepeat, Window, WindowOptions};
    use std::time::{Duration, Instant};

    let (width, height) = (img.width() as usize, img.height() as usize);
    let buffer: Vec<u32> = img
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        })
        .collect();

    let options = WindowOptions {
        resize: true,
        ..WindowOptions::default()
    };
    let mut window =
        Window::new(title, width, height, options).map_err(|e| Error::Display(e.to_string()))?;
    window.limit_update_rate(Some(Duration::from_millis(16)));

    let start = Instant::now();
    let timeout = Duration::from_millis(delay);
    while window.is_open() {
        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|e| Error::Display(e.to_string()))?;
        if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
            break;
        }
        if delay > 0 && start.elapsed() >= timeout {
            break;
        }
    }
    // Window is closed when dropped.
    Ok(())
}

#[cfg(not(feature = "display"))]
pub fn show(title: &str, img: &RgbImage, _delay: u64) -> Result<()> {
    log::error!(
        "Cannot show {:?} ({}x{}), rebuild with the \"display\" feature",
        title,
        img.width(),
        img.height()
    );
    Err(Error::DisplayUnavailable)
}
