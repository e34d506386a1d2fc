use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;

use crate::error::{Result, ToneError};
use crate::spectrum::Spectrum;

const BACKGROUND: Rgb<u8> = Rgb([0x01, 0x04, 0x1b]);
const BAR: Rgb<u8> = Rgb([0x4d, 0xa4, 0xd5]);
const PEAK: Rgb<u8> = Rgb([0xfc, 0xfd, 0x21]);

/// Render a magnitude spectrum as vertical bars, low frequencies on the left.
///
/// - `spectrum`: bins in dB
/// - `width`, `height`: output image size in pixels
/// - `dynamic_range`: dB below the loudest bin mapped to an empty column
pub fn create_spectrum_image(
    spectrum: &Spectrum,
    width: u32,
    height: u32,
    dynamic_range: f32,
) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    if spectrum.bins_db.is_empty() || width == 0 || height == 0 {
        return img;
    }

    let num_bins = spectrum.bins_db.len();
    let max_db = spectrum.max_db();
    let range = dynamic_range.max(1.0);
    let min_db = max_db - range;

    for x in 0..width {
        // Bins covered by this pixel column; keep the loudest so narrow peaks survive
        let start_bin = (x as usize * num_bins) / width as usize;
        let end_bin = (((x as usize + 1) * num_bins) / width as usize).max(start_bin + 1);
        let value = spectrum.bins_db[start_bin..end_bin.min(num_bins)]
            .iter()
            .cloned()
            .fold(f32::NEG_INFINITY, f32::max);

        let normalized = ((value - min_db) / range).clamp(0.0, 1.0);
        let bar_height = (normalized * height as f32).round() as u32;
        let color = if value >= max_db { PEAK } else { BAR };

        // (0,0) is top-left, bars grow from the bottom
        for y in (height - bar_height)..height {
            img.put_pixel(x, y, color);
        }
    }

    img
}

pub fn save_spectrum_image(
    path: &Path,
    spectrum: &Spectrum,
    width: u32,
    height: u32,
    dynamic_range: f32,
) -> Result<()> {
    create_spectrum_image(spectrum, width, height, dynamic_range)
        .save(path)
        .map_err(|source| ToneError::Image { path: path.to_path_buf(), source })?;
    info!("wrote {} ({}x{})", path.display(), width, height);
    Ok(())
}
