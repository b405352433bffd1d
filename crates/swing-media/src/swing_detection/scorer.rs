//! Frame-to-frame motion scoring.
//!
//! Motion is the mean absolute luminance difference between two frames,
//! expressed as a fraction of full scale. Computed via the 256-bucket
//! difference histogram: `sum(bucket * count) / (pixels * 255)`.

use image::{DynamicImage, GrayImage};
use tracing::debug;

/// Motion score between two frames.
///
/// Returns 0.0 when the frames cannot be compared.
pub fn frame_difference(a: &DynamicImage, b: &DynamicImage) -> f64 {
    luma_difference(&a.to_luma8(), &b.to_luma8())
}

/// Motion score between two luminance frames.
///
/// Returns 0.0 for empty or mismatched frames.
pub fn luma_difference(a: &GrayImage, b: &GrayImage) -> f64 {
    if a.dimensions() != b.dimensions() {
        debug!(
            a = ?a.dimensions(),
            b = ?b.dimensions(),
            "Frame sizes differ, treating as no motion"
        );
        return 0.0;
    }

    let pixel_count = a.as_raw().len();
    if pixel_count == 0 {
        return 0.0;
    }

    let histogram = difference_histogram(a.as_raw(), b.as_raw());
    let weighted: u64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as u64 * count)
        .sum();

    weighted as f64 / (pixel_count as f64 * 255.0)
}

/// Histogram of per-pixel absolute differences.
fn difference_histogram(a: &[u8], b: &[u8]) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for (&pa, &pb) in a.iter().zip(b.iter()) {
        hist[pa.abs_diff(pb) as usize] += 1;
    }
    hist
}
