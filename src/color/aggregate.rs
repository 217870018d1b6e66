//! Reduction of an image region to its representative color

use crate::color::Color;
use crate::io::error::{Result, computation_error};
use image::{GenericImageView, Rgba};

/// Per-channel arithmetic mean of every pixel in `region`
///
/// Each channel is summed independently in a 64-bit accumulator, floor-divided
/// by the pixel count, and truncated to 8 bits. Alpha is averaged exactly like
/// the color channels.
///
/// # Errors
///
/// Returns a computation error if the region contains no pixels
pub fn average_color<I>(region: &I) -> Result<Color>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = region.dimensions();
    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count == 0 {
        return Err(computation_error(
            "average color",
            &format!("region {width}x{height} contains no pixels"),
        ));
    }

    let mut sums = [0u64; 4];
    for (_, _, pixel) in region.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(channel);
        }
    }

    let [r, g, b, a] = sums.map(|sum| (sum / pixel_count) as u8);
    Ok(Color::new(r, g, b, a))
}
