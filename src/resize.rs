use crate::{Error, PixelBuffer, Result};
use image::{
    imageops::{self, FilterType},
    ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba,
};

/// Resamples `samples` as pixels of type `P`
fn resample<P>(buffer: &PixelBuffer, width: u32, height: u32) -> Result<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let image = ImageBuffer::<P, &[u8]>::from_raw(buffer.width(), buffer.height(), buffer.samples())
        .ok_or_else(|| Error::invalid_carrier("sample count does not match dimensions"))?;
    Ok(imageops::resize(&image, width, height, FilterType::Lanczos3).into_raw())
}

/// Produces a resampled copy of `buffer` at `width` x `height`
///
/// Uses a Lanczos3 filter. The channel count is kept and `buffer` is left untouched.
/// # Examples
/// ```rust
/// # use lsbtext::{Error, PixelBuffer, resize::resize};
/// # fn main() -> Result<(), Error> {
/// let buffer = PixelBuffer::new(2, 2, 4, vec![200; 16])?;
/// let grown = resize(&buffer, 5, 3)?;
/// assert_eq!((grown.width(), grown.height(), grown.channels()), (5, 3, 4));
/// # Ok(())
/// # }
/// ```
pub fn resize(buffer: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
    if (width, height) == (buffer.width(), buffer.height()) {
        return Ok(buffer.clone());
    }
    let samples = match buffer.channels() {
        1 => resample::<Luma<u8>>(buffer, width, height)?,
        2 => resample::<LumaA<u8>>(buffer, width, height)?,
        3 => resample::<Rgb<u8>>(buffer, width, height)?,
        4 => resample::<Rgba<u8>>(buffer, width, height)?,
        channels => {
            return Err(Error::invalid_carrier(format!(
                "cannot resample {channels} channels per pixel"
            )))
        }
    };
    PixelBuffer::new(width, height, buffer.channels(), samples)
}
