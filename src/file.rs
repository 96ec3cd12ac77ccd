//! Carrier files.
//!
//! PNG is read and written with the `png` crate so the samples reach the codec
//! exactly as stored. Other formats go through `image` and are only useful as
//! input: a hidden message must always be saved losslessly. Either way the EXIF
//! orientation is applied on load, so the carrier is upright.

use crate::{Error, PixelBuffer, Result};
use image::{
    codecs::png::PngDecoder, metadata::Orientation, DynamicImage, GenericImageView,
    ImageDecoder, ImageReader,
};
use std::{
    fs::File,
    io::{BufWriter, Cursor},
    path::Path,
};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn decode_png(bytes: &[u8]) -> Result<PixelBuffer> {
    let mut decoder = png::Decoder::new(bytes);
    // Palettes and low bit depths become 8 bit samples, 16 bit samples are truncated
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(Error::invalid_carrier)?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(Error::invalid_carrier)?;
    buf.truncate(frame.buffer_size());

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(Error::invalid_carrier(format!(
            "unsupported bit depth {:?}",
            frame.bit_depth
        )));
    }
    PixelBuffer::new(
        frame.width,
        frame.height,
        frame.color_type.samples() as u8,
        buf,
    )
}

/// Wraps the samples of `buffer` without converting them
fn to_image(buffer: PixelBuffer) -> Result<DynamicImage> {
    let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
    let samples = buffer.into_samples();
    let image = match channels {
        1 => image::GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8),
        2 => image::GrayAlphaImage::from_raw(width, height, samples).map(DynamicImage::ImageLumaA8),
        3 => image::RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        4 => image::RgbaImage::from_raw(width, height, samples).map(DynamicImage::ImageRgba8),
        _ => None,
    };
    image.ok_or_else(|| Error::invalid_carrier(format!("cannot orient {channels} channels per pixel")))
}

/// Keeps grey, grey with alpha, RGB and RGBA as they are, converts anything else to RGBA
fn from_image(image: DynamicImage) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    let (channels, samples) = match image {
        DynamicImage::ImageLuma8(buffer) => (1, buffer.into_raw()),
        DynamicImage::ImageLumaA8(buffer) => (2, buffer.into_raw()),
        DynamicImage::ImageRgb8(buffer) => (3, buffer.into_raw()),
        DynamicImage::ImageRgba8(buffer) => (4, buffer.into_raw()),
        other => (4, other.to_rgba8().into_raw()),
    };
    PixelBuffer::new(width, height, channels, samples)
}

fn decode_other(bytes: &[u8]) -> Result<PixelBuffer> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()
        .map_err(Error::invalid_carrier)?;
    let orientation = decoder.orientation().map_err(Error::invalid_carrier)?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(Error::invalid_carrier)?;
    image.apply_orientation(orientation);
    from_image(image)
}

/// Rotates or flips a decoded PNG according to its `eXIf` chunk
fn orient_png(bytes: &[u8], buffer: PixelBuffer) -> Result<PixelBuffer> {
    let orientation = PngDecoder::new(Cursor::new(bytes))
        .and_then(|mut decoder| decoder.orientation())
        .map_err(Error::invalid_carrier)?;
    if orientation == Orientation::NoTransforms {
        return Ok(buffer);
    }
    log::debug!("Applying EXIF orientation {orientation:?}");
    let mut image = to_image(buffer)?;
    image.apply_orientation(orientation);
    from_image(image)
}

/// Decodes the image at `path` into a [`PixelBuffer`]
///
/// The format is detected from the file contents. Grey, grey with alpha, RGB
/// and RGBA keep their channel count; anything else is converted to RGBA. An
/// EXIF orientation tag is applied, so a rotated photo loads upright.
pub fn load(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let buffer = if bytes.starts_with(&PNG_SIGNATURE) {
        orient_png(&bytes, decode_png(&bytes)?)?
    } else {
        decode_other(&bytes)?
    };
    log::debug!(
        "Loaded {} as {}x{}x{}",
        path.display(),
        buffer.width(),
        buffer.height(),
        buffer.channels()
    );
    Ok(buffer)
}

/// Writes `buffer` to `path` as an 8 bit PNG
pub fn save_png(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<()> {
    let color = match buffer.channels() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        channels => {
            return Err(Error::invalid_carrier(format!(
                "cannot store {channels} channels per pixel as PNG"
            )))
        }
    };

    let file = BufWriter::new(File::create(path.as_ref())?);
    let mut encoder = png::Encoder::new(file, buffer.width(), buffer.height());
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(buffer.samples())?;
    writer.finish()?;
    Ok(())
}
