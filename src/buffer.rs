use crate::{Error, Result};

/// Largest supported channel count (RGBA)
pub const MAX_CHANNELS: u8 = 4;

/// Decoded 8 bit image samples, stored row by row with interleaved channels
///
/// Dimensions are fixed at construction and always agree with the sample count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps `samples` laid out as `[row][column][channel]`
    ///
    /// # Arguments
    ///
    /// * `width` - Columns, at least 1
    /// * `height` - Rows, at least 1
    /// * `channels` - Samples per pixel, between 1 and [`MAX_CHANNELS`]
    /// * `samples` - Exactly `width * height * channels` samples
    pub fn new(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_carrier(format!(
                "{width}x{height} image has no pixels"
            )));
        }
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(Error::invalid_carrier(format!(
                "{channels} channels per pixel is not supported"
            )));
        }
        let expected = width as u64 * height as u64 * channels as u64;
        if samples.len() as u64 != expected {
            return Err(Error::invalid_carrier(format!(
                "{width}x{height}x{channels} image needs {expected} samples, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Number of bits the buffer can hide, one per sample
    pub fn capacity(&self) -> u64 {
        self.samples.len() as u64
    }

    /// Sample at (`row`, `column`, `channel`), or `None` when out of range
    pub fn get(&self, row: u32, column: u32, channel: u8) -> Option<u8> {
        if row >= self.height || column >= self.width || channel >= self.channels {
            return None;
        }
        let index = (row as usize * self.width as usize + column as usize)
            * self.channels as usize
            + channel as usize;
        self.samples.get(index).copied()
    }

    /// All samples in scan order: row, then column, then channel
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indexing() {
        let buffer = PixelBuffer::new(2, 2, 3, (0..12).collect()).unwrap();
        assert_eq!(buffer.get(0, 0, 0), Some(0));
        assert_eq!(buffer.get(0, 1, 2), Some(5));
        assert_eq!(buffer.get(1, 0, 0), Some(6));
        assert_eq!(buffer.get(1, 1, 2), Some(11));
        assert_eq!(buffer.get(2, 0, 0), None);
        assert_eq!(buffer.get(0, 0, 3), None);
        assert_eq!(buffer.capacity(), 12);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            PixelBuffer::new(2, 2, 3, vec![0; 11]),
            Err(Error::InvalidCarrier { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(0, 2, 3, vec![]),
            Err(Error::InvalidCarrier { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(1, 1, 5, vec![0; 5]),
            Err(Error::InvalidCarrier { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(1, 1, 0, vec![]),
            Err(Error::InvalidCarrier { .. })
        ));
    }
}
