use crate::{Bitstream, Error, PixelBuffer, Progress, Result};

/// Writes `stream` into the least significant bit of each sample of `buffer`
///
/// Samples are visited row by row, then column, then channel. Embedding stops as
/// soon as the stream is exhausted and the remaining samples keep their values.
///
/// # Arguments
///
/// * `buffer` - The carrier, modified in place and handed back
/// * `stream` - Message bits including the terminator
/// * `progress` - Called as `(bits written, stream length)` after every bit
/// # Returns
/// The carrier, or [`Error::Capacity`] if it has fewer samples than `stream` has bits.
/// The carrier is not modified in that case.
/// # Examples
/// ```rust
/// # use lsbtext::{Error, PixelBuffer, bits::pack, embed::embed};
/// # fn main() -> Result<(), Error> {
/// let carrier = PixelBuffer::new(8, 1, 3, vec![0; 24])?;
/// let stego = embed(carrier, &pack(b"A"), None)?;
/// assert_eq!(&stego.samples()[..8], &[0, 1, 0, 0, 0, 0, 0, 1]);
/// # Ok(())
/// # }
/// ```
pub fn embed(
    mut buffer: PixelBuffer,
    stream: &Bitstream,
    mut progress: Progress<'_>,
) -> Result<PixelBuffer> {
    let total = stream.len();
    if buffer.capacity() < total as u64 {
        return Err(Error::Capacity {
            capacity: buffer.capacity(),
            required: total as u64,
        });
    }

    let mut written = 0usize;
    for (sample, &bit) in buffer.samples_mut().iter_mut().zip(stream.bits()) {
        *sample = (*sample & !1) | u8::from(bit);
        written += 1;
        if let Some(progress) = progress.as_mut() {
            progress(written, total);
        }
    }
    debug_assert_eq!(written, total);

    log::debug!("Embedded {written} bits");
    Ok(buffer)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bits::pack;

    #[test]
    fn writes_lsbs_only() {
        let carrier = PixelBuffer::new(4, 2, 3, vec![0b1010_1010; 24]).unwrap();
        let stego = embed(carrier, &pack(b"H"), None).unwrap(); // 0b01001000
        let lsbs: Vec<u8> = stego.samples().iter().map(|s| s & 1).collect();
        assert_eq!(
            lsbs,
            vec![0, 1, 0, 0, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0]
        );
        assert!(stego.samples().iter().all(|s| s & !1 == 0b1010_1010));
    }

    #[test]
    fn leaves_tail_untouched() {
        let carrier = PixelBuffer::new(10, 10, 1, vec![0xff; 100]).unwrap();
        let stego = embed(carrier, &pack(b""), None).unwrap();
        assert_eq!(stego.samples()[15], 0xfe);
        assert!(stego.samples()[16..].iter().all(|&s| s == 0xff));
    }

    #[test]
    fn refuses_small_carrier() {
        let carrier = PixelBuffer::new(2, 2, 3, vec![7; 12]).unwrap();
        let err = embed(carrier, &pack(b"A"), None).unwrap_err();
        assert!(matches!(
            err,
            Error::Capacity {
                capacity: 12,
                required: 24
            }
        ));
    }

    #[test]
    fn exact_fit() {
        let carrier = PixelBuffer::new(4, 2, 3, vec![0; 24]).unwrap();
        assert!(embed(carrier, &pack(b"A"), None).is_ok());
    }

    #[test]
    fn reports_each_bit() {
        let stream = pack(b"ok");
        let mut calls = Vec::new();
        let mut record = |done: usize, total: usize| calls.push((done, total));
        let carrier = PixelBuffer::new(16, 16, 3, vec![0; 768]).unwrap();
        embed(carrier, &stream, Some(&mut record)).unwrap();
        assert_eq!(calls.len(), stream.len());
        assert!(calls.iter().enumerate().all(|(i, &(done, total))| done == i + 1 && total == 32));
    }

    #[test]
    fn deterministic() {
        let samples: Vec<u8> = (0..=255).cycle().take(300).collect();
        let first = PixelBuffer::new(10, 10, 3, samples.clone()).unwrap();
        let second = PixelBuffer::new(10, 10, 3, samples).unwrap();
        let stream = pack(b"same");
        assert_eq!(
            embed(first, &stream, None).unwrap(),
            embed(second, &stream, None).unwrap()
        );
    }
}
