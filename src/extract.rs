use crate::{
    bits::{TERMINATOR, TERMINATOR_BITS},
    Bitstream, PixelBuffer, Progress,
};

/// Terminal state of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// The last 16 bits read equal the terminator
    TerminatorMatched,
    /// Every sample was read without a match
    BufferExhausted,
}

/// Reads least significant bits into `bits` until the terminator shows up
fn scan(samples: &[u8], bits: &mut Vec<bool>, progress: &mut Progress<'_>) -> Scan {
    let total = samples.len();
    let mut window: u16 = 0;
    for (index, sample) in samples.iter().enumerate() {
        let bit = sample & 1;
        window = (window << 1) | u16::from(bit);
        bits.push(bit == 1);
        if let Some(progress) = progress.as_mut() {
            progress(index + 1, total);
        }
        if bits.len() >= TERMINATOR_BITS && window == TERMINATOR {
            return Scan::TerminatorMatched;
        }
    }
    Scan::BufferExhausted
}

/// Reads the bitstream hidden in `buffer`
///
/// Samples are visited in the same order as [`embed`][crate::embed::embed]. The scan
/// stops at the first run of bits equal to the terminator.
///
/// # Arguments
///
/// * `buffer` - The carrier to read
/// * `progress` - Called as `(samples read, total samples)` after every sample
/// # Returns
/// The bits before the terminator, or `None` if the carrier holds no terminator.
/// A message whose own bits contain the terminator pattern is cut short there.
/// # Examples
/// ```rust
/// # use lsbtext::{Error, PixelBuffer, bits::{pack, unpack}, embed::embed, extract::extract};
/// # fn main() -> Result<(), Error> {
/// let carrier = embed(PixelBuffer::new(5, 5, 3, vec![9; 75])?, &pack(b"Hi"), None)?;
/// let stream = extract(&carrier, None).expect("terminator");
/// assert_eq!(unpack(stream.bits())?, b"Hi");
/// # Ok(())
/// # }
/// ```
pub fn extract(buffer: &PixelBuffer, mut progress: Progress<'_>) -> Option<Bitstream> {
    let mut bits = Vec::new();
    match scan(buffer.samples(), &mut bits, &mut progress) {
        Scan::TerminatorMatched => {
            bits.truncate(bits.len() - TERMINATOR_BITS);
            log::debug!("Terminator found after {} payload bits", bits.len());
            Some(Bitstream::from(bits))
        }
        Scan::BufferExhausted => None,
    }
}
