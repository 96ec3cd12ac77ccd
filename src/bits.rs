use crate::{Error, Result};

/// Marks the end of a hidden message: fifteen ones followed by a zero.
pub const TERMINATOR: u16 = 0b1111_1111_1111_1110;

/// Number of bits in [`TERMINATOR`]
pub const TERMINATOR_BITS: usize = u16::BITS as usize;

/// An ordered sequence of single bits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitstream {
    bits: Vec<bool>,
}

impl Bitstream {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl From<Vec<bool>> for Bitstream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

/// Appends the bits of `value`, most significant first
fn push_msb_first(out: &mut Vec<bool>, value: u16, width: u32) {
    out.extend((0..width).rev().map(|shift| (value >> shift) & 1 == 1));
}

/// Packs `message` into a bitstream followed by the [`TERMINATOR`]
///
/// Each byte is emitted most significant bit first.
/// # Examples
/// ```rust
/// # use lsbtext::bits::{pack, TERMINATOR_BITS};
/// let stream = pack(b"A");
/// assert_eq!(stream.len(), 8 + TERMINATOR_BITS);
/// assert_eq!(&stream.bits()[..8], &[false, true, false, false, false, false, false, true]);
/// ```
pub fn pack(message: &[u8]) -> Bitstream {
    let mut bits = Vec::with_capacity(message.len() * u8::BITS as usize + TERMINATOR_BITS);
    for &byte in message {
        push_msb_first(&mut bits, u16::from(byte), u8::BITS);
    }
    push_msb_first(&mut bits, TERMINATOR, u16::BITS);
    Bitstream { bits }
}

/// Unpacks the payload bits found before the terminator back into bytes
///
/// # Arguments
/// * `bits` - The payload, without the terminator
/// # Returns
/// The decoded bytes, or [`Error::Decode`] if `bits` is not a whole number of bytes
pub fn unpack(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % u8::BITS as usize != 0 {
        return Err(Error::Decode { bits: bits.len() });
    }
    Ok(bits
        .chunks_exact(u8::BITS as usize)
        .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;

    fn to_string(bits: &[bool]) -> String {
        bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn pack() {
        let stream = super::pack(b"Hi"); // 0b01001000 0b01101001
        assert_eq!(
            to_string(stream.bits()),
            "0100100001101001".to_owned() + "1111111111111110"
        );
    }

    #[test]
    fn pack_empty() {
        let stream = super::pack(b"");
        assert_eq!(stream.len(), TERMINATOR_BITS);
        assert_eq!(to_string(stream.bits()), "1111111111111110");
    }

    #[test]
    fn unpack() {
        let stream = super::pack(b"Hello World");
        let payload = &stream.bits()[..stream.len() - TERMINATOR_BITS];
        assert_eq!(super::unpack(payload).unwrap(), b"Hello World");
    }

    #[test]
    fn unpack_high_bytes() {
        let stream = super::pack(&[0x00, 0x7f, 0x80, 0xff]);
        let payload = &stream.bits()[..stream.len() - TERMINATOR_BITS];
        assert_eq!(super::unpack(payload).unwrap(), vec![0x00, 0x7f, 0x80, 0xff]);
    }

    #[test]
    fn unpack_partial_byte() {
        let err = super::unpack(&[true; 12]).unwrap_err();
        assert!(matches!(err, Error::Decode { bits: 12 }));
    }

    #[test]
    fn unpack_empty() {
        assert!(super::unpack(&[]).unwrap().is_empty());
    }
}
