//! Hide text in the least significant bits of a raw pixel buffer.
//!
//! A message is XORed with an optional repeating key, packed most significant bit
//! first, terminated with [`bits::TERMINATOR`] and written one bit per sample in
//! row, column, channel order. [`hide`] and [`reveal`] run the whole pipeline;
//! the modules expose each stage on its own.
//!
//! ```rust
//! # use lsbtext::{Error, PixelBuffer};
//! # fn main() -> Result<(), Error> {
//! let carrier = PixelBuffer::new(2, 2, 3, vec![0x80; 12])?;
//! let stego = lsbtext::hide(carrier, "A", Some("key"), None)?;
//! assert_eq!((stego.width(), stego.height()), (3, 3));
//! let message = lsbtext::reveal(&stego, Some("key"), None)?;
//! assert_eq!(message.as_deref(), Some("A"));
//! # Ok(())
//! # }
//! ```

pub mod bits;
pub mod buffer;
pub mod capacity;
pub mod cipher;
pub mod embed;
pub mod extract;
pub mod file;
pub mod resize;
pub mod text;

pub use bits::Bitstream;
pub use buffer::PixelBuffer;

/// Progress notification: `(processed, total)`.
pub type Progress<'a> = Option<&'a mut dyn FnMut(usize, usize)>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid carrier: {reason}")]
    InvalidCarrier { reason: String },
    #[error("Carrier is too small: Carrier holds {capacity} bits, but {required} bits are required.")]
    Capacity { capacity: u64, required: u64 },
    #[error("Malformed message: {bits} bits is not a whole number of bytes.")]
    Decode { bits: usize },
    #[error("Unsupported character {character:?} at position {position}: only single byte characters can be hidden.")]
    InvalidMessage { character: char, position: usize },
    #[error("Unsupported character {character:?} at position {position} of the key: only single byte characters can be used.")]
    InvalidKey { character: char, position: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encoding(#[from] png::EncodingError),
}

impl Error {
    pub(crate) fn invalid_carrier(reason: impl ToString) -> Self {
        Self::InvalidCarrier {
            reason: reason.to_string(),
        }
    }
}

/// Hides `message` in `carrier`, growing the carrier first if it cannot hold the bitstream.
///
/// # Arguments
///
/// * `carrier` - The decoded image to hide the message in
/// * `message` - Text made of single byte characters
/// * `key` - Optional keystream applied before packing; `None` or `""` leaves the message as is
/// * `progress` - Called once per embedded bit
/// # Returns
/// The carrier holding the message, possibly with new dimensions
pub fn hide(
    carrier: PixelBuffer,
    message: &str,
    key: Option<&str>,
    progress: Progress<'_>,
) -> Result<PixelBuffer> {
    let mut payload = text::encode(message)?;
    let key = key.map(text::encode_key).transpose()?;
    cipher::transform_in_place(&mut payload, key.as_deref());

    let stream = bits::pack(&payload);
    let (width, height) = capacity::required_carrier_size(
        stream.len() as u64,
        carrier.width(),
        carrier.height(),
        carrier.channels(),
    );

    let carrier = if (width, height) == (carrier.width(), carrier.height()) {
        carrier
    } else {
        log::debug!(
            "Growing carrier from {}x{} to {width}x{height} to fit {} bits",
            carrier.width(),
            carrier.height(),
            stream.len()
        );
        resize::resize(&carrier, width, height)?
    };

    let carrier = embed::embed(carrier, &stream, progress)?;
    log::info!(
        "Hid {} characters in a {}x{} carrier",
        payload.len(),
        carrier.width(),
        carrier.height()
    );
    Ok(carrier)
}

/// Recovers a message hidden by [`hide`].
///
/// Returns `Ok(None)` when the carrier holds no terminator. A wrong `key` is not
/// detected: it yields a different message.
pub fn reveal(
    carrier: &PixelBuffer,
    key: Option<&str>,
    progress: Progress<'_>,
) -> Result<Option<String>> {
    let Some(stream) = extract::extract(carrier, progress) else {
        log::info!("No terminator found in {} samples", carrier.samples().len());
        return Ok(None);
    };

    let mut payload = bits::unpack(stream.bits())?;
    let key = key.map(text::encode_key).transpose()?;
    cipher::transform_in_place(&mut payload, key.as_deref());
    log::info!("Revealed {} characters", payload.len());
    Ok(Some(text::decode(&payload)))
}
