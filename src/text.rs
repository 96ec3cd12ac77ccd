//! Single byte text.
//!
//! Messages and keys are limited to characters in `U+0000..=U+00FF`, which map
//! one to one onto bytes (ISO-8859-1).

use crate::{Error, Result};

/// One byte per character, or the first character that does not fit with its position
fn to_bytes(text: &str) -> std::result::Result<Vec<u8>, (char, usize)> {
    text.chars()
        .enumerate()
        .map(|(position, character)| u8::try_from(character).map_err(|_| (character, position)))
        .collect()
}

/// Converts a message into one byte per character
///
/// Fails with [`Error::InvalidMessage`] on the first character above `U+00FF`.
pub fn encode(text: &str) -> Result<Vec<u8>> {
    to_bytes(text).map_err(|(character, position)| Error::InvalidMessage {
        character,
        position,
    })
}

/// Converts a key into one byte per character
///
/// Fails with [`Error::InvalidKey`] on the first character above `U+00FF`.
pub fn encode_key(key: &str) -> Result<Vec<u8>> {
    to_bytes(key).map_err(|(character, position)| Error::InvalidKey {
        character,
        position,
    })
}

/// Converts bytes back into characters, one per byte
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn latin1() {
        let bytes = encode("café ÿ").unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xe9, b' ', 0xff]);
        assert_eq!(decode(&bytes), "café ÿ");
    }

    #[test]
    fn rejects_wide_characters() {
        let err = encode("ok€").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMessage {
                character: '€',
                position: 2
            }
        ));
    }

    #[test]
    fn rejects_wide_key_characters() {
        assert_eq!(encode_key("clé").unwrap(), vec![b'c', b'l', 0xe9]);
        let err = encode_key("κλειδί").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidKey {
                character: 'κ',
                position: 0
            }
        ));
        assert!(err.to_string().contains("of the key"));
    }
}
