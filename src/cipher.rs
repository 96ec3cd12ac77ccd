//! Repeating key XOR.
//!
//! This is obfuscation, not encryption: the transform is its own inverse and a
//! wrong key produces different text rather than an error.

/// XORs each byte of `text` with `key[i % key.len()]`
///
/// A missing or empty key leaves the text unchanged.
/// ```rust
/// # use lsbtext::cipher::transform;
/// let hidden = transform(b"secret", Some(b"key"));
/// assert_ne!(hidden, b"secret");
/// assert_eq!(transform(&hidden, Some(b"key")), b"secret");
/// ```
pub fn transform(text: &[u8], key: Option<&[u8]>) -> Vec<u8> {
    let mut out = text.to_vec();
    transform_in_place(&mut out, key);
    out
}

pub fn transform_in_place(text: &mut [u8], key: Option<&[u8]>) {
    let Some(key) = key.filter(|key| !key.is_empty()) else {
        return;
    };
    for (byte, k) in text.iter_mut().zip(key.iter().cycle()) {
        *byte ^= k;
    }
}
