/// Ensure the channel count is usable for capacity arithmetic
macro_rules! debug_assert_channels {
    ( $channels:ident ) => {
        debug_assert!($channels > 0, "A carrier needs at least one channel");
    };
}

/// Number of bits a `width` x `height` carrier with `channels` samples per pixel can hide
pub fn capacity(width: u32, height: u32, channels: u8) -> u64 {
    width as u64 * height as u64 * channels as u64
}

/// Whether `bit_count` bits fit in the carrier
pub fn fits(bit_count: u64, width: u32, height: u32, channels: u8) -> bool {
    capacity(width, height, channels) >= bit_count
}

/// One uniform growth step: scale both sides by `sqrt(bits / capacity)`, growing each by at least one
fn grow(bit_count: u64, width: u32, height: u32, channels: u8) -> (u32, u32) {
    let factor = (bit_count as f64 / capacity(width, height, channels) as f64).sqrt();
    // `as` saturates, so an empty carrier (infinite factor) still lands on `+ 1`
    let scaled_width = (width as f64 * factor) as u32;
    let scaled_height = (height as f64 * factor) as u32;
    (
        scaled_width.max(width.saturating_add(1)),
        scaled_height.max(height.saturating_add(1)),
    )
}

/// Computes the carrier dimensions needed to hide `bit_count` bits
///
/// Returns the current dimensions when they already fit. Otherwise both sides are
/// scaled by the same factor; flooring the scaled sides can leave the result a
/// little short, so the step repeats until the bits fit. Every step grows both
/// sides by at least one pixel.
/// # Examples
/// ```rust
/// # use lsbtext::capacity::required_carrier_size;
/// // "A" plus terminator is 24 bits, a 2x2 RGB carrier only holds 12
/// assert_eq!(required_carrier_size(24, 2, 2, 3), (3, 3));
/// assert_eq!(required_carrier_size(24, 3, 3, 3), (3, 3));
/// ```
pub fn required_carrier_size(bit_count: u64, width: u32, height: u32, channels: u8) -> (u32, u32) {
    debug_assert_channels!(channels);
    let channels = channels.max(1);
    let (mut width, mut height) = (width, height);
    while !fits(bit_count, width, height, channels) {
        (width, height) = grow(bit_count, width, height, channels);
    }
    (width, height)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unchanged_when_it_fits() {
        assert_eq!(required_carrier_size(12, 2, 2, 3), (2, 2));
        assert_eq!(required_carrier_size(0, 1, 1, 1), (1, 1));
        assert_eq!(required_carrier_size(16, 100, 100, 4), (100, 100));
    }

    #[test]
    fn small_rgb_carrier() {
        let (width, height) = required_carrier_size(24, 2, 2, 3);
        assert_eq!((width, height), (3, 3));
        assert!(capacity(width, height, 3) >= 24);
    }

    #[test]
    fn single_step_falls_short() {
        // sqrt(1.5) scales 10 to 12, and 12x12 only holds 144 bits
        assert_eq!(grow(150, 10, 10, 1), (12, 12));
        let (width, height) = required_carrier_size(150, 10, 10, 1);
        assert!(capacity(width, height, 1) >= 150);
        assert!(width > 12 && height > 12);
    }

    #[test]
    fn always_fits_and_is_idempotent() {
        for channels in 1..=4u8 {
            for (width, height) in [(1, 1), (1, 7), (9, 2), (16, 16), (31, 5)] {
                for bits in [1u64, 16, 24, 100, 999, 4_096, 65_537, 1_000_003] {
                    let size = required_carrier_size(bits, width, height, channels);
                    assert!(
                        fits(bits, size.0, size.1, channels),
                        "{bits} bits in {size:?}x{channels}"
                    );
                    assert!(size.0 >= width && size.1 >= height);
                    assert_eq!(required_carrier_size(bits, size.0, size.1, channels), size);
                }
            }
        }
    }

    #[test]
    fn strict_growth_near_one() {
        // factor rounds down to the same size; each side must still grow
        assert_eq!(grow(101, 10, 10, 1), (11, 11));
        assert_eq!(required_carrier_size(101, 10, 10, 1), (11, 11));
    }
}
