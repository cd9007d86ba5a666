use std::borrow::Cow;

use bitflags::bitflags;

bitflags! {
    /// Preprocessing applied to input data before a CRC is computed.
    ///
    /// The steps run on a private copy of the input, byte reversal first.
    #[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Transform: u8 {
        /// Process the bytes of the buffer last to first.
        const REVERSE_BYTES = 1 << 0;

        /// Mirror the bits within every byte.
        const REFLECT_BITS = 1 << 1;
    }
}

impl Transform {
    /// Builds a transform from the two independent flags.
    pub fn from_flags(reverse_bytes: bool, reflect_bits: bool) -> Self {
        let mut transform = Self::empty();
        transform.set(Self::REVERSE_BYTES, reverse_bytes);
        transform.set(Self::REFLECT_BITS, reflect_bits);
        transform
    }

    /// Applies this transform to `data`.
    ///
    /// The input is borrowed untouched when no flag is set; otherwise the
    /// result is an owned copy and `data` itself is never modified.
    pub fn apply<'a>(self, data: &'a [u8]) -> Cow<'a, [u8]> {
        if self.is_empty() {
            return Cow::Borrowed(data);
        }

        let mut copy = data.to_vec();
        if self.contains(Self::REVERSE_BYTES) {
            reverse_bytes(&mut copy);
        }
        if self.contains(Self::REFLECT_BITS) {
            reflect_bits(&mut copy);
        }
        Cow::Owned(copy)
    }
}

/// Reverses the order of bytes in place.
pub fn reverse_bytes(data: &mut [u8]) {
    data.reverse();
}

/// Mirrors the bit order of a single byte (`0b0000_0001` becomes `0b1000_0000`).
#[inline]
pub const fn reflect_byte(byte: u8) -> u8 {
    byte.reverse_bits()
}

/// Mirrors the bit order of every byte in place.
pub fn reflect_bits(data: &mut [u8]) {
    for byte in data {
        *byte = reflect_byte(*byte);
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{Transform, reflect_bits, reflect_byte, reverse_bytes};

    #[test]
    fn reflect_single_bytes() {
        assert_eq!(reflect_byte(0x01), 0x80);
        assert_eq!(reflect_byte(0x0F), 0xF0);
        assert_eq!(reflect_byte(0xA5), 0xA5);
        assert_eq!(reflect_byte(0x12), 0x48);
    }

    #[test]
    fn twice_is_identity() {
        let original: Vec<u8> = (0..=255).collect();

        let mut data = original.clone();
        reverse_bytes(&mut data);
        assert_ne!(data, original);
        reverse_bytes(&mut data);
        assert_eq!(data, original);

        reflect_bits(&mut data);
        assert_ne!(data, original);
        reflect_bits(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn apply_borrows_without_flags() {
        let data = [0x12, 0x34];
        assert!(matches!(Transform::empty().apply(&data), Cow::Borrowed(_)));
    }

    #[test]
    fn apply_reverses_then_reflects() {
        let data = [0x01, 0x02, 0x03];
        let transform = Transform::from_flags(true, true);
        assert_eq!(transform, Transform::all());

        assert_eq!(transform.apply(&data).as_ref(), &[0xC0, 0x40, 0x80]);
        // The caller's buffer is left alone.
        assert_eq!(data, [0x01, 0x02, 0x03]);
    }

    #[test]
    fn from_flags_sets_each_bit() {
        assert_eq!(Transform::from_flags(false, false), Transform::empty());
        assert_eq!(Transform::from_flags(true, false), Transform::REVERSE_BYTES);
        assert_eq!(Transform::from_flags(false, true), Transform::REFLECT_BITS);
    }
}
