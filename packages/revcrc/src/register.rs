use core::fmt::{self, Debug, LowerHex, UpperHex};
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, BitXor, Shl, Shr};
use std::borrow::Cow;

use crate::table;

/// Size of a CRC shift register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CrcWidth {
    Crc8 = 8,
    Crc16 = 16,
}

impl CrcWidth {
    /// Number of bits in the register.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Largest value representable in a register of this width.
    pub const fn max_value(self) -> u32 {
        (1 << self.bits()) - 1
    }
}

impl fmt::Display for CrcWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CRC-{}", self.bits())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// An unsigned integer usable as a CRC shift register.
///
/// Every algorithm in this crate is written once against this trait and
/// instantiated for [`u8`] (CRC-8) and [`u16`] (CRC-16). The trait is sealed;
/// no other widths are supported.
pub trait Register:
    sealed::Sealed
    + Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + LowerHex
    + UpperHex
    + Send
    + Sync
    + 'static
    + BitXor<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    const WIDTH: CrcWidth;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;
    /// The bit shifted out of the register on every step.
    const TOP_BIT: Self;

    /// Places `byte` in the high byte of an otherwise zeroed register.
    fn from_high_byte(byte: u8) -> Self;

    /// Returns the high byte of the register.
    fn high_byte(self) -> u8;

    /// Shifts the register left by a whole byte, discarding the high byte.
    fn shift_byte(self) -> Self;

    /// Returns the next value, or `None` past [`Register::MAX`].
    fn successor(self) -> Option<Self>;

    fn to_u32(self) -> u32;

    /// Truncates `value` to the register width.
    fn from_u32_truncated(value: u32) -> Self;

    /// Returns the 256-entry lookup table for `polynomial`.
    fn table(polynomial: Self) -> Cow<'static, [Self; 256]>;

    #[inline]
    fn is_top_bit_set(self) -> bool {
        self & Self::TOP_BIT != Self::ZERO
    }

    #[inline]
    fn is_low_bit_set(self) -> bool {
        self & Self::ONE != Self::ZERO
    }
}

macro_rules! impl_register {
    ($($t:ty => $width:expr, $table:path);* $(;)?) => {
        $(
            impl Register for $t {
                const WIDTH: CrcWidth = $width;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$t>::MAX;
                const TOP_BIT: Self = 1 << (<$t>::BITS - 1);

                #[inline]
                fn from_high_byte(byte: u8) -> Self {
                    Self::from(byte) << (<$t>::BITS - 8)
                }

                #[inline]
                fn high_byte(self) -> u8 {
                    (self >> (<$t>::BITS - 8)) as u8
                }

                #[inline]
                fn shift_byte(self) -> Self {
                    self.checked_shl(8).unwrap_or(0)
                }

                #[inline]
                fn successor(self) -> Option<Self> {
                    self.checked_add(1)
                }

                #[inline]
                fn to_u32(self) -> u32 {
                    u32::from(self)
                }

                #[inline]
                fn from_u32_truncated(value: u32) -> Self {
                    value as Self
                }

                fn table(polynomial: Self) -> Cow<'static, [Self; 256]> {
                    $table(polynomial)
                }
            }
        )*
    };
}

impl_register! {
    u8 => CrcWidth::Crc8, table::crc8_table;
    u16 => CrcWidth::Crc16, table::crc16_table;
}
