//! Parameterized CRC-8/CRC-16 computation and CRC parameter recovery.
//!
//! Besides computing checksums for any polynomial, seed and output XOR, this
//! crate answers the reverse question: given a message and the checksum that
//! came with it, which parameters could have produced it? This is useful when
//! reverse-engineering undocumented CRC variants in protocols, file formats
//! and hardware.
//!
//! Recovery comes in two flavors:
//!
//! - [`search_range`] brute-forces `(seed, xor_out)` pairs on the forward
//!   engine.
//! - [`invert`] walks the CRC shift register backward bit by bit and finds
//!   every register state leading to a target value without enumerating the
//!   seed space. [`invert_range`] combines it with a range of output XOR masks.
//!
//! [`Solver`] builds on both to recover full parameter sets from several
//! samples.
//!
//! Every algorithm is generic over [`Register`], implemented for [`u8`]
//! (CRC-8) and [`u16`] (CRC-16). The width-specific functions at the crate
//! root are thin wrappers for the common cases.
//!
//! ```
//! let data = [0x12, 0x34];
//! let crc = revcrc::crc8(&data, 0x07, 0x00, 0x00);
//!
//! let matches = revcrc::search_crc8_range(&data, crc, 0x07, 0..=0, 0..=255)?;
//! assert_eq!(matches, [revcrc::MatchRecord { seed: 0, xor_out: 0 }]);
//! # Ok::<(), revcrc::Error>(())
//! ```

use core::ops::RangeInclusive;

pub mod engine;
pub mod invert;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod presets;
pub mod search;
pub mod table;
pub mod transform;

mod error;
mod params;
mod range;
mod record;
mod register;
mod solver;

#[cfg(test)]
mod proptests;

pub use engine::{checksum, checksum_bitwise, checksum_with_transform};
pub use error::Error;
pub use invert::{Inverter, invert, invert_range};
pub use params::CrcParameters;
pub use range::{RangeIter, SearchRange};
pub use record::{CrcKey, MatchRecord};
pub use register::{CrcWidth, Register};
pub use search::{search_range, search_range_with_transform};
pub use solver::{Sample, Solver};
pub use transform::Transform;

/// Computes a CRC-8.
pub fn crc8(data: &[u8], polynomial: u8, seed: u8, xor_out: u8) -> u8 {
    checksum(data, polynomial, seed, xor_out)
}

/// Computes a CRC-16.
pub fn crc16(data: &[u8], polynomial: u16, seed: u16, xor_out: u16) -> u16 {
    checksum(data, polynomial, seed, xor_out)
}

/// Computes a CRC-8 over a copy of `data` with its byte order reversed and/or
/// the bits of every byte reflected.
pub fn crc8_with_transform(
    data: &[u8],
    polynomial: u8,
    seed: u8,
    xor_out: u8,
    reverse_bytes: bool,
    reflect_bits: bool,
) -> u8 {
    checksum_with_transform(
        data,
        polynomial,
        seed,
        xor_out,
        Transform::from_flags(reverse_bytes, reflect_bits),
    )
}

/// Computes a CRC-16 over a copy of `data` with its byte order reversed and/or
/// the bits of every byte reflected.
pub fn crc16_with_transform(
    data: &[u8],
    polynomial: u16,
    seed: u16,
    xor_out: u16,
    reverse_bytes: bool,
    reflect_bits: bool,
) -> u16 {
    checksum_with_transform(
        data,
        polynomial,
        seed,
        xor_out,
        Transform::from_flags(reverse_bytes, reflect_bits),
    )
}

/// Finds all CRC-8 `(seed, xor_out)` pairs in the given closed ranges that
/// produce `target`.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if a range starts after it ends.
pub fn search_crc8_range(
    data: &[u8],
    target: u8,
    polynomial: u8,
    seeds: RangeInclusive<u8>,
    xor_outs: RangeInclusive<u8>,
) -> Result<Vec<MatchRecord<u8>>, Error> {
    search_range(data, target, polynomial, seeds.try_into()?, xor_outs.try_into()?)
}

/// Finds all CRC-16 `(seed, xor_out)` pairs in the given closed ranges that
/// produce `target`.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if a range starts after it ends.
pub fn search_crc16_range(
    data: &[u8],
    target: u16,
    polynomial: u16,
    seeds: RangeInclusive<u16>,
    xor_outs: RangeInclusive<u16>,
) -> Result<Vec<MatchRecord<u16>>, Error> {
    search_range(data, target, polynomial, seeds.try_into()?, xor_outs.try_into()?)
}

/// Finds every CRC-8 register value that reaches `target` after `data`.
pub fn invert_crc8(data: &[u8], polynomial: u8, target: u8) -> Result<Vec<u8>, Error> {
    invert(data, polynomial, target)
}

/// Finds every CRC-16 register value that reaches `target` after `data`.
pub fn invert_crc16(data: &[u8], polynomial: u16, target: u16) -> Result<Vec<u16>, Error> {
    invert(data, polynomial, target)
}

/// Recovers CRC-8 `(seed, xor_out)` pairs for `observed` over a closed range
/// of output XOR masks.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if the range starts after it ends.
pub fn invert_crc8_range(
    data: &[u8],
    observed: u8,
    polynomial: u8,
    xor_outs: RangeInclusive<u8>,
) -> Result<Vec<MatchRecord<u8>>, Error> {
    invert_range(data, observed, polynomial, xor_outs.try_into()?)
}

/// Recovers CRC-16 `(seed, xor_out)` pairs for `observed` over a closed range
/// of output XOR masks.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if the range starts after it ends.
pub fn invert_crc16_range(
    data: &[u8],
    observed: u16,
    polynomial: u16,
    xor_outs: RangeInclusive<u16>,
) -> Result<Vec<MatchRecord<u16>>, Error> {
    invert_range(data, observed, polynomial, xor_outs.try_into()?)
}
