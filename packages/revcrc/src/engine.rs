//! Forward CRC computation.
//!
//! The register is MSB-first: the first data bit is the most significant bit
//! of the first byte, and every input byte is folded into the high byte of the
//! register before shifting. This matches the non-reflected entries of the
//! CRC catalog (CRC-8/SMBUS, CRC-16/XMODEM, CRC-16/UMTS, ...).

use crate::register::Register;
use crate::table::{CrcTable, shift_byte_bitwise};
use crate::transform::Transform;

/// Computes a CRC with the table-driven engine.
///
/// An empty buffer yields `seed ^ xor_out`.
pub fn checksum<R: Register>(data: &[u8], polynomial: R, seed: R, xor_out: R) -> R {
    CrcTable::new(polynomial).raw(data, seed) ^ xor_out
}

/// Computes a CRC one bit at a time.
///
/// This is the reference form of [`checksum`]; both always agree.
pub fn checksum_bitwise<R: Register>(data: &[u8], polynomial: R, seed: R, xor_out: R) -> R {
    let register = data.iter().fold(seed, |register, &byte| {
        shift_byte_bitwise(register ^ R::from_high_byte(byte), polynomial)
    });
    register ^ xor_out
}

/// Computes a CRC after preprocessing a copy of `data` with `transform`.
pub fn checksum_with_transform<R: Register>(
    data: &[u8],
    polynomial: R,
    seed: R,
    xor_out: R,
    transform: Transform,
) -> R {
    checksum(&transform.apply(data), polynomial, seed, xor_out)
}
