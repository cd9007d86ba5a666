//! Lookup tables for the table-driven forward engine.
//!
//! Entry `i` of the table for polynomial `p` is the register reached by placing
//! `i` in the high byte of a zeroed register and running eight shift steps.
//! Folding one input byte into a register `r` is then
//! `(r << 8) ^ table[high_byte(r) ^ byte]`.
//!
//! CRC-8 tables for every polynomial fit in 64 KiB and are built once on first
//! use. A full CRC-16 table set would need 32 MiB, so CRC-16 tables are
//! generated for the one polynomial a computation needs.

use std::borrow::Cow;
use std::sync::LazyLock;

use crate::register::Register;

static CRC8_TABLES: LazyLock<Vec<[u8; 256]>> =
    LazyLock::new(|| (0..=u8::MAX).map(generate::<u8>).collect());

/// Runs eight bit-serial steps on a register.
#[inline]
pub(crate) fn shift_byte_bitwise<R: Register>(mut register: R, polynomial: R) -> R {
    for _ in 0..8 {
        register = if register.is_top_bit_set() {
            (register << 1) ^ polynomial
        } else {
            register << 1
        };
    }
    register
}

/// Builds the 256-entry table for `polynomial`.
pub fn generate<R: Register>(polynomial: R) -> [R; 256] {
    core::array::from_fn(|index| shift_byte_bitwise(R::from_high_byte(index as u8), polynomial))
}

pub(crate) fn crc8_table(polynomial: u8) -> Cow<'static, [u8; 256]> {
    Cow::Borrowed(&CRC8_TABLES[usize::from(polynomial)])
}

pub(crate) fn crc16_table(polynomial: u16) -> Cow<'static, [u16; 256]> {
    Cow::Owned(generate(polynomial))
}

/// A lookup table bound to the polynomial it was generated for.
#[derive(Debug, Clone)]
pub struct CrcTable<R: Register> {
    polynomial: R,
    entries: Cow<'static, [R; 256]>,
}

impl<R: Register> CrcTable<R> {
    pub fn new(polynomial: R) -> Self {
        Self {
            polynomial,
            entries: R::table(polynomial),
        }
    }

    pub fn polynomial(&self) -> R {
        self.polynomial
    }

    pub fn entries(&self) -> &[R; 256] {
        &self.entries
    }

    /// Folds one byte into `register`.
    #[inline]
    pub fn update(&self, register: R, byte: u8) -> R {
        register.shift_byte() ^ self.entries[usize::from(register.high_byte() ^ byte)]
    }

    /// Runs the whole buffer through the register, without the output XOR.
    #[inline]
    pub fn raw(&self, data: &[u8], seed: R) -> R {
        data.iter().fold(seed, |register, &byte| self.update(register, byte))
    }
}

#[cfg(test)]
mod tests {
    use super::{CrcTable, generate};

    #[test]
    fn known_entries() {
        // Well-known CRC-8 (poly 0x07) and CRC-16/XMODEM (poly 0x1021) table values.
        let crc8 = generate(0x07u8);
        assert_eq!(crc8[0x00], 0x00);
        assert_eq!(crc8[0x01], 0x07);
        assert_eq!(crc8[0x80], 0x89);
        assert_eq!(crc8[0xFF], 0xF3);

        let crc16 = generate(0x1021u16);
        assert_eq!(crc16[0x01], 0x1021);
        assert_eq!(crc16[0x02], 0x2042);
        assert_eq!(crc16[0xFF], 0x1EF0);
    }

    #[test]
    fn cached_crc8_tables_match_generated() {
        for polynomial in [0x00u8, 0x07, 0x2F, 0x9B, 0xFF] {
            let table = CrcTable::new(polynomial);
            assert_eq!(table.polynomial(), polynomial);
            assert_eq!(table.entries(), &generate(polynomial));
        }
    }

    #[test]
    fn zero_polynomial_only_shifts() {
        let table = CrcTable::new(0u16);
        assert_eq!(table.update(0x1234, 0x00), 0x3400);
        assert!(table.entries().iter().all(|&entry| entry == 0));
    }
}
