//! Recovering register states by walking the CRC recurrence backward.
//!
//! One forward step for data bit `d` is
//!
//! ```text
//! feedback = top_bit(old) ^ d
//! new      = (old << 1) ^ (feedback ? polynomial : 0)
//! ```
//!
//! Given `new`, the low bit tells whether the polynomial was applied, but only
//! when the polynomial's low bit is set. Otherwise both or neither branch is
//! consistent, so every candidate has zero, one or two predecessors. The
//! candidates are tracked generation by generation over the data bits in the
//! exact reverse of the order the forward engine consumes them.

use log::{debug, trace};

use crate::error::Error;
use crate::range::SearchRange;
use crate::record::{MatchRecord, try_push};
use crate::register::Register;

/// Reusable state for CRC inversion.
///
/// Holds two candidate generations and the index of the live one. Both are
/// cleared, never freed, between steps and between calls, so a single
/// inverter reused over many targets stops allocating once warmed up.
#[derive(Debug, Clone, Default)]
pub struct Inverter<R> {
    generations: [Vec<R>; 2],
    current: usize,
}

impl<R: Register> Inverter<R> {
    pub fn new() -> Self {
        Self {
            generations: [Vec::new(), Vec::new()],
            current: 0,
        }
    }

    /// Finds every register that reaches `target` after `data` is processed
    /// with `polynomial` (seed = register, output XOR = 0).
    ///
    /// An empty `data` returns `target` itself. The returned slice borrows the
    /// inverter and is valid until the next call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if a candidate generation cannot grow.
    pub fn invert(&mut self, data: &[u8], polynomial: R, target: R) -> Result<&[R], Error> {
        self.current = 0;
        for generation in &mut self.generations {
            generation.clear();
        }
        try_push(&mut self.generations[0], target)?;

        'walk: for &byte in data.iter().rev() {
            for bit in 0..8 {
                let data_bit = (byte >> bit) & 1 != 0;

                let [first, second] = &mut self.generations;
                let (live, next) = if self.current == 0 {
                    (first, second)
                } else {
                    (second, first)
                };

                next.clear();
                reverse_step(live, next, polynomial, data_bit)?;
                self.current ^= 1;

                if next.is_empty() {
                    trace!("No {} register reaches {:#x} (poly {:#x}).", R::WIDTH, target, polynomial);
                    break 'walk;
                }
            }
        }

        Ok(self.candidates())
    }

    /// Candidates left by the last call to [`Inverter::invert`].
    pub fn candidates(&self) -> &[R] {
        &self.generations[self.current]
    }

    /// Takes ownership of the candidates left by the last call.
    pub fn into_candidates(mut self) -> Vec<R> {
        core::mem::take(&mut self.generations[self.current])
    }

    /// Inverts `observed ^ xor_out` for every `xor_out` in the range.
    ///
    /// Records come out in xor order, then in candidate order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if a candidate or result vector cannot grow.
    pub fn invert_range(
        &mut self,
        data: &[u8],
        observed: R,
        polynomial: R,
        xor_outs: SearchRange<R>,
    ) -> Result<Vec<MatchRecord<R>>, Error> {
        let mut matches = Vec::new();

        for xor_out in xor_outs {
            for &seed in self.invert(data, polynomial, observed ^ xor_out)? {
                try_push(&mut matches, MatchRecord { seed, xor_out })?;
            }
        }

        debug!(
            "Inverted {:#x} over xor {:#x}..={:#x} (poly {:#x}): {} matches.",
            observed,
            xor_outs.start(),
            xor_outs.end(),
            polynomial,
            matches.len()
        );
        Ok(matches)
    }
}

/// Pushes every predecessor of every register in `live` onto `next`.
fn reverse_step<R: Register>(
    live: &[R],
    next: &mut Vec<R>,
    polynomial: R,
    data_bit: bool,
) -> Result<(), Error> {
    // Predecessor top bit without feedback equals the data bit, with feedback its complement.
    let (plain_top, feedback_top) = if data_bit {
        (R::TOP_BIT, R::ZERO)
    } else {
        (R::ZERO, R::TOP_BIT)
    };

    for &register in live {
        if !register.is_low_bit_set() {
            try_push(next, (register >> 1) | plain_top)?;
        }

        let unfed = register ^ polynomial;
        if !unfed.is_low_bit_set() {
            try_push(next, (unfed >> 1) | feedback_top)?;
        }
    }
    Ok(())
}

/// Finds every register that reaches `target` after `data` is processed.
///
/// See [`Inverter::invert`].
pub fn invert<R: Register>(data: &[u8], polynomial: R, target: R) -> Result<Vec<R>, Error> {
    let mut inverter = Inverter::new();
    inverter.invert(data, polynomial, target)?;
    Ok(inverter.into_candidates())
}

/// Recovers `(seed, xor_out)` pairs for an observed checksum over a range of
/// output XOR masks.
///
/// See [`Inverter::invert_range`].
pub fn invert_range<R: Register>(
    data: &[u8],
    observed: R,
    polynomial: R,
    xor_outs: SearchRange<R>,
) -> Result<Vec<MatchRecord<R>>, Error> {
    Inverter::new().invert_range(data, observed, polynomial, xor_outs)
}

#[cfg(test)]
mod tests {
    use super::{Inverter, invert, invert_range};
    use crate::engine::checksum;
    use crate::range::SearchRange;
    use crate::record::MatchRecord;

    fn brute_force(data: &[u8], polynomial: u8, target: u8) -> Vec<u8> {
        (0..=u8::MAX)
            .filter(|&seed| checksum(data, polynomial, seed, 0) == target)
            .collect()
    }

    #[test]
    fn empty_data_returns_target() {
        assert_eq!(invert(&[], 0x8005u16, 0x1234).unwrap(), vec![0x1234]);
        assert_eq!(invert(&[], 0x06u8, 0x01).unwrap(), vec![0x01]);
    }

    #[test]
    fn recovers_seed() {
        let data = b"hello, world";
        for seed in [0x0000u16, 0xFFFF, 0x1D0F, 0x8000, 0x0001] {
            for polynomial in [0x1021u16, 0x8005, 0x0589, 0x8BB7] {
                let crc = checksum(data, polynomial, seed, 0);
                assert!(invert(data, polynomial, crc).unwrap().contains(&seed));
            }
        }
    }

    #[test]
    fn odd_polynomial_is_a_bijection() {
        // With the low polynomial bit set every step has exactly one predecessor.
        let data = [0xFF];
        let candidates = invert(&data, 0x8005u16, 0x0000).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(checksum(&data, 0x8005u16, candidates[0], 0), 0x0000);
    }

    #[test]
    fn matches_brute_force_exactly() {
        // Even polynomials branch or prune, so some targets are unreachable.
        let buffers: [&[u8]; 3] = [&[0x00], &[0xA5, 0x3C], &[0x12, 0x34, 0x56]];
        for data in buffers {
            for polynomial in [0x06u8, 0x0E, 0x80, 0x07, 0x31] {
                for target in 0..=u8::MAX {
                    let mut candidates = invert(data, polynomial, target).unwrap();
                    candidates.sort_unstable();
                    assert_eq!(
                        candidates,
                        brute_force(data, polynomial, target),
                        "data {data:x?} poly {polynomial:#x} target {target:#x}"
                    );
                }
            }
        }
    }

    #[test]
    fn unreachable_target_is_empty() {
        let data = [0x00, 0x00];
        let target = (0..=u8::MAX)
            .find(|&target| brute_force(&data, 0x06, target).is_empty())
            .expect("an even polynomial leaves some targets unreachable");

        assert!(invert(&data, 0x06u8, target).unwrap().is_empty());
    }

    #[test]
    fn inverter_is_reusable() {
        let data = b"reuse";
        let mut inverter = Inverter::new();

        for seed in [0x0102u16, 0xBEEF, 0x0000] {
            let crc = checksum(data, 0x1021u16, seed, 0);
            assert_eq!(inverter.invert(data, 0x1021, crc).unwrap(), &[seed]);
            assert_eq!(inverter.candidates(), &[seed]);
        }
    }

    #[test]
    fn range_records_every_xor() {
        let data = [0x31, 0x32, 0x33];
        let observed = checksum(&data, 0x1021u16, 0xFFFF, 0x0000);

        let matches = invert_range(&data, observed, 0x1021, SearchRange::new(0x0000, 0x000F).unwrap()).unwrap();

        assert_eq!(matches.len(), 16);
        assert_eq!(matches[0], MatchRecord { seed: 0xFFFF, xor_out: 0x0000 });
        for record in &matches {
            assert_eq!(checksum(&data, 0x1021u16, record.seed, record.xor_out), observed);
        }
    }

    #[test]
    fn range_ending_at_max_terminates() {
        let data = [0xC3];
        let observed = 0x5Au8;

        let matches = invert_range(&data, observed, 0x07, SearchRange::full()).unwrap();
        assert_eq!(matches.len(), 256);
        assert_eq!(matches.last().map(|record| record.xor_out), Some(0xFF));
        assert_eq!(matches.iter().filter(|record| record.xor_out == 0xFF).count(), 1);

        let wide = invert_range(&data, 0x1234u16, 0x8005, SearchRange::new(0xFF00, 0xFFFF).unwrap()).unwrap();
        assert_eq!(wide.len(), 256);
        assert_eq!(wide.last().map(|record| record.xor_out), Some(0xFFFF));
    }
}
