use log::{debug, trace};

use crate::error::Error;
use crate::range::SearchRange;
use crate::record::{MatchRecord, try_push};
use crate::register::Register;
use crate::table::CrcTable;
use crate::transform::Transform;

/// Finds every `(seed, xor_out)` pair for which the forward CRC of `data`
/// under `polynomial` equals `target`.
///
/// Pairs are enumerated seed-major, xor-minor, and matches are returned in
/// that order. The register before the output XOR only depends on the seed, so
/// it is computed once per seed and every xor candidate costs one comparison.
///
/// # Errors
///
/// Returns [`Error::Allocation`] if the result vector cannot grow.
pub fn search_range<R: Register>(
    data: &[u8],
    target: R,
    polynomial: R,
    seeds: SearchRange<R>,
    xor_outs: SearchRange<R>,
) -> Result<Vec<MatchRecord<R>>, Error> {
    trace!(
        "Searching {} seeds {:#x}..={:#x} and xor {:#x}..={:#x} for {:#x} (poly {:#x}).",
        R::WIDTH,
        seeds.start(),
        seeds.end(),
        xor_outs.start(),
        xor_outs.end(),
        target,
        polynomial
    );

    let table = CrcTable::new(polynomial);
    let mut matches = Vec::new();

    for seed in seeds {
        let raw = table.raw(data, seed);
        for xor_out in xor_outs {
            if raw ^ xor_out == target {
                try_push(&mut matches, MatchRecord { seed, xor_out })?;
            }
        }
    }

    debug!(
        "Range search for {:#x} (poly {:#x}) found {} matches.",
        target,
        polynomial,
        matches.len()
    );
    Ok(matches)
}

/// Like [`search_range`], preprocessing a copy of `data` once beforehand.
pub fn search_range_with_transform<R: Register>(
    data: &[u8],
    target: R,
    polynomial: R,
    seeds: SearchRange<R>,
    xor_outs: SearchRange<R>,
    transform: Transform,
) -> Result<Vec<MatchRecord<R>>, Error> {
    search_range(&transform.apply(data), target, polynomial, seeds, xor_outs)
}

#[cfg(test)]
mod tests {
    use super::{search_range, search_range_with_transform};
    use crate::engine::checksum;
    use crate::range::SearchRange;
    use crate::record::MatchRecord;
    use crate::transform::Transform;

    #[test]
    fn smbus_single_match() {
        let data = [0x12, 0x34];
        let crc = checksum(&data, 0x07u8, 0x00, 0x00);

        let matches = search_range(
            &data,
            crc,
            0x07,
            SearchRange::single(0),
            SearchRange::full(),
        )
        .unwrap();

        assert_eq!(matches, vec![MatchRecord { seed: 0, xor_out: 0 }]);
    }

    #[test]
    fn zero_ranges_at_most_one_match() {
        let data = b"revcrc";
        let crc = checksum(data, 0x1021u16, 0, 0);

        let hit = search_range(data, crc, 0x1021, SearchRange::single(0), SearchRange::single(0)).unwrap();
        assert_eq!(hit, vec![MatchRecord { seed: 0, xor_out: 0 }]);

        let miss = search_range(data, crc ^ 1, 0x1021, SearchRange::single(0), SearchRange::single(0)).unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn every_seed_has_exactly_one_xor() {
        let data = [0xDE, 0xAD];
        let matches = search_range(
            &data,
            0x42u8,
            0x9B,
            SearchRange::full(),
            SearchRange::full(),
        )
        .unwrap();

        assert_eq!(matches.len(), 256);
        for (seed, record) in (0..=u8::MAX).zip(&matches) {
            assert_eq!(record.seed, seed);
            assert_eq!(checksum(&data, 0x9Bu8, record.seed, record.xor_out), 0x42);
        }
    }

    #[test]
    fn range_ending_at_max_evaluates_max_once() {
        let data = [0x01, 0x02, 0x03];
        let target = checksum(&data, 0x8005u16, 0xFFFF, 0xFFFF);

        let matches = search_range(
            &data,
            target,
            0x8005,
            SearchRange::new(0xFFF0, 0xFFFF).unwrap(),
            SearchRange::full(),
        )
        .unwrap();

        assert_eq!(matches.len(), 16);
        assert_eq!(matches.last(), Some(&MatchRecord { seed: 0xFFFF, xor_out: 0xFFFF }));
        assert_eq!(matches.iter().filter(|record| record.seed == 0xFFFF).count(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        let data = [0x00];
        // Seed 0, poly 0x07 over a zero byte always yields zero before the XOR.
        let matches = search_range(
            &data,
            0x80u8,
            0x07,
            SearchRange::single(0),
            SearchRange::new(0x00, 0x7F).unwrap(),
        )
        .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn transform_applies_before_search() {
        let data = [0x12, 0x34];
        let crc = checksum(&[0x34, 0x12], 0x07u8, 0x00, 0x00);

        let matches = search_range_with_transform(
            &data,
            crc,
            0x07,
            SearchRange::single(0),
            SearchRange::full(),
            Transform::REVERSE_BYTES,
        )
        .unwrap();
        assert_eq!(matches, vec![MatchRecord { seed: 0, xor_out: 0 }]);
    }
}
