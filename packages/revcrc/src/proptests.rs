use proptest::prelude::*;

use crate::engine::{checksum, checksum_bitwise, checksum_with_transform};
use crate::invert::invert;
use crate::range::SearchRange;
use crate::search::search_range;
use crate::transform::{Transform, reflect_bits, reverse_bytes};

fn data() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..=64)
}

proptest! {
    #[test]
    fn crc8_table_matches_bitwise(data in data(), polynomial: u8, seed: u8, xor_out: u8) {
        prop_assert_eq!(
            checksum(&data, polynomial, seed, xor_out),
            checksum_bitwise(&data, polynomial, seed, xor_out)
        );
    }

    #[test]
    fn crc16_table_matches_bitwise(data in data(), polynomial: u16, seed: u16, xor_out: u16) {
        prop_assert_eq!(
            checksum(&data, polynomial, seed, xor_out),
            checksum_bitwise(&data, polynomial, seed, xor_out)
        );
    }

    #[test]
    fn crc8_inversion_contains_seed(data in data(), polynomial: u8, seed: u8) {
        let crc = checksum(&data, polynomial, seed, 0);
        let candidates = invert(&data, polynomial, crc).unwrap();
        prop_assert!(candidates.contains(&seed));
        for candidate in candidates {
            prop_assert_eq!(checksum(&data, polynomial, candidate, 0), crc);
        }
    }

    #[test]
    fn crc16_inversion_contains_seed(data in data(), polynomial: u16, seed: u16) {
        // Polynomial 0 doubles the candidate set on every bit.
        prop_assume!(polynomial != 0);
        let crc = checksum(&data, polynomial, seed, 0);
        let candidates = invert(&data, polynomial, crc).unwrap();
        prop_assert!(candidates.contains(&seed));
        for candidate in candidates {
            prop_assert_eq!(checksum(&data, polynomial, candidate, 0), crc);
        }
    }

    #[test]
    fn zero_ranges_match_forward(data in data(), polynomial: u16, target: u16) {
        let matches = search_range(
            &data,
            target,
            polynomial,
            SearchRange::single(0),
            SearchRange::single(0),
        ).unwrap();

        prop_assert!(matches.len() <= 1);
        prop_assert_eq!(matches.len() == 1, checksum(&data, polynomial, 0, 0) == target);
    }

    #[test]
    fn preprocessing_is_an_involution(data in data()) {
        let mut copy = data.clone();
        reverse_bytes(&mut copy);
        reverse_bytes(&mut copy);
        prop_assert_eq!(&copy, &data);

        reflect_bits(&mut copy);
        reflect_bits(&mut copy);
        prop_assert_eq!(&copy, &data);
    }

    #[test]
    fn transform_equals_manual_preprocessing(data in data(), polynomial: u16, seed: u16) {
        let mut manual = data.clone();
        reverse_bytes(&mut manual);
        reflect_bits(&mut manual);

        prop_assert_eq!(
            checksum_with_transform(&data, polynomial, seed, 0, Transform::all()),
            checksum(&manual, polynomial, seed, 0)
        );
    }
}
