use crate::error::Error;
use crate::register::Register;
use crate::transform::Transform;

/// A `(seed, xor_out)` pair that reproduces an observed checksum.
///
/// Produced both by range search, where `seed` is the enumerated seed, and by
/// inversion, where `seed` is a recovered candidate register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord<R> {
    pub seed: R,
    pub xor_out: R,
}

/// A complete parameter set recovered by the [`Solver`](crate::Solver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrcKey<R> {
    pub polynomial: R,
    pub seed: R,
    pub xor_out: R,
    pub transform: Transform,
}

impl<R: Register> CrcKey<R> {
    pub fn from_match(polynomial: R, record: MatchRecord<R>, transform: Transform) -> Self {
        Self {
            polynomial,
            seed: record.seed,
            xor_out: record.xor_out,
            transform,
        }
    }
}

/// Appends to a result vector, reporting allocation failure instead of aborting.
#[inline]
pub(crate) fn try_push<T>(results: &mut Vec<T>, item: T) -> Result<(), Error> {
    results.try_reserve(1)?;
    results.push(item);
    Ok(())
}
