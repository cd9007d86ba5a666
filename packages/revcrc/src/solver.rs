use std::borrow::Cow;

use log::{debug, info};

use crate::error::Error;
use crate::invert::Inverter;
use crate::range::SearchRange;
use crate::record::{CrcKey, try_push};
use crate::register::Register;
use crate::search::search_range;
use crate::table::CrcTable;
use crate::transform::Transform;

/// A sample with the transform already applied.
type Prepared<'a, R> = (Cow<'a, [u8]>, R);

/// One observed message and the checksum transmitted with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample<R> {
    pub data: Vec<u8>,
    pub crc: R,
}

impl<R> Sample<R> {
    pub fn new(data: impl Into<Vec<u8>>, crc: R) -> Self {
        Self {
            data: data.into(),
            crc,
        }
    }
}

/// Recovers CRC parameters consistent with a set of samples.
///
/// Every parameter is searched over a closed range that defaults to the
/// whole register width. The first sample drives the search and the rest
/// confirm each candidate, so more samples mean fewer false positives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solver<R> {
    polynomials: SearchRange<R>,
    seeds: SearchRange<R>,
    xor_outs: SearchRange<R>,
    transform: Transform,
}

impl<R: Register> Default for Solver<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Register> Solver<R> {
    pub fn new() -> Self {
        Self {
            polynomials: SearchRange::full(),
            seeds: SearchRange::full(),
            xor_outs: SearchRange::full(),
            transform: Transform::empty(),
        }
    }

    pub fn with_polynomial(self, polynomial: R) -> Self {
        self.with_polynomials(SearchRange::single(polynomial))
    }

    pub fn with_polynomials(mut self, polynomials: SearchRange<R>) -> Self {
        self.polynomials = polynomials;
        self
    }

    pub fn with_seed(self, seed: R) -> Self {
        self.with_seeds(SearchRange::single(seed))
    }

    pub fn with_seeds(mut self, seeds: SearchRange<R>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_xor_out(self, xor_out: R) -> Self {
        self.with_xor_outs(SearchRange::single(xor_out))
    }

    pub fn with_xor_outs(mut self, xor_outs: SearchRange<R>) -> Self {
        self.xor_outs = xor_outs;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Number of `(polynomial, seed, xor_out)` combinations in the search space.
    pub fn space_size(&self) -> u64 {
        u64::from(self.polynomials.size()) * u64::from(self.seeds.size()) * u64::from(self.xor_outs.size())
    }

    /// Enumerates every polynomial, seed and xor combination on the first
    /// sample, keeping only keys that reproduce all samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSamples`] for an empty `samples`, and
    /// [`Error::Allocation`] if results cannot be collected.
    pub fn brute_force(&self, samples: &[Sample<R>]) -> Result<Vec<CrcKey<R>>, Error> {
        let (first, prepared) = self.prepare(samples)?;
        info!("Brute force over {} {} combinations.", self.space_size(), R::WIDTH);

        let mut keys = Vec::new();
        for polynomial in self.polynomials {
            let table = CrcTable::new(polynomial);
            for record in search_range(&first.0, first.1, polynomial, self.seeds, self.xor_outs)? {
                let key = CrcKey::from_match(polynomial, record, self.transform);
                if confirms(&table, &key, &prepared) {
                    debug!("Found key: {key:x?}");
                    try_push(&mut keys, key)?;
                }
            }
        }

        info!("Found {} matching keys.", keys.len());
        Ok(keys)
    }

    /// Inverts the first sample's checksum for every polynomial and xor,
    /// keeping candidate seeds inside the seed range that reproduce all
    /// samples.
    ///
    /// The zero polynomial is skipped: without feedback every bit doubles the
    /// candidate set and the walk degenerates into the brute force.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSamples`] for an empty `samples`, and
    /// [`Error::Allocation`] if candidates or results cannot be collected.
    pub fn backward(&self, samples: &[Sample<R>]) -> Result<Vec<CrcKey<R>>, Error> {
        let (first, prepared) = self.prepare(samples)?;
        info!(
            "Backward search over {} polynomials and {} xor values ({}).",
            self.polynomials.size(),
            self.xor_outs.size(),
            R::WIDTH
        );

        let mut inverter = Inverter::new();
        let mut keys = Vec::new();
        for polynomial in self.polynomials {
            if polynomial == R::ZERO {
                debug!("Skipping zero polynomial.");
                continue;
            }

            let table = CrcTable::new(polynomial);
            for record in inverter.invert_range(&first.0, first.1, polynomial, self.xor_outs)? {
                if !self.seeds.contains(record.seed) {
                    continue;
                }
                let key = CrcKey::from_match(polynomial, record, self.transform);
                if confirms(&table, &key, &prepared) {
                    debug!("Found key: {key:x?}");
                    try_push(&mut keys, key)?;
                }
            }
        }

        info!("Found {} matching keys.", keys.len());
        Ok(keys)
    }

    /// Applies the transform once to every sample and splits off the first.
    fn prepare<'a>(
        &self,
        samples: &'a [Sample<R>],
    ) -> Result<(Prepared<'a, R>, Vec<Prepared<'a, R>>), Error> {
        let mut prepared = samples
            .iter()
            .map(|sample| (self.transform.apply(&sample.data), sample.crc));

        let first = prepared.next().ok_or(Error::NoSamples)?;
        Ok((first, prepared.collect()))
    }
}

/// Checks a key against already-transformed samples, using the table built
/// for the key's polynomial.
fn confirms<R: Register>(table: &CrcTable<R>, key: &CrcKey<R>, samples: &[Prepared<'_, R>]) -> bool {
    samples
        .iter()
        .all(|(data, crc)| (table.raw(data, key.seed) ^ key.xor_out) == *crc)
}
