//! Partitioned search and inversion on the rayon thread pool.
//!
//! The outer range is cut into contiguous chunks, each chunk runs the
//! sequential algorithm into its own vector, and the vectors are concatenated
//! in chunk order. Results are identical to the sequential functions.

use rayon::prelude::*;

use crate::error::Error;
use crate::invert::Inverter;
use crate::range::SearchRange;
use crate::record::MatchRecord;
use crate::register::Register;
use crate::search::search_range;

fn chunks<R: Register>(range: SearchRange<R>) -> Vec<SearchRange<R>> {
    let threads = u32::try_from(rayon::current_num_threads()).unwrap_or(u32::MAX);
    range.split(threads)
}

fn concat<T>(parts: Vec<Vec<T>>) -> Result<Vec<T>, Error> {
    let mut results = Vec::new();
    results.try_reserve_exact(parts.iter().map(Vec::len).sum())?;
    results.extend(parts.into_iter().flatten());
    Ok(results)
}

/// Parallel [`search_range`], split over seeds.
pub fn search_range_par<R: Register>(
    data: &[u8],
    target: R,
    polynomial: R,
    seeds: SearchRange<R>,
    xor_outs: SearchRange<R>,
) -> Result<Vec<MatchRecord<R>>, Error> {
    let parts = chunks(seeds)
        .into_par_iter()
        .map(|part| search_range(data, target, polynomial, part, xor_outs))
        .collect::<Result<Vec<_>, _>>()?;
    concat(parts)
}

/// Parallel [`invert_range`](crate::invert::invert_range), split over output XOR values.
///
/// Every worker chunk owns its own [`Inverter`].
pub fn invert_range_par<R: Register>(
    data: &[u8],
    observed: R,
    polynomial: R,
    xor_outs: SearchRange<R>,
) -> Result<Vec<MatchRecord<R>>, Error> {
    let parts = chunks(xor_outs)
        .into_par_iter()
        .map(|part| Inverter::new().invert_range(data, observed, polynomial, part))
        .collect::<Result<Vec<_>, _>>()?;
    concat(parts)
}
