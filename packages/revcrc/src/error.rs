use std::collections::TryReserveError;

use thiserror::Error;

use crate::register::CrcWidth;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid {width} search range: start {start:#x} is greater than end {end:#x}.")]
    InvalidRange {
        width: CrcWidth,
        start: u32,
        end: u32,
    },

    #[error("No samples were provided to recover parameters from.")]
    NoSamples,

    #[error("Ran out of memory while collecting results.")]
    Allocation(#[from] TryReserveError),
}
