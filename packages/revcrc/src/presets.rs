//! Well-known CRC variants expressible by the forward engine.
//!
//! Only non-reflected variants are listed; the engine shifts MSB-first and
//! does not reflect its output. The parameters and check values come straight
//! from the catalog shipped with the [`crc`] crate.
//!
//! [`identify`] checks captured samples against a catalog. It is usually the
//! first thing to try before searching the parameter space.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::error::Error;
use crate::params::CrcParameters;
use crate::record::try_push;
use crate::register::Register;
use crate::solver::Sample;
use crate::table::CrcTable;
use crate::transform::Transform;

/// A named CRC variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset<R> {
    pub name: &'static str,
    pub params: CrcParameters<R>,
    /// Checksum of the ASCII string `123456789`.
    pub check: R,
}

impl<R: Register> Preset<R> {
    /// Returns `true` if the engine reproduces this variant's check value.
    pub fn self_test(&self) -> bool {
        self.params.checksum(b"123456789") == self.check
    }
}

macro_rules! preset {
    ($name:literal, $algorithm:expr) => {
        Preset {
            name: $name,
            params: CrcParameters {
                polynomial: $algorithm.poly,
                seed: $algorithm.init,
                xor_out: $algorithm.xorout,
                transform: Transform::empty(),
            },
            check: $algorithm.check,
        }
    };
}

pub const CRC_8_SMBUS: Preset<u8> = preset!("CRC-8/SMBUS", crc::CRC_8_SMBUS);
pub const CRC_8_CDMA2000: Preset<u8> = preset!("CRC-8/CDMA2000", crc::CRC_8_CDMA2000);
pub const CRC_8_I_432_1: Preset<u8> = preset!("CRC-8/I-432-1", crc::CRC_8_I_432_1);
pub const CRC_8_AUTOSAR: Preset<u8> = preset!("CRC-8/AUTOSAR", crc::CRC_8_AUTOSAR);

pub const CRC_16_XMODEM: Preset<u16> = preset!("CRC-16/XMODEM", crc::CRC_16_XMODEM);
pub const CRC_16_IBM_3740: Preset<u16> = preset!("CRC-16/IBM-3740", crc::CRC_16_IBM_3740);
pub const CRC_16_UMTS: Preset<u16> = preset!("CRC-16/UMTS", crc::CRC_16_UMTS);
pub const CRC_16_GENIBUS: Preset<u16> = preset!("CRC-16/GENIBUS", crc::CRC_16_GENIBUS);
pub const CRC_16_CDMA2000: Preset<u16> = preset!("CRC-16/CDMA2000", crc::CRC_16_CDMA2000);
pub const CRC_16_DECT_X: Preset<u16> = preset!("CRC-16/DECT-X", crc::CRC_16_DECT_X);

pub const CRC8_PRESETS: &[Preset<u8>] = &[CRC_8_SMBUS, CRC_8_CDMA2000, CRC_8_I_432_1, CRC_8_AUTOSAR];

pub const CRC16_PRESETS: &[Preset<u16>] = &[
    CRC_16_XMODEM,
    CRC_16_IBM_3740,
    CRC_16_UMTS,
    CRC_16_GENIBUS,
    CRC_16_CDMA2000,
    CRC_16_DECT_X,
];

/// Looks up a CRC-8 preset by name, ignoring ASCII case.
pub fn crc8_preset(name: &str) -> Option<&'static Preset<u8>> {
    CRC8_PRESETS.iter().find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Looks up a CRC-16 preset by name, ignoring ASCII case.
pub fn crc16_preset(name: &str) -> Option<&'static Preset<u16>> {
    CRC16_PRESETS.iter().find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// A catalog variant that reproduced the checksum of one or more samples over
/// the same byte window.
///
/// The window skips `offset` bytes at the front of a sample and `trailing`
/// bytes at its back, so samples of different lengths can share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetMatch<'a, R> {
    pub preset: &'a Preset<R>,
    pub offset: usize,
    pub trailing: usize,
    /// Number of samples the variant matched over this window.
    pub hits: usize,
}

impl<R> PresetMatch<'_, R> {
    /// The bytes of `data` covered by the checksum, if `data` is long enough.
    pub fn window<'d>(&self, data: &'d [u8]) -> Option<&'d [u8]> {
        let end = data.len().checked_sub(self.trailing)?;
        data.get(self.offset..end)
    }

    /// Length of the covered window within a buffer of `data_len` bytes.
    pub fn len_in(&self, data_len: usize) -> Option<usize> {
        data_len.checked_sub(self.offset)?.checked_sub(self.trailing)
    }
}

/// Tests every sample against every variant in `catalog`.
///
/// With `min_len` of `None` only whole samples are checked. With `Some(n)`,
/// every contiguous window of at least `max(n, 1)` bytes is checked too, for
/// frames whose checksum covers only part of the message. Hits are counted
/// per `(variant, offset, trailing)` and returned with the most hits first,
/// then in catalog order, then by window.
///
/// # Errors
///
/// Returns [`Error::NoSamples`] for an empty `samples`, and
/// [`Error::Allocation`] if results cannot be collected.
pub fn identify<'a, R: Register>(
    catalog: &'a [Preset<R>],
    samples: &[Sample<R>],
    min_len: Option<usize>,
) -> Result<Vec<PresetMatch<'a, R>>, Error> {
    if samples.is_empty() {
        return Err(Error::NoSamples);
    }
    info!(
        "Checking {} samples against {} {} presets.",
        samples.len(),
        catalog.len(),
        R::WIDTH
    );

    let mut counts: BTreeMap<(usize, usize, usize), usize> = BTreeMap::new();
    for (index, preset) in catalog.iter().enumerate() {
        let params = &preset.params;
        let table = CrcTable::new(params.polynomial);

        for sample in samples {
            let len = sample.data.len();
            for (offset, trailing) in windows(len, min_len) {
                let window = &sample.data[offset..len - trailing];
                let raw = table.raw(&params.transform.apply(window), params.seed);
                if (raw ^ params.xor_out) == sample.crc {
                    *counts.entry((index, offset, trailing)).or_default() += 1;
                }
            }
        }
    }

    let mut matches = Vec::new();
    for ((index, offset, trailing), hits) in counts {
        let preset = &catalog[index];
        debug!("{} matched {hits} samples (offset {offset}, trailing {trailing}).", preset.name);
        try_push(
            &mut matches,
            PresetMatch {
                preset,
                offset,
                trailing,
                hits,
            },
        )?;
    }
    // Stable, so ties keep the catalog and window order from the map.
    matches.sort_by(|a, b| b.hits.cmp(&a.hits));

    info!("Found {} preset matches.", matches.len());
    Ok(matches)
}

/// Every `(offset, trailing)` pair leaving a window of at least `min_len`
/// bytes in a buffer of `len` bytes.
fn windows(len: usize, min_len: Option<usize>) -> impl Iterator<Item = (usize, usize)> {
    let min_len = min_len.map_or(len, |min_len| min_len.max(1));
    (0..=len).flat_map(move |offset| {
        let longest = len - offset;
        let skips = longest.checked_sub(min_len).map_or(0, |extra| extra + 1);
        (0..skips).map(move |trailing| (offset, trailing))
    })
}
