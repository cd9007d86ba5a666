use crate::engine;
use crate::register::Register;
use crate::transform::Transform;

/// The full set of parameters describing one CRC variant.
///
/// The top bit of `polynomial` is conventionally set for a proper generator,
/// but any value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrcParameters<R> {
    pub polynomial: R,
    pub seed: R,
    pub xor_out: R,
    pub transform: Transform,
}

impl<R: Register> CrcParameters<R> {
    /// Parameters with a zero seed, no output XOR and no preprocessing.
    pub fn new(polynomial: R) -> Self {
        Self {
            polynomial,
            seed: R::ZERO,
            xor_out: R::ZERO,
            transform: Transform::empty(),
        }
    }

    pub fn with_seed(mut self, seed: R) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_xor_out(mut self, xor_out: R) -> Self {
        self.xor_out = xor_out;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Computes the checksum of `data` under these parameters.
    pub fn checksum(&self, data: &[u8]) -> R {
        engine::checksum_with_transform(data, self.polynomial, self.seed, self.xor_out, self.transform)
    }

    /// Like [`CrcParameters::checksum`], using the bit-serial engine.
    pub fn checksum_bitwise(&self, data: &[u8]) -> R {
        engine::checksum_bitwise(
            &self.transform.apply(data),
            self.polynomial,
            self.seed,
            self.xor_out,
        )
    }

    /// Returns `true` if these parameters reproduce `crc` for `data`.
    pub fn verify(&self, data: &[u8], crc: R) -> bool {
        self.checksum(data) == crc
    }
}
