// Copyright (c) 2022 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Difficulty targets.
//!
//! A [Target] is a non-negative integer of at most 256 bits. All arithmetic on it is exact
//! integer arithmetic so every node derives bit-identical results.

use std::num::NonZeroU64;

use num::{BigUint, One, ToPrimitive, Zero};
use thiserror::Error;

use super::{Compact, H256};

const TARGET_BITS: u64 = 256;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TargetError {
    #[error("Compact target {0} has the sign bit set")]
    NegativeCompact(Compact),
    #[error("Compact target {0} overflows 256 bits")]
    CompactOverflow(Compact),
    #[error("Value with {0} bits does not fit into a 256-bit target")]
    TooWide(u64),
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(BigUint);

impl Target {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// 2^256 - 1
    pub fn max_value() -> Self {
        Self((BigUint::one() << TARGET_BITS) - BigUint::one())
    }

    /// The largest target whose top `zero_bits` bits are clear, e.g. `0x00000fff..ff` for 20.
    pub fn from_leading_zero_bits(zero_bits: u32) -> Self {
        let width = TARGET_BITS.saturating_sub(u64::from(zero_bits));
        Self((BigUint::one() << width) - BigUint::one())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(BigUint::from_bytes_be(&bytes))
    }

    /// Block hashes are compared against targets as little-endian integers.
    pub fn from_hash(hash: &H256) -> Self {
        Self(BigUint::from_bytes_le(hash.as_bytes()))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn to_compact(&self) -> Compact {
        Compact::from(self)
    }

    /// `self * numerator / denominator`, reset to `limit` when the result is zero or
    /// not below `limit`.
    ///
    /// The intermediate product is unbounded, so no precision is lost before the division.
    pub fn scale_within_limit(
        &self,
        numerator: u64,
        denominator: NonZeroU64,
        limit: &Target,
    ) -> Target {
        let scaled = &self.0 * BigUint::from(numerator) / BigUint::from(denominator.get());
        if scaled.is_zero() || scaled >= limit.0 {
            limit.clone()
        } else {
            Target(scaled)
        }
    }
}

impl TryFrom<BigUint> for Target {
    type Error = TargetError;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        let bits = value.bits();
        utils::ensure!(bits <= TARGET_BITS, TargetError::TooWide(bits));
        Ok(Self(value))
    }
}

impl TryFrom<Compact> for Target {
    type Error = TargetError;

    fn try_from(compact: Compact) -> Result<Self, Self::Error> {
        let size = compact.exponent();
        let word = compact.mantissa();

        let value = if size <= 3 {
            BigUint::from(word >> (8 * (3 - size)))
        } else {
            BigUint::from(word) << (8 * (size - 3))
        };

        if word != 0 {
            utils::ensure!(
                !compact.is_sign_bit_set(),
                TargetError::NegativeCompact(compact)
            );
            let overflow =
                size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32);
            utils::ensure!(!overflow, TargetError::CompactOverflow(compact));
        }

        Ok(Self(value))
    }
}

impl From<&Target> for Compact {
    fn from(target: &Target) -> Self {
        let mut size = target.0.bits().div_ceil(8);
        let mut mantissa = if size <= 3 {
            target.0.to_u64().unwrap_or(0) << (8 * (3 - size))
        } else {
            (&target.0 >> (8 * (size - 3))).to_u64().unwrap_or(0)
        };

        // The mantissa is signed; move a set top bit into the exponent.
        if mantissa & u64::from(Compact::SIGN_BIT) != 0 {
            mantissa >>= 8;
            size += 1;
        }

        let mantissa = mantissa & u64::from(Compact::MANTISSA_MASK);
        Compact(((size as u32) << 24) | mantissa as u32)
    }
}

impl From<Target> for Compact {
    fn from(target: Target) -> Self {
        Compact::from(&target)
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Target({:064x})", self.0)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:064x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use test_utils::random::{make_seedable_rng, Seed};

    fn nz(v: u64) -> NonZeroU64 {
        NonZeroU64::new(v).unwrap()
    }

    #[rstest]
    #[case(Compact(0x00000000))]
    #[case(Compact(0x1d00ffff))]
    #[case(Compact(0x1e0fffff))]
    #[case(Compact(0x207fffff))]
    #[case(Compact(0x2100ffff))]
    #[case(Compact(0x03123456))]
    #[case(Compact(0x01120000))]
    fn canonical_compact_survives_round_trip(#[case] compact: Compact) {
        let target = Target::try_from(compact).unwrap();
        assert_eq!(target.to_compact(), compact);
    }

    #[test]
    fn decode_known_values() {
        let bitcoin_limit = Target::try_from(Compact(0x1d00ffff)).unwrap();
        let mut expected = [0u8; 32];
        expected[4] = 0xff;
        expected[5] = 0xff;
        assert_eq!(bitcoin_limit, Target::from_be_bytes(expected));

        assert_eq!(
            Target::try_from(Compact(0x01123456)).unwrap(),
            Target::from_u64(0x12)
        );
        assert_eq!(
            Target::try_from(Compact(0x02123456)).unwrap(),
            Target::from_u64(0x1234)
        );
        assert_eq!(
            Target::try_from(Compact(0x05009234)).unwrap(),
            Target::from_u64(0x92340000)
        );
    }

    #[test]
    fn zero_mantissa_is_zero() {
        for compact in [Compact(0x00000000), Compact(0x03000000), Compact(0x01800000)] {
            let target = Target::try_from(compact).unwrap();
            assert!(target.is_zero());
            assert_eq!(target.to_compact(), Compact(0));
        }
    }

    #[test]
    fn invalid_compacts() {
        assert_eq!(
            Target::try_from(Compact(0x04923456)),
            Err(TargetError::NegativeCompact(Compact(0x04923456)))
        );
        assert_eq!(
            Target::try_from(Compact(0xff123456)),
            Err(TargetError::CompactOverflow(Compact(0xff123456)))
        );
        assert_eq!(
            Target::try_from(Compact(0x23000100)),
            Err(TargetError::CompactOverflow(Compact(0x23000100)))
        );
    }

    #[test]
    fn sign_bit_moves_to_exponent() {
        // 0x80 needs a padding byte so that the mantissa stays positive.
        assert_eq!(Target::from_u64(0x80).to_compact(), Compact(0x02008000));
        assert_eq!(Target::from_u64(0x7f).to_compact(), Compact(0x017f0000));
    }

    #[test]
    fn max_value_is_256_bits() {
        assert_eq!(Target::max_value().as_biguint().bits(), 256);
        assert!(Target::try_from(Target::max_value().as_biguint() + 1u32).is_err());
        let max_compact = Target::max_value().to_compact();
        assert_eq!(max_compact, Compact(0x2100ffff));
        assert!(Target::try_from(max_compact).unwrap() <= Target::max_value());
    }

    #[test]
    fn leading_zero_bits() {
        assert_eq!(Target::from_leading_zero_bits(0), Target::max_value());
        assert_eq!(Target::from_leading_zero_bits(1).to_compact(), Compact(0x207fffff));
        assert_eq!(Target::from_leading_zero_bits(20).to_compact(), Compact(0x1e0fffff));
        assert_eq!(Target::from_leading_zero_bits(20).as_biguint().bits(), 236);
        assert!(Target::from_leading_zero_bits(256).is_zero());
    }

    #[test]
    fn scale_resets_to_limit() {
        let limit = Target::from_u64(1_000);
        let target = Target::from_u64(100);

        assert_eq!(
            target.scale_within_limit(3, nz(2), &limit),
            Target::from_u64(150)
        );
        // exactly at the limit
        assert_eq!(target.scale_within_limit(10, nz(1), &limit), limit);
        // above the limit
        assert_eq!(target.scale_within_limit(11, nz(1), &limit), limit);
        // zero result
        assert_eq!(target.scale_within_limit(0, nz(1), &limit), limit);
        assert_eq!(target.scale_within_limit(1, nz(101), &limit), limit);
    }

    #[rstest]
    #[trace]
    #[case(Seed::from_entropy())]
    fn scale_never_exceeds_limit(#[case] seed: Seed) {
        use rand::Rng;
        let mut rng = make_seedable_rng(seed);
        let limit = Target::try_from(Compact(0x1e0fffff)).unwrap();

        for _ in 0..100 {
            let mut bytes = [0u8; 32];
            rng.fill(&mut bytes[4..]);
            let target = Target::from_be_bytes(bytes);
            let scaled = target.scale_within_limit(
                rng.gen_range(0..10_000),
                nz(rng.gen_range(1..10_000)),
                &limit,
            );
            assert!(!scaled.is_zero());
            assert!(scaled <= limit);
        }
    }

    #[test]
    fn hash_is_little_endian() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        assert_eq!(Target::from_hash(&H256(bytes)), Target::from_u64(1));
        bytes[0] = 0;
        bytes[31] = 0x01;
        assert_eq!(Target::from_hash(&H256(bytes)).as_biguint().bits(), 249);
    }
}
