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

use common::{
    chain::ConsensusParameters,
    primitives::{Compact, Target, H256},
};

/// Whether `block_hash`, read as a little-endian integer, meets the target encoded in `bits`.
///
/// Targets that are negative, overflowing, zero or above the PoW limit never pass.
pub fn check_proof_of_work(params: &ConsensusParameters, block_hash: &H256, bits: Compact) -> bool {
    match Target::try_from(bits) {
        Ok(target) if !target.is_zero() && &target <= params.pow_limit() => {
            Target::from_hash(block_hash) <= target
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::chain::{create_mainnet, create_regtest};

    fn hash_with_top_byte(byte: u8) -> H256 {
        // Little-endian: the last byte is the most significant
        let mut hash = H256::zero();
        hash.as_bytes_mut()[31] = byte;
        hash
    }

    #[test]
    fn easy_target() {
        let params = create_regtest();
        assert!(check_proof_of_work(&params, &hash_with_top_byte(0x00), Compact(0x207fffff)));
        assert!(check_proof_of_work(&params, &hash_with_top_byte(0x7f), Compact(0x207fffff)));
        assert!(!check_proof_of_work(&params, &hash_with_top_byte(0x80), Compact(0x207fffff)));
    }

    #[test]
    fn invalid_bits_fail() {
        let params = create_regtest();
        let hash = H256::zero();
        assert!(!check_proof_of_work(&params, &hash, Compact(0)));
        assert!(!check_proof_of_work(&params, &hash, Compact(0x04923456)));
        assert!(!check_proof_of_work(&params, &hash, Compact(0xff123456)));
    }

    #[test]
    fn above_limit_fails() {
        let params = create_mainnet();
        let hash = H256::zero();
        assert!(check_proof_of_work(&params, &hash, Compact(0x1e0fffff)));
        assert!(!check_proof_of_work(&params, &hash, Compact(0x1f00ffff)));
    }
}
