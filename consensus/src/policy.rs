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

//! Per-network consensus decisions. The network is fixed for the lifetime of the process, so
//! every function takes its [ConsensusParameters] explicitly.

use chainstate_types::{ChainView, ChainedHeader};
use common::{
    chain::{BlockHeader, ConsensusParameters, RetargetAlgorithm},
    primitives::{BlockHeight, Target},
};
use logging::log;

use crate::{
    retarget::{calculate_classic_target, calculate_ratchet_target},
    ConsensusRetargetError, ConsensusVerificationError,
};

/// Whether a block of the given algorithm may be produced at `height`.
///
/// Below the alternation activation both algorithms are allowed.
pub fn is_algorithm_allowed(
    params: &ConsensusParameters,
    is_proof_of_stake: bool,
    height: BlockHeight,
) -> bool {
    height < params.alternation_activation_height() || is_proof_of_stake == height.is_even()
}

pub fn use_classic_algorithm(params: &ConsensusParameters, height: BlockHeight) -> bool {
    params.retarget_upgrades().algorithm_at(height) == RetargetAlgorithm::Classic
}

/// Target required for the next block of the given algorithm on top of `header`.
///
/// `None` stands for the block before genesis and yields the algorithm's limit.
pub fn get_required_target(
    params: &ConsensusParameters,
    view: &dyn ChainView,
    header: Option<&ChainedHeader>,
    is_proof_of_stake: bool,
) -> Result<Target, ConsensusRetargetError> {
    let header = match header {
        Some(header) => header,
        None => return Ok(params.limit(is_proof_of_stake).clone()),
    };
    let height = header.height().next_height().unwrap_or(BlockHeight::max());

    match params.retarget_upgrades().algorithm_at(height) {
        RetargetAlgorithm::InitialLimit => Ok(params.limit(is_proof_of_stake).clone()),
        RetargetAlgorithm::Ratchet => {
            calculate_ratchet_target(params, view, Some(header), is_proof_of_stake)
        }
        RetargetAlgorithm::Classic => {
            calculate_classic_target(params, view, Some(header), is_proof_of_stake)
        }
    }
}

/// Depth a stake must be buried at before it can be used, so that staking on a branch can
/// never win against blocks the network already considers final.
pub fn minimum_stake_confirmations(params: &ConsensusParameters, _height: BlockHeight) -> u64 {
    params.max_reorg_length()
}

/// The header's difficulty bits must encode exactly the required target.
pub fn check_header_difficulty(
    params: &ConsensusParameters,
    view: &dyn ChainView,
    prev: Option<&ChainedHeader>,
    header: &BlockHeader,
    is_proof_of_stake: bool,
) -> Result<(), ConsensusVerificationError> {
    let expected = get_required_target(params, view, prev, is_proof_of_stake)?.to_compact();
    let actual = header.bits();

    if expected != actual {
        log::debug!("BAD_DIFFICULTY_BITS: expected {expected}, got {actual}");
        return Err(ConsensusVerificationError::BadDifficultyBits { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{TestChain, TEST_BITS};
    use common::{
        chain::{
            block::timestamp::BlockTimestamp, config::Builder, create_config, ChainType,
        },
        primitives::{Compact, H256},
    };
    use rand::Rng;
    use rstest::rstest;
    use strum::IntoEnumIterator;
    use test_utils::random::{make_seedable_rng, Seed};

    #[rstest]
    #[trace]
    #[case(Seed::from_entropy())]
    fn algorithm_allowed_by_parity(#[case] seed: Seed) {
        let mut rng = make_seedable_rng(seed);

        for chain_type in ChainType::iter() {
            let params = create_config(chain_type);
            let activation = params.alternation_activation_height().into_int();

            for height in 0..activation {
                let height = BlockHeight::new(height);
                assert!(is_algorithm_allowed(&params, true, height));
                assert!(is_algorithm_allowed(&params, false, height));
            }

            for _ in 0..1000 {
                let height = BlockHeight::new(rng.gen_range(activation..u64::MAX));
                let even = height.into_int() % 2 == 0;
                assert_eq!(is_algorithm_allowed(&params, true, height), even);
                assert_eq!(is_algorithm_allowed(&params, false, height), !even);
            }
        }
    }

    #[test]
    fn classic_switch() {
        let params = create_config(ChainType::Testnet);
        let classic = params.classic_activation_height().unwrap();

        assert!(!use_classic_algorithm(&params, classic.prev_height().unwrap()));
        assert!(use_classic_algorithm(&params, classic));
        assert!(use_classic_algorithm(&params, BlockHeight::max()));
        assert!(!use_classic_algorithm(&params, BlockHeight::zero()));
    }

    #[test]
    fn stake_confirmations() {
        for chain_type in ChainType::iter() {
            let params = create_config(chain_type);
            assert_eq!(
                minimum_stake_confirmations(&params, BlockHeight::new(12345)),
                params.max_reorg_length()
            );
        }
        assert_eq!(
            minimum_stake_confirmations(&create_config(ChainType::Mainnet), BlockHeight::zero()),
            125
        );
    }

    #[test]
    fn limit_before_ratchet() {
        let params = Builder::test_chain()
            .activate_retarget(RetargetAlgorithm::Ratchet, BlockHeight::new(50))
            .build()
            .unwrap();
        let mut chain = TestChain::new();
        chain.push_alternating(48, 1);

        // Next block at 49
        let target = get_required_target(&params, chain.store(), Some(chain.tip()), true);
        assert_eq!(target.as_ref(), Ok(params.pos_limit()));

        // Next block at 50
        chain.push_alternating(1, 1);
        let target = get_required_target(&params, chain.store(), Some(chain.tip()), true);
        assert_eq!(
            target,
            calculate_ratchet_target(&params, chain.store(), Some(chain.tip()), true)
        );
        assert_ne!(target.as_ref(), Ok(params.pos_limit()));
    }

    #[test]
    fn dispatch_to_classic() {
        let params = Builder::test_chain()
            .activate_retarget(RetargetAlgorithm::Classic, BlockHeight::new(101))
            .build()
            .unwrap();
        let mut chain = TestChain::new();
        chain.push_alternating(99, 128);

        let tip = chain.tip();
        let ratchet = get_required_target(&params, chain.store(), Some(tip), false);
        assert_eq!(
            ratchet,
            calculate_ratchet_target(&params, chain.store(), Some(tip), false)
        );

        chain.push_alternating(1, 128);
        let tip = chain.tip();
        let classic = get_required_target(&params, chain.store(), Some(tip), false);
        assert_eq!(
            classic,
            calculate_classic_target(&params, chain.store(), Some(tip), false)
        );
        assert_ne!(classic, ratchet);
    }

    #[test]
    fn header_difficulty() {
        let params = Builder::test_chain().build().unwrap();
        let mut chain = TestChain::new();
        chain.push_alternating(10, 100);
        let tip = chain.tip();

        let required =
            get_required_target(&params, chain.store(), Some(tip), false).unwrap().to_compact();
        let header_with = |bits: Compact| {
            BlockHeader::new(
                *tip.block_id(),
                BlockTimestamp::from_int_seconds(tip.timestamp().as_int_seconds() + 100),
                bits,
                0,
            )
        };

        assert_eq!(
            check_header_difficulty(
                &params,
                chain.store(),
                Some(tip),
                &header_with(required),
                false
            ),
            Ok(())
        );
        assert_eq!(
            check_header_difficulty(
                &params,
                chain.store(),
                Some(tip),
                &header_with(TEST_BITS),
                false
            ),
            Err(ConsensusVerificationError::BadDifficultyBits {
                expected: required,
                actual: TEST_BITS
            })
        );

        let genesis = BlockHeader::new(
            H256::zero(),
            BlockTimestamp::from_int_seconds(0),
            params.pow_limit().to_compact(),
            0,
        );
        assert_eq!(
            check_header_difficulty(&params, chain.store(), None, &genesis, false),
            Ok(())
        );
    }
}
