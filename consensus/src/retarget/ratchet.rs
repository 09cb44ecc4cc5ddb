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

use chainstate_types::{ChainView, ChainedHeader};
use common::{chain::ConsensusParameters, primitives::Target};
use logging::log;
use utils::ensure;

use crate::{
    chain_walker::is_proof_of_stake,
    retarget::{calculate_retarget, decode_bits, same_algorithm_history, SameAlgorithmHistory},
    ConsensusRetargetError,
};

/// Three-block window retarget: the last two blocks of the algorithm and the opposite-algorithm
/// block interleaved between them.
///
/// `header` is the block the new one builds on; `None` requests the target of the genesis block.
pub fn calculate_ratchet_target(
    params: &ConsensusParameters,
    view: &dyn ChainView,
    header: Option<&ChainedHeader>,
    is_proof_of_stake_requested: bool,
) -> Result<Target, ConsensusRetargetError> {
    let limit = params.limit(is_proof_of_stake_requested);
    let header = match header {
        Some(header) => header,
        None => return Ok(limit.clone()),
    };

    let (last_same, middle, prev_same) =
        match same_algorithm_history(params, view, header, is_proof_of_stake_requested)? {
            SameAlgorithmHistory::Insufficient => {
                log::trace!(
                    "Not enough history after height {} for a ratchet retarget, using the limit",
                    header.height()
                );
                return Ok(limit.clone());
            }
            SameAlgorithmHistory::Frozen(target) => return Ok(target),
            SameAlgorithmHistory::Available {
                last_same,
                middle,
                prev_same,
            } => (last_same, middle, prev_same),
        };

    let middle_is_pos = is_proof_of_stake(view, middle)?;
    ensure!(
        middle_is_pos != is_proof_of_stake(view, last_same)?
            && middle_is_pos != is_proof_of_stake(view, prev_same)?,
        ConsensusRetargetError::InterleavedBlockSameAlgorithm(middle.height())
    );
    ensure!(
        middle.height().next_height() == Some(last_same.height())
            && prev_same.height().next_height() == Some(middle.height()),
        ConsensusRetargetError::InterleavedHeightMismatch {
            prev: prev_same.height(),
            middle: middle.height(),
            last: last_same.height(),
        }
    );

    // Shift the older timestamp forward by the time spent on the interleaved block, as if
    // that block took no time at all.
    let middle_gap =
        middle.timestamp().as_signed_seconds() - prev_same.timestamp().as_signed_seconds();
    let adjusted_prev_time = prev_same.timestamp().as_signed_seconds() + middle_gap;

    let last_target = decode_bits(last_same.bits())?;
    let new_target = calculate_retarget(
        params,
        last_same.timestamp().as_signed_seconds(),
        &last_target,
        adjusted_prev_time,
        limit,
    );

    log::trace!(
        "Ratchet retarget at height {}: {} -> {}",
        last_same.height(),
        last_same.bits(),
        new_target.to_compact()
    );

    Ok(new_target)
}
