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

use std::num::NonZeroU64;

use chainstate_types::{ChainView, ChainedHeader};
use common::{
    chain::ConsensusParameters,
    primitives::{BlockHeight, Target},
};
use logging::log;

use crate::{
    chain_walker::{find_last_of_algorithm, predecessor},
    retarget::{decode_bits, same_algorithm_history, SameAlgorithmHistory},
    ConsensusRetargetError,
};

/// Number of same-algorithm intervals the classic retarget averages over when the last block
/// of the algorithm is at `last_same_height`.
///
/// Only the alternating part of the chain is eligible, which holds about half of the heights
/// minus the offset for blocks mined before the alternation started.
pub fn classic_window_size(params: &ConsensusParameters, last_same_height: BlockHeight) -> u64 {
    let eligible = (last_same_height.into_int() / 2).saturating_sub(params.classic_window_offset());
    std::cmp::min(eligible, params.classic_max_window().get())
}

/// Windowed retarget over up to `classic_max_window` same-algorithm intervals.
///
/// Each interval counts the time from the interleaved opposite-algorithm block to the next
/// block of the algorithm, so the other algorithm's blocks do not slow this one down.
pub fn calculate_classic_target(
    params: &ConsensusParameters,
    view: &dyn ChainView,
    header: Option<&ChainedHeader>,
    is_proof_of_stake: bool,
) -> Result<Target, ConsensusRetargetError> {
    let limit = params.limit(is_proof_of_stake);
    let header = match header {
        Some(header) => header,
        None => return Ok(limit.clone()),
    };

    let last_same = match same_algorithm_history(params, view, header, is_proof_of_stake)? {
        SameAlgorithmHistory::Insufficient => {
            log::trace!(
                "Not enough history after height {} for a classic retarget, using the limit",
                header.height()
            );
            return Ok(limit.clone());
        }
        SameAlgorithmHistory::Frozen(target) => return Ok(target),
        SameAlgorithmHistory::Available { last_same, .. } => last_same,
    };

    let window_size = match NonZeroU64::new(classic_window_size(params, last_same.height())) {
        Some(window_size) => window_size,
        None => {
            log::trace!(
                "Empty classic retarget window at height {}, using the limit",
                last_same.height()
            );
            return Ok(limit.clone());
        }
    };

    let mut last_block = last_same;
    let mut sum_of_intervals: i64 = 0;
    for _ in 0..window_size.get() {
        let middle = predecessor(view, last_block)?
            .ok_or(ConsensusRetargetError::MissingInterleavedBlock(last_block.height()))?;
        let prev_block = find_last_of_algorithm(view, middle, is_proof_of_stake)?;

        let last_time = last_block.timestamp().as_signed_seconds();
        let middle_time = middle.timestamp().as_signed_seconds();
        let prev_time = prev_block.timestamp().as_signed_seconds();
        sum_of_intervals += (last_time - prev_time) - (middle_time - prev_time);

        last_block = prev_block;
    }

    let target_timespan = window_size.saturating_mul(params.target_spacing_secs());
    let actual_timespan = num::clamp(
        u64::try_from(sum_of_intervals).unwrap_or(0),
        target_timespan.get() / 4,
        target_timespan.get().saturating_mul(4),
    );

    let last_target = decode_bits(last_same.bits())?;
    let new_target = last_target.scale_within_limit(actual_timespan, target_timespan, limit);

    log::trace!(
        "Classic retarget at height {} over {} intervals ({}s of {}s): {} -> {}",
        last_same.height(),
        window_size,
        actual_timespan,
        target_timespan,
        last_same.bits(),
        new_target.to_compact()
    );

    Ok(new_target)
}
