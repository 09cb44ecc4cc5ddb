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

//! Difficulty retargeting. Every calculator looks at the two most recent blocks of the
//! requested algorithm and the single opposite-algorithm block between them.

mod classic;
mod formula;
mod ratchet;

use chainstate_types::{ChainView, ChainedHeader};
use common::{
    chain::ConsensusParameters,
    primitives::{Compact, Target},
};

use crate::{
    chain_walker::{find_last_of_algorithm, predecessor},
    ConsensusRetargetError,
};

pub use self::{
    classic::{calculate_classic_target, classic_window_size},
    formula::calculate_retarget,
    ratchet::calculate_ratchet_target,
};

pub(crate) enum SameAlgorithmHistory<'a> {
    /// Fewer than two earlier blocks of the algorithm; the limit applies
    Insufficient,
    /// Retargeting is switched off for the algorithm; the last difficulty stays
    Frozen(Target),
    Available {
        last_same: &'a ChainedHeader,
        middle: &'a ChainedHeader,
        prev_same: &'a ChainedHeader,
    },
}

pub(crate) fn same_algorithm_history<'a>(
    params: &ConsensusParameters,
    view: &'a dyn ChainView,
    header: &'a ChainedHeader,
    is_proof_of_stake: bool,
) -> Result<SameAlgorithmHistory<'a>, ConsensusRetargetError> {
    let last_same = find_last_of_algorithm(view, header, is_proof_of_stake)?;
    let middle = match predecessor(view, last_same)? {
        Some(middle) => middle,
        None => return Ok(SameAlgorithmHistory::Insufficient),
    };

    let prev_same = find_last_of_algorithm(view, middle, is_proof_of_stake)?;
    if prev_same.is_root() {
        return Ok(SameAlgorithmHistory::Insufficient);
    }

    if params.no_retargeting(is_proof_of_stake) {
        return decode_bits(last_same.bits()).map(SameAlgorithmHistory::Frozen);
    }

    Ok(SameAlgorithmHistory::Available {
        last_same,
        middle,
        prev_same,
    })
}

pub(crate) fn decode_bits(bits: Compact) -> Result<Target, ConsensusRetargetError> {
    Target::try_from(bits).map_err(|e| ConsensusRetargetError::DecodingBitsFailed(bits, e))
}
