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

//! Walking the ancestor chain to the nearest block of one algorithm.

use chainstate_types::{ChainView, ChainedHeader};

use crate::ConsensusRetargetError;

pub(crate) fn is_proof_of_stake(
    view: &dyn ChainView,
    header: &ChainedHeader,
) -> Result<bool, ConsensusRetargetError> {
    view.algorithm_record(header.block_id())
        .map(|record| record.is_proof_of_stake())
        .ok_or(ConsensusRetargetError::AlgorithmRecordNotFound(*header.block_id()))
}

pub(crate) fn predecessor<'a>(
    view: &'a dyn ChainView,
    header: &ChainedHeader,
) -> Result<Option<&'a ChainedHeader>, ConsensusRetargetError> {
    header
        .prev()
        .map(|prev| view.get_header(prev).ok_or(ConsensusRetargetError::HeaderNotFound(prev)))
        .transpose()
}

/// The nearest ancestor-or-self of `start` produced by the wanted algorithm.
///
/// If no such block exists the chain root is returned; callers detect that through the
/// missing predecessor, which also means there is not enough history to retarget.
pub fn find_last_of_algorithm<'a>(
    view: &'a dyn ChainView,
    start: &'a ChainedHeader,
    want_proof_of_stake: bool,
) -> Result<&'a ChainedHeader, ConsensusRetargetError> {
    match view.nearest_of_algorithm(start.header_ref(), want_proof_of_stake) {
        Some(found) => {
            view.get_header(found).ok_or(ConsensusRetargetError::HeaderNotFound(found))
        }
        None => walk_to_last_of_algorithm(view, start, want_proof_of_stake),
    }
}

pub(crate) fn walk_to_last_of_algorithm<'a>(
    view: &'a dyn ChainView,
    start: &'a ChainedHeader,
    want_proof_of_stake: bool,
) -> Result<&'a ChainedHeader, ConsensusRetargetError> {
    let mut current = start;
    while is_proof_of_stake(view, current)? != want_proof_of_stake {
        match predecessor(view, current)? {
            Some(prev) => current = prev,
            None => break,
        }
    }
    Ok(current)
}
