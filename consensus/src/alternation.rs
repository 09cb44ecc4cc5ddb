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

//! Height parity rule: once active, even heights belong to proof of stake and odd heights
//! to proof of work.

use common::{
    chain::{script::commits_to_height, Block, ConsensusParameters},
    primitives::BlockHeight,
};
use logging::log;

use crate::ConsensusVerificationError;

/// How thoroughly a block is being validated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BlockValidationContext {
    /// Set for blocks below an assumed-valid point; block-level rules are not evaluated.
    skip_validation: bool,
}

impl BlockValidationContext {
    pub const fn new() -> Self {
        Self {
            skip_validation: false,
        }
    }

    pub const fn skipping_validation() -> Self {
        Self {
            skip_validation: true,
        }
    }

    pub const fn skip_validation(&self) -> bool {
        self.skip_validation
    }
}

/// The coinbase input script must start with the push of the block's chain height.
pub fn check_coinbase_height(
    block: &Block,
    height: BlockHeight,
) -> Result<(), ConsensusVerificationError> {
    let committed = block
        .coinbase_script_sig()
        .is_some_and(|script_sig| commits_to_height(script_sig, height));

    if !committed {
        log::debug!("BAD_COINBASE_HEIGHT: block at height {height} commits to another height");
        return Err(ConsensusVerificationError::BadCoinbaseHeight { expected: height });
    }
    Ok(())
}

/// Validate a block that is connected at `height`. The coinbase height commitment is checked
/// first, then the algorithm against the height parity.
pub fn check_alternation(
    params: &ConsensusParameters,
    block: &Block,
    height: BlockHeight,
    context: BlockValidationContext,
) -> Result<(), ConsensusVerificationError> {
    if context.skip_validation() {
        return Ok(());
    }

    check_coinbase_height(block, height)?;

    if height < params.alternation_activation_height() {
        return Ok(());
    }

    let is_proof_of_stake = block.is_proof_of_stake();
    if is_proof_of_stake != height.is_even() {
        log::debug!(
            "BAD_POS_POW_ALTERNATION_SEQUENCE: height {height}, is_proof_of_stake={is_proof_of_stake}"
        );
        return Err(ConsensusVerificationError::BadAlternationSequence {
            height,
            is_proof_of_stake,
        });
    }

    Ok(())
}
