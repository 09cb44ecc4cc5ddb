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

use thiserror::Error;

use chainstate_types::HeaderRef;
use common::primitives::{BlockHeight, Compact, TargetError, H256};

/// The chain handed to a retarget calculation breaks a structural invariant. This points at
/// corrupted chain data, not at an adversarial block.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConsensusRetargetError {
    #[error("Block at height {0} has no interleaved predecessor")]
    MissingInterleavedBlock(BlockHeight),
    #[error("Interleaved block at height {0} was produced by the same algorithm as its neighbours")]
    InterleavedBlockSameAlgorithm(BlockHeight),
    #[error("Interleaved block at height {middle} is not between heights {prev} and {last}")]
    InterleavedHeightMismatch {
        prev: BlockHeight,
        middle: BlockHeight,
        last: BlockHeight,
    },
    #[error("Header {0} not found in the chain view")]
    HeaderNotFound(HeaderRef),
    #[error("No algorithm recorded for block {0}")]
    AlgorithmRecordNotFound(H256),
    #[error("Failed to decode difficulty bits {0}: {1}")]
    DecodingBitsFailed(Compact, TargetError),
}

/// A consensus related error.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConsensusVerificationError {
    #[error("Coinbase does not commit to block height {expected}")]
    BadCoinbaseHeight { expected: BlockHeight },
    #[error("Bad PoS/PoW alternation sequence: block at height {height} is_proof_of_stake={is_proof_of_stake}")]
    BadAlternationSequence {
        height: BlockHeight,
        is_proof_of_stake: bool,
    },
    #[error("Block difficulty bits {actual} differ from the required {expected}")]
    BadDifficultyBits { expected: Compact, actual: Compact },
    #[error("Retarget error: {0}")]
    RetargetError(#[from] ConsensusRetargetError),
}
