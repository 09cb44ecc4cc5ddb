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
    chain::{block::timestamp::BlockTimestamp, Block},
    primitives::{BlockHeight, Compact, H256},
};
use parity_scale_codec::{Decode, Encode};

/// Position of a header in the append-only header arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeaderRef(usize);

impl HeaderRef {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for HeaderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A header linked to its predecessor. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedHeader {
    header_ref: HeaderRef,
    block_id: H256,
    height: BlockHeight,
    /// `None` only for the chain root
    prev: Option<HeaderRef>,
    timestamp: BlockTimestamp,
    bits: Compact,
}

impl ChainedHeader {
    pub(crate) fn new(
        header_ref: HeaderRef,
        block_id: H256,
        height: BlockHeight,
        prev: Option<HeaderRef>,
        timestamp: BlockTimestamp,
        bits: Compact,
    ) -> Self {
        Self {
            header_ref,
            block_id,
            height,
            prev,
            timestamp,
            bits,
        }
    }

    pub fn header_ref(&self) -> HeaderRef {
        self.header_ref
    }

    pub fn block_id(&self) -> &H256 {
        &self.block_id
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn prev(&self) -> Option<HeaderRef> {
        self.prev
    }

    pub fn is_root(&self) -> bool {
        self.prev.is_none()
    }

    pub fn timestamp(&self) -> BlockTimestamp {
        self.timestamp
    }

    pub fn bits(&self) -> Compact {
        self.bits
    }
}

/// Which algorithm produced a block. Written once when the block is accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Encode, Decode)]
pub struct BlockAlgorithmRecord {
    is_proof_of_stake: bool,
}

impl BlockAlgorithmRecord {
    pub const fn new(is_proof_of_stake: bool) -> Self {
        Self { is_proof_of_stake }
    }

    pub fn for_block(block: &Block) -> Self {
        Self::new(block.is_proof_of_stake())
    }

    pub const fn is_proof_of_stake(&self) -> bool {
        self.is_proof_of_stake
    }
}
