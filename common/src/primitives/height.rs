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
use parity_scale_codec::{Decode, Encode};

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Encode, Decode)]
pub struct BlockHeight(#[codec(compact)] u64);

impl BlockHeight {
    pub const fn new(height: u64) -> BlockHeight {
        BlockHeight(height)
    }

    pub const fn zero() -> BlockHeight {
        BlockHeight(0)
    }

    pub const fn one() -> BlockHeight {
        BlockHeight(1)
    }

    pub const fn max() -> BlockHeight {
        BlockHeight(u64::MAX)
    }

    pub const fn into_int(self) -> u64 {
        self.0
    }

    /// Even heights belong to proof-of-stake once alternation is enforced.
    pub const fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    pub fn next_height(self) -> Option<BlockHeight> {
        self.0.checked_add(1).map(BlockHeight)
    }

    pub fn prev_height(self) -> Option<BlockHeight> {
        self.0.checked_sub(1).map(BlockHeight)
    }

    pub fn checked_add(self, rhs: u64) -> Option<BlockHeight> {
        self.0.checked_add(rhs).map(BlockHeight)
    }

    pub fn checked_sub(self, rhs: u64) -> Option<BlockHeight> {
        self.0.checked_sub(rhs).map(BlockHeight)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        BlockHeight(height)
    }
}

impl From<BlockHeight> for u64 {
    fn from(height: BlockHeight) -> Self {
        height.0
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
