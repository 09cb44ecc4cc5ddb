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

use common::primitives::{BlockHeight, H256};

use crate::HeaderRef;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HeaderStoreError {
    #[error("Block {0} is already in the store")]
    DuplicateBlockId(H256),
    #[error("Previous block {0} not found")]
    UnknownPredecessor(H256),
    #[error("The store already has a root header")]
    RootAlreadyPresent,
    #[error("Header {0} not found")]
    UnknownHeader(HeaderRef),
    #[error("Block height overflow after {0}")]
    HeightOverflow(BlockHeight),
}
