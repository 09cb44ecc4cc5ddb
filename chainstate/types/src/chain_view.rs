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

use common::primitives::H256;

use crate::{BlockAlgorithmRecord, ChainedHeader, HeaderRef};

/// Read access to a frozen view of the header chain.
pub trait ChainView {
    fn get_header(&self, header_ref: HeaderRef) -> Option<&ChainedHeader>;

    fn algorithm_record(&self, block_id: &H256) -> Option<BlockAlgorithmRecord>;

    /// The header a backward walk from `start` looking for `is_proof_of_stake` blocks would
    /// stop at: the nearest such ancestor-or-self, or the chain root if there is none.
    ///
    /// Views that keep no such index return `None` and the caller walks.
    fn nearest_of_algorithm(
        &self,
        _start: HeaderRef,
        _is_proof_of_stake: bool,
    ) -> Option<HeaderRef> {
        None
    }
}
