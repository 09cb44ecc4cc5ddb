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
pub mod timestamp;

use parity_scale_codec::{Decode, Encode};

use crate::{
    chain::transaction::Transaction,
    primitives::{Compact, H256},
};

use self::timestamp::BlockTimestamp;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct BlockHeader {
    prev_block_id: H256,
    timestamp: BlockTimestamp,
    bits: Compact,
    nonce: u32,
}

impl BlockHeader {
    pub fn new(prev_block_id: H256, timestamp: BlockTimestamp, bits: Compact, nonce: u32) -> Self {
        Self {
            prev_block_id,
            timestamp,
            bits,
            nonce,
        }
    }

    pub fn prev_block_id(&self) -> &H256 {
        &self.prev_block_id
    }

    pub fn timestamp(&self) -> BlockTimestamp {
        self.timestamp
    }

    pub fn bits(&self) -> Compact {
        self.bits
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }
}

/// A block as seen by the consensus rules: the header and the transaction list whose
/// shape tells proof-of-work and proof-of-stake blocks apart.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Block {
    header: BlockHeader,
    transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// A proof-of-stake block carries a coinstake right after its coinbase.
    pub fn is_proof_of_stake(&self) -> bool {
        self.transactions.get(1).is_some_and(Transaction::is_coin_stake)
    }

    pub fn is_proof_of_work(&self) -> bool {
        !self.is_proof_of_stake()
    }

    /// Script of the coinbase input, where the block height is committed.
    pub fn coinbase_script_sig(&self) -> Option<&[u8]> {
        self.transactions
            .first()
            .and_then(|tx| tx.inputs().first())
            .map(|input| input.script_sig())
    }
}
