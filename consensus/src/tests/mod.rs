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

//! Chain building helpers shared by the consensus tests.


use chainstate_types::{
    BlockAlgorithmRecord, ChainView, ChainedHeader, HeaderRef, HeaderStore,
};
use common::{
    chain::{
        block::timestamp::BlockTimestamp, script::height_push_script, Block, BlockHeader,
        OutPoint, Transaction, TxInput, TxOutput,
    },
    primitives::{BlockHeight, Compact, H256},
};

pub const TEST_BITS: Compact = Compact(0x1d00ffff);
const ROOT_TIME: u32 = 1_600_000_000;

/// A header chain grown one block at a time on top of a PoW root.
pub struct TestChain {
    store: HeaderStore,
    next_id: u64,
}

impl TestChain {
    pub fn new() -> Self {
        logging::init_logging();

        let mut store = HeaderStore::new();
        let root = BlockHeader::new(
            H256::zero(),
            BlockTimestamp::from_int_seconds(ROOT_TIME),
            TEST_BITS,
            0,
        );
        store
            .add_root(block_id(0), &root, BlockAlgorithmRecord::new(false))
            .unwrap();
        Self { store, next_id: 1 }
    }

    pub fn store(&self) -> &HeaderStore {
        &self.store
    }

    pub fn tip(&self) -> &ChainedHeader {
        self.store.active_tip().unwrap()
    }

    pub fn at(&self, height: BlockHeight) -> &ChainedHeader {
        self.store.active_at_height(height).unwrap()
    }

    pub fn push(&mut self, is_proof_of_stake: bool, timestamp: u32) -> HeaderRef {
        self.push_with_bits(is_proof_of_stake, timestamp, TEST_BITS)
    }

    pub fn push_with_bits(
        &mut self,
        is_proof_of_stake: bool,
        timestamp: u32,
        bits: Compact,
    ) -> HeaderRef {
        let header = BlockHeader::new(
            *self.tip().block_id(),
            BlockTimestamp::from_int_seconds(timestamp),
            bits,
            0,
        );
        let id = block_id(self.next_id);
        self.next_id += 1;
        self.store
            .add_header(id, &header, BlockAlgorithmRecord::new(is_proof_of_stake))
            .unwrap()
    }

    /// One block per tag, each 128 seconds after the previous one
    pub fn push_tagged(&mut self, tags: &[bool]) {
        for is_proof_of_stake in tags {
            let timestamp = self.tip().timestamp().as_int_seconds() + 128;
            self.push(*is_proof_of_stake, timestamp);
        }
    }

    /// `count` blocks following the height parity, `gap` seconds apart
    pub fn push_alternating(&mut self, count: u64, gap: u32) {
        for _ in 0..count {
            let tip = self.tip();
            let is_proof_of_stake = tip.height().next_height().unwrap().is_even();
            let timestamp = tip.timestamp().as_int_seconds() + gap;
            self.push(is_proof_of_stake, timestamp);
        }
    }
}

impl Default for TestChain {
    fn default() -> Self {
        Self::new()
    }
}

pub fn block_id(n: u64) -> H256 {
    H256::from_low_u64_be(n)
}

/// A chain view without the nearest-ancestor index, so lookups walk predecessors.
pub struct WalkOnly<'a> {
    store: &'a HeaderStore,
    with_records: bool,
    missing_header: Option<HeaderRef>,
}

impl<'a> WalkOnly<'a> {
    pub fn new(store: &'a HeaderStore) -> Self {
        Self {
            store,
            with_records: true,
            missing_header: None,
        }
    }

    pub fn without_records(store: &'a HeaderStore) -> Self {
        Self {
            store,
            with_records: false,
            missing_header: None,
        }
    }

    /// Hides one header, as if it had been lost from the underlying storage
    pub fn without_header(store: &'a HeaderStore, missing: HeaderRef) -> Self {
        Self {
            store,
            with_records: true,
            missing_header: Some(missing),
        }
    }
}

impl ChainView for WalkOnly<'_> {
    fn get_header(&self, header_ref: HeaderRef) -> Option<&ChainedHeader> {
        if self.missing_header == Some(header_ref) {
            return None;
        }
        self.store.get_header(header_ref)
    }

    fn algorithm_record(&self, block_id: &H256) -> Option<BlockAlgorithmRecord> {
        if self.with_records {
            self.store.algorithm_record(block_id)
        } else {
            None
        }
    }
}

/// A block at `height` committing to `height` in its coinbase, with a coinstake if
/// `is_proof_of_stake`.
pub fn make_block(height: BlockHeight, is_proof_of_stake: bool) -> Block {
    let mut script_sig = height_push_script(height);
    script_sig.extend_from_slice(b"extra nonce");

    let coinbase = Transaction::new(
        vec![TxInput::new(OutPoint::null(), script_sig)],
        vec![TxOutput::new(50, vec![0x51])],
    );
    let mut transactions = vec![coinbase];
    if is_proof_of_stake {
        transactions.push(Transaction::new(
            vec![TxInput::new(OutPoint::new(H256::repeat_byte(0x11), 0), vec![])],
            vec![TxOutput::empty(), TxOutput::new(1000, vec![0x51])],
        ));
    }

    let header = BlockHeader::new(
        H256::zero(),
        BlockTimestamp::from_int_seconds(ROOT_TIME),
        TEST_BITS,
        0,
    );
    Block::new(header, transactions)
}
