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

use std::collections::BTreeMap;

use common::{
    chain::{Block, BlockHeader},
    primitives::{BlockHeight, H256},
};
use logging::log;
use utils::ensure;

use crate::{BlockAlgorithmRecord, ChainView, ChainedHeader, HeaderRef, HeaderStoreError};

#[derive(Debug, Clone)]
struct StoredHeader {
    header: ChainedHeader,
    /// Where a backward walk for each algorithm starting here would stop
    nearest_pow: HeaderRef,
    nearest_pos: HeaderRef,
}

impl StoredHeader {
    fn nearest(&self, is_proof_of_stake: bool) -> HeaderRef {
        if is_proof_of_stake {
            self.nearest_pos
        } else {
            self.nearest_pow
        }
    }
}

/// Append-only arena of headers, forks included, plus the active chain indexed by height.
#[derive(Debug, Clone, Default)]
pub struct HeaderStore {
    headers: Vec<StoredHeader>,
    by_id: BTreeMap<H256, HeaderRef>,
    algorithm_records: BTreeMap<H256, BlockAlgorithmRecord>,
    active_chain: Vec<HeaderRef>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Insert the chain root, which also becomes the active tip.
    pub fn add_root(
        &mut self,
        block_id: H256,
        header: &BlockHeader,
        record: BlockAlgorithmRecord,
    ) -> Result<HeaderRef, HeaderStoreError> {
        ensure!(self.headers.is_empty(), HeaderStoreError::RootAlreadyPresent);

        let header_ref = self.push(block_id, BlockHeight::zero(), None, header, record);
        self.active_chain.push(header_ref);
        Ok(header_ref)
    }

    /// Insert a header on top of a known predecessor. The active chain is extended if the
    /// predecessor is the active tip; headers on other branches wait for [Self::set_active_tip].
    pub fn add_header(
        &mut self,
        block_id: H256,
        header: &BlockHeader,
        record: BlockAlgorithmRecord,
    ) -> Result<HeaderRef, HeaderStoreError> {
        ensure!(
            !self.by_id.contains_key(&block_id),
            HeaderStoreError::DuplicateBlockId(block_id)
        );
        let prev_id = header.prev_block_id();
        let prev = self
            .get_by_id(prev_id)
            .ok_or(HeaderStoreError::UnknownPredecessor(*prev_id))?;
        let prev_ref = prev.header_ref();
        let height = prev
            .height()
            .next_height()
            .ok_or(HeaderStoreError::HeightOverflow(prev.height()))?;

        let extends_tip = self.active_chain.last() == Some(&prev_ref);
        let header_ref = self.push(block_id, height, Some(prev_ref), header, record);
        if extends_tip {
            self.active_chain.push(header_ref);
        }
        Ok(header_ref)
    }

    pub fn add_block(
        &mut self,
        block_id: H256,
        block: &Block,
    ) -> Result<HeaderRef, HeaderStoreError> {
        self.add_header(block_id, block.header(), BlockAlgorithmRecord::for_block(block))
    }

    fn push(
        &mut self,
        block_id: H256,
        height: BlockHeight,
        prev: Option<HeaderRef>,
        header: &BlockHeader,
        record: BlockAlgorithmRecord,
    ) -> HeaderRef {
        let header_ref = HeaderRef::new(self.headers.len());
        let is_proof_of_stake = record.is_proof_of_stake();

        let nearest = |want_proof_of_stake: bool| match prev {
            _ if is_proof_of_stake == want_proof_of_stake => header_ref,
            Some(prev) => self.headers[prev.index()].nearest(want_proof_of_stake),
            None => header_ref,
        };
        let nearest_pow = nearest(false);
        let nearest_pos = nearest(true);

        self.headers.push(StoredHeader {
            header: ChainedHeader::new(
                header_ref,
                block_id,
                height,
                prev,
                header.timestamp(),
                header.bits(),
            ),
            nearest_pow,
            nearest_pos,
        });
        self.by_id.insert(block_id, header_ref);
        self.algorithm_records.insert(block_id, record);
        header_ref
    }

    pub fn get_by_id(&self, block_id: &H256) -> Option<&ChainedHeader> {
        self.by_id.get(block_id).and_then(|header_ref| self.get_header(*header_ref))
    }

    pub fn active_tip(&self) -> Option<&ChainedHeader> {
        self.active_chain.last().and_then(|header_ref| self.get_header(*header_ref))
    }

    /// The single header at `height` on the active chain
    pub fn active_at_height(&self, height: BlockHeight) -> Option<&ChainedHeader> {
        let index = usize::try_from(height.into_int()).ok()?;
        self.active_chain.get(index).and_then(|header_ref| self.get_header(*header_ref))
    }

    pub fn is_on_active_chain(&self, header_ref: HeaderRef) -> bool {
        self.active_index(header_ref).is_some()
    }

    fn active_index(&self, header_ref: HeaderRef) -> Option<usize> {
        let header = self.get_header(header_ref)?;
        let index = usize::try_from(header.height().into_int()).ok()?;
        (self.active_chain.get(index) == Some(&header_ref)).then_some(index)
    }

    /// Make `tip` the end of the active chain. Only the part above the fork point is rewritten.
    pub fn set_active_tip(&mut self, tip: HeaderRef) -> Result<(), HeaderStoreError> {
        let mut branch = Vec::new();
        let mut current = Some(tip);
        let mut fork_len = 0;

        while let Some(header_ref) = current {
            if let Some(index) = self.active_index(header_ref) {
                fork_len = index + 1;
                break;
            }
            let header = self
                .get_header(header_ref)
                .ok_or(HeaderStoreError::UnknownHeader(header_ref))?;
            branch.push(header_ref);
            current = header.prev();
        }

        let disconnected = self.active_chain.len() - fork_len;
        self.active_chain.truncate(fork_len);
        self.active_chain.extend(branch.iter().rev());

        log::debug!(
            "Active tip set to {tip}: {disconnected} header(s) disconnected, {} connected",
            branch.len()
        );
        Ok(())
    }
}

impl ChainView for HeaderStore {
    fn get_header(&self, header_ref: HeaderRef) -> Option<&ChainedHeader> {
        self.headers.get(header_ref.index()).map(|stored| &stored.header)
    }

    fn algorithm_record(&self, block_id: &H256) -> Option<BlockAlgorithmRecord> {
        self.algorithm_records.get(block_id).copied()
    }

    fn nearest_of_algorithm(
        &self,
        start: HeaderRef,
        is_proof_of_stake: bool,
    ) -> Option<HeaderRef> {
        self.headers.get(start.index()).map(|stored| stored.nearest(is_proof_of_stake))
    }
}
