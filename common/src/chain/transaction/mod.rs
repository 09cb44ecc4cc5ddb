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

use crate::primitives::H256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct OutPoint {
    tx_id: H256,
    index: u32,
}

impl OutPoint {
    pub fn new(tx_id: H256, index: u32) -> Self {
        Self { tx_id, index }
    }

    /// The outpoint referenced by coinbase inputs.
    pub fn null() -> Self {
        Self {
            tx_id: H256::zero(),
            index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.tx_id.is_zero() && self.index == u32::MAX
    }

    pub fn tx_id(&self) -> &H256 {
        &self.tx_id
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TxInput {
    outpoint: OutPoint,
    script_sig: Vec<u8>,
}

impl TxInput {
    pub fn new(outpoint: OutPoint, script_sig: Vec<u8>) -> Self {
        Self {
            outpoint,
            script_sig,
        }
    }

    pub fn outpoint(&self) -> &OutPoint {
        &self.outpoint
    }

    pub fn script_sig(&self) -> &[u8] {
        &self.script_sig
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TxOutput {
    #[codec(compact)]
    value: u64,
    script_pubkey: Vec<u8>,
}

impl TxOutput {
    pub fn new(value: u64, script_pubkey: Vec<u8>) -> Self {
        Self {
            value,
            script_pubkey,
        }
    }

    /// Zero value, empty script; marks the first output of a coinstake.
    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn script_pubkey(&self) -> &[u8] {
        &self.script_pubkey
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Transaction {
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl Transaction {
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Self { inputs, outputs }
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    pub fn is_coin_base(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].outpoint.is_null()
    }

    /// Spends a real output and starts with an empty marker output followed by the stake.
    pub fn is_coin_stake(&self) -> bool {
        match (self.inputs.first(), self.outputs.first()) {
            (Some(first_input), Some(first_output)) => {
                !first_input.outpoint.is_null() && self.outputs.len() >= 2 && first_output.is_empty()
            }
            _ => false,
        }
    }
}
