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

//! Difficulty control and the PoS/PoW alternation rule.

mod alternation;
mod chain_walker;
mod error;
mod policy;
mod pow;
mod retarget;

#[cfg(test)]
mod tests;

pub use crate::{
    alternation::{check_alternation, check_coinbase_height, BlockValidationContext},
    chain_walker::find_last_of_algorithm,
    error::{ConsensusRetargetError, ConsensusVerificationError},
    policy::{
        check_header_difficulty, get_required_target, is_algorithm_allowed,
        minimum_stake_confirmations, use_classic_algorithm,
    },
    pow::check_proof_of_work,
    retarget::{
        calculate_classic_target, calculate_ratchet_target, calculate_retarget,
        classic_window_size,
    },
};
