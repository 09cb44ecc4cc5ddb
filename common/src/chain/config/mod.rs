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
mod builder;

use std::{num::NonZeroU64, time::Duration};

use thiserror::Error;

use crate::{
    chain::upgrades::{RetargetAlgorithm, RetargetUpgrades},
    primitives::{BlockHeight, Target},
};

pub use builder::Builder;

/// Upper bound of the classic retarget window, in same-algorithm intervals.
pub const DEFAULT_CLASSIC_MAX_WINDOW: u64 = 2016;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Target spacing must be at least one second")]
    ZeroTargetSpacing,
    #[error("Retarget window of {window_secs}s is shorter than the target spacing of {spacing_secs}s")]
    WindowShorterThanSpacing { window_secs: u64, spacing_secs: u64 },
    #[error("The {0} limit must not be zero")]
    ZeroLimit(&'static str),
    #[error("Two retarget upgrades activate at height {0}")]
    DuplicateUpgradeHeight(BlockHeight),
    #[error("Retarget upgrade {later:?} activates before {earlier:?}")]
    UpgradesOutOfOrder {
        earlier: RetargetAlgorithm,
        later: RetargetAlgorithm,
    },
    #[error("Ratchet activation {ratchet} leaves no alternating history after alternation activation {alternation}")]
    RatchetTooCloseToAlternation {
        ratchet: BlockHeight,
        alternation: BlockHeight,
    },
    #[error("Classic window offset {offset} does not cover alternation activation {alternation}")]
    ClassicWindowOffsetTooSmall { offset: u64, alternation: BlockHeight },
    #[error("Classic maximum window must not be zero")]
    ZeroClassicMaxWindow,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
pub enum ChainType {
    Mainnet,
    Testnet,
    Regtest,
}

impl ChainType {
    pub const fn name(&self) -> &'static str {
        match self {
            ChainType::Mainnet => "mainnet",
            ChainType::Testnet => "testnet",
            ChainType::Regtest => "regtest",
        }
    }
}

impl std::str::FromStr for ChainType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <ChainType as strum::IntoEnumIterator>::iter()
            .find(|chain_type| chain_type.name() == s)
            .ok_or_else(|| format!("Unknown chain type: {s}"))
    }
}

/// Difficulty and alternation parameters of one network. Fixed for the lifetime of the
/// process; pass it explicitly to every calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusParameters {
    chain_type: ChainType,
    pow_limit: Target,
    pos_limit: Target,
    /// Seconds between two blocks of the same algorithm.
    target_spacing: NonZeroU64,
    retarget_window_minutes: NonZeroU64,
    /// From this height on, even heights are PoS and odd heights are PoW.
    alternation_activation_height: BlockHeight,
    retarget_upgrades: RetargetUpgrades,
    /// `K` in `min(height / 2 - K, max_window)`; accounts for the blocks mined before
    /// the alternation started.
    classic_window_offset: u64,
    classic_max_window: NonZeroU64,
    pow_no_retargeting: bool,
    pos_no_retargeting: bool,
    max_reorg_length: u64,
}

impl ConsensusParameters {
    pub fn chain_type(&self) -> ChainType {
        self.chain_type
    }

    pub fn pow_limit(&self) -> &Target {
        &self.pow_limit
    }

    pub fn pos_limit(&self) -> &Target {
        &self.pos_limit
    }

    pub fn limit(&self, is_proof_of_stake: bool) -> &Target {
        if is_proof_of_stake {
            &self.pos_limit
        } else {
            &self.pow_limit
        }
    }

    pub fn target_spacing(&self) -> Duration {
        Duration::from_secs(self.target_spacing.get())
    }

    pub fn target_spacing_secs(&self) -> NonZeroU64 {
        self.target_spacing
    }

    pub fn retarget_window_minutes(&self) -> NonZeroU64 {
        self.retarget_window_minutes
    }

    pub fn retarget_window_secs(&self) -> u64 {
        self.retarget_window_minutes.get() * 60
    }

    pub fn alternation_activation_height(&self) -> BlockHeight {
        self.alternation_activation_height
    }

    pub fn retarget_upgrades(&self) -> &RetargetUpgrades {
        &self.retarget_upgrades
    }

    pub fn ratchet_activation_height(&self) -> Option<BlockHeight> {
        self.retarget_upgrades.activation_height(RetargetAlgorithm::Ratchet)
    }

    pub fn classic_activation_height(&self) -> Option<BlockHeight> {
        self.retarget_upgrades.activation_height(RetargetAlgorithm::Classic)
    }

    pub fn classic_window_offset(&self) -> u64 {
        self.classic_window_offset
    }

    pub fn classic_max_window(&self) -> NonZeroU64 {
        self.classic_max_window
    }

    /// Test networks may freeze difficulty per algorithm.
    pub fn no_retargeting(&self, is_proof_of_stake: bool) -> bool {
        if is_proof_of_stake {
            self.pos_no_retargeting
        } else {
            self.pow_no_retargeting
        }
    }

    pub fn max_reorg_length(&self) -> u64 {
        self.max_reorg_length
    }
}

pub fn create_mainnet() -> ConsensusParameters {
    Builder::new(ChainType::Mainnet).build().expect("mainnet parameters are valid")
}

pub fn create_testnet() -> ConsensusParameters {
    Builder::new(ChainType::Testnet).build().expect("testnet parameters are valid")
}

pub fn create_regtest() -> ConsensusParameters {
    Builder::new(ChainType::Regtest).build().expect("regtest parameters are valid")
}

pub fn create_config(chain_type: ChainType) -> ConsensusParameters {
    match chain_type {
        ChainType::Mainnet => create_mainnet(),
        ChainType::Testnet => create_testnet(),
        ChainType::Regtest => create_regtest(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Compact;
    use strum::IntoEnumIterator;

    #[test]
    fn all_networks_build() {
        for chain_type in ChainType::iter() {
            let params = create_config(chain_type);
            assert_eq!(params.chain_type(), chain_type);
            assert_eq!(chain_type.name().parse::<ChainType>(), Ok(chain_type));

            let interval = params.retarget_window_secs() / params.target_spacing_secs().get();
            assert!(interval >= 1);

            let alternation = params.alternation_activation_height();
            let ratchet = params.ratchet_activation_height().unwrap();
            let classic = params.classic_activation_height().unwrap();
            assert!(ratchet.into_int() >= alternation.into_int() + builder::RATCHET_ACTIVATION_MARGIN);
            assert!(classic > ratchet);
            assert!(params.classic_window_offset() * 2 >= alternation.into_int());
            assert_eq!(params.classic_max_window().get(), DEFAULT_CLASSIC_MAX_WINDOW);
        }
        assert!("signet".parse::<ChainType>().is_err());
    }

    #[test]
    fn mainnet_values() {
        let params = create_mainnet();
        assert_eq!(params.target_spacing(), Duration::from_secs(256));
        assert_eq!(params.retarget_window_secs(), 16 * 60);
        assert_eq!(params.alternation_activation_height(), BlockHeight::new(130));
        assert_eq!(params.pow_limit().to_compact(), Compact(0x1e0fffff));
        assert!(!params.no_retargeting(true));
        assert!(!params.no_retargeting(false));
        assert_eq!(params.limit(false), params.pow_limit());
        assert_eq!(params.limit(true), params.pos_limit());
    }

    #[test]
    fn networks_differ() {
        let mainnet = create_mainnet();
        let testnet = create_testnet();
        assert_ne!(
            mainnet.alternation_activation_height(),
            testnet.alternation_activation_height()
        );
        assert_ne!(
            mainnet.classic_activation_height(),
            testnet.classic_activation_height()
        );
    }

    #[test]
    fn regtest_freezes_pow() {
        let params = create_regtest();
        assert!(params.no_retargeting(false));
        assert!(!params.no_retargeting(true));
    }
}
