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

use std::{num::NonZeroU64, time::Duration};

use utils::ensure;

use crate::{
    chain::{
        config::{ChainType, ConfigError, ConsensusParameters, DEFAULT_CLASSIC_MAX_WINDOW},
        upgrades::{RetargetAlgorithm, RetargetUpgrades},
    },
    primitives::{BlockHeight, Target},
};

/// A ratchet retarget at height `h` reads the blocks at `h - 4 .. h - 1`, which must all
/// follow the alternation.
pub const RATCHET_ACTIVATION_MARGIN: u64 = 4;

const DEFAULT_TARGET_SPACING: Duration = Duration::from_secs(256);
const DEFAULT_RETARGET_WINDOW_MINUTES: u64 = 16;
const DEFAULT_LIMIT_LEADING_ZERO_BITS: u32 = 20;

impl ChainType {
    fn default_alternation_activation_height(&self) -> BlockHeight {
        match self {
            ChainType::Mainnet => BlockHeight::new(130),
            ChainType::Testnet => BlockHeight::new(200),
            ChainType::Regtest => BlockHeight::new(2),
        }
    }

    fn default_retarget_upgrades(&self) -> Vec<(BlockHeight, RetargetAlgorithm)> {
        let (ratchet, classic) = match self {
            ChainType::Mainnet => (134, 250_000),
            ChainType::Testnet => (204, 5_000),
            ChainType::Regtest => (6, 1_000),
        };
        vec![
            (BlockHeight::zero(), RetargetAlgorithm::InitialLimit),
            (BlockHeight::new(ratchet), RetargetAlgorithm::Ratchet),
            (BlockHeight::new(classic), RetargetAlgorithm::Classic),
        ]
    }

    fn default_classic_window_offset(&self) -> u64 {
        match self {
            ChainType::Mainnet => 66,
            ChainType::Testnet => 101,
            ChainType::Regtest => 2,
        }
    }

    fn default_limit(&self) -> Target {
        match self {
            ChainType::Mainnet | ChainType::Testnet => {
                Target::from_leading_zero_bits(DEFAULT_LIMIT_LEADING_ZERO_BITS)
            }
            ChainType::Regtest => Target::from_leading_zero_bits(1),
        }
    }

    fn default_max_reorg_length(&self) -> u64 {
        match self {
            ChainType::Mainnet | ChainType::Testnet => 125,
            ChainType::Regtest => 10,
        }
    }
}

/// Builder for [ConsensusParameters]
#[derive(Clone, Debug)]
pub struct Builder {
    chain_type: ChainType,
    pow_limit: Target,
    pos_limit: Target,
    target_spacing: Duration,
    retarget_window_minutes: u64,
    alternation_activation_height: BlockHeight,
    retarget_upgrades: Vec<(BlockHeight, RetargetAlgorithm)>,
    classic_window_offset: u64,
    classic_max_window: u64,
    pow_no_retargeting: bool,
    pos_no_retargeting: bool,
    max_reorg_length: u64,
}

impl Builder {
    /// A new builder initialized with the built-in parameters of the given network
    pub fn new(chain_type: ChainType) -> Self {
        Self {
            chain_type,
            pow_limit: chain_type.default_limit(),
            pos_limit: chain_type.default_limit(),
            target_spacing: DEFAULT_TARGET_SPACING,
            retarget_window_minutes: DEFAULT_RETARGET_WINDOW_MINUTES,
            alternation_activation_height: chain_type.default_alternation_activation_height(),
            retarget_upgrades: chain_type.default_retarget_upgrades(),
            classic_window_offset: chain_type.default_classic_window_offset(),
            classic_max_window: DEFAULT_CLASSIC_MAX_WINDOW,
            pow_no_retargeting: chain_type == ChainType::Regtest,
            pos_no_retargeting: false,
            max_reorg_length: chain_type.default_max_reorg_length(),
        }
    }

    /// New builder initialized with regtest parameters, retargeting enabled for both algorithms
    pub fn test_chain() -> Self {
        Self::new(ChainType::Regtest).pow_no_retargeting(false)
    }

    /// Move the activation of one retarget algorithm, adding it to the table if absent.
    pub fn activate_retarget(mut self, algorithm: RetargetAlgorithm, height: BlockHeight) -> Self {
        self.retarget_upgrades.retain(|(_, existing)| *existing != algorithm);
        self.retarget_upgrades.push((height, algorithm));
        self
    }

    /// Remove one retarget algorithm from the table.
    pub fn deactivate_retarget(mut self, algorithm: RetargetAlgorithm) -> Self {
        self.retarget_upgrades.retain(|(_, existing)| *existing != algorithm);
        self
    }

    pub fn build(self) -> Result<ConsensusParameters, ConfigError> {
        let Self {
            chain_type,
            pow_limit,
            pos_limit,
            target_spacing,
            retarget_window_minutes,
            alternation_activation_height,
            retarget_upgrades,
            classic_window_offset,
            classic_max_window,
            pow_no_retargeting,
            pos_no_retargeting,
            max_reorg_length,
        } = self;

        let target_spacing =
            NonZeroU64::new(target_spacing.as_secs()).ok_or(ConfigError::ZeroTargetSpacing)?;
        let window_secs = retarget_window_minutes.saturating_mul(60);
        let retarget_window_minutes = NonZeroU64::new(retarget_window_minutes)
            .filter(|_| window_secs >= target_spacing.get())
            .ok_or(ConfigError::WindowShorterThanSpacing {
                window_secs,
                spacing_secs: target_spacing.get(),
            })?;

        ensure!(!pow_limit.is_zero(), ConfigError::ZeroLimit("PoW"));
        ensure!(!pos_limit.is_zero(), ConfigError::ZeroLimit("PoS"));

        let retarget_upgrades = RetargetUpgrades::initialize(retarget_upgrades)?;

        if let Some(ratchet) = retarget_upgrades.activation_height(RetargetAlgorithm::Ratchet) {
            let earliest = alternation_activation_height
                .checked_add(RATCHET_ACTIVATION_MARGIN)
                .unwrap_or(BlockHeight::max());
            ensure!(
                ratchet >= earliest,
                ConfigError::RatchetTooCloseToAlternation {
                    ratchet,
                    alternation: alternation_activation_height,
                }
            );
        }

        ensure!(
            classic_window_offset >= 1
                && classic_window_offset.saturating_mul(2)
                    >= alternation_activation_height.into_int(),
            ConfigError::ClassicWindowOffsetTooSmall {
                offset: classic_window_offset,
                alternation: alternation_activation_height,
            }
        );
        let classic_max_window =
            NonZeroU64::new(classic_max_window).ok_or(ConfigError::ZeroClassicMaxWindow)?;

        Ok(ConsensusParameters {
            chain_type,
            pow_limit,
            pos_limit,
            target_spacing,
            retarget_window_minutes,
            alternation_activation_height,
            retarget_upgrades,
            classic_window_offset,
            classic_max_window,
            pow_no_retargeting,
            pos_no_retargeting,
            max_reorg_length,
        })
    }
}

macro_rules! builder_method {
    ($name:ident: $type:ty) => {
        #[doc = concat!("Set the `", stringify!($name), "` field.")]
        #[must_use = "chain::config::Builder dropped prematurely"]
        pub fn $name(mut self, $name: $type) -> Self {
            self.$name = $name;
            self
        }
    };
}

impl Builder {
    builder_method!(chain_type: ChainType);
    builder_method!(pow_limit: Target);
    builder_method!(pos_limit: Target);
    builder_method!(target_spacing: Duration);
    builder_method!(retarget_window_minutes: u64);
    builder_method!(alternation_activation_height: BlockHeight);
    builder_method!(retarget_upgrades: Vec<(BlockHeight, RetargetAlgorithm)>);
    builder_method!(classic_window_offset: u64);
    builder_method!(classic_max_window: u64);
    builder_method!(pow_no_retargeting: bool);
    builder_method!(pos_no_retargeting: bool);
    builder_method!(max_reorg_length: u64);
}
