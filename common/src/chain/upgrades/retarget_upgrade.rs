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
use crate::{chain::config::ConfigError, primitives::BlockHeight};

/// Difficulty calculation generations, in the order they were deployed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
pub enum RetargetAlgorithm {
    /// No history to retarget from yet; every block gets the algorithm's limit.
    InitialLimit,
    /// Three-block window compensating for the interleaved opposite-algorithm block.
    Ratchet,
    /// Wide window of up to 2016 same-algorithm intervals.
    Classic,
}

/// Ordered table of `(activation height, algorithm)`; the entry with the highest
/// activation height not above a given height is in force at that height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetargetUpgrades(Vec<(BlockHeight, RetargetAlgorithm)>);

impl RetargetUpgrades {
    /// Sorts the entries by height. A table not starting at genesis gets an
    /// `InitialLimit` entry at height zero.
    pub fn initialize(
        mut upgrades: Vec<(BlockHeight, RetargetAlgorithm)>,
    ) -> Result<Self, ConfigError> {
        upgrades.sort_unstable();

        for pair in upgrades.windows(2) {
            let ((h0, a0), (h1, a1)) = (pair[0], pair[1]);
            utils::ensure!(h0 != h1, ConfigError::DuplicateUpgradeHeight(h0));
            utils::ensure!(
                a0 < a1,
                ConfigError::UpgradesOutOfOrder {
                    earlier: a0,
                    later: a1
                }
            );
        }

        match upgrades.first_mut() {
            Some((height, RetargetAlgorithm::InitialLimit)) => *height = BlockHeight::zero(),
            Some((height, _)) if *height == BlockHeight::zero() => {}
            _ => upgrades.insert(0, (BlockHeight::zero(), RetargetAlgorithm::InitialLimit)),
        }

        Ok(Self(upgrades))
    }

    pub fn algorithm_at(&self, height: BlockHeight) -> RetargetAlgorithm {
        self.0
            .iter()
            .rfind(|(activation, _)| *activation <= height)
            .map_or(RetargetAlgorithm::InitialLimit, |(_, algorithm)| *algorithm)
    }

    pub fn activation_height(&self, algorithm: RetargetAlgorithm) -> Option<BlockHeight> {
        self.0.iter().find(|(_, a)| *a == algorithm).map(|(height, _)| *height)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(BlockHeight, RetargetAlgorithm)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(height: u64) -> BlockHeight {
        BlockHeight::new(height)
    }

    #[test]
    fn lookup_by_height() {
        let upgrades = RetargetUpgrades::initialize(vec![
            (h(5_000), RetargetAlgorithm::Classic),
            (h(134), RetargetAlgorithm::Ratchet),
        ])
        .unwrap();

        assert_eq!(upgrades.iter().count(), 3);
        assert_eq!(upgrades.algorithm_at(h(0)), RetargetAlgorithm::InitialLimit);
        assert_eq!(upgrades.algorithm_at(h(133)), RetargetAlgorithm::InitialLimit);
        assert_eq!(upgrades.algorithm_at(h(134)), RetargetAlgorithm::Ratchet);
        assert_eq!(upgrades.algorithm_at(h(4_999)), RetargetAlgorithm::Ratchet);
        assert_eq!(upgrades.algorithm_at(h(5_000)), RetargetAlgorithm::Classic);
        assert_eq!(upgrades.algorithm_at(BlockHeight::max()), RetargetAlgorithm::Classic);

        assert_eq!(
            upgrades.activation_height(RetargetAlgorithm::Ratchet),
            Some(h(134))
        );
        assert_eq!(
            upgrades.activation_height(RetargetAlgorithm::InitialLimit),
            Some(h(0))
        );
    }

    #[test]
    fn ratchet_from_genesis() {
        let upgrades =
            RetargetUpgrades::initialize(vec![(h(0), RetargetAlgorithm::Ratchet)]).unwrap();
        assert_eq!(upgrades.algorithm_at(h(0)), RetargetAlgorithm::Ratchet);
        assert_eq!(upgrades.activation_height(RetargetAlgorithm::Classic), None);
        assert_eq!(upgrades.activation_height(RetargetAlgorithm::InitialLimit), None);
    }

    #[test]
    fn empty_table() {
        let upgrades = RetargetUpgrades::initialize(vec![]).unwrap();
        assert_eq!(upgrades.algorithm_at(h(1_000_000)), RetargetAlgorithm::InitialLimit);
    }

    #[test]
    fn invalid_tables() {
        assert_eq!(
            RetargetUpgrades::initialize(vec![
                (h(10), RetargetAlgorithm::Ratchet),
                (h(10), RetargetAlgorithm::Classic),
            ]),
            Err(ConfigError::DuplicateUpgradeHeight(h(10)))
        );
        assert_eq!(
            RetargetUpgrades::initialize(vec![
                (h(10), RetargetAlgorithm::Classic),
                (h(20), RetargetAlgorithm::Ratchet),
            ]),
            Err(ConfigError::UpgradesOutOfOrder {
                earlier: RetargetAlgorithm::Classic,
                later: RetargetAlgorithm::Ratchet
            })
        );
    }
}
