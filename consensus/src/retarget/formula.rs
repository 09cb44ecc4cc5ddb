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

use std::num::NonZeroU64;

use common::{chain::ConsensusParameters, primitives::Target};

/// Observed spacings above this multiple of the target spacing are capped.
const MAX_SPACING_FACTOR: u64 = 10;

/// Weighted moving-average retarget from one observed spacing.
///
/// `first_time` belongs to the newer block whose difficulty is `first_target`. The observed
/// spacing gets twice the weight of each nominal spacing in the retarget window:
///
/// `new = first_target * ((interval - 1) * spacing + 2 * actual) / ((interval + 1) * spacing)`
///
/// A result that is zero or not below `limit` is replaced by `limit`.
pub fn calculate_retarget(
    params: &ConsensusParameters,
    first_time: i64,
    first_target: &Target,
    second_time: i64,
    limit: &Target,
) -> Target {
    let spacing = params.target_spacing_secs();

    // Equal or reversed timestamps count as an on-schedule block
    let actual_spacing = if first_time > second_time {
        (first_time - second_time).unsigned_abs()
    } else {
        spacing.get()
    };
    let actual_spacing =
        std::cmp::min(actual_spacing, spacing.get().saturating_mul(MAX_SPACING_FACTOR));

    let interval = params.retarget_window_secs() / spacing;

    let numerator = interval
        .saturating_sub(1)
        .saturating_mul(spacing.get())
        .saturating_add(actual_spacing.saturating_mul(2));
    let denominator = spacing.saturating_mul(NonZeroU64::MIN.saturating_add(interval));

    first_target.scale_within_limit(numerator, denominator, limit)
}
