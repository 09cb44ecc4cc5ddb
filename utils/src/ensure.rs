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

//! Early exit from a function unless a condition holds.

/// Return early if the condition is not satisfied.
///
/// * `ensure!(cond)` returns [`None`] from the enclosing function if `cond` is false
/// * `ensure!(cond, err)` returns [`Err`]`(err)` from the enclosing function if `cond` is false
///
/// The error expression is only evaluated when the condition fails.
///
/// ```
/// # use utils::ensure;
/// # #[derive(PartialEq, Eq, Debug)]
/// enum SpacingError {
///     Zero,
///     LongerThanWindow,
/// }
///
/// fn blocks_per_window(window_secs: u64, spacing_secs: u64) -> Result<u64, SpacingError> {
///     ensure!(spacing_secs != 0, SpacingError::Zero);
///     ensure!(spacing_secs <= window_secs, SpacingError::LongerThanWindow);
///     Ok(window_secs / spacing_secs)
/// }
///
/// assert_eq!(blocks_per_window(600, 60), Ok(10));
/// assert_eq!(blocks_per_window(600, 0), Err(SpacingError::Zero));
/// assert_eq!(blocks_per_window(60, 600), Err(SpacingError::LongerThanWindow));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $cond.then_some(())?
    };
    ($cond:expr, $err:expr $(,)?) => {
        $cond.then_some(()).ok_or_else(|| $err)?
    };
}
