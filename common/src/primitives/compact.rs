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

/// Lossy 32-bit encoding of a [crate::Target]: one exponent byte (size in bytes),
/// a sign bit and a 23-bit mantissa. Same layout as Bitcoin's `nBits`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct Compact(pub u32);

impl Compact {
    pub const SIGN_BIT: u32 = 0x0080_0000;
    pub const MANTISSA_MASK: u32 = 0x007f_ffff;

    pub const fn exponent(&self) -> u32 {
        self.0 >> 24
    }

    pub const fn mantissa(&self) -> u32 {
        self.0 & Self::MANTISSA_MASK
    }

    pub const fn is_sign_bit_set(&self) -> bool {
        self.0 & Self::SIGN_BIT != 0
    }
}

impl std::fmt::Debug for Compact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Compact({:#010x})", self.0)
    }
}

impl std::fmt::Display for Compact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
