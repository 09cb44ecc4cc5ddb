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
fixed_hash::construct_fixed_hash! {
    /// Block hash. The bytes are stored in the order the hash function produced them.
    pub struct H256(32);
}

impl parity_scale_codec::Encode for H256 {
    fn size_hint(&self) -> usize {
        H256::len_bytes()
    }

    fn using_encoded<R, F: FnOnce(&[u8]) -> R>(&self, f: F) -> R {
        f(self.as_bytes())
    }
}

impl parity_scale_codec::EncodeLike for H256 {}

impl parity_scale_codec::Decode for H256 {
    fn decode<I: parity_scale_codec::Input>(
        input: &mut I,
    ) -> Result<Self, parity_scale_codec::Error> {
        let bytes = <[u8; 32]>::decode(input)?;
        Ok(H256(bytes))
    }
}
