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
//! The small slice of script handling needed to read the height a block commits to in
//! its coinbase input.

use crate::primitives::BlockHeight;

pub const OP_0: u8 = 0x00;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
/// Largest length that fits a direct push opcode.
const MAX_DIRECT_PUSH_LEN: usize = 75;

/// Minimal little-endian script-number encoding of a non-negative value.
fn script_num_bytes(mut value: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(9);
    while value > 0 {
        bytes.push((value & 0xff) as u8);
        value >>= 8;
    }
    // Keep the number positive: a set top bit would read back as a sign.
    if bytes.last().is_some_and(|b| b & 0x80 != 0) {
        bytes.push(0x00);
    }
    bytes
}

/// The push a coinbase script must start with to commit to `height`.
///
/// Heights 0 and 1..=16 use the dedicated opcodes, anything else a direct push of the
/// minimal script number.
pub fn height_push_script(height: BlockHeight) -> Vec<u8> {
    let height = height.into_int();
    match height {
        0 => vec![OP_0],
        1..=16 => vec![OP_1 + (height as u8 - 1)],
        _ => {
            let data = script_num_bytes(height);
            debug_assert!(data.len() <= MAX_DIRECT_PUSH_LEN);
            let mut script = Vec::with_capacity(data.len() + 1);
            script.push(data.len() as u8);
            script.extend_from_slice(&data);
            script
        }
    }
}

/// True if `script_sig` begins with the commitment to `height`.
pub fn commits_to_height(script_sig: &[u8], height: BlockHeight) -> bool {
    script_sig.starts_with(&height_push_script(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, vec![OP_0])]
    #[case(1, vec![OP_1])]
    #[case(16, vec![OP_16])]
    #[case(17, vec![0x01, 0x11])]
    #[case(127, vec![0x01, 0x7f])]
    #[case(128, vec![0x02, 0x80, 0x00])]
    #[case(130, vec![0x02, 0x82, 0x00])]
    #[case(255, vec![0x02, 0xff, 0x00])]
    #[case(256, vec![0x02, 0x00, 0x01])]
    #[case(500_000, vec![0x03, 0x20, 0xa1, 0x07])]
    #[case(8_388_608, vec![0x04, 0x00, 0x00, 0x80, 0x00])]
    fn height_pushes(#[case] height: u64, #[case] expected: Vec<u8>) {
        assert_eq!(height_push_script(BlockHeight::new(height)), expected);
    }

    #[test]
    fn prefix_check() {
        let height = BlockHeight::new(500_000);
        let mut script_sig = height_push_script(height);
        assert!(commits_to_height(&script_sig, height));

        // extra nonce data after the commitment is allowed
        script_sig.extend_from_slice(&[0x04, 0xde, 0xad, 0xbe, 0xef]);
        assert!(commits_to_height(&script_sig, height));

        assert!(!commits_to_height(&script_sig, BlockHeight::new(500_001)));
        assert!(!commits_to_height(&[], height));
        assert!(!commits_to_height(&script_sig[..2], height));
    }

    #[test]
    fn small_heights_do_not_match_pushed_form() {
        // 5 must be OP_5, a direct push of 0x05 is a different script
        assert!(!commits_to_height(&[0x01, 0x05], BlockHeight::new(5)));
        assert!(commits_to_height(&[0x55], BlockHeight::new(5)));
    }
}
