// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

/// Encodes an unsigned 16-bit number as two big-endian bytes.
///
/// Note that unlike option-value integers in general, the Content-Format
/// option emitted by this library is always two bytes wide.
pub fn encode_u16(value: u16) -> [u8; 2] {
    [(value >> 8) as u8, value as u8]
}

/// Attempts to decode the given big-endian-encoded integer to a `u16`.
/// Input may be up to two bytes long. If the input is larger than two
/// bytes long, returns `None`.
pub fn try_decode_u16(src: &[u8]) -> Option<u16> {
    match src.len() {
        0 => Some(0u16),
        1 => Some(src[0] as u16),
        2 => Some(((src[0] as u16) << 8) + src[1] as u16),
        _ => None,
    }
}
