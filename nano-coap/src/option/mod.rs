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

//! Types related to interpreting and handling CoAP options.
//!

use super::*;

/// The largest option value length representable in the extended
/// length encoding (nibble code 14 plus two extension bytes).
pub const MAX_OPTION_VALUE_SIZE: usize = 65804;

mod num;
pub use num::*;

mod iter;
pub use iter::*;

/// A single CoAP option: an option number paired with an opaque value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CoapOption {
    /// The option number.
    pub number: OptionNumber,

    /// The raw option value.
    pub value: Vec<u8>,
}

impl CoapOption {
    /// Creates a new option from a number and a value byte slice.
    pub fn new(number: OptionNumber, value: &[u8]) -> CoapOption {
        CoapOption {
            number,
            value: value.to_vec(),
        }
    }
}
