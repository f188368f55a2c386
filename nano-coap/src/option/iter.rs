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

use super::*;
use crate::message::codec::decode_option;

/// A convenience iterator for parsing options from a byte buffer.
///
/// Iteration stops at the payload marker; [`OptionIterator::as_slice`] then
/// holds whatever follows it.
#[derive(Debug, Clone)]
pub struct OptionIterator<'a> {
    iter: core::slice::Iter<'a, u8>,
    last_option: OptionNumber,
}

impl<'a> Default for OptionIterator<'a> {
    fn default() -> Self {
        OptionIterator::new(&[])
    }
}

impl<'a> OptionIterator<'a> {
    /// Creates a new instance of an `OptionIterator` with the given byte slice.
    pub fn new(buffer: &'a [u8]) -> OptionIterator<'a> {
        OptionIterator {
            iter: buffer.iter(),
            last_option: Default::default(),
        }
    }

    /// Returns the unread remaining bytes as a byte slice.
    pub fn as_slice(&self) -> &'a [u8] {
        self.iter.as_slice()
    }
}

impl<'a> Iterator for OptionIterator<'a> {
    type Item = Result<(OptionNumber, &'a [u8]), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let ret = decode_option(&mut self.iter, self.last_option).transpose();
        if let Some(Ok((key, _))) = ret {
            self.last_option = key;
        }
        ret
    }
}

impl AsRef<[u8]> for OptionIterator<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterate_options() {
        // Uri-Path "sensor", Uri-Path "temp", payload marker, payload.
        let buffer = &[
            0xB6, b's', b'e', b'n', b's', b'o', b'r', 0x04, b't', b'e', b'm', b'p', 0xFF, b'o',
            b'k',
        ];

        let mut iter = OptionIterator::new(buffer);
        assert_eq!(
            iter.next(),
            Some(Ok((OptionNumber::URI_PATH, &b"sensor"[..])))
        );
        assert_eq!(iter.next(), Some(Ok((OptionNumber::URI_PATH, &b"temp"[..]))));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.as_slice(), b"ok");
    }

    #[test]
    fn empty_buffer() {
        let mut iter = OptionIterator::default();
        assert_eq!(iter.next(), None);
        assert!(iter.as_slice().is_empty());
    }

    #[test]
    fn reserved_nibble_is_an_error() {
        let mut iter = OptionIterator::new(&[0xF0]);
        assert_eq!(iter.next(), Some(Err(Error::ParseFailure)));

        let mut iter = OptionIterator::new(&[0x0F]);
        assert_eq!(iter.next(), Some(Err(Error::ParseFailure)));
    }
}
