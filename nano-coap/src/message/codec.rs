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

//! Low-level message codec functions.
//!
//! The option delta and the option length are both encoded with the same
//! three-region scheme: values below 13 fit in the nibble itself, values up
//! to 268 use nibble code 13 plus one extension byte holding `value - 13`,
//! and values up to 65804 use nibble code 14 plus two big-endian extension
//! bytes holding `value - 269`. Nibble 15 is reserved and rejected.

use super::option::*;
use super::*;

/// Calculates the encoded size of a CoAP option.
pub fn calc_option_size(prev_key: OptionNumber, key: OptionNumber, mut value_len: usize) -> usize {
    if value_len >= 269 {
        value_len += 2;
    } else if value_len >= 13 {
        value_len += 1;
    }

    let option_delta = (key - prev_key) as usize;

    if option_delta >= 269 {
        value_len += 3;
    } else if option_delta >= 13 {
        value_len += 2;
    } else {
        value_len += 1;
    }

    value_len
}

/// Decodes one option from a `core::slice::Iter`, which can be obtained from a byte slice.
/// The iterator is then advanced to the next option.
///
/// Will return `Ok(None)` if it either encounters the end-of-options marker (0xFF) or if the
/// given iterator has been fully consumed.
pub fn decode_option<'a>(
    iter: &mut core::slice::Iter<'a, u8>,
    last_option: OptionNumber,
) -> Result<Option<(OptionNumber, &'a [u8])>, Error> {
    macro_rules! try_next {
        ($iter:expr, $none:expr) => {
            match ($iter).next() {
                Some(x) => *x,
                None => return $none,
            }
        };
    }

    let header: u8 = try_next!(iter, Ok(None));

    if header == PAYLOAD_MARKER {
        // End of options marker.
        return Ok(None);
    }

    let key_delta: u32 = match header >> 4 {
        13 => 13u32 + try_next!(iter, Err(Error::ParseFailure)) as u32,
        14 => {
            let msb = try_next!(iter, Err(Error::ParseFailure)) as u32;
            269u32 + try_next!(iter, Err(Error::ParseFailure)) as u32 + (msb << 8)
        }
        15 => return Err(Error::ParseFailure),
        key => key as u32,
    };

    let len = match header & 0xF {
        13 => 13usize + try_next!(iter, Err(Error::ParseFailure)) as usize,
        14 => {
            let msb = try_next!(iter, Err(Error::ParseFailure)) as usize;
            269usize + try_next!(iter, Err(Error::ParseFailure)) as usize + (msb << 8)
        }
        15 => return Err(Error::ParseFailure),
        len => len as usize,
    };

    if last_option.0 as u32 + key_delta > core::u16::MAX as u32 {
        // Don't let the key wrap.
        return Err(Error::ParseFailure);
    }

    let key = OptionNumber(last_option.0 + key_delta as u16);

    if len == 0 {
        return Ok(Some((key, &[])));
    }

    if len > iter.as_slice().len() {
        // Value would run past the end of the buffer.
        return Err(Error::ParseFailure);
    }

    let value: &'a [u8] = &iter.as_slice()[..len];

    iter.nth(len - 1);

    Ok(Some((key, value)))
}

/// Encodes an option into the given buffer, including the value.
///
/// `prev_key` must not be larger than `key`: the running-delta encoding can
/// only express non-decreasing option numbers.
pub fn encode_option(
    buffer: &mut [u8],
    prev_key: OptionNumber,
    key: OptionNumber,
    value: &[u8],
) -> Result<usize, Error> {
    if prev_key > key {
        return Err(Error::InvalidArgument);
    }

    let value_len = value.len();

    if value_len > MAX_OPTION_VALUE_SIZE {
        log::warn!("value_len:{}, max:{}", value_len, MAX_OPTION_VALUE_SIZE);
        return Err(Error::InvalidArgument);
    }

    let calc_len = calc_option_size(prev_key, key, value_len);
    if calc_len > buffer.len() {
        log::warn!("calc_len:{}, blen:{}", calc_len, buffer.len());
        return Err(Error::OutOfSpace);
    }

    let mut value_offset = 1;
    let option_delta = (key - prev_key) as usize;

    if option_delta >= 269 {
        let ext = option_delta - 269;
        buffer[0] = 14 << 4;
        buffer[1] = (ext >> 8) as u8;
        buffer[2] = ext as u8;
        value_offset += 2;
    } else if option_delta >= 13 {
        buffer[0] = 13 << 4;
        buffer[1] = (option_delta - 13) as u8;
        value_offset += 1;
    } else {
        buffer[0] = (option_delta << 4) as u8;
    }

    if value_len >= 269 {
        let ext = value_len - 269;
        buffer[0] |= 14;
        buffer[value_offset] = (ext >> 8) as u8;
        buffer[value_offset + 1] = ext as u8;
        value_offset += 2;
    } else if value_len >= 13 {
        buffer[0] |= 13;
        buffer[value_offset] = (value_len - 13) as u8;
        value_offset += 1;
    } else {
        buffer[0] |= (value_len & 15) as u8;
    }

    buffer[value_offset..value_offset + value_len].copy_from_slice(value);

    Ok(value_offset + value_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_one(buffer: &[u8]) -> Result<Option<(OptionNumber, Vec<u8>)>, Error> {
        let mut iter = buffer.iter();
        decode_option(&mut iter, OptionNumber(0)).map(|x| x.map(|(k, v)| (k, v.to_vec())))
    }

    #[test]
    fn delta_nibble_regions() {
        let buffer = &mut [0u8; 8];

        assert_eq!(Ok(1), encode_option(buffer, OptionNumber(0), OptionNumber(0), &[]));
        assert_eq!(buffer[0], 0x00);

        assert_eq!(Ok(1), encode_option(buffer, OptionNumber(0), OptionNumber(12), &[]));
        assert_eq!(buffer[0], 0xC0);

        assert_eq!(Ok(2), encode_option(buffer, OptionNumber(0), OptionNumber(13), &[]));
        assert_eq!(&buffer[..2], &[0xD0, 0x00]);

        assert_eq!(Ok(2), encode_option(buffer, OptionNumber(0), OptionNumber(268), &[]));
        assert_eq!(&buffer[..2], &[0xD0, 0xFF]);

        assert_eq!(Ok(3), encode_option(buffer, OptionNumber(0), OptionNumber(269), &[]));
        assert_eq!(&buffer[..3], &[0xE0, 0x00, 0x00]);

        assert_eq!(
            Ok(3),
            encode_option(buffer, OptionNumber(0), OptionNumber(65535), &[])
        );
        assert_eq!(&buffer[..3], &[0xE0, 0xFE, 0xF2]);
    }

    #[test]
    fn delta_round_trips() {
        for delta in &[0u16, 1, 12, 13, 14, 268, 269, 270, 65535] {
            let buffer = &mut [0u8; 8];
            let len = encode_option(buffer, OptionNumber(0), OptionNumber(*delta), &[]).unwrap();
            assert_eq!(
                decode_one(&buffer[..len]),
                Ok(Some((OptionNumber(*delta), vec![]))),
                "delta {}",
                delta
            );
        }
    }

    #[test]
    fn length_nibble_regions() {
        let buffer = &mut vec![0u8; 70_000];

        let len = encode_option(buffer, OptionNumber(0), OptionNumber(1), &[0xAA; 12]).unwrap();
        assert_eq!(len, 13);
        assert_eq!(buffer[0], 0x1C);

        let len = encode_option(buffer, OptionNumber(0), OptionNumber(1), &[0xAA; 13]).unwrap();
        assert_eq!(len, 15);
        assert_eq!(&buffer[..2], &[0x1D, 0x00]);

        let len = encode_option(buffer, OptionNumber(0), OptionNumber(1), &[0xAA; 268]).unwrap();
        assert_eq!(len, 270);
        assert_eq!(&buffer[..2], &[0x1D, 0xFF]);

        let len = encode_option(buffer, OptionNumber(0), OptionNumber(1), &[0xAA; 269]).unwrap();
        assert_eq!(len, 272);
        assert_eq!(&buffer[..3], &[0x1E, 0x00, 0x00]);

        let len = encode_option(buffer, OptionNumber(0), OptionNumber(1), &[0xAA; 65804]).unwrap();
        assert_eq!(len, 65807);
        assert_eq!(&buffer[..3], &[0x1E, 0xFF, 0xFF]);
    }

    #[test]
    fn length_beyond_encodable_range_fails() {
        let buffer = &mut vec![0u8; 70_000];
        assert_eq!(
            encode_option(buffer, OptionNumber(0), OptionNumber(1), &[0xAA; 65805]),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn length_round_trips() {
        for len in &[0usize, 1, 12, 13, 268, 269, 1000] {
            let buffer = &mut vec![0u8; 2048];
            let value = vec![0x5A; *len];
            let encoded =
                encode_option(buffer, OptionNumber(0), OptionNumber(11), &value).unwrap();
            assert_eq!(
                decode_one(&buffer[..encoded]),
                Ok(Some((OptionNumber(11), value))),
                "len {}",
                len
            );
        }
    }

    #[test]
    fn decreasing_key_is_rejected() {
        let buffer = &mut [0u8; 8];
        assert_eq!(
            encode_option(buffer, OptionNumber(12), OptionNumber(11), &[]),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn out_of_space() {
        let buffer = &mut [0u8; 4];
        assert_eq!(
            encode_option(buffer, OptionNumber(0), OptionNumber(11), b"sensor"),
            Err(Error::OutOfSpace)
        );
    }

    #[test]
    fn reserved_nibbles_are_rejected() {
        assert_eq!(decode_one(&[0xF0, 0x00]), Err(Error::ParseFailure));
        assert_eq!(decode_one(&[0x0F, 0x00]), Err(Error::ParseFailure));
    }

    #[test]
    fn truncated_extensions_are_rejected() {
        // Nibble code 13 with no extension byte.
        assert_eq!(decode_one(&[0xD0]), Err(Error::ParseFailure));
        // Nibble code 14 with only one of two extension bytes.
        assert_eq!(decode_one(&[0xE0, 0x01]), Err(Error::ParseFailure));
        // Length extension missing.
        assert_eq!(decode_one(&[0x1D]), Err(Error::ParseFailure));
    }

    #[test]
    fn value_overrun_is_rejected() {
        // Claims four value bytes, provides two.
        assert_eq!(decode_one(&[0x14, 0xAB, 0xCD]), Err(Error::ParseFailure));
    }

    #[test]
    fn key_wrap_is_rejected() {
        // 65535 + 2 would wrap a u16.
        let buffer = &[0xE0, 0xFE, 0xF2, 0x20];
        let mut iter = buffer.iter();
        assert_eq!(
            decode_option(&mut iter, OptionNumber(0)),
            Ok(Some((OptionNumber(65535), &[][..])))
        );
        assert_eq!(
            decode_option(&mut iter, OptionNumber(65535)),
            Err(Error::ParseFailure)
        );
    }
}
