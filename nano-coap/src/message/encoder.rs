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

use super::codec::encode_option;
use super::*;
use crate::option::CoapOption;

// Worst case for one option header: one header byte plus two extension
// bytes each for delta and length.
const OPTION_HEADER_RESERVE: usize = 5;

impl Packet {
    /// Serializes this packet into a fresh byte buffer.
    ///
    /// Options are stably sorted by option number before emission, since the
    /// running-delta encoding requires non-decreasing numbers. Options with
    /// empty values are skipped. If the serialized form would reach
    /// [`BUF_MAX_SIZE`], encoding aborts with [`Error::OutOfSpace`] and
    /// nothing is sent.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buffer = vec![0u8; BUF_MAX_SIZE];

        let token_length = self.token.len();
        buffer[0] = (COAP_VERSION << 6)
            | ((self.msg_type as u8 & 0x03) << 4)
            | (token_length as u8 & 0x0F);
        buffer[1] = self.code.0;
        buffer[2] = (self.message_id >> 8) as u8;
        buffer[3] = self.message_id as u8;

        let mut len = COAP_HEADER_SIZE;
        buffer[len..len + token_length].copy_from_slice(self.token.as_bytes());
        len += token_length;

        let mut sorted: Vec<&CoapOption> = self
            .options
            .iter()
            .filter(|opt| !opt.value.is_empty())
            .collect();
        sorted.sort_by_key(|opt| opt.number);

        let mut running_delta = Default::default();
        for opt in sorted {
            if len + OPTION_HEADER_RESERVE + opt.value.len() >= BUF_MAX_SIZE {
                log::warn!("options for message {} overflow the buffer", self.message_id);
                return Err(Error::OutOfSpace);
            }
            len += encode_option(&mut buffer[len..], running_delta, opt.number, &opt.value)?;
            running_delta = opt.number;
        }

        if !self.payload.is_empty() {
            if len + 1 + self.payload.len() >= BUF_MAX_SIZE {
                log::warn!("payload for message {} overflows the buffer", self.message_id);
                return Err(Error::OutOfSpace);
            }
            buffer[len] = PAYLOAD_MARKER;
            len += 1;
            buffer[len..len + self.payload.len()].copy_from_slice(&self.payload);
            len += self.payload.len();
        }

        buffer.truncate(len);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionNumber;

    #[test]
    fn get_request_rfc7252_layout() {
        let mut packet = Packet::with_code(MsgType::Con, MsgCode::GET);
        packet.message_id = 0x1234;
        packet.set_token(&[0x01]);
        packet.set_uri_path("sensor/temp");

        let bytes = packet.to_bytes().unwrap();
        let expected: &[u8] = &[
            0x41, 0x01, 0x12, 0x34, 0x01, 0xB6, b's', b'e', b'n', b's', b'o', b'r', 0x04, b't',
            b'e', b'm', b'p',
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn post_with_content_format_and_payload() {
        let mut packet = Packet::with_code(MsgType::Con, MsgCode::POST);
        packet.message_id = 0x0001;
        packet.set_uri_path("a");
        packet.add_option(
            OptionNumber::CONTENT_FORMAT,
            &crate::encode_u16(ContentFormat::APPLICATION_JSON.0),
        );
        packet.payload = br#"{"v":1}"#.to_vec();

        let bytes = packet.to_bytes().unwrap();
        let expected: &[u8] = &[
            0x40, 0x02, 0x00, 0x01, 0xB1, b'a', 0x12, 0x00, 0x32, 0xFF, b'{', b'"', b'v', b'"',
            b':', b'1', b'}',
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn empty_ack_is_header_only() {
        let mut packet = Packet::with_code(MsgType::Ack, MsgCode::EMPTY);
        packet.message_id = 0xCCCC;

        assert_eq!(packet.to_bytes().unwrap(), &[0x60, 0x00, 0xCC, 0xCC]);
    }

    #[test]
    fn out_of_order_options_are_sorted() {
        let mut packet = Packet::new();
        packet.message_id = 0x0001;
        packet.add_option(OptionNumber::URI_QUERY, b"k=v");
        packet.add_option(OptionNumber::URI_PATH, b"temp");

        let bytes = packet.to_bytes().unwrap();
        // Uri-Path (11) must come out before Uri-Query (15).
        assert_eq!(
            &bytes[4..],
            &[0xB4, b't', b'e', b'm', b'p', 0x43, b'k', b'=', b'v'][..]
        );
    }

    #[test]
    fn empty_valued_options_are_skipped() {
        let mut packet = Packet::new();
        packet.message_id = 0x0001;
        packet.add_option(OptionNumber::URI_PATH, b"");
        packet.add_option(OptionNumber::URI_QUERY, b"k");

        let bytes = packet.to_bytes().unwrap();
        // Only the query survives; its delta of 15 runs from zero, not from 11.
        assert_eq!(&bytes[4..], &[0xD1, 0x02, b'k'][..]);
    }

    #[test]
    fn oversized_payload_aborts() {
        let mut packet = Packet::new();
        packet.payload = vec![0u8; BUF_MAX_SIZE];
        assert_eq!(packet.to_bytes(), Err(Error::OutOfSpace));

        // Header (4) + marker (1) + payload must stay below the cap.
        packet.payload = vec![0u8; BUF_MAX_SIZE - 5];
        assert_eq!(packet.to_bytes(), Err(Error::OutOfSpace));

        packet.payload = vec![0u8; BUF_MAX_SIZE - 6];
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(bytes.len(), BUF_MAX_SIZE - 1);
    }

    #[test]
    fn oversized_option_aborts() {
        let mut packet = Packet::new();
        let value = vec![0u8; BUF_MAX_SIZE];
        packet.options.push(CoapOption::new(OptionNumber::URI_PATH, &value));
        assert_eq!(packet.to_bytes(), Err(Error::OutOfSpace));
    }

    #[test]
    fn serialized_size_stays_below_cap() {
        let mut packet = Packet::new();
        packet.set_token(&[0xAA; 8]);
        for _ in 0..5 {
            packet.add_option(OptionNumber::URI_PATH, &[b'p'; 100]);
        }
        packet.payload = vec![0x42; 400];

        let bytes = packet.to_bytes().unwrap();
        assert!(bytes.len() < BUF_MAX_SIZE);
    }
}
