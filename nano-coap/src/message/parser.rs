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
use crate::option::{CoapOption, OptionIterator};

impl Packet {
    /// Parses a stand-alone UDP CoAP message from the given buffer.
    ///
    /// Returns [`Error::ParseFailure`] for anything framing-invalid: a short
    /// or wrong-version header, a token length above eight, a reserved
    /// option nibble, a truncated option, or more than [`MAX_OPTION_COUNT`]
    /// options. A payload marker at the very end of the buffer yields an
    /// empty payload.
    pub fn from_bytes(buffer: &[u8]) -> Result<Packet, Error> {
        if buffer.len() < COAP_HEADER_SIZE {
            return Err(Error::ParseFailure);
        }

        let version = buffer[0] >> 6;
        if version != COAP_VERSION {
            return Err(Error::ParseFailure);
        }

        let msg_type = MsgType::from((buffer[0] >> 4) & 0x03);
        let token_length = (buffer[0] & 0x0F) as usize;
        if token_length > MAX_TOKEN_LENGTH {
            return Err(Error::ParseFailure);
        }
        if buffer.len() < COAP_HEADER_SIZE + token_length {
            return Err(Error::ParseFailure);
        }

        let code = MsgCode(buffer[1]);
        let message_id = ((buffer[2] as u16) << 8) | buffer[3] as u16;
        let token = MsgToken::new(&buffer[4..4 + token_length]);

        let mut options = Vec::new();
        let mut iter = OptionIterator::new(&buffer[COAP_HEADER_SIZE + token_length..]);
        for result in &mut iter {
            let (number, value) = result?;
            if options.len() >= MAX_OPTION_COUNT {
                return Err(Error::ParseFailure);
            }
            options.push(CoapOption::new(number, value));
        }

        // The iterator stops just past the payload marker, so whatever is
        // left is the payload. A marker with nothing behind it leaves this
        // empty.
        let payload = iter.as_slice().to_vec();

        Ok(Packet {
            version,
            msg_type,
            code,
            message_id,
            token,
            content_format: None,
            query: Vec::new(),
            options,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionNumber;

    #[test]
    fn parse_get_request() {
        let buffer: &[u8] = &[
            0x41, 0x01, 0x12, 0x34, 0x01, 0xB6, b's', b'e', b'n', b's', b'o', b'r', 0x04, b't',
            b'e', b'm', b'p',
        ];

        let packet = Packet::from_bytes(buffer).unwrap();
        assert_eq!(packet.version, 1);
        assert_eq!(packet.msg_type, MsgType::Con);
        assert_eq!(packet.code, MsgCode::GET);
        assert_eq!(packet.message_id, 0x1234);
        assert_eq!(packet.token.as_bytes(), &[0x01]);
        assert_eq!(packet.options.len(), 2);
        assert_eq!(packet.options[0].number, OptionNumber::URI_PATH);
        assert_eq!(packet.options[0].value, b"sensor");
        assert_eq!(packet.options[1].value, b"temp");
        assert!(packet.payload.is_empty());
    }

    #[test]
    fn parse_piggybacked_response() {
        let buffer: &[u8] = &[0x61, 0x45, 0xAA, 0xAA, 0x01, 0xFF, b'o', b'k'];

        let packet = Packet::from_bytes(buffer).unwrap();
        assert_eq!(packet.msg_type, MsgType::Ack);
        assert_eq!(packet.code, MsgCode::CONTENT);
        assert_eq!(packet.message_id, 0xAAAA);
        assert_eq!(packet.payload, b"ok");
    }

    #[test]
    fn round_trip_packet() {
        let mut packet = Packet::with_code(MsgType::Non, MsgCode::PUT);
        packet.message_id = 0xBEEF;
        packet.set_token(&[0x01, 0x02, 0x03]);
        packet.set_uri_path("a/b");
        packet.add_option(OptionNumber::URI_QUERY, b"x=1");
        packet.payload = b"body".to_vec();

        let parsed = Packet::from_bytes(&packet.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, packet);
    }

    #[test]
    fn round_trip_bytes() {
        let buffer: &[u8] = &[
            0x52, 0x03, 0xBE, 0xEF, 0x01, 0x02, 0xB1, b'a', 0x01, b'b', 0x43, b'x', b'=', b'1',
            0xFF, b'b', b'o', b'd', b'y',
        ];

        let packet = Packet::from_bytes(buffer).unwrap();
        assert_eq!(packet.to_bytes().unwrap(), buffer);
    }

    #[test]
    fn short_header_is_rejected() {
        assert_eq!(Packet::from_bytes(&[]), Err(Error::ParseFailure));
        assert_eq!(Packet::from_bytes(&[0x41, 0x01, 0x12]), Err(Error::ParseFailure));
    }

    #[test]
    fn wrong_version_is_rejected() {
        assert_eq!(
            Packet::from_bytes(&[0x81, 0x01, 0x12, 0x34, 0x01]),
            Err(Error::ParseFailure)
        );
        assert_eq!(
            Packet::from_bytes(&[0x01, 0x01, 0x12, 0x34, 0x01]),
            Err(Error::ParseFailure)
        );
    }

    #[test]
    fn oversized_token_length_is_rejected() {
        // TKL of 9.
        let mut buffer = vec![0x49, 0x01, 0x12, 0x34];
        buffer.extend_from_slice(&[0xAB; 9]);
        assert_eq!(Packet::from_bytes(&buffer), Err(Error::ParseFailure));
    }

    #[test]
    fn truncated_token_is_rejected() {
        assert_eq!(
            Packet::from_bytes(&[0x42, 0x01, 0x12, 0x34, 0xAB]),
            Err(Error::ParseFailure)
        );
    }

    #[test]
    fn token_lengths_round_trip() {
        for len in &[0usize, 1, 8] {
            let mut packet = Packet::new();
            packet.set_token(&vec![0x5A; *len]);
            let parsed = Packet::from_bytes(&packet.to_bytes().unwrap()).unwrap();
            assert_eq!(parsed.token.len(), *len);
        }
    }

    #[test]
    fn marker_at_end_means_no_payload() {
        let packet = Packet::from_bytes(&[0x41, 0x01, 0x12, 0x34, 0x01, 0xFF]).unwrap();
        assert!(packet.payload.is_empty());
    }

    #[test]
    fn truncated_option_is_rejected() {
        // Option claims 6 value bytes but only 2 follow.
        assert_eq!(
            Packet::from_bytes(&[0x40, 0x01, 0x12, 0x34, 0xB6, b's', b'e']),
            Err(Error::ParseFailure)
        );
    }

    #[test]
    fn option_count_overflow_is_rejected() {
        let mut packet = Packet::new();
        packet.message_id = 1;
        for _ in 0..MAX_OPTION_COUNT {
            packet.add_option(OptionNumber::URI_PATH, b"p");
        }
        let mut buffer = packet.to_bytes().unwrap();

        // Ten options parse fine.
        let parsed = Packet::from_bytes(&buffer).unwrap();
        assert_eq!(parsed.options.len(), MAX_OPTION_COUNT);

        // An eleventh is a framing error.
        buffer.extend_from_slice(&[0x01, b'p']);
        assert_eq!(Packet::from_bytes(&buffer), Err(Error::ParseFailure));
    }
}
