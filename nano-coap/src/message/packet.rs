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
use crate::option::{CoapOption, OptionNumber};

/// An in-memory CoAP message.
///
/// Packets are transient: one is built per send and one per receive, consumed
/// by the codec, and then discarded. The wire representation is produced by
/// [`Packet::to_bytes`] and consumed by [`Packet::from_bytes`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Packet {
    /// Protocol version. Always 1 on the wire.
    pub version: u8,

    /// The message type: CON, NON, ACK, or RES.
    pub msg_type: MsgType,

    /// The message code: a request method, a response code, or empty.
    pub code: MsgCode,

    /// The 16-bit message id. Matches a CON to its ACK.
    pub message_id: MsgId,

    /// The message token. Matches a response to its request.
    pub token: MsgToken,

    /// The content format of the payload.
    ///
    /// Only consulted when sending: `Some` makes the endpoint emit a
    /// Content-Format option ahead of serialization. The parser leaves this
    /// as `None` and keeps any received Content-Format option in `options`.
    pub content_format: Option<ContentFormat>,

    /// Query bytes, emitted as a single Uri-Query option when non-empty.
    /// Only consulted when sending.
    pub query: Vec<u8>,

    /// The option list. At most [`MAX_OPTION_COUNT`] entries.
    pub options: Vec<CoapOption>,

    /// The payload. An empty payload is not emitted on the wire.
    pub payload: Vec<u8>,
}

impl Packet {
    /// Creates an empty confirmable GET packet.
    pub fn new() -> Packet {
        Packet {
            version: COAP_VERSION,
            msg_type: MsgType::Con,
            code: MsgCode::GET,
            message_id: 0,
            token: MsgToken::EMPTY,
            content_format: None,
            query: Vec::new(),
            options: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Creates an empty packet with the given type and code.
    pub fn with_code(msg_type: MsgType, code: MsgCode) -> Packet {
        Packet {
            msg_type,
            code,
            ..Packet::new()
        }
    }

    /// Appends an option to this packet.
    ///
    /// Once [`MAX_OPTION_COUNT`] options are present, further additions are
    /// silently dropped.
    pub fn add_option(&mut self, number: OptionNumber, value: &[u8]) {
        if self.options.len() >= MAX_OPTION_COUNT {
            return;
        }
        self.options.push(CoapOption::new(number, value));
    }

    /// Sets the message token, silently clearing it if the slice is longer
    /// than [`MAX_TOKEN_LENGTH`] bytes.
    pub fn set_token(&mut self, token: &[u8]) {
        self.token = if token.len() <= MAX_TOKEN_LENGTH {
            MsgToken::new(token)
        } else {
            MsgToken::EMPTY
        };
    }

    /// Appends a Uri-Host option with the given host.
    pub fn set_uri_host(&mut self, host: &str) {
        self.add_option(OptionNumber::URI_HOST, host.as_bytes());
    }

    /// Appends one Uri-Path option per `/`-separated segment of `url`.
    pub fn set_uri_path(&mut self, url: &str) {
        for segment in url.split('/') {
            self.add_option(OptionNumber::URI_PATH, segment.as_bytes());
        }
    }

    /// Returns the value of the first option with the given number, if any.
    pub fn find_option(&self, number: OptionNumber) -> Option<&[u8]> {
        self.options
            .iter()
            .find(|opt| opt.number == number)
            .map(|opt| opt.value.as_slice())
    }

    /// Gets the payload as a string slice.
    pub fn payload_as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

impl Default for Packet {
    fn default() -> Self {
        Packet::new()
    }
}

/// The summary printed here doubles as the fingerprint used by the
/// retransmission-discard heuristic, so it covers exactly the fields that
/// identify a retransmitted message.
impl std::fmt::Display for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "type: {:?}, code: {}, message id: {}, payload: {:02x?}",
            self.msg_type, self.code, self.message_id, self.payload
        )
    }
}
