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

/// Type representing a CoAP message code.
///
/// The code is the raw 8-bit `(class << 5) | detail` value from the message
/// header. Request methods live in class 0, response codes in classes 2
/// through 5. Codes that are not in the constant table below are preserved
/// verbatim, so a parsed message always re-encodes to the same bytes.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd)]
pub struct MsgCode(pub u8);

impl MsgCode {
    /// Empty message code. Only used for resets and empty acknowledgements.
    pub const EMPTY: MsgCode = MsgCode(0x00);

    /// CoAP GET method.
    pub const GET: MsgCode = MsgCode::new(0, 1);

    /// CoAP POST method.
    pub const POST: MsgCode = MsgCode::new(0, 2);

    /// CoAP PUT method.
    pub const PUT: MsgCode = MsgCode::new(0, 3);

    /// CoAP DELETE method.
    pub const DELETE: MsgCode = MsgCode::new(0, 4);

    /// CoAP CREATED success code.
    pub const CREATED: MsgCode = MsgCode::new(2, 1);

    /// CoAP DELETED success code.
    pub const DELETED: MsgCode = MsgCode::new(2, 2);

    /// CoAP VALID success code.
    pub const VALID: MsgCode = MsgCode::new(2, 3);

    /// CoAP CHANGED success code.
    pub const CHANGED: MsgCode = MsgCode::new(2, 4);

    /// CoAP CONTENT success code.
    pub const CONTENT: MsgCode = MsgCode::new(2, 5);

    /// CoAP BAD_REQUEST client error.
    pub const BAD_REQUEST: MsgCode = MsgCode::new(4, 0);

    /// CoAP UNAUTHORIZED client error.
    pub const UNAUTHORIZED: MsgCode = MsgCode::new(4, 1);

    /// CoAP BAD_OPTION client error.
    pub const BAD_OPTION: MsgCode = MsgCode::new(4, 2);

    /// CoAP FORBIDDEN client error.
    pub const FORBIDDEN: MsgCode = MsgCode::new(4, 3);

    /// CoAP NOT_FOUND client error.
    pub const NOT_FOUND: MsgCode = MsgCode::new(4, 4);

    /// CoAP METHOD_NOT_ALLOWED client error.
    pub const METHOD_NOT_ALLOWED: MsgCode = MsgCode::new(4, 5);

    /// CoAP NOT_ACCEPTABLE client error.
    pub const NOT_ACCEPTABLE: MsgCode = MsgCode::new(4, 6);

    /// CoAP PRECONDITION_FAILED client error.
    pub const PRECONDITION_FAILED: MsgCode = MsgCode::new(4, 12);

    /// CoAP REQUEST_ENTITY_TOO_LARGE client error.
    pub const REQUEST_ENTITY_TOO_LARGE: MsgCode = MsgCode::new(4, 13);

    /// CoAP UNSUPPORTED_CONTENT_FORMAT client error.
    pub const UNSUPPORTED_CONTENT_FORMAT: MsgCode = MsgCode::new(4, 15);

    /// CoAP INTERNAL_SERVER_ERROR server error.
    pub const INTERNAL_SERVER_ERROR: MsgCode = MsgCode::new(5, 0);

    /// CoAP NOT_IMPLEMENTED server error.
    pub const NOT_IMPLEMENTED: MsgCode = MsgCode::new(5, 1);

    /// CoAP BAD_GATEWAY server error.
    pub const BAD_GATEWAY: MsgCode = MsgCode::new(5, 2);

    /// CoAP SERVICE_UNAVAILABLE server error.
    pub const SERVICE_UNAVAILABLE: MsgCode = MsgCode::new(5, 3);

    /// CoAP GATEWAY_TIMEOUT server error.
    pub const GATEWAY_TIMEOUT: MsgCode = MsgCode::new(5, 4);

    /// CoAP PROXYING_NOT_SUPPORTED server error.
    pub const PROXYING_NOT_SUPPORTED: MsgCode = MsgCode::new(5, 5);

    /// Builds a message code from its class and detail parts.
    pub const fn new(class: u8, detail: u8) -> MsgCode {
        MsgCode(((class & 0x7) << 5) | (detail & 0x1F))
    }

    /// Returns the class of this code (the high three bits).
    pub const fn class(self) -> u8 {
        self.0 >> 5
    }

    /// Returns the detail of this code (the low five bits).
    pub const fn detail(self) -> u8 {
        self.0 & 0x1F
    }

    /// Returns true if this is the empty code.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this code is a request method.
    pub fn is_request(self) -> bool {
        self.class() == 0 && self.detail() != 0
    }

    /// Returns true if this code is a response code.
    pub fn is_response(self) -> bool {
        match self.class() {
            2..=5 => true,
            _ => false,
        }
    }

    /// Returns true if this code indicates success.
    pub fn is_success(self) -> bool {
        self.class() == 2
    }

    /// Returns true if this code is a client error.
    pub fn is_client_error(self) -> bool {
        self.class() == 4
    }

    /// Returns true if this code is a server error.
    pub fn is_server_error(self) -> bool {
        self.class() == 5
    }
}

impl std::fmt::Display for MsgCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.class(), self.detail())
    }
}

impl Default for MsgCode {
    fn default() -> Self {
        MsgCode::EMPTY
    }
}

impl core::convert::From<MsgCode> for u8 {
    fn from(code: MsgCode) -> Self {
        code.0
    }
}
