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

//! Module defining various CoAP-related constants.

use core::time::Duration;

/// The standard default IP port number used for CoAP-over-UDP.
pub const DEFAULT_PORT_COAP_UDP: u16 = 5683;

/// The only CoAP protocol version this library understands.
pub const COAP_VERSION: u8 = 1;

/// The size of the fixed CoAP message header, in bytes.
pub const COAP_HEADER_SIZE: usize = 4;

/// The largest datagram this library will encode or decode.
///
/// Encoding aborts rather than produce a datagram at or above this size.
pub const BUF_MAX_SIZE: usize = 1024;

/// The maximum number of options carried by a single message.
///
/// Additional options are silently dropped on the way in and treated as a
/// framing error on the way out of the wire.
pub const MAX_OPTION_COUNT: usize = 10;

/// The maximum length of a message token, from IETF-RFC7252.
pub const MAX_TOKEN_LENGTH: usize = 8;

/// The byte separating the option list from the payload.
pub const PAYLOAD_MARKER: u8 = 0xFF;

/// The default interval between receive attempts in [`LocalEndpoint::poll`].
///
/// [`LocalEndpoint::poll`]: crate::datagram::LocalEndpoint::poll
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(500);
