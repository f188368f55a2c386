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

//! # nano-coap
//!
//! A compact, synchronous implementation of the Constrained Application
//! Protocol ([CoAP], [IETF-RFC7252]) over UDP, aimed at resource-constrained
//! nodes: one socket, one thread, no background tasks.
//!
//! [CoAP]: https://en.wikipedia.org/wiki/Constrained_Application_Protocol
//! [IETF-RFC7252]: https://tools.ietf.org/html/rfc7252
//!
//! The crate splits into two layers:
//!
//! * [`message`] and [`option`]: the bit-exact message codec — [`Packet`],
//!   its wire encoder and parser, and the delta-encoded option machinery.
//! * [`datagram`]: the [`LocalEndpoint`] state machine that owns a socket,
//!   dispatches incoming requests to URI-bound handlers, and delivers
//!   responses (piggybacked or separate) to a response callback.
//!
//! [`Packet`]: message::Packet
//! [`LocalEndpoint`]: datagram::LocalEndpoint
//!
//! Reception is pull-driven: nothing happens until the caller turns the
//! crank with [`loop_once`] or [`poll`], and at most one packet is processed
//! per turn. The endpoint is not safe for concurrent use; a single flow of
//! control orchestrates it.
//!
//! [`loop_once`]: datagram::LocalEndpoint::loop_once
//! [`poll`]: datagram::LocalEndpoint::poll
//!
//! ## Client
//!
//! ```no_run
//! use nano_coap::prelude::*;
//! use std::time::Duration;
//!
//! let mut endpoint = LocalEndpoint::bind(0).expect("UDP bind failed");
//!
//! endpoint.set_response_callback(|packet, from| {
//!     println!("response from {}: {}", from, packet);
//! });
//!
//! let server = "192.0.2.1:5683".parse().unwrap();
//! endpoint.get(server, "sensor/temp").expect("send failed");
//!
//! if !endpoint.poll(Some(Duration::from_secs(5)), DEFAULT_POLL_PERIOD) {
//!     println!("no response before the timeout");
//! }
//! ```
//!
//! ## Server
//!
//! ```no_run
//! use nano_coap::prelude::*;
//!
//! let mut endpoint = LocalEndpoint::bind(DEFAULT_PORT_COAP_UDP).expect("UDP bind failed");
//!
//! endpoint.add_request_handler("sensor/temp", |endpoint, request, from| {
//!     let _ = endpoint.send_response(
//!         from,
//!         request.message_id,
//!         b"22.3",
//!         MsgCode::CONTENT,
//!         Some(ContentFormat::TEXT_PLAIN_UTF8),
//!         request.token,
//!     );
//! });
//!
//! loop {
//!     endpoint.loop_once(true);
//! }
//! ```
//!
//! ## Caveats
//!
//! Confirmable requests are *not* retransmitted: if an acknowledgement never
//! arrives, the caller observes the `poll` timeout and re-issues the request
//! itself. Block-wise transfer, Observe, proxying, and DTLS are out of
//! scope.

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod message;

pub mod option;

pub mod datagram;

mod content_format;
pub use content_format::ContentFormat;

pub mod consts;
#[doc(hidden)]
pub use consts::*;

mod error;
pub use error::*;

mod util;
pub use util::{encode_u16, try_decode_u16};

#[doc(hidden)]
pub mod prelude {
    //! Convenience re-exports of the types most callers need.

    pub use super::consts::*;
    pub use super::datagram::{AllowStdUdpSocket, DatagramSocket, LocalEndpoint};
    pub use super::message::{MsgCode, MsgId, MsgToken, MsgType, Packet};
    pub use super::option::{CoapOption, OptionNumber};
    pub use super::ContentFormat;
    pub use super::Error;
}
