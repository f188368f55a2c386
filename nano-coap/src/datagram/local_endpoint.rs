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
use crate::message::{MsgCode, MsgId, MsgToken, MsgType, Packet};
use crate::option::OptionNumber;
use rand::Rng;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// A handler for incoming requests matching one registered URI path.
///
/// The endpoint hands the handler a shared reference to itself so the handler
/// can answer with [`LocalEndpoint::send_response`].
pub type RequestHandler<S> = Box<dyn FnMut(&LocalEndpoint<S>, &Packet, SocketAddr)>;

/// A callback invoked with each response delivered to a client endpoint.
pub type ResponseCallback = Box<dyn FnMut(&Packet, SocketAddr)>;

/// Client-side progress of the RFC7252 §5.2.2 separate-response exchange.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ClientState {
    Idle,
    /// An empty ACK arrived; the data will follow in a CON of its own.
    AwaitingSeparateResponse,
}

/// A CoAP endpoint over a single datagram socket.
///
/// The endpoint is single-threaded and pull-driven: nothing is received
/// until the owner calls [`loop_once`] or [`poll`], and at most one packet is
/// processed per [`loop_once`] call. Registering a request handler switches
/// the endpoint into server mode; otherwise inbound packets are treated as
/// responses and fed to the response callback.
///
/// [`loop_once`]: LocalEndpoint::loop_once
/// [`poll`]: LocalEndpoint::poll
pub struct LocalEndpoint<S: DatagramSocket> {
    socket: S,
    handlers: BTreeMap<String, RequestHandler<S>>,
    response_callback: Option<ResponseCallback>,
    is_server: bool,
    state: ClientState,
    discard_retransmissions: bool,
    last_packet_summary: String,
}

impl<S: DatagramSocket> std::fmt::Debug for LocalEndpoint<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEndpoint")
            .field("is_server", &self.is_server)
            .field("state", &self.state)
            .field("handlers", &self.handlers.keys())
            .finish()
    }
}

impl LocalEndpoint<AllowStdUdpSocket> {
    /// Creates an endpoint bound to the given local UDP port on all
    /// interfaces.
    pub fn bind(port: u16) -> Result<LocalEndpoint<AllowStdUdpSocket>, Error> {
        let socket = AllowStdUdpSocket::bind(("0.0.0.0", port))?;
        Ok(LocalEndpoint::new(socket))
    }
}

impl<S: DatagramSocket> LocalEndpoint<S> {
    /// Creates a new endpoint over the given socket.
    pub fn new(socket: S) -> LocalEndpoint<S> {
        LocalEndpoint {
            socket,
            handlers: BTreeMap::new(),
            response_callback: None,
            is_server: false,
            state: ClientState::Idle,
            discard_retransmissions: false,
            last_packet_summary: String::new(),
        }
    }

    /// Borrows the underlying socket.
    pub fn socket(&self) -> &S {
        &self.socket
    }

    /// Shuts the endpoint down, returning the underlying socket.
    pub fn into_socket(self) -> S {
        self.socket
    }

    /// Registers a handler for requests whose Uri-Path matches `url`.
    ///
    /// Registering any handler switches the endpoint into server mode.
    pub fn add_request_handler<F>(&mut self, url: &str, handler: F)
    where
        F: FnMut(&LocalEndpoint<S>, &Packet, SocketAddr) + 'static,
    {
        self.handlers.insert(url.to_string(), Box::new(handler));
        self.is_server = true;
    }

    /// Sets the callback invoked with each inbound response.
    pub fn set_response_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Packet, SocketAddr) + 'static,
    {
        self.response_callback = Some(Box::new(callback));
    }

    /// Enables or disables the retransmission-discard heuristic: when
    /// enabled, an inbound packet whose summary (type, code, message id,
    /// payload) matches the previously processed one is dropped.
    pub fn set_discard_retransmissions(&mut self, discard: bool) {
        self.discard_retransmissions = discard;
    }

    /// Materializes the auto-options of `packet` and sends it to `remote`.
    ///
    /// On success, returns the message id of the packet that went out.
    pub fn send_packet(&self, remote: SocketAddr, packet: &mut Packet) -> Result<MsgId, Error> {
        if let Some(content_format) = packet.content_format {
            packet.add_option(OptionNumber::CONTENT_FORMAT, &encode_u16(content_format.0));
        }
        if !packet.query.is_empty() {
            let query = packet.query.clone();
            packet.add_option(OptionNumber::URI_QUERY, &query);
        }

        let buffer = packet.to_bytes()?;

        match self.socket.send_to(&buffer, remote) {
            Ok(_) => {
                log::debug!("packet sent, message id {}", packet.message_id);
                Ok(packet.message_id)
            }
            Err(e) => {
                log::warn!("send to {} failed: {:?}", remote, e);
                Err(Error::IOError)
            }
        }
    }

    /// Stamps `packet` as a fresh request — a newly generated message id
    /// plus Uri-Host and Uri-Path options — and sends it to `remote`.
    ///
    /// Any outbound request resets the separate-response state machine.
    pub fn send_request(
        &mut self,
        remote: SocketAddr,
        url: &str,
        packet: &mut Packet,
    ) -> Result<MsgId, Error> {
        self.state = ClientState::Idle;
        packet.message_id = rand::thread_rng().gen::<u16>();
        packet.set_uri_host(&remote.ip().to_string());
        packet.set_uri_path(url);
        self.send_packet(remote, packet)
    }

    /// Builds a request from the given parts and sends it to `remote`.
    #[allow(clippy::too_many_arguments)]
    pub fn send(
        &mut self,
        remote: SocketAddr,
        url: &str,
        msg_type: MsgType,
        code: MsgCode,
        token: MsgToken,
        payload: &[u8],
        content_format: Option<ContentFormat>,
        query: &[u8],
    ) -> Result<MsgId, Error> {
        let mut packet = Packet::with_code(msg_type, code);
        packet.token = token;
        packet.payload = payload.to_vec();
        packet.content_format = content_format;
        packet.query = query.to_vec();
        self.send_request(remote, url, &mut packet)
    }

    /// Sends an acknowledgement carrying the given response code back to a
    /// request issuer.
    pub fn send_response(
        &self,
        remote: SocketAddr,
        message_id: MsgId,
        payload: &[u8],
        code: MsgCode,
        content_format: Option<ContentFormat>,
        token: MsgToken,
    ) -> Result<MsgId, Error> {
        let mut packet = Packet::with_code(MsgType::Ack, code);
        packet.message_id = message_id;
        packet.token = token;
        packet.payload = payload.to_vec();
        packet.content_format = content_format;
        self.send_packet(remote, &mut packet)
    }

    /// Issues a confirmable GET request.
    pub fn get(&mut self, remote: SocketAddr, url: &str) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Con,
            MsgCode::GET,
            MsgToken::EMPTY,
            &[],
            None,
            &[],
        )
    }

    /// Issues a confirmable POST request.
    pub fn post(
        &mut self,
        remote: SocketAddr,
        url: &str,
        payload: &[u8],
        content_format: Option<ContentFormat>,
    ) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Con,
            MsgCode::POST,
            MsgToken::EMPTY,
            payload,
            content_format,
            &[],
        )
    }

    /// Issues a confirmable PUT request.
    pub fn put(
        &mut self,
        remote: SocketAddr,
        url: &str,
        payload: &[u8],
        content_format: Option<ContentFormat>,
    ) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Con,
            MsgCode::PUT,
            MsgToken::EMPTY,
            payload,
            content_format,
            &[],
        )
    }

    /// Issues a confirmable DELETE request.
    pub fn delete(&mut self, remote: SocketAddr, url: &str) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Con,
            MsgCode::DELETE,
            MsgToken::EMPTY,
            &[],
            None,
            &[],
        )
    }

    /// Issues a non-confirmable GET request.
    pub fn get_non_confirmable(&mut self, remote: SocketAddr, url: &str) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Non,
            MsgCode::GET,
            MsgToken::EMPTY,
            &[],
            None,
            &[],
        )
    }

    /// Issues a non-confirmable POST request.
    pub fn post_non_confirmable(
        &mut self,
        remote: SocketAddr,
        url: &str,
        payload: &[u8],
        content_format: Option<ContentFormat>,
    ) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Non,
            MsgCode::POST,
            MsgToken::EMPTY,
            payload,
            content_format,
            &[],
        )
    }

    /// Issues a non-confirmable PUT request.
    pub fn put_non_confirmable(
        &mut self,
        remote: SocketAddr,
        url: &str,
        payload: &[u8],
        content_format: Option<ContentFormat>,
    ) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Non,
            MsgCode::PUT,
            MsgToken::EMPTY,
            payload,
            content_format,
            &[],
        )
    }

    /// Issues a non-confirmable DELETE request.
    pub fn delete_non_confirmable(
        &mut self,
        remote: SocketAddr,
        url: &str,
    ) -> Result<MsgId, Error> {
        self.send(
            remote,
            url,
            MsgType::Non,
            MsgCode::DELETE,
            MsgToken::EMPTY,
            &[],
            None,
            &[],
        )
    }

    /// Performs one receive-and-dispatch cycle.
    ///
    /// Processes at most one packet. Returns true if a packet was dispatched
    /// to a handler or the response callback. Socket and framing failures
    /// are logged and reported as false; they never propagate.
    pub fn loop_once(&mut self, blocking: bool) -> bool {
        if let Err(e) = self.socket.set_nonblocking(!blocking) {
            log::warn!("set_nonblocking failed: {:?}", e);
            return false;
        }
        let mut buffer = [0u8; BUF_MAX_SIZE];
        let received = self.socket.recv_from(&mut buffer);
        let _ = self.socket.set_nonblocking(false);

        let (len, from) = match received {
            Ok(Some(x)) => x,
            Ok(None) => return false,
            Err(e) => {
                log::warn!("receive failed: {:?}", e);
                return false;
            }
        };
        if len == 0 {
            return false;
        }

        let packet = match Packet::from_bytes(&buffer[..len]) {
            Ok(packet) => packet,
            Err(e) => {
                log::debug!("discarding malformed datagram from {}: {:?}", from, e);
                return false;
            }
        };

        if self.discard_retransmissions {
            let summary = packet.to_string();
            if summary == self.last_packet_summary {
                log::debug!("discarded retransmission: {}", summary);
                return false;
            }
            self.last_packet_summary = summary;
        }

        if self.is_server {
            self.dispatch_request(&packet, from);
            return true;
        }

        if packet.msg_type == MsgType::Ack && packet.code.is_empty() {
            // Separate response (RFC7252 §5.2.2): the server has only
            // acknowledged the request so far. The data comes later in a
            // CON of its own, so the callback must not fire yet.
            self.state = ClientState::AwaitingSeparateResponse;
            return false;
        }

        if self.state == ClientState::AwaitingSeparateResponse {
            self.state = ClientState::Idle;
            let _ = self.send_response(
                from,
                packet.message_id,
                &[],
                MsgCode::EMPTY,
                None,
                MsgToken::EMPTY,
            );
        }

        if let Some(callback) = self.response_callback.as_mut() {
            callback(&packet, from);
        }
        true
    }

    /// Drives [`loop_once`][LocalEndpoint::loop_once] in non-blocking mode,
    /// sleeping `poll_period` between attempts, until a packet is processed
    /// or `timeout` elapses. A timeout of `None` waits forever.
    pub fn poll(&mut self, timeout: Option<Duration>, poll_period: Duration) -> bool {
        let start = Instant::now();
        loop {
            if self.loop_once(false) {
                return true;
            }
            if let Some(limit) = timeout {
                if start.elapsed() >= limit {
                    return false;
                }
            }
            std::thread::sleep(poll_period);
        }
    }

    fn dispatch_request(&mut self, packet: &Packet, from: SocketAddr) {
        let url = packet
            .options
            .iter()
            .filter(|opt| opt.number == OptionNumber::URI_PATH && !opt.value.is_empty())
            .map(|opt| String::from_utf8_lossy(&opt.value))
            .collect::<Vec<_>>()
            .join("/");

        // The handler map is moved out for the duration of the call so the
        // handler can borrow the endpoint.
        let mut handlers = std::mem::take(&mut self.handlers);
        let handler = if url.is_empty() {
            None
        } else {
            handlers.get_mut(&url)
        };
        match handler {
            Some(handler) => handler(self, packet, from),
            None => {
                log::debug!("no handler for url [{}], answering 4.04", url);
                let _ = self.send_response(
                    from,
                    packet.message_id,
                    &[],
                    MsgCode::NOT_FOUND,
                    None,
                    packet.token,
                );
            }
        }
        self.handlers = handlers;
    }
}
