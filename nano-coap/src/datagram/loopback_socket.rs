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
use std::cell::RefCell;
use std::collections::VecDeque;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// An instance of [`DatagramSocket`] backed by in-memory queues.
///
/// Datagrams sent through the socket are captured and can be inspected with
/// [`LoopbackSocket::take_sent`]; inbound datagrams are staged with
/// [`LoopbackSocket::enqueue`]. Primarily useful for testing and debugging.
#[derive(Debug)]
pub struct LoopbackSocket {
    inbound: RefCell<VecDeque<(Vec<u8>, SocketAddr)>>,
    outbound: RefCell<Vec<(Vec<u8>, SocketAddr)>>,
}

impl LoopbackSocket {
    /// Creates a new instance of [`LoopbackSocket`] with empty queues.
    pub fn new() -> LoopbackSocket {
        LoopbackSocket {
            inbound: RefCell::new(VecDeque::new()),
            outbound: RefCell::new(Vec::new()),
        }
    }

    /// Stages a datagram to be yielded by the next `recv_from` call.
    pub fn enqueue(&self, buffer: &[u8], from: SocketAddr) {
        self.inbound.borrow_mut().push_back((buffer.to_vec(), from));
    }

    /// Removes and returns every datagram sent through this socket so far.
    pub fn take_sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.outbound.borrow_mut().split_off(0)
    }
}

impl Default for LoopbackSocket {
    fn default() -> Self {
        LoopbackSocket::new()
    }
}

impl DatagramSocket for LoopbackSocket {
    type Error = Error;

    fn send_to(&self, buffer: &[u8], addr: SocketAddr) -> Result<usize, Self::Error> {
        self.outbound.borrow_mut().push((buffer.to_vec(), addr));
        Ok(buffer.len())
    }

    fn recv_from(&self, buffer: &mut [u8]) -> Result<Option<(usize, SocketAddr)>, Self::Error> {
        match self.inbound.borrow_mut().pop_front() {
            Some((bytes, from)) => {
                // Like std::net::UdpSocket, excess bytes are dropped.
                let len = bytes.len().min(buffer.len());
                buffer[..len].copy_from_slice(&bytes[..len]);
                Ok(Some((len, from)))
            }
            None => Ok(None),
        }
    }

    fn set_nonblocking(&self, _nonblocking: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn local_addr(&self) -> Result<SocketAddr, Self::Error> {
        Ok(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::LOCALHOST,
            crate::consts::DEFAULT_PORT_COAP_UDP,
        )))
    }
}
