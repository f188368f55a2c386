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
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// An instance of [`DatagramSocket`] that implements a simple null interface,
/// where all packets that are sent are discarded and nothing is ever
/// received.
#[derive(Debug)]
pub struct NullSocket;

impl NullSocket {
    /// Creates a new instance of [`NullSocket`].
    pub fn new() -> NullSocket {
        NullSocket
    }
}

impl Default for NullSocket {
    fn default() -> Self {
        NullSocket::new()
    }
}

impl DatagramSocket for NullSocket {
    type Error = Error;

    fn send_to(&self, buffer: &[u8], _addr: SocketAddr) -> Result<usize, Self::Error> {
        Ok(buffer.len())
    }

    fn recv_from(&self, _buffer: &mut [u8]) -> Result<Option<(usize, SocketAddr)>, Self::Error> {
        Ok(None)
    }

    fn set_nonblocking(&self, _nonblocking: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn local_addr(&self) -> Result<SocketAddr, Self::Error> {
        Ok(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)))
    }
}
