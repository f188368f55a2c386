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
use std::net::{SocketAddr, UdpSocket};
use std::ops::Deref;

/// A wrapper around [`std::net::UdpSocket`] that implements [`DatagramSocket`].
#[derive(Debug)]
pub struct AllowStdUdpSocket(UdpSocket);

impl AllowStdUdpSocket {
    /// Upgrades the given [`std::net::UdpSocket`] to an instance of [`AllowStdUdpSocket`].
    ///
    /// No operations are performed on `udp_socket` by this method; the
    /// endpoint toggles blocking mode itself on every receive cycle.
    pub fn from_std(udp_socket: UdpSocket) -> AllowStdUdpSocket {
        AllowStdUdpSocket(udp_socket)
    }

    /// Analog of [`std::net::UdpSocket::bind`] for [`AllowStdUdpSocket`].
    pub fn bind<A>(addr: A) -> std::io::Result<AllowStdUdpSocket>
    where
        A: std::net::ToSocketAddrs,
    {
        let udp_socket = UdpSocket::bind(addr)?;
        Ok(AllowStdUdpSocket::from_std(udp_socket))
    }
}

impl DatagramSocket for AllowStdUdpSocket {
    type Error = std::io::Error;

    fn send_to(&self, buffer: &[u8], addr: SocketAddr) -> Result<usize, Self::Error> {
        self.0.send_to(buffer, addr)
    }

    fn recv_from(&self, buffer: &mut [u8]) -> Result<Option<(usize, SocketAddr)>, Self::Error> {
        match self.0.recv_from(buffer) {
            Ok((size, from)) => Ok(Some((size, from))),
            Err(e) => match e.kind() {
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => Ok(None),
                _ => Err(e),
            },
        }
    }

    fn set_nonblocking(&self, nonblocking: bool) -> Result<(), Self::Error> {
        self.0.set_nonblocking(nonblocking)
    }

    fn local_addr(&self) -> Result<SocketAddr, Self::Error> {
        self.0.local_addr()
    }
}

impl Deref for AllowStdUdpSocket {
    type Target = UdpSocket;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
