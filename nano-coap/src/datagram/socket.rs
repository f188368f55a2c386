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

use std::net::SocketAddr;

/// A trait for synchronous datagram sockets.
///
/// This is the seam that lets a [`LocalEndpoint`] run over transports other
/// than [`std::net::UdpSocket`] — an AT-modem socket on LTE hardware, an
/// in-memory pair for tests, or anything else that can move datagrams.
///
/// All methods take `&self`: a socket is shared between the endpoint and any
/// request handler that wants to respond through it.
///
/// [`LocalEndpoint`]: super::LocalEndpoint
pub trait DatagramSocket {
    /// The error type for errors emitted from this socket. Typically [`std::io::Error`].
    type Error: core::fmt::Debug;

    /// Sends a single datagram to the given remote address.
    fn send_to(&self, buffer: &[u8], addr: SocketAddr) -> Result<usize, Self::Error>;

    /// Receives a single datagram, along with the address of its sender.
    ///
    /// In non-blocking mode, returns `Ok(None)` when no datagram is waiting.
    /// In blocking mode this call suspends until one arrives.
    fn recv_from(&self, buffer: &mut [u8]) -> Result<Option<(usize, SocketAddr)>, Self::Error>;

    /// Switches the socket between blocking and non-blocking receive mode.
    fn set_nonblocking(&self, nonblocking: bool) -> Result<(), Self::Error>;

    /// Returns the local address this socket is bound to.
    fn local_addr(&self) -> Result<SocketAddr, Self::Error>;
}
