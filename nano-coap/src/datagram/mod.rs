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

//! Datagram sockets and the endpoint that drives them.
//!

use super::*;

mod socket;
pub use socket::DatagramSocket;

mod allow_udp_socket;
pub use allow_udp_socket::AllowStdUdpSocket;

mod null_socket;
pub use null_socket::NullSocket;

mod loopback_socket;
pub use loopback_socket::LoopbackSocket;

mod local_endpoint;
pub use local_endpoint::*;
