// Copyright 2025 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! IP endpoint addresses for IPv4 and IPv6 hosts.
//!
//! # Organisation
//!
//! - An [`AddrFamily`] selects between the IPv4 and IPv6 representation, or none.
//! - [`std::net::Ipv4Addr`] and [`ScopedIpv6Addr`] are the per-family host addresses; both
//!   implement [`IpValue`], the capability set an endpoint needs from a host address.
//! - A [`NetAddr`] combines an optional host address with a port. It is the type handed to
//!   socket code.
//!
//! An IPv6 address whose first 96 bits are `::ffff:0:0` embeds an IPv4 address in its low 32
//! bits. This mapping is the only bridge between the two families and is used for both
//! cross-family equality and family conversion.

mod family;
pub use family::{AddrFamily, UnknownFamily};

mod ip_value;
pub use ip_value::{IPV4_TEXT_MAXN, IPV6_TEXT_MAXN, IpValue};

mod ipv6;
pub use ipv6::ScopedIpv6Addr;

mod net_addr;
pub use net_addr::NetAddr;

mod error;
pub use error::{AddressKind, AddressParseError, ContractViolation};
