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

use std::{
    fmt::{Display, Formatter},
    net::{Ipv4Addr, Ipv6Addr, SocketAddrV6},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::{AddrFamily, AddressKind, AddressParseError, IPV6_TEXT_MAXN, IpValue};

/// An IPv6 address together with its scope identifier.
///
/// The text form is the standard colon-hex notation, followed by `%<scope_id>` when the scope
/// identifier is non-zero, e.g. `fe80::1%3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopedIpv6Addr {
    addr: Ipv6Addr,
    scope_id: u32,
}

impl ScopedIpv6Addr {
    /// The unspecified address `::`.
    pub const UNSPECIFIED: Self = Self::new(Ipv6Addr::UNSPECIFIED, 0);

    /// The loopback address `::1`.
    pub const LOCALHOST: Self = Self::new(Ipv6Addr::LOCALHOST, 0);

    /// Creates a new scoped IPv6 address.
    pub const fn new(addr: Ipv6Addr, scope_id: u32) -> Self {
        Self { addr, scope_id }
    }

    /// Embeds an IPv4 address as `::ffff:a.b.c.d` with scope identifier 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::net::Ipv4Addr;
    /// # use net_address::address::ScopedIpv6Addr;
    /// let mapped = ScopedIpv6Addr::from_ipv4_mapped(Ipv4Addr::new(1, 2, 3, 4));
    /// assert_eq!(mapped.to_string(), "::ffff:1.2.3.4");
    /// ```
    pub const fn from_ipv4_mapped(ipv4: Ipv4Addr) -> Self {
        Self::new(ipv4.to_ipv6_mapped(), 0)
    }

    /// Returns the embedded IPv4 address if the first 96 bits are `::ffff:0:0`.
    ///
    /// The scope identifier is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::net::Ipv4Addr;
    /// # use net_address::address::ScopedIpv6Addr;
    /// let mapped: ScopedIpv6Addr = "::ffff:10.0.0.1".parse().unwrap();
    /// assert_eq!(mapped.to_ipv4_mapped(), Some(Ipv4Addr::new(10, 0, 0, 1)));
    /// assert_eq!(ScopedIpv6Addr::LOCALHOST.to_ipv4_mapped(), None);
    /// ```
    pub const fn to_ipv4_mapped(&self) -> Option<Ipv4Addr> {
        self.addr.to_ipv4_mapped()
    }

    /// Returns true if the address embeds an IPv4 address.
    pub const fn is_ipv4_mapped(&self) -> bool {
        self.to_ipv4_mapped().is_some()
    }

    /// Returns the address without its scope.
    pub const fn addr(&self) -> &Ipv6Addr {
        &self.addr
    }

    /// Returns the scope identifier.
    pub const fn scope_id(&self) -> u32 {
        self.scope_id
    }

    /// Set the scope identifier.
    pub fn set_scope_id(&mut self, scope_id: u32) {
        self.scope_id = scope_id;
    }
}

impl Default for ScopedIpv6Addr {
    /// The unspecified address `::` without scope.
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl IpValue for ScopedIpv6Addr {
    const FAMILY: AddrFamily = AddrFamily::Ipv6;
    const TEXT_MAXN: usize = IPV6_TEXT_MAXN;
    const ZERO_LITERAL: &'static str = "::";

    fn parse(text: &str) -> Result<Self, AddressParseError> {
        text.parse()
    }

    /// The all-zero address; the scope identifier is ignored.
    fn is_any(&self) -> bool {
        self.addr.is_unspecified()
    }

    /// `::1`, or an IPv4-mapped loopback address such as `::ffff:127.0.0.1`.
    fn is_loopback(&self) -> bool {
        self.addr.is_loopback() || self.to_ipv4_mapped().is_some_and(|ipv4| ipv4.is_loopback())
    }
}

impl From<Ipv6Addr> for ScopedIpv6Addr {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr, 0)
    }
}

impl From<ScopedIpv6Addr> for Ipv6Addr {
    fn from(addr: ScopedIpv6Addr) -> Self {
        addr.addr
    }
}

impl From<SocketAddrV6> for ScopedIpv6Addr {
    fn from(addr: SocketAddrV6) -> Self {
        Self::new(*addr.ip(), addr.scope_id())
    }
}

impl Display for ScopedIpv6Addr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.scope_id == 0 {
            write!(f, "{}", self.addr)
        } else {
            write!(f, "{}%{}", self.addr, self.scope_id)
        }
    }
}

impl FromStr for ScopedIpv6Addr {
    type Err = AddressParseError;

    /// Parses colon-hex notation with an optional decimal `%scope` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, scope_id) = match s.split_once('%') {
            Some((addr, scope)) if !scope.starts_with('+') => {
                (addr, u32::from_str(scope).or(Err(AddressKind::Ipv6))?)
            }
            Some(_) => return Err(AddressKind::Ipv6.into()),
            None => (s, 0),
        };
        let addr = Ipv6Addr::from_str(addr).or(Err(AddressKind::Ipv6))?;

        Ok(Self::new(addr, scope_id))
    }
}
