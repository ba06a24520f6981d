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
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::{
    AddrFamily, AddressKind, AddressParseError, ContractViolation, IPV6_TEXT_MAXN, IpValue,
    ScopedIpv6Addr, ip_value::write_display,
};

/// The IP part of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum HostIp {
    /// No address. The family is the preferred one for formatting and later parsing.
    Unset(AddrFamily),
    V4(Ipv4Addr),
    V6(ScopedIpv6Addr),
}

impl Default for HostIp {
    fn default() -> Self {
        Self::Unset(AddrFamily::None)
    }
}

/// An endpoint address: a port and an optional IPv4 or IPv6 host address.
///
/// A `NetAddr` without an IP still has a port and may have a preferred [`AddrFamily`]. An
/// address with an IP always has the family of that IP.
///
/// Equality across families goes through the IPv4-mapped IPv6 embedding, which makes it fallible:
/// comparing an IPv4 address with an IPv6 address that embeds no IPv4 address is a
/// [`ContractViolation`]. For this reason `NetAddr` does not implement [`PartialEq`]; use
/// [`NetAddr::is_equal`] or [`NetAddr::ip_is_equal`].
///
/// # Examples
///
/// ```
/// # use net_address::address::{AddrFamily, NetAddr};
/// let addr = NetAddr::from_parts(Some("192.168.1.1"), 8080, AddrFamily::Ipv4).unwrap();
/// assert_eq!(addr.port(), 8080);
/// assert_eq!(addr.family(), AddrFamily::Ipv4);
/// assert_eq!(addr.ip_text().unwrap(), "192.168.1.1");
///
/// let mapped: NetAddr = "[::ffff:192.168.1.1]:8080".parse().unwrap();
/// assert!(addr.is_equal(&mapped).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NetAddr {
    ip: HostIp,
    port: u16,
}

impl NetAddr {
    /// Creates an address with no IP, no family, and port 0.
    pub const fn new() -> Self {
        Self {
            ip: HostIp::Unset(AddrFamily::None),
            port: 0,
        }
    }

    /// Creates an address from optional IP text, a port, and the requested family.
    ///
    /// See [`NetAddr::set`].
    pub fn from_parts(
        ip: Option<&str>,
        port: u16,
        family: AddrFamily,
    ) -> Result<Self, AddressParseError> {
        let mut addr = Self::new();
        addr.set(ip, port, family)?;
        Ok(addr)
    }

    /// Creates an address from a standard library IP address and a port.
    pub const fn from_ip(ip: IpAddr, port: u16) -> Self {
        let ip = match ip {
            IpAddr::V4(ipv4) => HostIp::V4(ipv4),
            IpAddr::V6(ipv6) => HostIp::V6(ScopedIpv6Addr::new(ipv6, 0)),
        };
        Self { ip, port }
    }

    /// Sets the port and parses the IP from text.
    ///
    /// Behaves like [`NetAddr::set_ip_str`] followed by [`NetAddr::set_port`], except that
    /// nothing is modified when parsing fails.
    pub fn set(
        &mut self,
        ip: Option<&str>,
        port: u16,
        family: AddrFamily,
    ) -> Result<(), AddressParseError> {
        let mut staged = *self;
        staged.set_port(port);
        staged.set_ip_str(ip, family)?;
        self.copy_from(&staged);
        Ok(())
    }

    /// Resets to the value returned by [`NetAddr::new`].
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Overwrites this address with the value of `src`.
    pub fn copy_from(&mut self, src: &NetAddr) {
        self.port = src.port;
        // Only the active variant of the source is read.
        self.ip = match src.ip {
            HostIp::Unset(family) => HostIp::Unset(family),
            HostIp::V4(ipv4) => HostIp::V4(ipv4),
            HostIp::V6(ipv6) => HostIp::V6(ipv6),
        };
    }

    /// Returns true if the port is 0 or there is no IP.
    pub const fn is_empty(&self) -> bool {
        self.port == 0 || self.ip_is_empty()
    }

    /// Compares port and IP; see [`NetAddr::ip_is_equal`] for the IP comparison.
    ///
    /// Ports are compared first, so addresses with different ports are never a
    /// [`ContractViolation`].
    pub fn is_equal(&self, other: &Self) -> Result<bool, ContractViolation> {
        if self.port != other.port {
            return Ok(false);
        }
        self.ip_is_equal(other)
    }

    /// Removes the IP, keeping the family as the preferred one.
    pub fn ip_clear(&mut self) {
        self.ip = HostIp::Unset(self.family());
    }

    /// Returns true if there is no IP.
    pub const fn ip_is_empty(&self) -> bool {
        matches!(self.ip, HostIp::Unset(_))
    }

    /// Returns true for the wildcard address of either family.
    ///
    /// An address without an IP is vacuously "any".
    pub fn ip_is_any(&self) -> bool {
        match &self.ip {
            HostIp::Unset(_) => true,
            HostIp::V4(ipv4) => IpValue::is_any(ipv4),
            HostIp::V6(ipv6) => ipv6.is_any(),
        }
    }

    /// Returns true for the loopback address of either family.
    pub fn ip_is_loopback(&self) -> bool {
        match &self.ip {
            HostIp::Unset(_) => false,
            HostIp::V4(ipv4) => IpValue::is_loopback(ipv4),
            HostIp::V6(ipv6) => ipv6.is_loopback(),
        }
    }

    /// Compares the IPs of two addresses, ignoring ports.
    ///
    /// Two addresses without IP are equal, and an address without IP never equals one with IP.
    /// When the families differ, the IPv6 side is reduced to its embedded IPv4 address.
    /// Addresses of the same family are compared directly and never yield a
    /// [`ContractViolation`], so `::ffff:1.2.3.4` and `::1` are simply unequal.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::UnmappableComparison`] if the families differ and the IPv6 side is
    /// not an IPv4-mapped address.
    pub fn ip_is_equal(&self, other: &Self) -> Result<bool, ContractViolation> {
        match (&self.ip, &other.ip) {
            (HostIp::Unset(_), HostIp::Unset(_)) => Ok(true),
            (HostIp::Unset(_), _) | (_, HostIp::Unset(_)) => Ok(false),
            (HostIp::V4(lhs), HostIp::V4(rhs)) => Ok(lhs == rhs),
            (HostIp::V6(lhs), HostIp::V6(rhs)) => Ok(lhs == rhs),
            (HostIp::V4(ipv4), HostIp::V6(ipv6)) | (HostIp::V6(ipv6), HostIp::V4(ipv4)) => {
                match ipv6.to_ipv4_mapped() {
                    Some(mapped) => Ok(mapped == *ipv4),
                    None => {
                        tracing::warn!(%ipv4, %ipv6, "Compared IPv4 with unmapped IPv6 address");
                        Err(ContractViolation::UnmappableComparison {
                            ipv4: *ipv4,
                            ipv6: *ipv6.addr(),
                        })
                    }
                }
            }
        }
    }

    /// Parses the IP from text, keeping the port.
    ///
    /// With `family` set to [`AddrFamily::Ipv4`] or [`AddrFamily::Ipv6`], the text must be an
    /// address of that family. With [`AddrFamily::None`], IPv4 is tried first, then IPv6.
    ///
    /// Absent or empty text removes the IP and records `family` as the preferred family; this
    /// never fails. On error the address is not modified.
    pub fn set_ip_str(
        &mut self,
        text: Option<&str>,
        family: AddrFamily,
    ) -> Result<(), AddressParseError> {
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            self.ip = HostIp::Unset(family);
            return Ok(());
        };

        let ip = match family {
            AddrFamily::Ipv4 => <Ipv4Addr as IpValue>::parse(text).map(HostIp::V4),
            AddrFamily::Ipv6 => ScopedIpv6Addr::parse(text).map(HostIp::V6),
            AddrFamily::None => Self::detect_ip(text),
        }
        .inspect_err(|err| tracing::debug!(text, %family, error = %err, "Failed to parse IP"))?;

        let staged = Self {
            ip,
            port: self.port,
        };
        self.copy_from(&staged);
        Ok(())
    }

    fn detect_ip(text: &str) -> Result<HostIp, AddressParseError> {
        if let Ok(ipv4) = <Ipv4Addr as IpValue>::parse(text) {
            return Ok(HostIp::V4(ipv4));
        }
        tracing::trace!(text, "Not an IPv4 address, trying IPv6");
        ScopedIpv6Addr::parse(text)
            .map(HostIp::V6)
            .or(Err(AddressKind::Ip.into()))
    }

    /// Writes the IP in text form into `buf` and returns the written text.
    ///
    /// An address without IP is written as the zero literal of its preferred family, `0.0.0.0`
    /// or `::`.
    ///
    /// # Errors
    ///
    /// - [`ContractViolation::InadequateBuffer`] if `buf` is shorter than
    ///   [`IPV4_TEXT_MAXN`][super::IPV4_TEXT_MAXN] or [`IPV6_TEXT_MAXN`] for the family at hand.
    /// - [`ContractViolation::NoFamily`] if there is neither IP nor family.
    pub fn write_ip<'b>(&self, buf: &'b mut [u8]) -> Result<&'b str, ContractViolation> {
        match &self.ip {
            HostIp::V4(ipv4) => ipv4.write_text(buf),
            HostIp::V6(ipv6) => ipv6.write_text(buf),
            HostIp::Unset(AddrFamily::Ipv4) => write_zero_literal::<Ipv4Addr>(buf),
            HostIp::Unset(AddrFamily::Ipv6) => write_zero_literal::<ScopedIpv6Addr>(buf),
            HostIp::Unset(AddrFamily::None) => {
                tracing::warn!(port = self.port, "Formatted IP of address without family");
                Err(ContractViolation::NoFamily)
            }
        }
    }

    /// Returns the IP in text form, as written by [`NetAddr::write_ip`].
    pub fn ip_text(&self) -> Result<String, ContractViolation> {
        let mut buf = [0u8; IPV6_TEXT_MAXN];
        self.write_ip(&mut buf).map(str::to_owned)
    }

    /// Copies the IP and family of `other`, keeping the port. `None` removes the IP.
    pub fn set_ip(&mut self, other: Option<&NetAddr>) {
        match other {
            Some(other) => self.ip = other.ip,
            None => self.ip_clear(),
        }
    }

    /// Returns the IP as IPv4, converting an IPv4-mapped IPv6 address.
    ///
    /// Returns `None` without IP or if the IPv6 address embeds no IPv4 address. The stored
    /// address is not changed; see [`NetAddr::normalize_to_ipv4`].
    pub const fn ipv4(&self) -> Option<Ipv4Addr> {
        match &self.ip {
            HostIp::Unset(_) => None,
            HostIp::V4(ipv4) => Some(*ipv4),
            HostIp::V6(ipv6) => ipv6.to_ipv4_mapped(),
        }
    }

    /// Like [`NetAddr::ipv4`], but also stores the converted address, changing the family to
    /// IPv4 on success.
    pub fn normalize_to_ipv4(&mut self) -> Option<Ipv4Addr> {
        let ipv4 = self.ipv4()?;
        self.ip = HostIp::V4(ipv4);
        Some(ipv4)
    }

    /// Returns the IP as IPv6, embedding an IPv4 address as `::ffff:a.b.c.d`.
    ///
    /// Returns `None` only without IP. The stored address is not changed; see
    /// [`NetAddr::normalize_to_ipv6`].
    pub const fn ipv6(&self) -> Option<ScopedIpv6Addr> {
        match &self.ip {
            HostIp::Unset(_) => None,
            HostIp::V4(ipv4) => Some(ScopedIpv6Addr::from_ipv4_mapped(*ipv4)),
            HostIp::V6(ipv6) => Some(*ipv6),
        }
    }

    /// Like [`NetAddr::ipv6`], but also stores the converted address, changing the family to
    /// IPv6.
    pub fn normalize_to_ipv6(&mut self) -> Option<ScopedIpv6Addr> {
        let ipv6 = self.ipv6()?;
        self.ip = HostIp::V6(ipv6);
        Some(ipv6)
    }

    /// Sets an IPv4 address, or removes the IP if `None`.
    pub fn set_ipv4(&mut self, ipv4: Option<Ipv4Addr>) {
        match ipv4 {
            Some(ipv4) => self.ip = HostIp::V4(ipv4),
            None => self.ip_clear(),
        }
    }

    /// Sets an IPv6 address, or removes the IP if `None`.
    pub fn set_ipv6(&mut self, ipv6: Option<ScopedIpv6Addr>) {
        match ipv6 {
            Some(ipv6) => self.ip = HostIp::V6(ipv6),
            None => self.ip_clear(),
        }
    }

    /// Returns the family of the IP, or the preferred family if there is no IP.
    pub const fn family(&self) -> AddrFamily {
        match &self.ip {
            HostIp::Unset(family) => *family,
            HostIp::V4(_) => AddrFamily::Ipv4,
            HostIp::V6(_) => AddrFamily::Ipv6,
        }
    }

    /// Changes the family, converting the IP so that it keeps its meaning.
    ///
    /// IPv4 becomes the IPv4-mapped IPv6 address. IPv6 becomes IPv4 only if it is IPv4-mapped.
    /// [`AddrFamily::None`] removes the IP.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::NotRepresentable`] if an IPv6 address that is not IPv4-mapped is
    /// converted to IPv4. The address is not modified.
    pub fn set_family(&mut self, family: AddrFamily) -> Result<(), ContractViolation> {
        self.ip = match (self.ip, family) {
            (_, AddrFamily::None) => HostIp::Unset(AddrFamily::None),
            (HostIp::Unset(_), family) => HostIp::Unset(family),
            (HostIp::V4(ipv4), AddrFamily::Ipv6) => {
                HostIp::V6(ScopedIpv6Addr::from_ipv4_mapped(ipv4))
            }
            (HostIp::V6(ipv6), AddrFamily::Ipv4) => {
                match ipv6.to_ipv4_mapped() {
                    Some(ipv4) => HostIp::V4(ipv4),
                    None => {
                        tracing::warn!(%ipv6, "IPv6 address has no IPv4 form");
                        return Err(ContractViolation::NotRepresentable {
                            addr: *ipv6.addr(),
                            target: family,
                        });
                    }
                }
            }
            (ip @ (HostIp::V4(_) | HostIp::V6(_)), _) => ip,
        };
        Ok(())
    }

    /// Returns the port.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Set the port.
    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    /// Returns the IP as a standard library address. The IPv6 scope is dropped.
    pub const fn ip_addr(&self) -> Option<IpAddr> {
        match &self.ip {
            HostIp::Unset(_) => None,
            HostIp::V4(ipv4) => Some(IpAddr::V4(*ipv4)),
            HostIp::V6(ipv6) => Some(IpAddr::V6(*ipv6.addr())),
        }
    }

    /// Returns the standard library socket address for binding or connecting.
    ///
    /// Without IP, the unspecified address of the preferred family is used. Returns `None` if
    /// there is neither IP nor family.
    pub const fn socket_addr(&self) -> Option<SocketAddr> {
        let addr = match &self.ip {
            HostIp::Unset(AddrFamily::None) => return None,
            HostIp::Unset(AddrFamily::Ipv4) => {
                SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, self.port))
            }
            HostIp::Unset(AddrFamily::Ipv6) => {
                SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::UNSPECIFIED, self.port, 0, 0))
            }
            HostIp::V4(ipv4) => SocketAddr::V4(SocketAddrV4::new(*ipv4, self.port)),
            HostIp::V6(ipv6) => SocketAddr::V6(SocketAddrV6::new(
                *ipv6.addr(),
                self.port,
                0,
                ipv6.scope_id(),
            )),
        };
        Some(addr)
    }
}

fn write_zero_literal<T: IpValue>(buf: &mut [u8]) -> Result<&str, ContractViolation> {
    write_display(&T::ZERO_LITERAL, T::TEXT_MAXN, buf)
}

impl From<SocketAddr> for NetAddr {
    fn from(addr: SocketAddr) -> Self {
        let ip = match addr {
            SocketAddr::V4(addr) => HostIp::V4(*addr.ip()),
            SocketAddr::V6(addr) => HostIp::V6(addr.into()),
        };
        Self {
            ip,
            port: addr.port(),
        }
    }
}

impl Display for NetAddr {
    /// Formats as `a.b.c.d:port` or `[v6]:port`.
    ///
    /// Without IP, the zero literal of the preferred family is used, IPv4 if there is none.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.ip {
            HostIp::V4(ipv4) => write!(f, "{ipv4}:{}", self.port),
            HostIp::V6(ipv6) => write!(f, "[{ipv6}]:{}", self.port),
            HostIp::Unset(AddrFamily::Ipv6) => {
                write!(f, "[{}]:{}", ScopedIpv6Addr::ZERO_LITERAL, self.port)
            }
            HostIp::Unset(_) => {
                write!(f, "{}:{}", <Ipv4Addr as IpValue>::ZERO_LITERAL, self.port)
            }
        }
    }
}

impl FromStr for NetAddr {
    type Err = AddressParseError;

    /// Parses `a.b.c.d:port` or `[v6]:port`, where the IPv6 part may carry a `%scope` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ip, port) = match s.strip_prefix('[') {
            Some(rest) => {
                let (ip, port) = rest.split_once("]:").ok_or(AddressKind::Socket)?;
                (HostIp::V6(ScopedIpv6Addr::parse(ip)?), port)
            }
            None => {
                let (ip, port) = s.rsplit_once(':').ok_or(AddressKind::Socket)?;
                (HostIp::V4(<Ipv4Addr as IpValue>::parse(ip)?), port)
            }
        };

        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressKind::Port.into());
        }
        let port = u16::from_str(port).or(Err(AddressKind::Port))?;

        Ok(Self { ip, port })
    }
}
