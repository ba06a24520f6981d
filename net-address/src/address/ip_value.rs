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
    fmt::{self, Debug, Display, Write},
    net::Ipv4Addr,
    str::FromStr,
};

use super::{AddrFamily, AddressKind, AddressParseError, ContractViolation};

/// Maximum length of an IPv4 address in text form (`255.255.255.255`).
pub const IPV4_TEXT_MAXN: usize = 15;

/// Maximum length of an IPv6 address in text form.
///
/// Covers the 39 characters of the full colon-hex form plus a `%4294967295` scope suffix.
pub const IPV6_TEXT_MAXN: usize = 50;

/// Operations an endpoint address requires from a single-family host address.
///
/// Implemented by [`Ipv4Addr`] and [`ScopedIpv6Addr`][super::ScopedIpv6Addr]. Value equality is
/// provided through [`Eq`].
pub trait IpValue: Copy + Eq + Debug + Display {
    /// The family of this address type.
    const FAMILY: AddrFamily;

    /// Minimum buffer size required by [`IpValue::write_text`].
    const TEXT_MAXN: usize;

    /// Text written in place of an absent address of this family.
    const ZERO_LITERAL: &'static str;

    /// Parses an address of this family from text.
    fn parse(text: &str) -> Result<Self, AddressParseError>;

    /// Returns true for the all-zero wildcard address.
    fn is_any(&self) -> bool;

    /// Returns true for the family's local-host address.
    fn is_loopback(&self) -> bool;

    /// Writes the text form of the address into `buf`, returning the written text.
    ///
    /// `buf` must hold at least [`IpValue::TEXT_MAXN`] bytes, regardless of the actual length of
    /// the text.
    fn write_text<'b>(&self, buf: &'b mut [u8]) -> Result<&'b str, ContractViolation> {
        write_display(self, Self::TEXT_MAXN, buf)
    }
}

impl IpValue for Ipv4Addr {
    const FAMILY: AddrFamily = AddrFamily::Ipv4;
    const TEXT_MAXN: usize = IPV4_TEXT_MAXN;
    const ZERO_LITERAL: &'static str = "0.0.0.0";

    fn parse(text: &str) -> Result<Self, AddressParseError> {
        Ipv4Addr::from_str(text).or(Err(AddressKind::Ipv4.into()))
    }

    fn is_any(&self) -> bool {
        self.is_unspecified()
    }

    /// Any address in `127.0.0.0/8`.
    fn is_loopback(&self) -> bool {
        Ipv4Addr::is_loopback(self)
    }
}

/// Formats `value` into `buf`, which must hold at least `required` bytes.
pub(crate) fn write_display<'b>(
    value: &dyn Display,
    required: usize,
    buf: &'b mut [u8],
) -> Result<&'b str, ContractViolation> {
    let inadequate = ContractViolation::InadequateBuffer {
        required,
        actual: buf.len(),
    };
    if buf.len() < required {
        tracing::warn!(required, actual = buf.len(), "Text buffer too small");
        return Err(inadequate);
    }

    let mut writer = SliceWriter { buf, len: 0 };
    write!(writer, "{value}").or(Err(inadequate))?;

    let SliceWriter { buf, len } = writer;
    let buf: &'b [u8] = buf;
    std::str::from_utf8(&buf[..len]).or(Err(inadequate))
}

/// [`fmt::Write`] over a fixed byte slice; fails instead of truncating.
struct SliceWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
