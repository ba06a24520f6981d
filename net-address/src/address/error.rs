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

//! Errors raised when parsing, formatting, comparing, or converting addresses.

use std::{
    fmt::{Display, Formatter},
    net::{Ipv4Addr, Ipv6Addr},
};

use thiserror::Error;

use super::AddrFamily;

/// The kind of text that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Dotted-decimal IPv4 address.
    Ipv4,
    /// Colon-hex IPv6 address, optionally with a `%scope` suffix.
    Ipv6,
    /// Address of either family.
    Ip,
    /// Endpoint address with a port.
    Socket,
    /// Decimal port number.
    Port,
}

impl Display for AddressKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            AddressKind::Ipv4 => "IPv4 address",
            AddressKind::Ipv6 => "IPv6 address",
            AddressKind::Ip => "IP address",
            AddressKind::Socket => "socket address",
            AddressKind::Port => "port number",
        };
        f.write_str(description)
    }
}

/// Error returned when text does not describe a valid address.
///
/// This is an expected runtime failure. The target of the parse is never modified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid {0}")]
pub struct AddressParseError(pub(crate) AddressKind);

impl AddressParseError {
    /// Returns the kind of text that failed to parse.
    pub const fn kind(&self) -> AddressKind {
        self.0
    }
}

impl From<AddressKind> for AddressParseError {
    fn from(kind: AddressKind) -> Self {
        Self(kind)
    }
}

/// A call that broke a documented precondition.
///
/// These indicate a programming error in the caller rather than bad input. They are returned
/// instead of aborting so that the embedding code decides whether to propagate or panic. The
/// address involved is left unmodified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// The text buffer is smaller than the family's maximum textual length.
    #[error("text buffer holds {actual} bytes but at least {required} are required")]
    InadequateBuffer {
        /// The family's maximum textual length.
        required: usize,
        /// The size of the supplied buffer.
        actual: usize,
    },
    /// The address has neither an IP nor a family, so there is nothing to format.
    #[error("address has no family")]
    NoFamily,
    /// The IPv6 address has no IPv4-mapped form, so it cannot become an IPv4 address.
    #[error("{addr} is not representable as an {target} address")]
    NotRepresentable {
        /// The address that was to be converted.
        addr: Ipv6Addr,
        /// The requested family.
        target: AddrFamily,
    },
    /// Mixed-family comparison where the IPv6 side is not IPv4-mapped.
    #[error("cannot compare {ipv4} with {ipv6}, which is not an IPv4-mapped address")]
    UnmappableComparison {
        /// The IPv4 side of the comparison.
        ipv4: Ipv4Addr,
        /// The IPv6 side of the comparison.
        ipv6: Ipv6Addr,
    },
}
