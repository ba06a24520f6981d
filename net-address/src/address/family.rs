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
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The IP family of an address.
///
/// An address without an IP may still carry a family; it is the preferred family used when
/// formatting the empty address or when parsing text into it later.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum AddrFamily {
    /// No family selected.
    #[default]
    None,
    /// IPv4, 32-bit addresses.
    Ipv4,
    /// IPv6, 128-bit addresses with a scope identifier.
    Ipv6,
}

impl AddrFamily {
    /// Returns true for [`AddrFamily::None`].
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl Display for AddrFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Ipv4 => "IPv4",
            Self::Ipv6 => "IPv6",
        })
    }
}

impl FromStr for AddrFamily {
    type Err = UnknownFamily;

    /// Parses a family name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::None, Self::Ipv4, Self::Ipv6]
            .into_iter()
            .find(|family| family.to_string().eq_ignore_ascii_case(s))
            .ok_or(UnknownFamily)
    }
}

/// The family name is not one of `none`, `ipv4`, or `ipv6`.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq, Default)]
#[error("unknown address family")]
pub struct UnknownFamily;
