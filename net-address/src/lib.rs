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

//! Endpoint address types that unify IPv4 and IPv6.
//!
//! An endpoint is a transport port paired with an IP address of either family. This crate
//! provides [`NetAddr`][address::NetAddr], a small `Copy` value that
//!
//! - stores an IPv4 address, an IPv6 address with scope identifier, or no address at all while
//!   still remembering the preferred [family][address::AddrFamily];
//! - compares addresses across families through the IPv4-mapped IPv6 embedding
//!   (`::ffff:a.b.c.d`), so `1.2.3.4` and `::ffff:1.2.3.4` are the same host;
//! - converts between the two families without losing meaning, refusing conversions that cannot
//!   be represented.
//!
//! Failures come in two kinds. Malformed text is an
//! [`AddressParseError`][address::AddressParseError] and is expected at runtime. Calls that break
//! a documented precondition return a [`ContractViolation`][address::ContractViolation], which the
//! caller may propagate or turn into a panic.
//!
//! This crate does not perform any I/O.

pub mod address;

#[cfg(test)]
pub(crate) mod test_utils;
