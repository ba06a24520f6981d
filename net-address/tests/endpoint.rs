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

//! Endpoint behaviour across families, checked on seeded random addresses.

use std::net::{Ipv4Addr, Ipv6Addr};

use net_address::address::{
    AddrFamily, ContractViolation, IPV4_TEXT_MAXN, IPV6_TEXT_MAXN, NetAddr, ScopedIpv6Addr,
};
use rand::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;
use test_log::test;

const ROUNDS: usize = 1_000;

fn rng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(0x6e65_745f_6164_6472)
}

fn random_ipv4(rng: &mut XorShiftRng) -> Ipv4Addr {
    Ipv4Addr::from_bits(rng.next_u32())
}

fn random_ipv6(rng: &mut XorShiftRng) -> ScopedIpv6Addr {
    let bits = (u128::from(rng.next_u64()) << 64) | u128::from(rng.next_u64());
    let scope_id = if rng.next_u32() % 4 == 0 {
        rng.next_u32()
    } else {
        0
    };
    ScopedIpv6Addr::new(Ipv6Addr::from_bits(bits), scope_id)
}

fn endpoint(port: u16, ip: impl FnOnce(&mut NetAddr)) -> NetAddr {
    let mut addr = NetAddr::new();
    addr.set_port(port);
    ip(&mut addr);
    addr
}

#[test]
fn ipv4_text_round_trip() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let ipv4 = random_ipv4(&mut rng);
        let text = ipv4.to_string();

        let addr = NetAddr::from_parts(Some(&text), 1, AddrFamily::Ipv4).unwrap();
        let mut buf = [0u8; IPV4_TEXT_MAXN];
        assert_eq!(addr.write_ip(&mut buf), Ok(text.as_str()));
    }
}

#[test]
fn ipv6_text_round_trip() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let ipv6 = random_ipv6(&mut rng);
        let text = ipv6.to_string();

        let addr = NetAddr::from_parts(Some(&text), 1, AddrFamily::None).unwrap();
        assert_eq!(addr.family(), AddrFamily::Ipv6);
        let mut buf = [0u8; IPV6_TEXT_MAXN];
        assert_eq!(addr.write_ip(&mut buf), Ok(text.as_str()));
    }
}

#[test]
fn ipv4_survives_mapping() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let ipv4 = random_ipv4(&mut rng);
        let mut addr = endpoint(443, |addr| addr.set_ipv4(Some(ipv4)));

        addr.set_family(AddrFamily::Ipv6).unwrap();
        assert!(addr.ipv6().is_some_and(|ipv6| ipv6.is_ipv4_mapped()));
        assert_eq!(addr.normalize_to_ipv4(), Some(ipv4));
        assert_eq!(addr.family(), AddrFamily::Ipv4);
    }
}

#[test]
fn mapped_pairs_are_equal_both_ways() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let ipv4 = random_ipv4(&mut rng);
        let plain = endpoint(80, |addr| addr.set_ipv4(Some(ipv4)));
        let mapped = endpoint(80, |addr| {
            addr.set_ipv6(Some(ScopedIpv6Addr::from_ipv4_mapped(ipv4)));
        });

        assert_eq!(plain.is_equal(&mapped), Ok(true));
        assert_eq!(mapped.is_equal(&plain), Ok(true));
    }
}

#[test]
fn same_family_equality_is_an_equivalence() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let ipv6 = random_ipv6(&mut rng);
        let a = endpoint(53, |addr| addr.set_ipv6(Some(ipv6)));
        let b = a;
        let mut c = NetAddr::new();
        c.copy_from(&b);

        assert_eq!(a.is_equal(&a), Ok(true));
        assert_eq!(a.is_equal(&b), b.is_equal(&a));
        assert_eq!(b.is_equal(&c), Ok(true));
        assert_eq!(a.is_equal(&c), Ok(true));

        let other = endpoint(53, |addr| addr.set_ipv6(Some(random_ipv6(&mut rng))));
        assert_eq!(a.is_equal(&other), other.is_equal(&a));
    }
}

#[test]
fn unmapped_mixed_pairs_are_violations() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let ipv6 = random_ipv6(&mut rng);
        if ipv6.is_ipv4_mapped() {
            continue;
        }
        let ipv4 = endpoint(1, |addr| addr.set_ipv4(Some(random_ipv4(&mut rng))));
        let ipv6 = endpoint(1, |addr| addr.set_ipv6(Some(ipv6)));

        assert!(matches!(
            ipv4.ip_is_equal(&ipv6),
            Err(ContractViolation::UnmappableComparison { .. })
        ));
    }
}

#[test]
fn copies_do_not_alias() {
    let mut rng = rng();
    let mut src = endpoint(8080, |addr| addr.set_ipv6(Some(random_ipv6(&mut rng))));
    let expected = src.to_string();

    let mut copied = NetAddr::new();
    copied.copy_from(&src);
    let assigned = src;

    src.set_port(9090);
    src.set_ipv4(Some(random_ipv4(&mut rng)));
    src.set_family(AddrFamily::Ipv6).unwrap();

    assert_eq!(copied.to_string(), expected);
    assert_eq!(assigned.to_string(), expected);
}

#[test]
fn zero_literals() {
    let any_v4 = NetAddr::from_parts(Some("0.0.0.0"), 1, AddrFamily::None).unwrap();
    let any_v6 = NetAddr::from_parts(Some("::"), 1, AddrFamily::None).unwrap();
    let loopback_v4 = NetAddr::from_parts(Some("127.0.0.1"), 1, AddrFamily::None).unwrap();
    let loopback_v6 = NetAddr::from_parts(Some("::1"), 1, AddrFamily::None).unwrap();

    assert!(any_v4.ip_is_any());
    assert!(any_v6.ip_is_any());
    assert!(loopback_v4.ip_is_loopback());
    assert!(loopback_v6.ip_is_loopback());

    let empty = NetAddr::from_parts(None, 53, AddrFamily::Ipv4).unwrap();
    assert!(empty.ip_is_empty());
    assert_eq!(empty.ip_text().unwrap(), "0.0.0.0");
}
