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

//! Test utilities

/// Shortcut for `<string>.parse().unwrap()`.
macro_rules! parse {
    ($string:literal) => {
        $string.parse().unwrap()
    };
}

pub(crate) use parse;

/// Macro for creating parametrized tests.
///
/// The `param_test!` macro accepts the name of an existing function, followed by a list of case
/// names and their arguments. It expands to a module with a `#[test]` function for each of the
/// cases. Each test case calls the existing, named function with their provided arguments.
///
/// # Examples
///
/// ```ignore
/// param_test! {
///     is_loopback: [
///         ipv4: ("127.0.0.1", true),
///         ipv6: ("::1", true),
///         public: ("8.8.8.8", false)
///     ]
/// }
/// fn is_loopback(text: &str, expected: bool) {
///     assert_eq!(NetAddr::from_parts(Some(text), 0, AddrFamily::None).unwrap().ip_is_loopback(), expected);
/// }
/// ```
///
/// Test functions can also have return types, such as a [`Result`], and individual cases may
/// carry attributes such as `#[ignore]`.
macro_rules! param_test {
    ($func_name:ident -> $return_ty:ty: [
        $( $(#[$outer:meta])* $case_name:ident: ( $($args:expr),+ )  ),+$(,)?
    ]) => {
        mod $func_name {
            use super::*;

            $(
                #[test]
                $(#[$outer])*
                fn $case_name() -> $return_ty {
                    $func_name($($args),+)
                }
            )*
        }
    };
    ($func_name:ident: [
        $( $(#[$outer:meta])* $case_name:ident: ( $($args:expr),+ ) ),+$(,)?
    ]) => {
        param_test!($func_name -> (): [ $( $(#[$outer])* $case_name: ( $($args),+ ) ),+ ]);
    };
}

pub(crate) use param_test;

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::address::AddressParseError;

    super::param_test! {
        parses_with_return -> Result<(), AddressParseError>: [
            loopback: ("127.0.0.1", Ipv4Addr::LOCALHOST),
            unspecified: ("0.0.0.0", Ipv4Addr::UNSPECIFIED)
        ]
    }
    fn parses_with_return(text: &str, expected: Ipv4Addr) -> Result<(), AddressParseError> {
        let addr: crate::address::NetAddr = format!("{text}:1").parse()?;
        assert_eq!(addr.ipv4(), Some(expected));
        Ok(())
    }

    #[test]
    fn parse_shortcut() {
        let addr: Ipv4Addr = super::parse!("10.0.0.1");
        assert_eq!(addr, Ipv4Addr::new(10, 0, 0, 1));
    }
}
