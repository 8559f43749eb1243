// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! Traits filled by the derive macros.
use crate::error::Result;
use std::path::PathBuf;

/// A struct that can be filled from a parsed unit file.
/// Derive it with `#[derive(UnitConfig)]`; every field is a section.
pub trait UnitConfig {
    /// Whether the section is known to this definition.
    fn has_section(&self, section: &str) -> bool;

    /// Apply one entry. Returns `Ok(false)` if the key is unknown in the section.
    fn set_entry(&mut self, section: &str, key: &str, value: &str) -> Result<bool>;
}

/// A section of a unit file. Derive it with `#[derive(UnitSection)]`.
pub trait UnitSection: Default {
    /// Apply one entry. Returns `Ok(false)` if the key is unknown.
    fn set_entry(&mut self, key: &str, value: &str) -> Result<bool>;
}

/// The value of a single entry.
pub trait UnitEntry: Sized {
    /// Error when the value cannot be parsed.
    type Error;

    /// Parse the value from its text.
    fn parse_from_str(input: &str) -> std::result::Result<Self, Self::Error>;
}

macro_rules! impl_for_types {
    ($($t:ty),+) => {
        $(
            impl UnitEntry for $t {
                type Error = <$t as std::str::FromStr>::Err;
                fn parse_from_str(input: &str) -> std::result::Result<Self, Self::Error> {
                    input.trim().parse::<$t>()
                }
            }
        )+
    };
}

impl_for_types!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, PathBuf);

impl UnitEntry for String {
    type Error = std::convert::Infallible;
    fn parse_from_str(input: &str) -> std::result::Result<Self, Self::Error> {
        Ok(input.to_string())
    }
}

/// Booleans are accepted the way systemd accepts them.
impl UnitEntry for bool {
    type Error = ();
    fn parse_from_str(input: &str) -> std::result::Result<Self, Self::Error> {
        match input.trim().to_lowercase().as_str() {
            "1" | "yes" | "y" | "true" | "t" | "on" => Ok(true),
            "0" | "no" | "n" | "false" | "f" | "off" => Ok(false),
            _ => Err(()),
        }
    }
}
