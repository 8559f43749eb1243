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

//! Crate for parsing systemd-style unit definitions.
//!
//! The text is split into sections of `Key=Value` entries by [`parse`], and a
//! definition struct deriving [`UnitConfig`] is filled entry by entry with
//! [`parse_definition`].
extern crate self as unit_parser;

mod config;
pub mod error;
mod parser;

pub use config::{UnitConfig, UnitEntry, UnitSection};
pub use error::{Error, Result};
pub use macros::{UnitConfig, UnitSection};
pub use parser::{parse, Section, UnitFile};

/// Parse `input` and fill `config` with its entries.
///
/// Unknown sections and keys are skipped with a warning, like systemd does.
pub fn parse_definition<T: UnitConfig>(input: &str, config: &mut T) -> Result<()> {
    let file = parse(input)?;
    for section in file.sections() {
        if !config.has_section(section.name()) {
            log::warn!("Unknown section [{}], ignoring.", section.name());
            continue;
        }
        for (key, value) in section.entries() {
            if !config.set_entry(section.name(), key, value)? {
                log::warn!("Unknown key {} in section [{}], ignoring.", key, section.name());
            }
        }
    }
    Ok(())
}

/// Split a space or comma separated list of names.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
