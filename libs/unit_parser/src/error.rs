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

//! Definitions for all possible errors used in this crate.
use snafu::Snafu;

/// Errors used in crate.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[allow(missing_docs)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid syntax at line {}: '{}'.", line, content))]
    Syntax { line: usize, content: String },

    #[snafu(display("Entry {} at line {} is outside of any section.", key, line))]
    NoSection { line: usize, key: String },

    #[snafu(display("Section [{}] appears more than once.", name))]
    DuplicateSection { name: String },

    #[snafu(display("Failed to parse {} as the value of entry with key {}.", value, key))]
    ValueParsing { key: String, value: String },
}

/// Result alias of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error of an entry whose value does not parse.
pub fn value_parsing(key: &str, value: &str) -> Error {
    Error::ValueParsing {
        key: key.to_string(),
        value: value.to_string(),
    }
}
